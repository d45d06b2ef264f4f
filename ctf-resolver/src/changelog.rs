//! Release history

#[allow(unused_imports)]
use crate::*; // For docs

/// # v0.1.0
/// - Initial release: [`resolve_trace_class`] implementing the path lexer,
///   scope classifier, descent stack, target locator/validator, and driver.
pub mod v0_1_0 {}
