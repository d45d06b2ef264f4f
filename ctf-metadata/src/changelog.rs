//! Release history

#[allow(unused_imports)]
use crate::*; // For docs

/// # v0.1.0 (2026-07-27)
/// - Initial release: [`FieldClass`], [`RootScope`], [`FieldPath`], the
///   [`TraceClass`]/[`StreamClass`]/[`EventClass`] layers, and
///   [`ResolveError`].
pub mod v0_1_0 {}
