#![warn(missing_docs)]
#![allow(clippy::needless_return)]

//! # CTF metadata tree types
//!
//! `ctf-metadata` defines the tree shapes produced by a
//! [CTF](https://diamon.org/ctf/) (Common Trace Format) metadata (TSDL)
//! parser: [`FieldClass`], the six [`RootScope`]s, [`FieldPath`], and the
//! [`TraceClass`]/[`StreamClass`]/[`EventClass`] layers that own them.
//!
//! This crate is deliberately inert: it does not parse TSDL text and it does
//! not resolve the `length_ref`/`tag_ref` strings that [`FieldClass::Sequence`]
//! and [`FieldClass::Variant`] carry. It exists so that a resolver (see the
//! `ctf-resolver` crate), a downstream IR translator, and test fixtures can
//! all share one definition of the tree without any of them pulling in the
//! others' logic.
//!
//! # Overview
//!
//! - Build or deserialize a [`TraceClass`] from parser output.
//! - Hand it to `ctf_resolver::resolve_trace_class`, which walks every
//!   [`FieldClass::Sequence`] and [`FieldClass::Variant`] node and populates
//!   its `length`/`tag` field path and field-class back-reference.
//! - [`ResolveError`] describes every way that walk can fail.
//!
//! # Example
//!
//! ```
//! use ctf_metadata::{FieldClass, Integer, RootScope, Structure};
//!
//! let payload = FieldClass::Structure(Structure::new(vec![
//!     ("len".to_string(), FieldClass::Integer(Integer::unsigned(32))),
//! ]));
//! assert_eq!(RootScope::EventPayload as u8, 5);
//! ```

pub mod changelog;
mod error;
mod field_class;
mod path;
mod trace;

pub use error::ResolveError;
pub use field_class::ByteOrder;
pub use field_class::Enumeration;
pub use field_class::EnumerationRange;
pub use field_class::FieldClass;
pub use field_class::FloatingPoint;
pub use field_class::Integer;
pub use field_class::IntegerBase;
pub use field_class::Sequence;
pub use field_class::StringClass;
pub use field_class::Structure;
pub use field_class::TextEncoding;
pub use field_class::TypedArray;
pub use field_class::Variant;
pub use path::FieldPath;
pub use path::RootScope;
pub use trace::EventClass;
pub use trace::StreamClass;
pub use trace::TraceClass;
