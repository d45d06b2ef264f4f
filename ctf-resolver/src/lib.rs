#![warn(missing_docs)]
#![allow(clippy::needless_return)]

//! # ctf-resolver
//!
//! Resolves CTF (Common Trace Format) metadata sequence-length and
//! variant-tag references to validated field paths.
//!
//! A CTF trace class describes its packet and event layout as a tree of
//! field classes; a sequence names its element count by a textual path to
//! another field (`length_ref`), and a variant names its active option the
//! same way (`tag_ref`). This crate turns those textual references into
//! [`ctf_metadata::FieldPath`] values pointing at the field they name,
//! checking along the way that the referenced field is declared earlier in
//! packet order (causality) and is of a compatible kind (an unsigned
//! integer for a length, an enumeration for a tag).
//!
//! # Example
//!
//! ```no_run
//! use ctf_metadata::TraceClass;
//! use ctf_resolver::resolve_trace_class;
//!
//! let mut trace: TraceClass = serde_json::from_str("{}").unwrap();
//! resolve_trace_class(&mut trace).unwrap();
//! ```
//!
//! # Diagnostics
//!
//! This crate emits through the [`log`] facade rather than owning a
//! subscriber; install one (e.g. `env_logger`, as the `resolve-ctf` demo
//! binary does) to see `debug`-level path resolutions and `error`-level
//! failures.

mod changelog;
mod driver;
mod lexer;
mod locate;
mod scope;
mod stack;
mod validate;

pub use driver::resolve_trace_class;
