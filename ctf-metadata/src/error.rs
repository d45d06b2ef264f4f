use crate::{FieldPath, RootScope};
use thiserror::Error;

/// The closed set of ways a reference can fail to resolve (§7).
///
/// Every variant is fatal to the enclosing `resolve(trace_class)` call.
/// [`ResolveError::Context`] is how a frame appends its own path/scope
/// information on the way back up the call stack, building the nested cause
/// chain the spec calls for without needing every leaf variant to know its
/// caller's path expression.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An empty path token (`..`, a leading `.`, or a trailing `.`).
    #[error("empty token in path expression {expression:?}")]
    Lexical {
        /// The offending expression.
        expression: String,
    },

    /// A required layer was absent, or already translated, at the point a
    /// reference needed to reach into it.
    #[error("scope precondition failed for {scope}: {reason}")]
    ScopePrecondition {
        /// The scope whose precondition failed.
        scope: RootScope,
        /// Human-readable description, e.g. "stream class absent" or
        /// "event class already translated".
        reason: String,
    },

    /// A token did not name any member/option of the compound it was
    /// resolved against.
    #[error("{token:?} does not name a member of the current compound (from {path_expr:?})")]
    Lookup {
        /// The unresolved token.
        token: String,
        /// The full expression the token came from.
        path_expr: String,
    },

    /// The target is not strictly before the source in the required sense:
    /// either it fails the intra-scope LCA/index check, or it is an ancestor
    /// or descendant of the source.
    #[error("causality violation: target {target_path} is not ordered before source {source_path}")]
    Causality {
        /// Path of the referring field.
        source_path: FieldPath,
        /// Path of the field it tried to reference.
        target_path: FieldPath,
    },

    /// A variant's tag target is not an enumeration, or a sequence's length
    /// target is not an unsigned integer.
    #[error("type mismatch: target {target_path} is not a valid {expected}")]
    Type {
        /// What the target was required to be ("enumeration" or "unsigned integer").
        expected: &'static str,
        /// Path of the field that failed the check.
        target_path: FieldPath,
    },

    /// Allocation failure building the token list or the descent stack.
    /// Rust's global allocator aborts rather than returning an error, so in
    /// practice this variant is unreachable; it is retained for parity with
    /// the source taxonomy.
    #[error("internal error: {detail}")]
    Internal {
        /// Description of the internal failure.
        detail: String,
    },

    /// A lower-level failure, annotated with the path expression and scope
    /// that were being resolved when it propagated through this frame.
    #[error("resolving {path_expr:?} from {scope}: {source}")]
    Context {
        /// The path expression this frame was resolving.
        path_expr: String,
        /// The root scope the reference was resolved relative to.
        scope: RootScope,
        /// The underlying failure.
        #[source]
        source: Box<ResolveError>,
    },
}

impl ResolveError {
    /// Wraps `self` with the path expression and scope of the frame that is
    /// about to propagate it, extending the nested cause chain.
    pub fn with_context(self, path_expr: impl Into<String>, scope: RootScope) -> Self {
        ResolveError::Context {
            path_expr: path_expr.into(),
            scope,
            source: Box::new(self),
        }
    }
}
