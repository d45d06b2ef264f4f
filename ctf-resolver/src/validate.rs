use ctf_metadata::{FieldClass, FieldPath, ResolveError};

/// What the target is required to be, so [`validate`] can report the right
/// expected-kind string in a [`ResolveError::Type`] (§4.7 rule 4).
#[derive(Clone, Copy)]
pub enum TargetKind {
    SequenceLength,
    VariantTag,
}

impl TargetKind {
    fn expected(self) -> &'static str {
        match self {
            TargetKind::SequenceLength => "unsigned integer",
            TargetKind::VariantTag => "enumeration",
        }
    }

    fn accepts(self, class: &FieldClass) -> bool {
        match self {
            TargetKind::SequenceLength => class.is_unsigned_integer(),
            TargetKind::VariantTag => class.is_enumeration(),
        }
    }
}

/// Applies the four target-validity rules (§4.7) to a resolved `target_path`
/// / `target_class` pair.
///
/// `source_path` is the path of the referring field (the sequence or
/// variant doing the resolving); rule 1 ("must name a field, not a bare
/// scope root") is enforced by the locator never returning an empty index
/// list, so it is not re-checked here.
pub fn validate(
    source_path: &FieldPath,
    target_path: &FieldPath,
    target_class: &FieldClass,
    kind: TargetKind,
) -> Result<(), ResolveError> {
    // Rule 2: scope ordering. A target in an earlier scope than the source
    // is always causally before it; a target in a later scope never is.
    match (source_path.root, target_path.root) {
        (Some(source_scope), Some(target_scope)) if target_scope > source_scope => {
            return Err(ResolveError::Causality {
                source_path: source_path.clone(),
                target_path: target_path.clone(),
            });
        }
        (Some(source_scope), Some(target_scope)) if target_scope < source_scope => {
            return validate_type(target_path, target_class, kind);
        }
        _ => {}
    }

    // Rule 3: same scope, so compare at the lowest common ancestor. A
    // missing divergence point means one path is an ancestor/prefix of the
    // other, which is rejected rather than treated as causally earlier.
    match source_path.divergence(target_path) {
        None => {
            return Err(ResolveError::Causality {
                source_path: source_path.clone(),
                target_path: target_path.clone(),
            });
        }
        Some(depth) => {
            let source_index = source_path.indices[depth];
            let target_index = target_path.indices[depth];
            if target_index >= source_index {
                return Err(ResolveError::Causality {
                    source_path: source_path.clone(),
                    target_path: target_path.clone(),
                });
            }
        }
    }

    validate_type(target_path, target_class, kind)
}

fn validate_type(
    target_path: &FieldPath,
    target_class: &FieldClass,
    kind: TargetKind,
) -> Result<(), ResolveError> {
    if kind.accepts(target_class) {
        Ok(())
    } else {
        Err(ResolveError::Type {
            expected: kind.expected(),
            target_path: target_path.clone(),
        })
    }
}
