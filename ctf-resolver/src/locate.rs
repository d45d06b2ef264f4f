use ctf_metadata::FieldClass;

/// Sentinel recorded when descent passes through an array or sequence
/// parent, whose single element class has no named position.
pub const ELEMENT_INDEX: i32 = -1;

/// Failure from [`locate`]; the caller (which knows the path expression and
/// the current scope) turns this into a [`ctf_metadata::ResolveError`] with
/// full context.
pub enum LocateError {
    /// `token` does not name a member/option of the compound being walked.
    Lookup { token: String },
    /// The looked-up member/option index was not strictly less than the
    /// source index at the level where the walk began. Carries that index,
    /// so the caller can report the path it would have produced.
    Causality { index: i32 },
}

/// Walks `tokens` against `compound`, starting at token `start`, to produce
/// the index path to a target field class (§4.4).
///
/// `source_index` is the position of the referring field within `compound`,
/// or `None` to mean "+infinity" (no causality constraint at this level,
/// used for absolute-path resolution per §4.5).
pub fn locate(
    tokens: &[&str],
    start: usize,
    compound: &FieldClass,
    source_index: Option<i32>,
) -> Result<Vec<i32>, LocateError> {
    let mut indices = Vec::new();
    let mut current = compound;
    let mut token_pos = start;
    let mut descended = false;

    loop {
        match current {
            FieldClass::Structure(_) | FieldClass::Variant(_) => {
                if token_pos >= tokens.len() {
                    break;
                }
                let token = tokens[token_pos];
                let member_index = current
                    .named_child_index(token)
                    .ok_or_else(|| LocateError::Lookup {
                        token: token.to_string(),
                    })?;

                if !descended {
                    if let Some(source) = source_index {
                        if member_index as i32 >= source {
                            return Err(LocateError::Causality {
                                index: member_index as i32,
                            });
                        }
                    }
                    descended = true;
                }

                indices.push(member_index as i32);
                current = current.named_child(member_index).expect("index just looked up");
                token_pos += 1;
            }
            FieldClass::Array(_) | FieldClass::Sequence(_) => {
                indices.push(ELEMENT_INDEX);
                current = current.element().expect("array/sequence always has an element class");
                descended = true;
            }
            _ => break,
        }
    }

    if token_pos < tokens.len() {
        return Err(LocateError::Lookup {
            token: tokens[token_pos].to_string(),
        });
    }

    Ok(indices)
}

/// Walks `indices` from `root` to recover the target field class, as §4.7
/// describes ("walking it again from its root produces the target class").
pub fn walk_field_path<'a>(root: &'a FieldClass, indices: &[i32]) -> Option<&'a FieldClass> {
    let mut current = root;
    for &index in indices {
        current = if index == ELEMENT_INDEX {
            current.element()?
        } else {
            current.named_child(index as usize)?
        };
    }
    Some(current)
}
