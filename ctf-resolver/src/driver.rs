use crate::lexer::lex_path;
use crate::locate::{locate, walk_field_path, ELEMENT_INDEX};
use crate::scope::{classify, Classification};
use crate::stack::DescentStack;
use crate::validate::{validate, TargetKind};
use ctf_metadata::{
    Enumeration, EventClass, FieldClass, FieldPath, Integer, ResolveError, RootScope, StreamClass,
    TraceClass,
};

/// Transient state for one `resolve_trace_class` call (§3 Resolve Context):
/// the six scope-root pointers reachable from wherever the driver currently
/// is, plus the translation state of the enclosing layers, which gates
/// absolute references per the §4.5 precondition table.
struct ResolveContext<'a> {
    roots: [Option<&'a FieldClass>; 6],
    current_root: RootScope,
    trace_translated: bool,
    /// `None` when no stream class is in scope yet (resolving trace-level
    /// fields); `Some(translated)` once one is.
    stream_translated: Option<bool>,
    /// `None` when no event class is in scope yet.
    event_translated: Option<bool>,
}

impl<'a> ResolveContext<'a> {
    fn root_class(&self, scope: RootScope) -> Option<&'a FieldClass> {
        self.roots[scope as usize]
    }

    /// §4.5's layer-translation precondition table, plus the "scope root
    /// absent" check that applies regardless of translation state.
    fn check_precondition(&self, scope: RootScope) -> Result<(), ResolveError> {
        let reason = match scope {
            RootScope::PacketHeader => {
                if self.trace_translated {
                    Some("trace class already translated")
                } else {
                    None
                }
            }
            RootScope::PacketContext | RootScope::EventHeader | RootScope::EventCommonContext => {
                match self.stream_translated {
                    None => Some("stream class absent"),
                    Some(true) => Some("stream class already translated"),
                    Some(false) => None,
                }
            }
            RootScope::EventSpecificContext | RootScope::EventPayload => match self.event_translated
            {
                None => Some("event class absent"),
                Some(true) => Some("event class already translated"),
                Some(false) => None,
            },
        };

        if let Some(reason) = reason {
            return Err(ResolveError::ScopePrecondition {
                scope,
                reason: reason.to_string(),
            });
        }

        if self.root_class(scope).is_none() {
            return Err(ResolveError::ScopePrecondition {
                scope,
                reason: "scope root absent".to_string(),
            });
        }

        Ok(())
    }
}

/// A sequence's or variant's resolved back-reference, recorded in the same
/// pre-order position [`apply_tree`] will encounter its owning node.
enum Resolved {
    Length {
        target_path: FieldPath,
        class: Integer,
    },
    Tag {
        target_path: FieldPath,
        class: Enumeration,
    },
}

/// Lexes, classifies, and locates `ref_expr`, then validates the result
/// against `kind`. `source_path` is the field path of the node doing the
/// referencing (needed for causality); `stack` is its ancestor chain.
fn resolve_reference<'a>(
    ref_expr: &str,
    kind: TargetKind,
    ctx: &ResolveContext<'a>,
    stack: &DescentStack<'a>,
    source_path: &FieldPath,
) -> Result<(FieldPath, &'a FieldClass), ResolveError> {
    let tokens = lex_path(ref_expr)?;

    let (target_path, target_class) = match classify(ref_expr) {
        Classification::Absolute {
            scope,
            prefix_tokens,
        } => {
            ctx.check_precondition(scope)?;
            let root = ctx.root_class(scope).expect("checked by precondition");
            let indices = locate(&tokens, prefix_tokens, root, None)
                .map_err(|e| lookup_error(e, ref_expr, source_path, scope, &[]))?;
            let target_class = walk_field_path(root, &indices).ok_or_else(|| ResolveError::Internal {
                detail: format!("resolved path for {ref_expr:?} does not walk back to a class"),
            })?;
            (
                FieldPath {
                    root: Some(scope),
                    indices,
                },
                target_class,
            )
        }
        Classification::Relative => {
            let mut last_err = None;
            let mut found = None;
            for i in (0..stack.size()).rev() {
                let frame = stack.at(i).expect("index within bounds");
                let prefix = stack.indices();
                let prefix = &prefix[..i];
                match locate(&tokens, 0, frame.field_class, Some(frame.index)) {
                    Ok(suffix) => {
                        let mut indices = prefix.to_vec();
                        indices.extend(suffix);
                        found = Some(indices);
                        break;
                    }
                    Err(e) => {
                        last_err =
                            Some(lookup_error(e, ref_expr, source_path, ctx.current_root, prefix));
                    }
                }
            }

            let indices = found.ok_or_else(|| {
                last_err.unwrap_or_else(|| ResolveError::Lookup {
                    token: tokens.first().map(|t| t.to_string()).unwrap_or_default(),
                    path_expr: ref_expr.to_string(),
                })
            })?;

            let scope_root = ctx
                .root_class(ctx.current_root)
                .expect("the scope currently being resolved is always addressable");
            let target_class = walk_field_path(scope_root, &indices).ok_or_else(|| {
                ResolveError::Internal {
                    detail: format!("resolved path for {ref_expr:?} does not walk back to a class"),
                }
            })?;

            (
                FieldPath {
                    root: Some(ctx.current_root),
                    indices,
                },
                target_class,
            )
        }
    };

    log::debug!("resolved {ref_expr:?} from {} to {target_path}", ctx.current_root);
    validate(source_path, &target_path, target_class, kind)?;
    Ok((target_path, target_class))
}

/// Turns a locator failure into a [`ResolveError`]. `prefix` is the index
/// path from the scope root (or, for a relative attempt, from the ancestor
/// frame being tried) down to the compound `locate` started from; on a
/// causality failure it is combined with the offending index to report the
/// path the reference would have named.
fn lookup_error(
    e: crate::locate::LocateError,
    path_expr: &str,
    source_path: &FieldPath,
    scope: RootScope,
    prefix: &[i32],
) -> ResolveError {
    match e {
        crate::locate::LocateError::Lookup { token } => ResolveError::Lookup {
            token,
            path_expr: path_expr.to_string(),
        },
        crate::locate::LocateError::Causality { index } => {
            let mut indices = prefix.to_vec();
            indices.push(index);
            ResolveError::Causality {
                source_path: source_path.clone(),
                target_path: FieldPath {
                    root: Some(scope),
                    indices,
                },
            }
        }
    }
}

fn analyze_field_class<'a>(
    node: &'a FieldClass,
    ctx: &ResolveContext<'a>,
    stack: &mut DescentStack<'a>,
    out: &mut Vec<Resolved>,
) -> Result<(), ResolveError> {
    let source_path = FieldPath {
        root: Some(ctx.current_root),
        indices: stack.indices(),
    };

    match node {
        FieldClass::Sequence(seq) => {
            if !seq.is_resolved() {
                let (target_path, target_class) = resolve_reference(
                    &seq.length_ref,
                    TargetKind::SequenceLength,
                    ctx,
                    stack,
                    &source_path,
                )
                .map_err(|e| e.with_context(seq.length_ref.clone(), ctx.current_root))?;
                let class = match target_class {
                    FieldClass::Integer(i) => i.clone(),
                    _ => {
                        return Err(ResolveError::Internal {
                            detail: "validated length target was not an integer".to_string(),
                        })
                    }
                };
                out.push(Resolved::Length { target_path, class });
            }
            stack.push(node, ELEMENT_INDEX);
            analyze_field_class(&seq.element, ctx, stack, out)?;
            stack.pop();
        }
        FieldClass::Variant(variant) => {
            if !variant.is_resolved() {
                let (target_path, target_class) = resolve_reference(
                    &variant.tag_ref,
                    TargetKind::VariantTag,
                    ctx,
                    stack,
                    &source_path,
                )
                .map_err(|e| e.with_context(variant.tag_ref.clone(), ctx.current_root))?;
                let class = match target_class {
                    FieldClass::Enumeration(e) => e.clone(),
                    _ => {
                        return Err(ResolveError::Internal {
                            detail: "validated tag target was not an enumeration".to_string(),
                        })
                    }
                };
                out.push(Resolved::Tag { target_path, class });
            }
            stack.push(node, -1);
            for (i, (_, option)) in variant.options.iter().enumerate() {
                stack.set_top_index(i as i32);
                analyze_field_class(option, ctx, stack, out)?;
            }
            stack.pop();
        }
        FieldClass::Structure(s) => {
            stack.push(node, -1);
            for (i, (_, member)) in s.members.iter().enumerate() {
                stack.set_top_index(i as i32);
                analyze_field_class(member, ctx, stack, out)?;
            }
            stack.pop();
        }
        FieldClass::Array(array) => {
            stack.push(node, ELEMENT_INDEX);
            analyze_field_class(&array.element, ctx, stack, out)?;
            stack.pop();
        }
        FieldClass::Integer(_)
        | FieldClass::Enumeration(_)
        | FieldClass::FloatingPoint(_)
        | FieldClass::String(_) => {}
    }
    Ok(())
}

fn analyze_tree<'a>(root: &'a FieldClass, ctx: &ResolveContext<'a>) -> Result<Vec<Resolved>, ResolveError> {
    let mut stack = DescentStack::new();
    let mut out = Vec::new();
    analyze_field_class(root, ctx, &mut stack, &mut out)?;
    Ok(out)
}

fn apply_field_class(node: &mut FieldClass, results: &mut std::vec::IntoIter<Resolved>) {
    match node {
        FieldClass::Sequence(seq) => {
            if !seq.is_resolved() {
                match results.next().expect("analyze/apply traversal order matches") {
                    Resolved::Length { target_path, class } => {
                        seq.length_path = Some(target_path);
                        seq.length_field_class = Some(class);
                    }
                    Resolved::Tag { .. } => unreachable!("traversal order matches analyze"),
                }
            }
            apply_field_class(&mut seq.element, results);
        }
        FieldClass::Variant(variant) => {
            if !variant.is_resolved() {
                match results.next().expect("analyze/apply traversal order matches") {
                    Resolved::Tag { target_path, class } => {
                        variant.tag_path = Some(target_path);
                        variant.tag_field_class = Some(class);
                    }
                    Resolved::Length { .. } => unreachable!("traversal order matches analyze"),
                }
            }
            for (_, option) in variant.options.iter_mut() {
                apply_field_class(option, results);
            }
        }
        FieldClass::Structure(s) => {
            for (_, member) in s.members.iter_mut() {
                apply_field_class(member, results);
            }
        }
        FieldClass::Array(array) => {
            apply_field_class(&mut array.element, results);
        }
        FieldClass::Integer(_)
        | FieldClass::Enumeration(_)
        | FieldClass::FloatingPoint(_)
        | FieldClass::String(_) => {}
    }
}

fn apply_tree(root: &mut FieldClass, results: Vec<Resolved>) {
    let mut iter = results.into_iter();
    apply_field_class(root, &mut iter);
}

/// Read-only half of resolving one scope root: builds the context and runs
/// the analysis pass. Takes only shared borrows, so the caller is free to
/// take a `&mut` into the same tree once this returns (the two-pass split
/// is what lets the driver read the descent-stack ancestry and the
/// cross-scope root pointers while also eventually mutating the node the
/// stack is rooted at).
fn analyze_scope_root<'a>(
    field_class: &'a FieldClass,
    scope: RootScope,
    roots: [Option<&'a FieldClass>; 6],
    trace_translated: bool,
    stream_translated: Option<bool>,
    event_translated: Option<bool>,
) -> Result<Vec<Resolved>, ResolveError> {
    let ctx = ResolveContext {
        roots,
        current_root: scope,
        trace_translated,
        stream_translated,
        event_translated,
    };
    analyze_tree(field_class, &ctx)
}

fn roots_snapshot<'a>(
    trace: &'a TraceClass,
    stream: Option<&'a StreamClass>,
    event: Option<&'a EventClass>,
) -> [Option<&'a FieldClass>; 6] {
    [
        trace.packet_header.as_ref(),
        stream.and_then(|s| s.packet_context.as_ref()),
        stream.and_then(|s| s.event_header.as_ref()),
        stream.and_then(|s| s.event_common_context.as_ref()),
        event.and_then(|e| e.event_specific_context.as_ref()),
        event.and_then(|e| e.event_payload.as_ref()),
    ]
}

/// Resolves every sequence length and variant tag reference in `trace`
/// (§4.8), mutating each node's `length_path`/`tag_path` and
/// `length_field_class`/`tag_field_class` in place.
///
/// On failure, no node is left partially mutated: every reference within a
/// scope root is resolved in a read-only analysis pass before any mutation
/// of that root begins, so a failing root is untouched and earlier roots
/// (already committed) are unaffected.
pub fn resolve_trace_class(trace: &mut TraceClass) -> Result<(), ResolveError> {
    let result = resolve_trace_class_inner(trace);
    if let Err(ref e) = result {
        log::error!("resolve_trace_class failed: {e}");
    }
    result
}

fn resolve_trace_class_inner(trace: &mut TraceClass) -> Result<(), ResolveError> {
    if !trace.translated {
        let results = match trace.packet_header.as_ref() {
            Some(field_class) => {
                let roots = roots_snapshot(trace, None, None);
                Some(analyze_scope_root(
                    field_class,
                    RootScope::PacketHeader,
                    roots,
                    false,
                    None,
                    None,
                )?)
            }
            None => None,
        };
        if let Some(results) = results {
            apply_tree(
                trace.packet_header.as_mut().expect("checked Some above"),
                results,
            );
        }
    }

    let trace_translated = trace.translated;
    let stream_count = trace.stream_classes.len();

    for stream_idx in 0..stream_count {
        if !trace.stream_classes[stream_idx].translated {
            for scope in [
                RootScope::PacketContext,
                RootScope::EventHeader,
                RootScope::EventCommonContext,
            ] {
                let results = {
                    let stream_ref = &trace.stream_classes[stream_idx];
                    let field_class = match scope {
                        RootScope::PacketContext => stream_ref.packet_context.as_ref(),
                        RootScope::EventHeader => stream_ref.event_header.as_ref(),
                        RootScope::EventCommonContext => stream_ref.event_common_context.as_ref(),
                        _ => unreachable!(),
                    };
                    match field_class {
                        Some(field_class) => {
                            let roots = roots_snapshot(trace, Some(stream_ref), None);
                            Some(analyze_scope_root(
                                field_class,
                                scope,
                                roots,
                                trace_translated,
                                Some(false),
                                None,
                            )?)
                        }
                        None => None,
                    }
                };
                if let Some(results) = results {
                    let stream = &mut trace.stream_classes[stream_idx];
                    let field = match scope {
                        RootScope::PacketContext => &mut stream.packet_context,
                        RootScope::EventHeader => &mut stream.event_header,
                        RootScope::EventCommonContext => &mut stream.event_common_context,
                        _ => unreachable!(),
                    };
                    apply_tree(field.as_mut().expect("checked Some above"), results);
                }
            }
        }

        let stream_translated = trace.stream_classes[stream_idx].translated;
        let event_count = trace.stream_classes[stream_idx].event_classes.len();

        for event_idx in 0..event_count {
            if trace.stream_classes[stream_idx].event_classes[event_idx].translated {
                continue;
            }
            for scope in [RootScope::EventSpecificContext, RootScope::EventPayload] {
                let results = {
                    let stream_ref = &trace.stream_classes[stream_idx];
                    let event_ref = &stream_ref.event_classes[event_idx];
                    let field_class = match scope {
                        RootScope::EventSpecificContext => event_ref.event_specific_context.as_ref(),
                        RootScope::EventPayload => event_ref.event_payload.as_ref(),
                        _ => unreachable!(),
                    };
                    match field_class {
                        Some(field_class) => {
                            let roots = roots_snapshot(trace, Some(stream_ref), Some(event_ref));
                            Some(analyze_scope_root(
                                field_class,
                                scope,
                                roots,
                                trace_translated,
                                Some(stream_translated),
                                Some(false),
                            )?)
                        }
                        None => None,
                    }
                };
                if let Some(results) = results {
                    let event = &mut trace.stream_classes[stream_idx].event_classes[event_idx];
                    let field = match scope {
                        RootScope::EventSpecificContext => &mut event.event_specific_context,
                        RootScope::EventPayload => &mut event.event_payload,
                        _ => unreachable!(),
                    };
                    apply_tree(field.as_mut().expect("checked Some above"), results);
                }
            }
        }
    }

    Ok(())
}
