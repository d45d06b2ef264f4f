use ctf_metadata::{
    Enumeration, EnumerationRange, EventClass, FieldClass, FieldPath, Integer, ResolveError,
    RootScope, Sequence, StreamClass, Structure, TraceClass, TypedArray, Variant,
};
use ctf_resolver::resolve_trace_class;

fn payload_trace(payload: FieldClass) -> TraceClass {
    TraceClass {
        packet_header: None,
        stream_classes: vec![StreamClass {
            packet_context: None,
            event_header: None,
            event_common_context: None,
            event_classes: vec![EventClass {
                event_specific_context: None,
                event_payload: Some(payload),
                translated: false,
            }],
            translated: false,
        }],
        translated: false,
    }
}

fn event_payload(trace: &TraceClass) -> &FieldClass {
    trace.stream_classes[0].event_classes[0]
        .event_payload
        .as_ref()
        .unwrap()
}

/// Scenario 1: sibling length.
#[test]
fn sibling_length_resolves() {
    let mut trace = payload_trace(FieldClass::Structure(Structure::new(vec![
        ("len".to_string(), FieldClass::Integer(Integer::unsigned(32))),
        (
            "data".to_string(),
            FieldClass::Sequence(Sequence::new(
                FieldClass::Integer(Integer::unsigned(8)),
                "len",
            )),
        ),
    ])));

    resolve_trace_class(&mut trace).unwrap();

    let FieldClass::Structure(s) = event_payload(&trace) else {
        panic!("expected structure");
    };
    let FieldClass::Sequence(seq) = &s.members[1].1 else {
        panic!("expected sequence");
    };
    assert_eq!(
        seq.length_path,
        Some(FieldPath {
            root: Some(RootScope::EventPayload),
            indices: vec![0],
        })
    );
    assert_eq!(seq.length_field_class.as_ref().unwrap().size_bits, 32);
}

/// Scenario 2: absolute cross-scope variant tag.
#[test]
fn absolute_cross_scope_tag_resolves() {
    let kind = Enumeration {
        base: Integer::unsigned(8),
        ranges: vec![
            EnumerationRange {
                label: "A".to_string(),
                start: 0,
                end: 0,
            },
            EnumerationRange {
                label: "B".to_string(),
                start: 1,
                end: 1,
            },
        ],
    };

    let mut trace = TraceClass {
        packet_header: None,
        stream_classes: vec![StreamClass {
            packet_context: None,
            event_header: None,
            event_common_context: Some(FieldClass::Structure(Structure::new(vec![(
                "kind".to_string(),
                FieldClass::Enumeration(kind.clone()),
            )]))),
            event_classes: vec![EventClass {
                event_specific_context: None,
                event_payload: Some(FieldClass::Variant(Variant::new(
                    vec![
                        ("a".to_string(), FieldClass::Integer(Integer::unsigned(8))),
                        ("b".to_string(), FieldClass::Integer(Integer::unsigned(16))),
                    ],
                    "stream.event.context.kind",
                ))),
                translated: false,
            }],
            translated: false,
        }],
        translated: false,
    };

    resolve_trace_class(&mut trace).unwrap();

    let FieldClass::Variant(variant) = event_payload(&trace) else {
        panic!("expected variant");
    };
    assert_eq!(
        variant.tag_path,
        Some(FieldPath {
            root: Some(RootScope::EventCommonContext),
            indices: vec![0],
        })
    );
    assert_eq!(variant.tag_field_class.as_ref().unwrap(), &kind);
}

/// Scenario 3: causality violation (length declared after its sequence).
#[test]
fn causality_violation_is_rejected() {
    let mut trace = payload_trace(FieldClass::Structure(Structure::new(vec![
        (
            "data".to_string(),
            FieldClass::Sequence(Sequence::new(
                FieldClass::Integer(Integer::unsigned(8)),
                "len",
            )),
        ),
        ("len".to_string(), FieldClass::Integer(Integer::unsigned(32))),
    ])));

    let before = trace.clone();
    let err = resolve_trace_class(&mut trace).unwrap_err();
    match err {
        ResolveError::Context { source, .. } => {
            assert!(matches!(*source, ResolveError::Causality { .. }));
        }
        other => panic!("expected Context wrapping Causality, got {other:?}"),
    }
    assert_eq!(trace, before, "a failing trace must be left unmutated");
}

/// Scenario 4: wrong target type (length resolves to a signed integer).
#[test]
fn wrong_target_type_is_rejected() {
    let mut trace = payload_trace(FieldClass::Structure(Structure::new(vec![
        ("len".to_string(), FieldClass::Integer(Integer::signed(32))),
        (
            "data".to_string(),
            FieldClass::Sequence(Sequence::new(
                FieldClass::Integer(Integer::unsigned(8)),
                "len",
            )),
        ),
    ])));

    let err = resolve_trace_class(&mut trace).unwrap_err();
    assert!(matches!(err, ResolveError::Context { .. }));
}

/// Scenario 5: absolute reference into stream scope from packet header, where
/// no stream class is yet in scope at trace-level resolution.
#[test]
fn missing_stream_class_is_a_scope_precondition_failure() {
    let mut trace = TraceClass {
        packet_header: Some(FieldClass::Structure(Structure::new(vec![(
            "count".to_string(),
            FieldClass::Sequence(Sequence::new(
                FieldClass::Integer(Integer::unsigned(8)),
                "stream.packet.context.x",
            )),
        )]))),
        stream_classes: vec![],
        translated: false,
    };

    let err = resolve_trace_class(&mut trace).unwrap_err();
    match err {
        ResolveError::Context { source, .. } => {
            assert!(matches!(*source, ResolveError::ScopePrecondition { .. }));
        }
        other => panic!("expected Context wrapping ScopePrecondition, got {other:?}"),
    }
}

/// Scenario 6: nested relative reference resolves upward into the enclosing structure.
#[test]
fn nested_relative_reference_resolves_upward() {
    let mut trace = payload_trace(FieldClass::Structure(Structure::new(vec![(
        "a".to_string(),
        FieldClass::Structure(Structure::new(vec![
            ("b".to_string(), FieldClass::Integer(Integer::unsigned(32))),
            (
                "c".to_string(),
                FieldClass::Sequence(Sequence::new(
                    FieldClass::Integer(Integer::unsigned(8)),
                    "b",
                )),
            ),
        ])),
    )])));

    resolve_trace_class(&mut trace).unwrap();

    let FieldClass::Structure(outer) = event_payload(&trace) else {
        panic!("expected structure");
    };
    let FieldClass::Structure(inner) = &outer.members[0].1 else {
        panic!("expected nested structure");
    };
    let FieldClass::Sequence(seq) = &inner.members[1].1 else {
        panic!("expected sequence");
    };
    assert_eq!(
        seq.length_path,
        Some(FieldPath {
            root: Some(RootScope::EventPayload),
            indices: vec![0, 0],
        })
    );
}

/// Already-translated layers are skipped entirely; re-running on fully
/// translated input performs no lookups and is a no-op success.
#[test]
fn idempotent_on_already_translated_input() {
    let mut trace = payload_trace(FieldClass::Structure(Structure::new(vec![
        ("len".to_string(), FieldClass::Integer(Integer::unsigned(32))),
        (
            "data".to_string(),
            FieldClass::Sequence(Sequence::new(
                FieldClass::Integer(Integer::unsigned(8)),
                "len",
            )),
        ),
    ])));
    resolve_trace_class(&mut trace).unwrap();

    trace.translated = true;
    trace.stream_classes[0].translated = true;
    trace.stream_classes[0].event_classes[0].translated = true;

    let before = trace.clone();
    resolve_trace_class(&mut trace).unwrap();
    assert_eq!(trace, before);
}

/// Array elements are visited (and their sequences/variants resolved) even
/// though the array's own length is fixed and needs no reference.
#[test]
fn array_element_sequence_resolves() {
    let mut trace = payload_trace(FieldClass::Structure(Structure::new(vec![
        ("len".to_string(), FieldClass::Integer(Integer::unsigned(32))),
        (
            "rows".to_string(),
            FieldClass::Array(TypedArray::new(
                FieldClass::Sequence(Sequence::new(
                    FieldClass::Integer(Integer::unsigned(8)),
                    "len",
                )),
                4,
            )),
        ),
    ])));

    resolve_trace_class(&mut trace).unwrap();

    let FieldClass::Structure(s) = event_payload(&trace) else {
        panic!("expected structure");
    };
    let FieldClass::Array(array) = &s.members[1].1 else {
        panic!("expected array");
    };
    let FieldClass::Sequence(seq) = array.element.as_ref() else {
        panic!("expected sequence element");
    };
    assert!(seq.is_resolved());
}

/// JSON fixture round-trip: a trace class deserialized from JSON resolves
/// and re-serializes with paths populated.
#[test]
fn json_fixture_round_trips() {
    let json = r#"
    {
        "stream_classes": [{
            "event_classes": [{
                "event_payload": {
                    "class": "structure",
                    "members": [
                        ["len", {"class": "integer", "size_bits": 32, "alignment_bits": 32, "is_signed": false}],
                        ["data", {"class": "sequence", "element": {"class": "integer", "size_bits": 8, "alignment_bits": 8, "is_signed": false}, "length_ref": "len"}]
                    ]
                }
            }]
        }]
    }
    "#;

    let mut trace: TraceClass = serde_json::from_str(json).unwrap();
    resolve_trace_class(&mut trace).unwrap();

    let reserialized = serde_json::to_string(&trace).unwrap();
    let round_tripped: TraceClass = serde_json::from_str(&reserialized).unwrap();
    assert_eq!(trace, round_tripped);

    let FieldClass::Structure(s) = event_payload(&trace) else {
        panic!("expected structure");
    };
    let FieldClass::Sequence(seq) = &s.members[1].1 else {
        panic!("expected sequence");
    };
    assert!(seq.is_resolved());
}

/// Each error variant's `Display` names the path/scope involved, per the
/// error-handling design.
#[test]
fn error_display_names_path_and_scope() {
    let mut trace = payload_trace(FieldClass::Structure(Structure::new(vec![(
        "data".to_string(),
        FieldClass::Sequence(Sequence::new(
            FieldClass::Integer(Integer::unsigned(8)),
            "missing",
        )),
    )])));

    let err = resolve_trace_class(&mut trace).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("missing"));
}
