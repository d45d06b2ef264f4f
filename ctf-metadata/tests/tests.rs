use ctf_metadata::{FieldClass, FieldPath, Integer, RootScope, Sequence, Structure, Variant};

#[test]
fn root_scope_is_ordered_packet_header_to_event_payload() {
    assert!(RootScope::PacketHeader < RootScope::PacketContext);
    assert!(RootScope::PacketContext < RootScope::EventHeader);
    assert!(RootScope::EventHeader < RootScope::EventCommonContext);
    assert!(RootScope::EventCommonContext < RootScope::EventSpecificContext);
    assert!(RootScope::EventSpecificContext < RootScope::EventPayload);
}

#[test]
fn field_path_divergence_finds_shared_prefix() {
    let a = FieldPath {
        root: Some(RootScope::EventPayload),
        indices: vec![0, 1, 2],
    };
    let b = FieldPath {
        root: Some(RootScope::EventPayload),
        indices: vec![0, 1, 5],
    };
    assert_eq!(a.divergence(&b), Some(2));

    let prefix = FieldPath {
        root: Some(RootScope::EventPayload),
        indices: vec![0, 1],
    };
    assert_eq!(a.divergence(&prefix), None);
}

#[test]
fn field_path_root_is_not_a_valid_target() {
    let root = FieldPath::new(RootScope::EventPayload);
    assert!(root.is_root());

    let mut field = root.clone();
    field.push(0);
    assert!(!field.is_root());
}

#[test]
fn structure_member_index_looks_up_by_name() {
    let s = Structure::new(vec![
        ("len".to_string(), FieldClass::Integer(Integer::unsigned(32))),
        (
            "data".to_string(),
            FieldClass::Sequence(Sequence::new(
                FieldClass::Integer(Integer::unsigned(8)),
                "len",
            )),
        ),
    ]);
    assert_eq!(s.member_index("len"), Some(0));
    assert_eq!(s.member_index("data"), Some(1));
    assert_eq!(s.member_index("missing"), None);
}

#[test]
fn variant_is_resolved_tracks_tag_path() {
    let v = Variant::new(
        vec![
            ("a".to_string(), FieldClass::Integer(Integer::unsigned(8))),
            ("b".to_string(), FieldClass::Integer(Integer::unsigned(16))),
        ],
        "kind",
    );
    assert!(!v.is_resolved());
}

#[test]
fn field_class_round_trips_through_json() {
    let fc = FieldClass::Structure(Structure::new(vec![(
        "len".to_string(),
        FieldClass::Integer(Integer::unsigned(32)),
    )]));
    let json = serde_json::to_string(&fc).expect("serialize");
    let back: FieldClass = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(fc, back);
}
