use chrono::NaiveDate;
use css_styleguide::{
    value, CompilerSupport, Error, ManifestSerializer, Number, RawProperties, RawRuleSet,
    ReferenceValue, SerializerOptions, StructureMode, Value, Warning,
};

fn rules(items: &[(&str, &[(&str, &str)])]) -> RawRuleSet {
    items
        .iter()
        .map(|(name, properties)| {
            let properties: RawProperties = properties
                .iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string())))
                .collect();
            (name.to_string(), properties)
        })
        .collect()
}

fn frozen_options() -> SerializerOptions {
    let frozen = NaiveDate::from_ymd_opt(2012, 10, 15)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap();
    SerializerOptions::new().with_fixed_timestamp(frozen)
}

#[test]
fn test_get_available_references() {
    let serializer = ManifestSerializer::new();
    let raw = rules(&[
        ("styleguide-reference-foo", &[("content", "bar")]),
        ("styleguide-reference-pika", &[("content", "chu")]),
        ("dummy", &[("names", "yip")]),
        ("styleguide-reference-ping", &[("content", "pong")]),
    ]);

    assert_eq!(
        serializer.get_available_references(&raw),
        vec!["foo", "pika", "ping"]
    );
}

#[test]
fn test_get_meta_reference_names() {
    let cases: Vec<(RawRuleSet, Vec<&str>)> = vec![
        (
            rules(&[
                ("styleguide-metas-references", &[("names", "palette")]),
                ("dummy", &[("names", "yip")]),
            ]),
            vec!["palette"],
        ),
        (
            rules(&[(
                "styleguide-metas-references",
                &[("names", "palette schemes foo bar")],
            )]),
            vec!["palette", "schemes", "foo", "bar"],
        ),
        (
            rules(&[("styleguide-metas-references", &[("auto", "true")])]),
            vec![],
        ),
        (
            rules(&[
                (
                    "styleguide-metas-references",
                    &[("auto", "true"), ("excludes", "bar pong")],
                ),
                ("styleguide-reference-foo", &[("content", "dummy")]),
                ("styleguide-reference-bar", &[("content", "dummy")]),
                ("styleguide-reference-ping", &[("content", "dummy")]),
                ("styleguide-reference-pong", &[("content", "dummy")]),
            ]),
            vec!["foo", "ping"],
        ),
    ];

    for (raw, expected) in cases {
        let mut serializer = ManifestSerializer::new();
        assert_eq!(serializer.get_meta_reference_names(&raw).unwrap(), expected);
    }
}

#[test]
fn test_get_meta_reference_names_names_wins_over_auto() {
    let mut serializer = ManifestSerializer::new();
    let raw = rules(&[
        (
            "styleguide-metas-references",
            &[("auto", "true"), ("names", "bar")],
        ),
        ("styleguide-reference-foo", &[("content", "dummy")]),
        ("styleguide-reference-bar", &[("content", "dummy")]),
    ]);

    assert_eq!(serializer.get_meta_reference_names(&raw).unwrap(), vec!["bar"]);
}

#[test]
fn test_get_meta_reference_names_object_list() {
    let mut serializer = ManifestSerializer::new();
    let raw = rules(&[(
        "styleguide-metas-references",
        &[("splitter", "object-list"), ("names", r#"["palette", "spaces"]"#)],
    )]);

    assert_eq!(
        serializer.get_meta_reference_names(&raw).unwrap(),
        vec!["palette", "spaces"]
    );
}

#[test]
fn test_get_meta_reference_names_errors() {
    let cases = vec![
        rules(&[("styleguide-metas-foo", &[("names", "palette")])]),
        rules(&[("styleguide-metas-references", &[("content", "palette")])]),
        rules(&[("styleguide-metas-references", &[("names", "")])]),
        rules(&[("styleguide-metas-references", &[])]),
    ];

    for raw in cases {
        let mut serializer = ManifestSerializer::new();
        let result = serializer.get_meta_reference_names(&raw);
        assert!(matches!(result, Err(Error::Serializer(_))), "{:?}", raw);
    }

    let mut serializer = ManifestSerializer::new();
    let raw = rules(&[("styleguide-metas-references", &[("names", "foo-bar")])]);
    assert!(matches!(
        serializer.get_meta_reference_names(&raw),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn test_get_reference_each_structure() {
    let mut serializer = ManifestSerializer::new();
    let raw = rules(&[
        (
            "styleguide-reference-palette",
            &[
                ("structure", "flat"),
                ("keys", "black white"),
                ("values", "#000000 #ffffff"),
            ],
        ),
        (
            "styleguide-reference-spaces",
            &[("structure", "list"), ("items", "short normal")],
        ),
        (
            "styleguide-reference-version",
            &[("structure", "string"), ("value", "V42.0")],
        ),
        (
            "styleguide-reference-ratio",
            &[("structure", "number"), ("value", "-4.2")],
        ),
        (
            "styleguide-reference-config",
            &[("structure", "object-complex"), ("object", r#"{"a": [1, true]}"#)],
        ),
    ]);

    let palette = serializer.get_reference(&raw, "palette").unwrap();
    assert_eq!(palette.structure(), StructureMode::Flat);
    assert_eq!(
        palette.to_value(),
        value!({ "black": "#000000", "white": "#ffffff" })
    );

    assert_eq!(
        serializer.get_reference(&raw, "spaces").unwrap(),
        ReferenceValue::List(vec![Value::from("short"), Value::from("normal")])
    );
    assert_eq!(
        serializer.get_reference(&raw, "version").unwrap(),
        ReferenceValue::String("V42.0".to_string())
    );
    assert_eq!(
        serializer.get_reference(&raw, "ratio").unwrap(),
        ReferenceValue::Number(Number::Float(-4.2))
    );
    assert_eq!(
        serializer.get_reference(&raw, "config").unwrap().to_value(),
        value!({ "a": [1, true] })
    );
    assert!(serializer.warnings().is_empty());
}

#[test]
fn test_get_reference_errors() {
    let raw = rules(&[
        ("styleguide-reference-nostructure", &[("keys", "a")]),
        (
            "styleguide-reference-unknown",
            &[("structure", "matrix"), ("value", "a")],
        ),
        (
            "styleguide-reference-badprop",
            &[("structure", "string"), ("value", "a"), ("font-size", "1")],
        ),
    ]);

    let mut serializer = ManifestSerializer::new();
    assert!(matches!(
        serializer.get_reference(&raw, "missing"),
        Err(Error::Serializer(_))
    ));
    assert!(matches!(
        serializer.get_reference(&raw, "nostructure"),
        Err(Error::Serializer(_))
    ));
    assert!(matches!(
        serializer.get_reference(&raw, "unknown"),
        Err(Error::Serializer(_))
    ));
    assert!(matches!(
        serializer.get_reference(&raw, "badprop"),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn test_get_reference_deprecated_json_structure() {
    let mut serializer = ManifestSerializer::new();
    let raw = rules(&[(
        "styleguide-reference-legacy",
        &[("structure", "json"), ("object", r#"["a", 1]"#)],
    )]);

    let reference = serializer.get_reference(&raw, "legacy").unwrap();
    assert_eq!(reference.structure(), StructureMode::ObjectComplex);
    assert_eq!(reference.to_value(), value!(["a", 1]));

    assert_eq!(
        serializer.warnings(),
        &[Warning::DeprecatedStructure {
            reference: "legacy".to_string(),
            alias: "json".to_string(),
            replacement: "object-complex".to_string(),
        }]
    );
}

#[test]
fn test_get_enabled_references_keeps_given_order() {
    let mut serializer = ManifestSerializer::new();
    let raw = rules(&[
        (
            "styleguide-reference-foo",
            &[("structure", "string"), ("value", "foo")],
        ),
        (
            "styleguide-reference-bar",
            &[("structure", "string"), ("value", "bar")],
        ),
    ]);

    let names = vec!["bar".to_string(), "foo".to_string()];
    let references = serializer.get_enabled_references(&raw, &names).unwrap();
    let keys: Vec<_> = references.keys().cloned().collect();
    assert_eq!(keys, vec!["bar", "foo"]);
}

#[test]
fn test_serialize_metas() {
    let mut serializer = ManifestSerializer::with_options(frozen_options());
    let raw = rules(&[
        ("styleguide-metas-compiler", &[("support", "dartsass")]),
        ("styleguide-metas-references", &[("names", "flags")]),
        (
            "styleguide-reference-flags",
            &[("structure", "object-complex"), ("object", "(True, None)")],
        ),
    ]);

    let references = serializer.serialize(&raw).unwrap();

    assert_eq!(serializer.compiler_support(), CompilerSupport::Dartsass);
    assert_eq!(
        serializer.metas().to_value(),
        value!({
            "compiler_support": "dartsass",
            "references": ["flags"],
            "created": "2012-10-15T10:00:00"
        })
    );
    assert_eq!(references["flags"].to_value(), value!([true, null]));
}

#[test]
fn test_serialize_fails_on_first_invalid_reference() {
    let mut serializer = ManifestSerializer::new();
    let raw = rules(&[
        ("styleguide-metas-references", &[("names", "palette missing")]),
        (
            "styleguide-reference-palette",
            &[
                ("structure", "flat"),
                ("keys", "black white"),
                ("values", "#000000"),
            ],
        ),
    ]);

    match serializer.serialize(&raw) {
        Err(Error::Serializer(msg)) => {
            assert!(msg.contains("palette"), "{}", msg);
            assert!(msg.contains("different length"), "{}", msg);
        }
        other => panic!("Expected a serializer error, got {:?}", other),
    }
}

#[test]
fn test_serialize_clears_previous_warnings() {
    let mut serializer = ManifestSerializer::new();
    let legacy = rules(&[
        ("styleguide-metas-references", &[("names", "legacy")]),
        (
            "styleguide-reference-legacy",
            &[("structure", "json"), ("object", "[]")],
        ),
    ]);
    serializer.serialize(&legacy).unwrap();
    assert_eq!(serializer.warnings().len(), 1);

    let clean = rules(&[
        ("styleguide-metas-references", &[("names", "clean")]),
        (
            "styleguide-reference-clean",
            &[("structure", "object-complex"), ("object", "[]")],
        ),
    ]);
    serializer.serialize(&clean).unwrap();
    assert!(serializer.warnings().is_empty());
}

#[test]
fn test_serialize_truncation_warning() {
    let options = SerializerOptions::new().with_evaluation_limit(10);
    let mut serializer = ManifestSerializer::with_options(options);
    let raw = rules(&[
        ("styleguide-metas-references", &[("names", "short long")]),
        (
            "styleguide-reference-short",
            &[("structure", "object-complex"), ("object", "[1, 2]")],
        ),
        (
            "styleguide-reference-long",
            &[("structure", "object-complex"), ("object", "[1, 2, 3, 4, 5]")],
        ),
    ]);

    assert!(matches!(serializer.serialize(&raw), Err(Error::Serializer(_))));
    assert_eq!(
        serializer.warnings(),
        &[Warning::Truncated {
            reference: "long".to_string(),
            limit: 10,
            length: 15,
        }]
    );
}
