use chrono::NaiveDate;
use css_styleguide::{
    from_str, value, CompilerSupport, Error, Manifest, Number, ReferenceValue, SerializerOptions,
    Value, Warning,
};
use std::fs;
use std::path::{Path, PathBuf};

const SOURCE: &str = r##".styleguide-metas-references{
    --names: "palette text_color";
}

.styleguide-reference-palette{
    --structure: "flat";
    --keys: "black white";
    --values: "#000000 #ffffff";
}

.styleguide-reference-text_color{
    --structure: "nested";
    --keys: "black white";
    --selectors: ".bg-black .bg-white";
    --values: "#000000 #ffffff";
}"##;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data_fixtures")
        .join(name)
}

fn frozen_options() -> SerializerOptions {
    let frozen = NaiveDate::from_ymd_opt(2012, 10, 15)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap();
    SerializerOptions::new().with_fixed_timestamp(frozen)
}

fn expected_document() -> Value {
    value!({
        "metas": {
            "compiler_support": "libsass",
            "references": ["palette", "text_color"],
            "created": "2012-10-15T10:00:00"
        },
        "palette": { "black": "#000000", "white": "#ffffff" },
        "text_color": {
            "black": { "selectors": ".bg-black", "values": "#000000" },
            "white": { "selectors": ".bg-white", "values": "#ffffff" }
        }
    })
}

#[test]
fn test_load_string() {
    let manifest = from_str(SOURCE).unwrap();

    assert!(manifest.path().is_none());
    assert_eq!(manifest.metas().references, vec!["palette", "text_color"]);
    assert_eq!(
        manifest.get_reference("palette").unwrap().to_value(),
        value!({ "white": "#ffffff", "black": "#000000" })
    );
    assert_eq!(
        manifest.get_reference("text_color").unwrap().to_value(),
        value!({
            "black": { "selectors": ".bg-black", "values": "#000000" },
            "white": { "values": "#ffffff", "selectors": ".bg-white" }
        })
    );
}

#[test]
fn test_load_fixture_file() {
    let path = fixture("manifest_sample.css");
    let mut manifest = Manifest::new();
    manifest.load_path(&path).unwrap();

    assert_eq!(manifest.path(), Some(path.as_path()));
    assert_eq!(
        manifest.reference_names().collect::<Vec<_>>(),
        vec!["palette", "text_color", "spaces", "columns"]
    );
    assert_eq!(
        manifest.get_reference("spaces").unwrap().to_value(),
        value!(["tiny", "short", "normal", "large", "wide"])
    );
    assert_eq!(
        manifest.get_reference("columns").unwrap().to_value(),
        value!(["w30", "w50", "w70"])
    );

    // Ordinary rules of the stylesheet are not kept
    assert!(manifest
        .raw_rules()
        .keys()
        .all(|name| name.starts_with("styleguide-")));
}

#[test]
fn test_load_missing_file() {
    let mut manifest = Manifest::new();
    let result = manifest.load_path(fixture("nope.css"));
    match result {
        Err(Error::Io(msg)) => assert!(msg.contains("nope.css"), "{}", msg),
        other => panic!("Expected an IO error, got {:?}", other),
    }
}

#[test]
fn test_load_failure_keeps_previous_state() {
    let mut manifest = Manifest::new();
    manifest.load(SOURCE, None).unwrap();

    let broken = r#".styleguide-metas-references { --names: "missing"; }"#;
    assert!(manifest.load(broken, None).is_err());

    assert_eq!(
        manifest.reference_names().collect::<Vec<_>>(),
        vec!["palette", "text_color"]
    );
}

#[test]
fn test_load_parse_error_diagnostics() {
    let source = ".styleguide-metas-references { --auto: \"true\"; }\n.broken";
    match from_str(source) {
        Err(err @ Error::Parse { .. }) => {
            assert_eq!(err.diagnostics().len(), 1);
            assert!(err.diagnostics()[0].starts_with("Line 2 - Column 1 : [invalid]"));
        }
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_to_dict() {
    let mut manifest = Manifest::with_options(frozen_options());
    manifest.load(SOURCE, None).unwrap();

    assert_eq!(manifest.to_dict(), expected_document());
}

#[test]
fn test_to_json_matches_fixture() {
    let mut manifest = Manifest::with_options(frozen_options());
    manifest.load_path(fixture("manifest_sample.css")).unwrap();

    let expected = fs::read_to_string(fixture("manifest_sample.json")).unwrap();
    assert_eq!(manifest.to_json(4).unwrap(), expected.trim_end());
}

#[test]
fn test_to_json_is_valid_json() {
    let mut manifest = Manifest::with_options(frozen_options());
    manifest.load(SOURCE, None).unwrap();

    let dump: Value = serde_json::from_str(&manifest.to_json(2).unwrap()).unwrap();
    assert_eq!(dump, expected_document());
}

#[test]
fn test_from_dict() {
    let source = value!({
        "metas": {
            "references": ["palette", "text_color"],
            "created": "2012-10-15T10:00:00"
        },
        "palette": { "white": "#ffffff", "black": "#000000" },
        "text_color": {
            "black": { "selectors": ".bg-black", "values": "#000000" },
            "white": { "values": "#ffffff", "selectors": ".bg-white" }
        }
    });

    let manifest = Manifest::from_dict(&source).unwrap();

    assert_eq!(manifest.metas().references, vec!["palette", "text_color"]);
    assert!(manifest.metas().compiler_support.is_none());
    assert_eq!(
        manifest.get_reference("palette").and_then(|r| r.as_flat()).and_then(|p| p.get("white")),
        Some(&Value::from("#ffffff"))
    );
    assert_eq!(manifest.to_dict(), source);
}

#[test]
fn test_from_dict_rejects_invalid_names() {
    let source = value!({
        "metas": { "references": [] },
        "text-color": "nope"
    });

    assert!(matches!(
        Manifest::from_dict(&source),
        Err(Error::Validation { .. })
    ));
}

#[test]
fn test_json_round_trip_every_structure() {
    let options = frozen_options().with_compiler_support(CompilerSupport::Dartsass);
    let mut manifest = Manifest::with_options(options);
    manifest
        .load(
            r##"
            .styleguide-metas-references { --auto: "true"; }
            .styleguide-reference-palette {
                --structure: "flat";
                --keys: "black white";
                --values: "#000000 #ffffff";
            }
            .styleguide-reference-schemes {
                --structure: "nested";
                --keys: "black";
                --background: "#000000";
            }
            .styleguide-reference-spaces { --structure: "list"; --items: "a b"; }
            .styleguide-reference-version { --structure: "string"; --value: "V42.0"; }
            .styleguide-reference-life { --structure: "number"; --value: "42"; }
            .styleguide-reference-config {
                --structure: "object-complex";
                --object: "{'debug': False, 'sizes': (1, 2.5), 'name': None}";
            }
            "##,
            None,
        )
        .unwrap();

    let restored = Manifest::from_json(&manifest.to_json(4).unwrap()).unwrap();
    assert_eq!(restored.to_dict(), manifest.to_dict());
    assert_eq!(
        restored.reference_names().collect::<Vec<_>>(),
        manifest.reference_names().collect::<Vec<_>>()
    );
    assert_eq!(
        restored.get_reference("life"),
        Some(&ReferenceValue::Number(Number::Integer(42)))
    );
}

#[test]
fn test_deprecated_structure_warning_is_kept() {
    let manifest = from_str(
        r#"
        .styleguide-metas-references { --names: "legacy"; }
        .styleguide-reference-legacy {
            --structure: "json";
            --splitter: "json-list";
            --object: '{"a": 1}';
        }
        "#,
    )
    .unwrap();

    assert_eq!(manifest.warnings().len(), 1);
    assert!(matches!(
        manifest.warnings()[0],
        Warning::DeprecatedStructure { .. }
    ));
    assert_eq!(
        manifest.get_reference("legacy").unwrap().to_value(),
        value!({ "a": 1 })
    );
}
