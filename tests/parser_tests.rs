use css_styleguide::{Error, RawRuleSet, SourceParser};

fn parse(source: &str) -> RawRuleSet {
    SourceParser::new().parse(source).unwrap()
}

fn pairs(rules: &RawRuleSet) -> Vec<(String, Vec<(String, Option<String>)>)> {
    rules
        .iter()
        .map(|(name, properties)| {
            (
                name.clone(),
                properties
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            )
        })
        .collect()
}

fn expected(items: &[(&str, &[(&str, &str)])]) -> Vec<(String, Vec<(String, Option<String>)>)> {
    items
        .iter()
        .map(|(name, properties)| {
            (
                name.to_string(),
                properties
                    .iter()
                    .map(|(k, v)| (k.to_string(), Some(v.to_string())))
                    .collect(),
            )
        })
        .collect()
}

#[test]
fn test_single_line() {
    assert_eq!(
        pairs(&parse(r#".styleguide-foo{content: "yep"}"#)),
        expected(&[("styleguide-foo", &[("content", "yep")])])
    );
}

#[test]
fn test_custom_property() {
    assert_eq!(
        pairs(&parse(r#".styleguide-foo{--myvar: "ping"}"#)),
        expected(&[("styleguide-foo", &[("myvar", "ping")])])
    );
}

#[test]
fn test_multiple_rules() {
    let source = r#".styleguide-foo{ content: "yep"; quote: "pika" } .styleguide-bar{content: "hola"}"#;
    assert_eq!(
        pairs(&parse(source)),
        expected(&[
            ("styleguide-foo", &[("content", "yep"), ("quote", "pika")]),
            ("styleguide-bar", &[("content", "hola")]),
        ])
    );
}

#[test]
fn test_single_quoted_values() {
    let source = r#".styleguide-foo{ --items: '["a", "b"]'; }"#;
    assert_eq!(
        pairs(&parse(source)),
        expected(&[("styleguide-foo", &[("items", r#"["a", "b"]"#)])])
    );
}

#[test]
fn test_descendant_selector() {
    let rules = parse(r#".styleguide-reference-foo .bar { a: "b"; }"#);
    assert!(rules.contains_key("styleguide-reference-foo__bar"));
}

#[test]
fn test_no_manifest_rules() {
    let rules = parse(
        ".foo { content: \"bar\"; }\n\
         .zip {\n    font-size: 1rem;\n    color: #ffffff;\n}\n",
    );
    assert!(rules.is_empty());
}

#[test]
fn test_naive_parsing() {
    let rules = parse(
        "n##{ope\n\
         .ping { pong }\n\
         .zip {\n    font-size: 1rem;\n\
         .foo { content: \"bar\"; }\n    color: #ffffff;\n}\n",
    );
    assert!(rules.is_empty());
}

#[test]
fn test_unquoted_values_are_not_values() {
    let rules = parse(".styleguide-foo { --value: 42; --name: \"ok\"; }");
    let properties = &rules["styleguide-foo"];

    assert_eq!(properties["value"], None);
    assert_eq!(properties["name"].as_deref(), Some("ok"));
    assert_eq!(properties.len(), 2);
}

#[test]
fn test_comments_are_ignored() {
    let rules = parse("/* .styleguide-foo { a: \"b\"; } */\n.styleguide-bar { /* c */ a: \"b\"; }");
    assert_eq!(rules.keys().collect::<Vec<_>>(), vec!["styleguide-bar"]);
}

#[test]
fn test_parse_error() {
    let err = SourceParser::new().parse("nope").unwrap_err();

    assert_eq!(err.to_string(), "Unable to parse CSS due to 1 parsing error(s)");
    match err {
        Error::Parse { diagnostics } => assert_eq!(
            diagnostics,
            vec!["Line 1 - Column 1 : [invalid] EOF reached before {} block for a qualified rule."]
        ),
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_parse_error_position() {
    let err = SourceParser::new()
        .parse(".styleguide-foo { a: \"b\"; }\n\n  .styleguide-bar")
        .unwrap_err();

    assert_eq!(err.diagnostics().len(), 1);
    assert!(err.diagnostics()[0].starts_with("Line 3 - Column 3 : [invalid]"));
}
