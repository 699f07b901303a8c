//! Manifest nomenclature.
//!
//! Rule names and constants for the reserved `styleguide` namespace, and the
//! validators for reference and property names.
//!
//! A valid name starts with an ASCII letter, contains only ASCII letters, digits and
//! `_`, and is not a reserved word. Reserved rule names are the fields and methods a
//! [`Manifest`](crate::Manifest) exposes, so a reference can always be addressed by
//! name in templates.
//!
//! ```rust
//! use css_styleguide::nomenclature::is_valid_rule_name;
//!
//! assert!(is_valid_rule_name("text_color").is_ok());
//! assert!(is_valid_rule_name("text-color").is_err());
//! assert!(is_valid_rule_name("to_json").is_err());
//! ```

use crate::error::{NameKind, ValidationRule};
use crate::{Error, Result};

/// Prefix every manifest rule starts with.
pub const RULE_BASE_PREFIX: &str = "styleguide";

/// Name of the meta rule family.
pub const RULE_META: &str = "metas";

/// Rule declaring enabled references.
pub const RULE_META_REFERENCES: &str = "styleguide-metas-references";

/// Optional rule declaring the compiler the manifest was built with.
pub const RULE_META_COMPILER: &str = "styleguide-metas-compiler";

/// Prefix of reference rules, followed by `-` and the reference name.
pub const RULE_REFERENCE: &str = "styleguide-reference";

/// Words a reference cannot be named with.
pub const RESERVED_RULE_NAMES: &[&str] = &[
    "styleguide",
    "load",
    "load_reader",
    "load_path",
    "metas",
    "set_rule",
    "remove_rule",
    "get_reference",
    "from_dict",
    "from_json",
    "to_dict",
    "to_json",
];

/// Words a reference property cannot be named with.
pub const RESERVED_PROPERTY_NAMES: &[&str] = &["structure"];

/// Returns `true` if the name is reserved for rules.
#[must_use]
pub fn is_reserved_rule(name: &str) -> bool {
    RESERVED_RULE_NAMES.contains(&name)
}

/// Returns `true` if the name is reserved for properties.
#[must_use]
pub fn is_reserved_property(name: &str) -> bool {
    RESERVED_PROPERTY_NAMES.contains(&name)
}

/// Validates a reference name.
///
/// # Errors
///
/// Returns [`Error::Validation`] naming the first broken rule, checked in this order:
/// empty, reserved, forbidden `_`/`-` prefix, non-letter first character, character
/// outside `[A-Za-z0-9_]`.
pub fn is_valid_rule_name(name: &str) -> Result<bool> {
    validate(NameKind::Rule, name, RESERVED_RULE_NAMES)
}

/// Validates a reference property name.
///
/// # Errors
///
/// Same checks as [`is_valid_rule_name`], against the reserved property names.
pub fn is_valid_property_name(name: &str) -> Result<bool> {
    validate(NameKind::Property, name, RESERVED_PROPERTY_NAMES)
}

fn validate(kind: NameKind, name: &str, reserved: &[&str]) -> Result<bool> {
    let first = match name.chars().next() {
        Some(ch) => ch,
        None => return Err(Error::validation(kind, name, ValidationRule::Empty)),
    };

    if reserved.contains(&name) {
        return Err(Error::validation(kind, name, ValidationRule::Reserved));
    }

    if first == '_' || first == '-' {
        return Err(Error::validation(kind, name, ValidationRule::ForbiddenPrefix));
    }

    if !first.is_ascii_alphabetic() {
        return Err(Error::validation(kind, name, ValidationRule::InvalidFirstChar));
    }

    if !name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(Error::validation(kind, name, ValidationRule::InvalidChar));
    }

    Ok(true)
}

/// Builds the full rule name of a reference.
#[must_use]
pub fn reference_rule_name(name: &str) -> String {
    format!("{}-{}", RULE_REFERENCE, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken_rule(result: Result<bool>) -> ValidationRule {
        match result {
            Err(Error::Validation { rule, .. }) => rule,
            other => panic!("Expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_reserved_words() {
        assert!(!is_reserved_rule("palette"));
        assert!(is_reserved_rule("load"));
        assert!(is_reserved_rule("to_dict"));
        assert!(is_reserved_rule("to_json"));
        assert!(!is_reserved_property("palette"));
        assert!(is_reserved_property("structure"));
    }

    #[test]
    fn test_valid_names() {
        for name in ["palette", "foo_bar", "f123"] {
            assert!(is_valid_rule_name(name).unwrap());
            assert!(is_valid_property_name(name).unwrap());
        }
    }

    #[test]
    fn test_invalid_names_report_their_rule() {
        assert_eq!(broken_rule(is_valid_rule_name("")), ValidationRule::Empty);
        assert_eq!(broken_rule(is_valid_rule_name("load")), ValidationRule::Reserved);
        assert_eq!(
            broken_rule(is_valid_rule_name("_foo")),
            ValidationRule::ForbiddenPrefix
        );
        assert_eq!(
            broken_rule(is_valid_rule_name("-foo")),
            ValidationRule::ForbiddenPrefix
        );
        assert_eq!(
            broken_rule(is_valid_rule_name("1foo")),
            ValidationRule::InvalidFirstChar
        );
        assert_eq!(
            broken_rule(is_valid_rule_name("foo-bar")),
            ValidationRule::InvalidChar
        );
        assert_eq!(
            broken_rule(is_valid_rule_name("foo bar")),
            ValidationRule::InvalidChar
        );
        assert_eq!(
            broken_rule(is_valid_rule_name("fooé")),
            ValidationRule::InvalidChar
        );
        assert_eq!(
            broken_rule(is_valid_property_name("structure")),
            ValidationRule::Reserved
        );
    }

    #[test]
    fn test_reference_rule_name() {
        assert_eq!(reference_rule_name("palette"), "styleguide-reference-palette");
    }
}
