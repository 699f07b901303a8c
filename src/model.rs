//! Manifest model.
//!
//! A [`Manifest`] holds the metas and the enabled references of a CSS manifest.
//! It is filled either by loading a CSS source (parse then serialize) or by
//! restoring a document previously produced by [`Manifest::to_dict`] or
//! [`Manifest::to_json`].
//!
//! ```rust
//! use css_styleguide::Manifest;
//!
//! let mut manifest = Manifest::new();
//! manifest.load(r#"
//!     .styleguide-metas-references { --names: "version"; }
//!     .styleguide-reference-version { --structure: "string"; --value: "V42.0"; }
//! "#, None).unwrap();
//!
//! assert_eq!(manifest.get_reference("version").and_then(|r| r.as_str()), Some("V42.0"));
//!
//! let restored = Manifest::from_json(&manifest.to_json(4).unwrap()).unwrap();
//! assert_eq!(restored.to_dict(), manifest.to_dict());
//! ```

use crate::nomenclature::{is_valid_rule_name, RULE_META};
use crate::parser::{RawRuleSet, SourceParser};
use crate::serializer::{ManifestSerializer, Metas};
use crate::{Error, ReferenceValue, Result, SerializerOptions, Value, ValueMap, Warning};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Default indentation of [`Manifest::to_json`] output.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Serialized manifest: metas and references by name, in enabled order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    options: SerializerOptions,
    path: Option<PathBuf>,
    raw: RawRuleSet,
    metas: Metas,
    references: IndexMap<String, ReferenceValue>,
    warnings: Vec<Warning>,
}

impl Manifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty manifest serializing with the given options.
    #[must_use]
    pub fn with_options(options: SerializerOptions) -> Self {
        Manifest {
            options,
            ..Self::default()
        }
    }

    /// Parses and serializes a CSS source.
    ///
    /// References from a previous load are dropped. The optional `filepath` is only
    /// remembered, the source is never read from it.
    ///
    /// # Errors
    ///
    /// Returns any parse, validation or serializer error. On error only the
    /// warnings are replaced, with those collected before the failure, the rest of
    /// the manifest is left unchanged.
    pub fn load(&mut self, source: &str, filepath: Option<&Path>) -> Result<&RawRuleSet> {
        let raw = match SourceParser::new().consume(source) {
            Ok(raw) => raw,
            Err(err) => {
                self.warnings.clear();
                return Err(err);
            }
        };

        let mut serializer = ManifestSerializer::with_options(self.options.clone());
        let serialized = serializer.serialize(&raw);
        self.warnings = serializer.take_warnings();
        let references = serialized?;

        self.path = filepath.map(Path::to_path_buf);
        self.raw = raw;
        self.metas = serializer.metas().clone();
        self.references = references;

        Ok(&self.raw)
    }

    /// Reads the whole source from a reader then loads it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when reading fails, then same as [`Manifest::load`].
    pub fn load_reader<R: Read>(
        &mut self,
        mut reader: R,
        filepath: Option<&Path>,
    ) -> Result<&RawRuleSet> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        self.load(&source, filepath)
    }

    /// Loads a CSS file and remembers its path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, then same as
    /// [`Manifest::load`].
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<&RawRuleSet> {
        let path = path.as_ref();
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                self.warnings.clear();
                return Err(Error::io(&format!(
                    "Unable to read '{}': {}",
                    path.display(),
                    err
                )));
            }
        };
        self.load(&source, Some(path))
    }

    /// Path of the loaded source, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Rules parsed by the last load, empty for a restored manifest.
    #[must_use]
    pub fn raw_rules(&self) -> &RawRuleSet {
        &self.raw
    }

    #[must_use]
    pub fn metas(&self) -> &Metas {
        &self.metas
    }

    /// Warnings left by the last load, failed or not.
    ///
    /// A truncated literal usually fails to decode, so after a failed load the
    /// warnings tell whether the evaluation limit is the cause.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn get_reference(&self, name: &str) -> Option<&ReferenceValue> {
        self.references.get(name)
    }

    /// Reference names in enabled order.
    pub fn reference_names(&self) -> impl Iterator<Item = &str> {
        self.references.keys().map(String::as_str)
    }

    #[must_use]
    pub fn references(&self) -> &IndexMap<String, ReferenceValue> {
        &self.references
    }

    /// Sets a reference, appended when new, replaced in place otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the name breaks the nomenclature.
    pub fn set_rule(&mut self, name: &str, value: ReferenceValue) -> Result<()> {
        is_valid_rule_name(name)?;
        self.references.insert(name.to_string(), value);
        Ok(())
    }

    /// Removes a reference, keeping the order of the others.
    pub fn remove_rule(&mut self, name: &str) -> Option<ReferenceValue> {
        self.references.shift_remove(name)
    }

    /// Returns the document: `metas` first, then every reference in order.
    #[must_use]
    pub fn to_dict(&self) -> Value {
        let mut document = ValueMap::with_capacity(self.references.len() + 1);
        document.insert(RULE_META.to_string(), self.metas.to_value());

        for (name, reference) in &self.references {
            document.insert(name.clone(), reference.to_value());
        }

        Value::Object(document)
    }

    /// Returns the document as pretty printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if encoding fails.
    pub fn to_json(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());

        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.to_dict().serialize(&mut serializer)?;

        String::from_utf8(buffer).map_err(Error::json)
    }

    /// Restores a manifest from a document, without parsing any CSS.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Document`] when the document is not an object or has no
    /// valid `metas`, and [`Error::Validation`] for an invalid reference name.
    pub fn from_dict(document: &Value) -> Result<Self> {
        let members = document
            .as_object()
            .ok_or_else(|| Error::document("document must be an object"))?;

        let metas = members
            .get(RULE_META)
            .ok_or_else(|| Error::document(format!("document lacks of '{}'", RULE_META)))?;

        let mut manifest = Manifest {
            metas: Metas::from_value(metas)?,
            ..Self::default()
        };

        for (name, value) in members {
            if name != RULE_META {
                manifest.set_rule(name, ReferenceValue::from_value(value))?;
            }
        }

        Ok(manifest)
    }

    /// Restores a manifest from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for invalid JSON, then same as [`Manifest::from_dict`].
    pub fn from_json(source: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(source)?;
        Self::from_dict(&document)
    }
}

impl Serialize for Manifest {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_dict().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, Number};

    const SOURCE: &str = r#"
        .styleguide-metas-references { --names: "spaces version"; }
        .styleguide-reference-version { --structure: "string"; --value: "V42.0"; }
        .styleguide-reference-spaces { --structure: "list"; --items: "short normal large"; }
    "#;

    #[test]
    fn test_load_keeps_enabled_order() {
        let mut manifest = Manifest::new();
        let raw = manifest.load(SOURCE, Some(Path::new("foo.css"))).unwrap();
        assert_eq!(raw.len(), 3);

        let names: Vec<_> = manifest.reference_names().collect();
        assert_eq!(names, vec!["spaces", "version"]);
        assert_eq!(manifest.path(), Some(Path::new("foo.css")));
        assert_eq!(manifest.metas().compiler_support.as_deref(), Some("libsass"));
    }

    #[test]
    fn test_load_reader() {
        let mut manifest = Manifest::new();
        manifest.load_reader(SOURCE.as_bytes(), None).unwrap();
        assert!(manifest.path().is_none());
        assert_eq!(manifest.references().len(), 2);
    }

    #[test]
    fn test_set_and_remove_rule() {
        let mut manifest = Manifest::new();
        manifest
            .set_rule("life", ReferenceValue::Number(Number::Integer(42)))
            .unwrap();
        manifest
            .set_rule("text", ReferenceValue::String("ok".to_string()))
            .unwrap();
        assert!(manifest
            .set_rule("to_json", ReferenceValue::String("nope".to_string()))
            .is_err());

        assert_eq!(
            manifest.remove_rule("life"),
            Some(ReferenceValue::Number(Number::Integer(42)))
        );
        assert_eq!(manifest.remove_rule("life"), None);
        assert_eq!(manifest.reference_names().collect::<Vec<_>>(), vec!["text"]);
    }

    #[test]
    fn test_to_dict_puts_metas_first() {
        let mut manifest = Manifest::new();
        manifest.load(SOURCE, None).unwrap();

        let document = manifest.to_dict();
        let keys: Vec<_> = document.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["metas", "spaces", "version"]);
    }

    #[test]
    fn test_to_json_indent() {
        let mut manifest = Manifest::new();
        manifest
            .set_rule("version", ReferenceValue::String("V42.0".to_string()))
            .unwrap();

        let json = manifest.to_json(2).unwrap();
        assert_eq!(
            json,
            "{\n  \"metas\": {\n    \"references\": []\n  },\n  \"version\": \"V42.0\"\n}"
        );
    }

    #[test]
    fn test_failed_load_keeps_truncation_warning() {
        let options = SerializerOptions::new().with_evaluation_limit(3);
        let mut manifest = Manifest::with_options(options);
        manifest
            .load(
                r#".styleguide-metas-references { --names: "a"; }
                   .styleguide-reference-a { --structure: "object-complex"; --object: "[1]"; }"#,
                None,
            )
            .unwrap();
        assert!(manifest.warnings().is_empty());

        let result = manifest.load(
            r#".styleguide-metas-references { --names: "a"; }
               .styleguide-reference-a { --structure: "object-complex"; --object: "[1, 2]"; }"#,
            None,
        );

        assert!(matches!(result, Err(Error::Serializer(_))));
        assert_eq!(
            manifest.warnings(),
            &[Warning::Truncated {
                reference: "a".to_string(),
                limit: 3,
                length: 6,
            }]
        );
        assert_eq!(
            manifest.get_reference("a").map(ReferenceValue::to_value),
            Some(value!([1]))
        );

        assert!(manifest.load("nope", None).is_err());
        assert!(manifest.warnings().is_empty());
    }

    #[test]
    fn test_from_dict_errors() {
        assert!(matches!(
            Manifest::from_dict(&value!([])),
            Err(Error::Document(_))
        ));
        assert!(matches!(
            Manifest::from_dict(&value!({ "palette": "x" })),
            Err(Error::Document(_))
        ));
        assert!(matches!(
            Manifest::from_dict(&value!({ "metas": { "references": "x" } })),
            Err(Error::Document(_))
        ));
        assert!(matches!(
            Manifest::from_json("{"),
            Err(Error::Json(_))
        ));
    }
}
