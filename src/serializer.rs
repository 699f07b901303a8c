//! Manifest serializer.
//!
//! Turns a [`RawRuleSet`] into typed references. The serializer reads the meta
//! rules to know which references are enabled and which compiler produced the CSS,
//! then serializes every enabled reference according to its structure mode.
//!
//! ## Structure modes
//!
//! | Mode             | Required properties | Result |
//! |------------------|---------------------|--------|
//! | `flat`           | `keys`, `values`    | `key -> value` |
//! | `nested`         | `keys`              | `key -> {property -> value}` for every other property |
//! | `list`           | `items`             | list of values |
//! | `string`         | `value`             | the value verbatim |
//! | `number`         | `value`             | integer, or float when there is a decimal point |
//! | `object-complex` | `object`            | any decoded literal |
//!
//! Values of `flat`, `nested` and `list` references are split with the
//! reference `splitter` (`white-space` by default, or `object-list`), then
//! optionally cleaned with its `cleaner`.
//!
//! Deprecated aliases still work and leave a [`Warning`] that can be read after
//! the run with [`ManifestSerializer::warnings`].
//!
//! ## Usage
//!
//! ```rust
//! use css_styleguide::{ManifestSerializer, SourceParser};
//!
//! let raw = SourceParser::new().consume(r##"
//!     .styleguide-metas-references { --names: "palette"; }
//!     .styleguide-reference-palette {
//!         --structure: "flat";
//!         --keys: "black white";
//!         --values: "#000000 #ffffff";
//!     }
//! "##).unwrap();
//!
//! let mut serializer = ManifestSerializer::new();
//! let references = serializer.serialize(&raw).unwrap();
//!
//! assert_eq!(serializer.metas().references, vec!["palette"]);
//! let palette = references["palette"].as_flat().unwrap();
//! assert_eq!(palette.get("white").and_then(|v| v.as_str()), Some("#ffffff"));
//! ```

use crate::nomenclature::{
    is_valid_property_name, is_valid_rule_name, reference_rule_name, RULE_META_COMPILER,
    RULE_META_REFERENCES, RULE_REFERENCE,
};
use crate::options::{Cleaner, CompilerSupport, SerializerOptions, Splitter};
use crate::parser::{RawProperties, RawRuleSet};
use crate::reference::{ReferenceValue, StructureMode};
use crate::{literal, Error, Number, Result, Value, ValueMap, Warning};
use chrono::Local;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Format of the `created` meta.
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Properties driving the serialization instead of carrying data.
const CONTROL_PROPERTIES: &[&str] = &["keys", "structure", "splitter", "cleaner"];

/// Manifest metadata.
///
/// Emitted in this order: `compiler_support`, `references`, `created`, then any
/// extra member restored from a dumped document.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Metas {
    pub compiler_support: Option<String>,
    /// Enabled reference names, in enabled order
    pub references: Vec<String>,
    pub created: Option<String>,
    pub extra: ValueMap,
}

impl Metas {
    /// Converts to the document form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = ValueMap::with_capacity(3 + self.extra.len());

        if let Some(compiler_support) = &self.compiler_support {
            map.insert(
                "compiler_support".to_string(),
                Value::from(compiler_support.as_str()),
            );
        }

        map.insert(
            "references".to_string(),
            Value::Array(self.references.iter().map(|n| Value::from(n.as_str())).collect()),
        );

        if let Some(created) = &self.created {
            map.insert("created".to_string(), Value::from(created.as_str()));
        }

        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }

        Value::Object(map)
    }

    /// Restores metadata from its document form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Document`] when the value is not an object or when
    /// `references` is missing or is not a list of strings.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::document("'metas' must be an object"))?;

        let mut metas = Metas::default();
        let mut has_references = false;

        for (key, item) in map {
            match key.as_str() {
                "references" => {
                    let names = item
                        .as_array()
                        .ok_or_else(|| Error::document("'metas.references' must be a list"))?;
                    metas.references = names
                        .iter()
                        .map(|name| {
                            name.as_str().map(str::to_string).ok_or_else(|| {
                                Error::document("'metas.references' items must be strings")
                            })
                        })
                        .collect::<Result<_>>()?;
                    has_references = true;
                }
                "compiler_support" => {
                    metas.compiler_support = Some(optional_string(key, item)?);
                }
                "created" => {
                    metas.created = Some(optional_string(key, item)?);
                }
                _ => {
                    metas.extra.insert(key.clone(), item.clone());
                }
            }
        }

        if !has_references {
            return Err(Error::document("'metas' lacks of required 'references'"));
        }

        Ok(metas)
    }
}

fn optional_string(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::document(format!("'metas.{}' must be a string", key)))
}

impl Serialize for Metas {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

/// Serializes parsed rules to typed references.
///
/// An instance holds the metas and warnings of its last run, so it should be
/// owned by a single caller at a time.
#[derive(Debug, Clone, Default)]
pub struct ManifestSerializer {
    options: SerializerOptions,
    compiler_support: CompilerSupport,
    metas: Metas,
    warnings: Vec<Warning>,
}

impl ManifestSerializer {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SerializerOptions::default())
    }

    #[must_use]
    pub fn with_options(options: SerializerOptions) -> Self {
        ManifestSerializer {
            compiler_support: options.compiler_support,
            options,
            metas: Metas::default(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Compiler support in effect for structured literals.
    #[must_use]
    pub fn compiler_support(&self) -> CompilerSupport {
        self.compiler_support
    }

    /// Metas computed by the last [`serialize`](Self::serialize) call.
    #[must_use]
    pub fn metas(&self) -> &Metas {
        &self.metas
    }

    /// Warnings collected since the last [`serialize`](Self::serialize) call.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Takes the collected warnings, leaving the buffer empty.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Truncates a string to the evaluation limit.
    ///
    /// A warning is collected only when the value is actually truncated. A limit of
    /// zero returns the value unchanged.
    pub fn limit_evaluation_string(&mut self, name: &str, value: &str) -> String {
        let limit = self.options.evaluation_limit;
        if limit == 0 {
            return value.to_string();
        }

        let length = value.chars().count();
        if length <= limit {
            return value.to_string();
        }

        self.warnings.push(Warning::Truncated {
            reference: name.to_string(),
            limit,
            length,
        });

        value.chars().take(limit).collect()
    }

    fn parse_object(&mut self, name: &str, value: &str) -> Result<Value> {
        let value = self.limit_evaluation_string(name, value);

        match self.compiler_support {
            CompilerSupport::Libsass => serde_json::from_str(&value).map_err(Error::from),
            CompilerSupport::Dartsass => literal::parse_literal(&value),
        }
    }

    /// Splits a raw value to a list of values.
    ///
    /// `mode` is a splitter name (`white-space`, `object-list` or the deprecated
    /// `json-list`) and `cleaner` an optional cleaner name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serializer`] for an unknown splitter or cleaner, or when an
    /// `object-list` value is not a valid list literal.
    pub fn value_splitter(
        &mut self,
        reference: &str,
        property: &str,
        value: &str,
        mode: &str,
        cleaner: Option<&str>,
    ) -> Result<Vec<Value>> {
        let splitter = self.resolve_splitter(reference, Some(mode))?;
        let cleaner = cleaner.map(str::parse::<Cleaner>).transpose()?;
        self.split(reference, property, value, splitter, cleaner)
    }

    fn resolve_splitter(&mut self, reference: &str, name: Option<&str>) -> Result<Splitter> {
        let name = match name {
            Some(name) => name,
            None => return Ok(Splitter::default()),
        };

        let (splitter, deprecated) = Splitter::resolve(name).ok_or_else(|| {
            Error::serializer(format!(
                "Unknown splitter '{}' for reference '{}'",
                name, reference
            ))
        })?;

        if deprecated {
            self.warnings.push(Warning::DeprecatedSplitter {
                reference: reference.to_string(),
                alias: name.to_string(),
                replacement: splitter.as_str().to_string(),
            });
        }

        Ok(splitter)
    }

    /// Reads the splitter and cleaner declared in a rule.
    fn read_policy(
        &mut self,
        reference: &str,
        properties: &RawProperties,
    ) -> Result<(Splitter, Option<Cleaner>)> {
        let splitter =
            self.resolve_splitter(reference, properties.get("splitter").and_then(Option::as_deref))?;
        let cleaner = properties
            .get("cleaner")
            .and_then(Option::as_deref)
            .map(str::parse::<Cleaner>)
            .transpose()?;

        Ok((splitter, cleaner))
    }

    fn split(
        &mut self,
        reference: &str,
        property: &str,
        value: &str,
        splitter: Splitter,
        cleaner: Option<Cleaner>,
    ) -> Result<Vec<Value>> {
        match splitter {
            Splitter::WhiteSpace => {
                if value.is_empty() {
                    return Ok(Vec::new());
                }

                Ok(value
                    .split(' ')
                    .filter(|piece| cleaner.is_none() || !piece.trim().is_empty())
                    .map(Value::from)
                    .collect())
            }
            Splitter::ObjectList => {
                let decoded = self.parse_object(reference, value).map_err(|err| {
                    Error::serializer(format!(
                        "Invalid syntax for property '{}' of reference '{}': {}",
                        property, reference, err
                    ))
                })?;

                let items = match decoded {
                    Value::Array(items) => items,
                    _ => {
                        return Err(Error::serializer(format!(
                            "Property '{}' of reference '{}' is not a list",
                            property, reference
                        )))
                    }
                };

                Ok(match cleaner {
                    Some(Cleaner::Whitespaces) => items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(s) => Value::String(s.trim().to_string()),
                            other => other,
                        })
                        .collect(),
                    None => items,
                })
            }
        }
    }

    fn split_keys(
        &mut self,
        kind: &str,
        name: &str,
        value: &str,
        splitter: Splitter,
        cleaner: Option<Cleaner>,
    ) -> Result<Vec<String>> {
        self.split(name, "keys", value, splitter, cleaner)?
            .iter()
            .map(|key| {
                key.to_key().ok_or_else(|| {
                    Error::serializer(format!(
                        "{} reference '{}' has an invalid key '{}'",
                        kind, name, key
                    ))
                })
            })
            .collect()
    }

    /// Serializes to a flat map zipped from `keys` and `values`.
    ///
    /// # Errors
    ///
    /// Fails when `keys` or `values` is missing or empty, or when both lists do not
    /// have the same length.
    pub fn serialize_to_flat(&mut self, name: &str, properties: &RawProperties) -> Result<ValueMap> {
        let (splitter, cleaner) = self.read_policy(name, properties)?;

        let keys = required(properties, "keys").ok_or_else(|| {
            Error::serializer(format!(
                "Flat reference '{}' lacks of required 'keys' variable or is empty",
                name
            ))
        })?;
        let values = required(properties, "values").ok_or_else(|| {
            Error::serializer(format!(
                "Flat reference '{}' lacks of required 'values' variable or is empty",
                name
            ))
        })?;

        let keys = self.split_keys("Flat", name, keys, splitter, cleaner)?;
        let values = self.split(name, "values", values, splitter, cleaner)?;

        if keys.len() != values.len() {
            return Err(Error::serializer(format!(
                "Flat reference '{}' has different length of 'keys' and 'values' variable",
                name
            )));
        }

        Ok(keys.into_iter().zip(values).collect())
    }

    /// Serializes to a map of per-key property maps.
    ///
    /// Every property except the control ones is split and distributed by position
    /// over the keys.
    ///
    /// # Errors
    ///
    /// Fails when `keys` is missing or empty, when a property has no value, or when a
    /// property does not have as many values as there are keys.
    pub fn serialize_to_nested(
        &mut self,
        name: &str,
        properties: &RawProperties,
    ) -> Result<IndexMap<String, ValueMap>> {
        let (splitter, cleaner) = self.read_policy(name, properties)?;

        let keys = required(properties, "keys").ok_or_else(|| {
            Error::serializer(format!(
                "Nested reference '{}' lacks of required 'keys' variable or is empty",
                name
            ))
        })?;
        let keys = self.split_keys("Nested", name, keys, splitter, cleaner)?;

        let mut context: IndexMap<String, ValueMap> = keys
            .iter()
            .map(|key| (key.clone(), ValueMap::new()))
            .collect();

        for (property, value) in properties {
            if CONTROL_PROPERTIES.contains(&property.as_str()) {
                continue;
            }

            let value = value.as_deref().ok_or_else(|| {
                Error::serializer(format!(
                    "Nested reference '{}' has no value for '{}'",
                    name, property
                ))
            })?;
            let values = self.split(name, property, value, splitter, cleaner)?;

            if values.len() != keys.len() {
                return Err(Error::serializer(format!(
                    "Nested reference '{}' has different length for values of '{}' and 'keys'",
                    name, property
                )));
            }

            for (key, item) in keys.iter().zip(values) {
                if let Some(props) = context.get_mut(key) {
                    props.insert(property.clone(), item);
                }
            }
        }

        Ok(context)
    }

    /// Serializes `items` to a list.
    ///
    /// # Errors
    ///
    /// Fails when `items` is missing. An empty string gives an empty list.
    pub fn serialize_to_list(&mut self, name: &str, properties: &RawProperties) -> Result<Vec<Value>> {
        let (splitter, cleaner) = self.read_policy(name, properties)?;

        let items = properties
            .get("items")
            .and_then(Option::as_deref)
            .ok_or_else(|| {
                Error::serializer(format!(
                    "List reference '{}' lacks of required 'items' variable",
                    name
                ))
            })?;

        self.split(name, "items", items, splitter, cleaner)
    }

    /// Returns `value` verbatim.
    ///
    /// # Errors
    ///
    /// Fails when `value` is missing. An empty string is valid.
    pub fn serialize_to_string(&self, name: &str, properties: &RawProperties) -> Result<String> {
        properties
            .get("value")
            .and_then(Option::as_deref)
            .map(str::to_string)
            .ok_or_else(|| {
                Error::serializer(format!(
                    "String reference '{}' lacks of required 'value' variable",
                    name
                ))
            })
    }

    /// Parses `value` as a number.
    ///
    /// A value containing a decimal point gives a float, anything else an integer.
    ///
    /// # Errors
    ///
    /// Fails when `value` is missing, empty, not numeric or out of the `f64` range.
    pub fn serialize_to_number(&self, name: &str, properties: &RawProperties) -> Result<Number> {
        let value = required(properties, "value").ok_or_else(|| {
            Error::serializer(format!(
                "Number reference '{}' lacks of required 'value' variable or is empty",
                name
            ))
        })?;

        let invalid = || {
            Error::serializer(format!(
                "Number reference '{}' has an invalid numeric value '{}'",
                name, value
            ))
        };

        if value.contains('.') {
            value
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .map(Number::Float)
                .ok_or_else(invalid)
        } else {
            value.parse::<i64>().map(Number::Integer).map_err(|_| invalid())
        }
    }

    /// Decodes `object` as a structured literal.
    ///
    /// The literal syntax depends on the compiler support: strict JSON for
    /// `libsass`, the looser literal syntax for `dartsass`.
    ///
    /// # Errors
    ///
    /// Fails when `object` is missing or empty, or when it cannot be decoded.
    pub fn serialize_to_complex(&mut self, name: &str, properties: &RawProperties) -> Result<Value> {
        let object = required(properties, "object").ok_or_else(|| {
            Error::serializer(format!(
                "Object reference '{}' lacks of required 'object' variable or is empty",
                name
            ))
        })?;

        self.parse_object(name, object).map_err(|err| {
            Error::serializer(format!(
                "Invalid syntax for object of reference '{}': {}",
                name, err
            ))
        })
    }

    /// Deprecated alias of [`serialize_to_complex`](Self::serialize_to_complex).
    #[deprecated(note = "use `serialize_to_complex` instead")]
    pub fn serialize_to_json(&mut self, name: &str, properties: &RawProperties) -> Result<Value> {
        self.warnings.push(Warning::DeprecatedMethod {
            method: "serialize_to_json".to_string(),
            replacement: "serialize_to_complex".to_string(),
        });
        self.serialize_to_complex(name, properties)
    }

    /// Reads the compiler support from the optional compiler meta rule.
    ///
    /// # Errors
    ///
    /// Fails when the declared `support` is not a known compiler.
    pub fn get_meta_compiler(&self, raw: &RawRuleSet) -> Result<CompilerSupport> {
        match raw
            .get(RULE_META_COMPILER)
            .and_then(|rule| rule.get("support"))
            .and_then(Option::as_deref)
        {
            Some(support) => support.parse(),
            None => Ok(self.options.compiler_support),
        }
    }

    /// Returns every declared reference name, unprefixed, in source order.
    #[must_use]
    pub fn get_available_references(&self, raw: &RawRuleSet) -> Vec<String> {
        let prefix = format!("{}-", RULE_REFERENCE);

        raw.keys()
            .filter_map(|name| name.strip_prefix(&prefix))
            .map(str::to_string)
            .collect()
    }

    /// Returns the enabled reference names.
    ///
    /// The references meta rule either lists `names`, or enables every declared
    /// reference with `auto`, minus the optional `excludes`. Lists are split with
    /// the meta rule's own splitter and cleaner.
    ///
    /// # Errors
    ///
    /// Fails when the meta rule is missing or empty, when it declares neither
    /// `names` nor `auto`, or when a name breaks the nomenclature.
    pub fn get_meta_reference_names(&mut self, raw: &RawRuleSet) -> Result<Vec<String>> {
        let rule = match raw.get(RULE_META_REFERENCES) {
            Some(rule) if !rule.is_empty() => rule,
            _ => {
                return Err(Error::serializer(format!(
                    "Manifest lacks of '.{}' or is empty",
                    RULE_META_REFERENCES
                )))
            }
        };

        let (splitter, cleaner) = self.read_policy(RULE_META_REFERENCES, rule)?;

        let names = if let Some(names) = required(rule, "names") {
            let names = self.split(RULE_META_REFERENCES, "names", names, splitter, cleaner)?;
            names
                .iter()
                .map(|name| {
                    name.as_str().map(str::to_string).ok_or_else(|| {
                        Error::serializer(format!(
                            "Reference name '{}' from '.{}' must be a string",
                            name, RULE_META_REFERENCES
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?
        } else if required(rule, "auto").is_some() {
            let excludes: Vec<String> = match required(rule, "excludes") {
                Some(excludes) => self
                    .split(RULE_META_REFERENCES, "excludes", excludes, splitter, cleaner)?
                    .iter()
                    .filter_map(Value::to_key)
                    .collect(),
                None => Vec::new(),
            };

            self.get_available_references(raw)
                .into_iter()
                .filter(|name| !excludes.contains(name))
                .collect()
        } else {
            return Err(Error::serializer(format!(
                "'.{}' either require '--names' or '--auto' variable to be defined",
                RULE_META_REFERENCES
            )));
        };

        for name in &names {
            is_valid_rule_name(name)?;
        }

        Ok(names)
    }

    /// Serializes a single reference.
    ///
    /// # Errors
    ///
    /// Fails when the reference rule is missing, when it has no valid `structure`,
    /// when a property name breaks the nomenclature, or when its structure
    /// serializer fails.
    pub fn get_reference(&mut self, raw: &RawRuleSet, name: &str) -> Result<ReferenceValue> {
        let mut properties = raw
            .get(&reference_rule_name(name))
            .cloned()
            .ok_or_else(|| {
                Error::serializer(format!("Unable to find enabled reference '{}'", name))
            })?;

        let structure = match properties.shift_remove("structure") {
            Some(Some(structure)) => structure,
            _ => {
                return Err(Error::serializer(format!(
                    "Reference '{}' lacks of required 'structure' variable",
                    name
                )))
            }
        };

        let (mode, deprecated) = StructureMode::resolve(&structure).ok_or_else(|| {
            Error::serializer(format!(
                "Invalid structure mode name '{}' for reference '{}'",
                structure, name
            ))
        })?;

        if deprecated {
            self.warnings.push(Warning::DeprecatedStructure {
                reference: name.to_string(),
                alias: structure.clone(),
                replacement: mode.as_str().to_string(),
            });
        }

        for property in properties.keys() {
            is_valid_property_name(property)?;
        }

        Ok(match mode {
            StructureMode::Flat => ReferenceValue::Flat(self.serialize_to_flat(name, &properties)?),
            StructureMode::Nested => {
                ReferenceValue::Nested(self.serialize_to_nested(name, &properties)?)
            }
            StructureMode::List => ReferenceValue::List(self.serialize_to_list(name, &properties)?),
            StructureMode::String => {
                ReferenceValue::String(self.serialize_to_string(name, &properties)?)
            }
            StructureMode::Number => {
                ReferenceValue::Number(self.serialize_to_number(name, &properties)?)
            }
            StructureMode::ObjectComplex => {
                ReferenceValue::Complex(self.serialize_to_complex(name, &properties)?)
            }
        })
    }

    /// Serializes the given references, in the given order.
    ///
    /// # Errors
    ///
    /// Fails on the first reference that cannot be serialized.
    pub fn get_enabled_references(
        &mut self,
        raw: &RawRuleSet,
        names: &[String],
    ) -> Result<IndexMap<String, ReferenceValue>> {
        let mut references = IndexMap::with_capacity(names.len());

        for name in names {
            let reference = self.get_reference(raw, name)?;
            references.insert(name.clone(), reference);
        }

        Ok(references)
    }

    /// Serializes every enabled reference and computes the metas.
    ///
    /// Metas and warnings of a previous run are discarded.
    ///
    /// # Errors
    ///
    /// Fails on any meta or reference error, no partial result is returned.
    pub fn serialize(&mut self, raw: &RawRuleSet) -> Result<IndexMap<String, ReferenceValue>> {
        self.warnings.clear();

        self.compiler_support = self.get_meta_compiler(raw)?;
        let names = self.get_meta_reference_names(raw)?;

        let created = self
            .options
            .fixed_timestamp
            .unwrap_or_else(|| Local::now().naive_local())
            .format(CREATED_FORMAT)
            .to_string();

        self.metas = Metas {
            compiler_support: Some(self.compiler_support.as_str().to_string()),
            references: names,
            created: Some(created),
            extra: ValueMap::new(),
        };

        let names = self.metas.references.clone();
        self.get_enabled_references(raw, &names)
    }
}

/// Returns a property value when present and non-empty.
fn required<'a>(properties: &'a RawProperties, name: &str) -> Option<&'a str> {
    properties
        .get(name)
        .and_then(Option::as_deref)
        .filter(|value| !value.is_empty())
}
