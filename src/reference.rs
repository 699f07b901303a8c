//! Serialized reference values.
//!
//! A reference rule declares a structure mode which decides the shape of its
//! serialized value. [`ReferenceValue`] is the closed union of those shapes.
//!
//! ```rust
//! use css_styleguide::{value, ReferenceValue, StructureMode};
//!
//! let restored = ReferenceValue::from_value(&value!({ "black": "#000", "white": "#fff" }));
//! assert_eq!(restored.structure(), StructureMode::Flat);
//! assert_eq!(restored.to_value(), value!({ "black": "#000", "white": "#fff" }));
//! ```

use crate::{Number, Value, ValueMap};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Structure mode of a reference, from its `structure` property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructureMode {
    Flat,
    Nested,
    List,
    String,
    Number,
    ObjectComplex,
}

impl StructureMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StructureMode::Flat => "flat",
            StructureMode::Nested => "nested",
            StructureMode::List => "list",
            StructureMode::String => "string",
            StructureMode::Number => "number",
            StructureMode::ObjectComplex => "object-complex",
        }
    }

    /// Resolves a structure mode name.
    ///
    /// Returns the mode and whether the name was a deprecated alias.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use css_styleguide::StructureMode;
    ///
    /// assert_eq!(StructureMode::resolve("flat"), Some((StructureMode::Flat, false)));
    /// assert_eq!(StructureMode::resolve("json"), Some((StructureMode::ObjectComplex, true)));
    /// assert_eq!(StructureMode::resolve("whatever"), None);
    /// ```
    pub fn resolve(name: &str) -> Option<(StructureMode, bool)> {
        let mode = match name {
            "flat" => StructureMode::Flat,
            "nested" => StructureMode::Nested,
            "list" => StructureMode::List,
            "string" => StructureMode::String,
            "number" => StructureMode::Number,
            "object-complex" => StructureMode::ObjectComplex,
            "json" => return Some((StructureMode::ObjectComplex, true)),
            _ => return None,
        };
        Some((mode, false))
    }
}

impl fmt::Display for StructureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The serialized value of a reference.
#[derive(Clone, Debug, PartialEq)]
pub enum ReferenceValue {
    /// `key -> scalar`, zipped from `keys` and `values`
    Flat(ValueMap),
    /// `key -> {property -> scalar}`, distributed from every other property
    Nested(IndexMap<String, ValueMap>),
    List(Vec<Value>),
    String(String),
    Number(Number),
    /// Anything decoded from an `object` literal
    Complex(Value),
}

impl ReferenceValue {
    /// Returns the structure mode producing this shape.
    #[must_use]
    pub fn structure(&self) -> StructureMode {
        match self {
            ReferenceValue::Flat(_) => StructureMode::Flat,
            ReferenceValue::Nested(_) => StructureMode::Nested,
            ReferenceValue::List(_) => StructureMode::List,
            ReferenceValue::String(_) => StructureMode::String,
            ReferenceValue::Number(_) => StructureMode::Number,
            ReferenceValue::Complex(_) => StructureMode::ObjectComplex,
        }
    }

    /// Converts to the plain document form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            ReferenceValue::Flat(map) => Value::Object(map.clone()),
            ReferenceValue::Nested(items) => Value::Object(
                items
                    .iter()
                    .map(|(key, props)| (key.clone(), Value::Object(props.clone())))
                    .collect(),
            ),
            ReferenceValue::List(items) => Value::Array(items.clone()),
            ReferenceValue::String(s) => Value::String(s.clone()),
            ReferenceValue::Number(n) => Value::Number(n.clone()),
            ReferenceValue::Complex(value) => value.clone(),
        }
    }

    /// Restores a reference from its document form.
    ///
    /// The document does not carry the structure mode, so the shape is inferred:
    /// a string or a number maps to its own variant, an array of scalars to a list,
    /// a non-empty object of scalars to a flat map, a non-empty object of objects of
    /// scalars to a nested map. Anything else is kept as a complex value.
    ///
    /// The restored value always gives back the same document, even when the
    /// inferred variant differs from the one originally serialized.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => ReferenceValue::String(s.clone()),
            Value::Number(n) => ReferenceValue::Number(n.clone()),
            Value::Array(items) if items.iter().all(Value::is_scalar) => {
                ReferenceValue::List(items.clone())
            }
            Value::Object(map) if !map.is_empty() && map.values().all(Value::is_scalar) => {
                ReferenceValue::Flat(map.clone())
            }
            Value::Object(map) if !map.is_empty() && map.values().all(is_scalar_object) => {
                ReferenceValue::Nested(
                    map.iter()
                        .filter_map(|(key, item)| {
                            item.as_object().map(|props| (key.clone(), props.clone()))
                        })
                        .collect(),
                )
            }
            other => ReferenceValue::Complex(other.clone()),
        }
    }

    #[must_use]
    pub fn as_flat(&self) -> Option<&ValueMap> {
        match self {
            ReferenceValue::Flat(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_nested(&self) -> Option<&IndexMap<String, ValueMap>> {
        match self {
            ReferenceValue::Nested(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            ReferenceValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ReferenceValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            ReferenceValue::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_complex(&self) -> Option<&Value> {
        match self {
            ReferenceValue::Complex(value) => Some(value),
            _ => None,
        }
    }
}

fn is_scalar_object(value: &Value) -> bool {
    value
        .as_object()
        .map_or(false, |props| props.values().all(Value::is_scalar))
}

impl From<ReferenceValue> for Value {
    fn from(reference: ReferenceValue) -> Self {
        match reference {
            ReferenceValue::Flat(map) => Value::Object(map),
            ReferenceValue::Nested(items) => Value::Object(
                items
                    .into_iter()
                    .map(|(key, props)| (key, Value::Object(props)))
                    .collect(),
            ),
            ReferenceValue::List(items) => Value::Array(items),
            ReferenceValue::String(s) => Value::String(s),
            ReferenceValue::Number(n) => Value::Number(n),
            ReferenceValue::Complex(value) => value,
        }
    }
}

impl Serialize for ReferenceValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}
