//! Error and warning types for manifest parsing and serialization.
//!
//! ## Error Categories
//!
//! - **Parse errors**: the CSS tokenizer met a fatal syntax problem (for example a
//!   qualified rule without its `{}` block). Every problem is reported as a one-line
//!   diagnostic with line and column.
//! - **Validation errors**: a rule or property name breaks the nomenclature.
//! - **Serializer errors**: the manifest is structurally wrong (missing property,
//!   length mismatch, unknown structure mode, malformed literal, ...).
//! - **Document errors**: a dumped document handed to [`Manifest::from_dict`] does
//!   not have the expected shape.
//!
//! Warnings never stop processing. They are collected as [`Warning`] values and
//! handed back to the caller, who decides what to do with them.
//!
//! ## Examples
//!
//! ```rust
//! use css_styleguide::{from_str, Error};
//!
//! let result = from_str(".foo {}");
//! assert!(matches!(result, Err(Error::Serializer(_))));
//! ```
//!
//! [`Manifest::from_dict`]: crate::Manifest::from_dict

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while loading a manifest.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The CSS source could not be tokenized into rules
    #[error("Unable to parse CSS due to {} parsing error(s)", .diagnostics.len())]
    Parse { diagnostics: Vec<String> },

    /// A rule or property name does not follow the nomenclature
    #[error("{kind} name '{name}' {rule}")]
    Validation {
        kind: NameKind,
        name: String,
        rule: ValidationRule,
    },

    /// Structural issue in manifest declarations
    #[error("{0}")]
    Serializer(String),

    /// Syntax error from the literal parser
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Malformed manifest document
    #[error("Invalid manifest document: {0}")]
    Document(String),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    /// Creates a parse error from a list of formatted diagnostics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use css_styleguide::Error;
    ///
    /// let err = Error::parse(vec!["Line 1 - Column 1 : [invalid] oops".to_string()]);
    /// assert_eq!(err.to_string(), "Unable to parse CSS due to 1 parsing error(s)");
    /// ```
    pub fn parse(diagnostics: Vec<String>) -> Self {
        Error::Parse { diagnostics }
    }

    /// Creates a validation error for a rule or property name.
    pub fn validation(kind: NameKind, name: &str, rule: ValidationRule) -> Self {
        Error::Validation {
            kind,
            name: name.to_string(),
            rule,
        }
    }

    /// Creates a serializer error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use css_styleguide::Error;
    ///
    /// let err = Error::serializer("Unable to find enabled reference 'palette'");
    /// assert!(err.to_string().contains("palette"));
    /// ```
    pub fn serializer<T: fmt::Display>(msg: T) -> Self {
        Error::Serializer(msg.to_string())
    }

    /// Creates a syntax error with line and column information.
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a document error.
    pub fn document<T: fmt::Display>(msg: T) -> Self {
        Error::Document(msg.to_string())
    }

    /// Creates a JSON error.
    pub fn json<T: fmt::Display>(msg: T) -> Self {
        Error::Json(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the positional diagnostics of a parse error, or an empty slice.
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        match self {
            Error::Parse { diagnostics } => diagnostics,
            _ => &[],
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Document(msg.to_string())
    }
}

/// Which kind of identifier failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Rule,
    Property,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Rule => f.write_str("Rule"),
            NameKind::Property => f.write_str("Property"),
        }
    }
}

/// The nomenclature rule a name violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    Empty,
    Reserved,
    ForbiddenPrefix,
    InvalidFirstChar,
    InvalidChar,
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationRule::Empty => f.write_str("is empty"),
            ValidationRule::Reserved => f.write_str("is a reserved word"),
            ValidationRule::ForbiddenPrefix => f.write_str("must not start with '_' or '-'"),
            ValidationRule::InvalidFirstChar => f.write_str("must start with a letter"),
            ValidationRule::InvalidChar => {
                f.write_str("must only contain letters, numbers and '_' character")
            }
        }
    }
}

/// A non-fatal diagnostic emitted while serializing a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A deprecated structure mode alias was used
    DeprecatedStructure {
        reference: String,
        alias: String,
        replacement: String,
    },

    /// A deprecated splitter alias was used
    DeprecatedSplitter {
        reference: String,
        alias: String,
        replacement: String,
    },

    /// A deprecated serializer method was called
    DeprecatedMethod { method: String, replacement: String },

    /// A value was cut down to the evaluation limit before parsing
    Truncated {
        reference: String,
        limit: usize,
        length: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DeprecatedStructure {
                reference,
                alias,
                replacement,
            } => write!(
                f,
                "Structure mode '{alias}' used by reference '{reference}' is deprecated, \
                 use '{replacement}' instead"
            ),
            Warning::DeprecatedSplitter {
                reference,
                alias,
                replacement,
            } => write!(
                f,
                "Splitter '{alias}' used by reference '{reference}' is deprecated, \
                 use '{replacement}' instead"
            ),
            Warning::DeprecatedMethod {
                method,
                replacement,
            } => write!(f, "'{method}' is deprecated, use '{replacement}' instead"),
            Warning::Truncated {
                reference,
                limit,
                length,
            } => write!(
                f,
                "Reference '{reference}' has a value of {length} characters which has been \
                 truncated to the evaluation limit of {limit} characters"
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
