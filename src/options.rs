//! Configuration options for manifest serialization.
//!
//! - [`SerializerOptions`]: main configuration struct
//! - [`CompilerSupport`]: which Sass compiler produced the CSS, it picks the literal
//!   parser used for `object-list` and `object-complex` values
//! - [`Splitter`] and [`Cleaner`]: value decoding policies declared by references
//!
//! ## Examples
//!
//! ```rust
//! use css_styleguide::{CompilerSupport, SerializerOptions};
//!
//! let options = SerializerOptions::new()
//!     .with_compiler_support(CompilerSupport::Dartsass)
//!     .with_evaluation_limit(5000);
//!
//! assert_eq!(options.compiler_support.as_str(), "dartsass");
//! ```

use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

/// Default maximum length of a string given to a literal parser.
pub const DEFAULT_EVALUATION_LIMIT: usize = 1000;

/// Sass compiler the CSS manifest was built with.
///
/// - **Libsass**: structured values are JSON literals
/// - **Dartsass**: structured values use the permissive literal syntax
///   (`True`, `False`, `None`, single or double quoted strings, tuples)
///
/// # Examples
///
/// ```rust
/// use css_styleguide::CompilerSupport;
///
/// assert_eq!("dartsass".parse::<CompilerSupport>().unwrap(), CompilerSupport::Dartsass);
/// assert!("sassc".parse::<CompilerSupport>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CompilerSupport {
    #[default]
    Libsass,
    Dartsass,
}

impl CompilerSupport {
    /// Returns the name used in manifests and metas.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CompilerSupport::Libsass => "libsass",
            CompilerSupport::Dartsass => "dartsass",
        }
    }
}

impl fmt::Display for CompilerSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerSupport {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "libsass" => Ok(CompilerSupport::Libsass),
            "dartsass" => Ok(CompilerSupport::Dartsass),
            other => Err(Error::serializer(format!(
                "Invalid compiler support name '{}', expected 'libsass' or 'dartsass'",
                other
            ))),
        }
    }
}

/// Strategy to turn a raw property string into a list of values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Splitter {
    /// Split on single space characters
    #[default]
    WhiteSpace,
    /// Decode a literal list
    ObjectList,
}

impl Splitter {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Splitter::WhiteSpace => "white-space",
            Splitter::ObjectList => "object-list",
        }
    }

    /// Resolves a splitter name.
    ///
    /// Returns the splitter and whether the name was a deprecated alias.
    pub fn resolve(name: &str) -> Option<(Splitter, bool)> {
        match name {
            "white-space" => Some((Splitter::WhiteSpace, false)),
            "object-list" => Some((Splitter::ObjectList, false)),
            "json-list" => Some((Splitter::ObjectList, true)),
            _ => None,
        }
    }
}

/// Optional normalization applied after splitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cleaner {
    /// Drop empty pieces, or strip string items of a literal list
    Whitespaces,
}

impl Cleaner {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Cleaner::Whitespaces => "whitespaces",
        }
    }
}

impl FromStr for Cleaner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "whitespaces" => Ok(Cleaner::Whitespaces),
            other => Err(Error::serializer(format!(
                "Invalid cleaner name '{}'",
                other
            ))),
        }
    }
}

/// Configuration options for [`ManifestSerializer`](crate::ManifestSerializer).
///
/// # Examples
///
/// ```rust
/// use css_styleguide::SerializerOptions;
///
/// let options = SerializerOptions::new();
/// assert_eq!(options.evaluation_limit, 1000);
///
/// // Zero disables the limit
/// let options = SerializerOptions::new().with_evaluation_limit(0);
/// assert_eq!(options.evaluation_limit, 0);
/// ```
#[derive(Clone, Debug)]
pub struct SerializerOptions {
    pub compiler_support: CompilerSupport,
    /// Maximum length of a string given to a literal parser, `0` means unlimited.
    pub evaluation_limit: usize,
    /// Frozen value for the `created` meta instead of the current local time.
    pub fixed_timestamp: Option<NaiveDateTime>,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        SerializerOptions {
            compiler_support: CompilerSupport::default(),
            evaluation_limit: DEFAULT_EVALUATION_LIMIT,
            fixed_timestamp: None,
        }
    }
}

impl SerializerOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_compiler_support(mut self, compiler_support: CompilerSupport) -> Self {
        self.compiler_support = compiler_support;
        self
    }

    /// Sets the maximum length of strings given to literal parsers.
    ///
    /// Disabling it (`0`) lets arbitrarily long literals reach the parser, only do
    /// this for trusted manifests.
    #[must_use]
    pub fn with_evaluation_limit(mut self, limit: usize) -> Self {
        self.evaluation_limit = limit;
        self
    }

    /// Freezes the `created` meta to the given timestamp.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use css_styleguide::SerializerOptions;
    ///
    /// let frozen = NaiveDate::from_ymd_opt(2012, 10, 15)
    ///     .and_then(|d| d.and_hms_opt(10, 0, 0))
    ///     .unwrap();
    /// let options = SerializerOptions::new().with_fixed_timestamp(frozen);
    /// assert!(options.fixed_timestamp.is_some());
    /// ```
    #[must_use]
    pub fn with_fixed_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.fixed_timestamp = Some(timestamp);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splitter_aliases() {
        assert_eq!(
            Splitter::resolve("white-space"),
            Some((Splitter::WhiteSpace, false))
        );
        assert_eq!(
            Splitter::resolve("json-list"),
            Some((Splitter::ObjectList, true))
        );
        assert_eq!(Splitter::resolve("comma"), None);
    }

    #[test]
    fn test_cleaner_names() {
        assert_eq!("whitespaces".parse::<Cleaner>().unwrap(), Cleaner::Whitespaces);
        assert!("spaces".parse::<Cleaner>().is_err());
    }

    #[test]
    fn test_defaults() {
        let options = SerializerOptions::default();
        assert_eq!(options.compiler_support, CompilerSupport::Libsass);
        assert_eq!(options.evaluation_limit, DEFAULT_EVALUATION_LIMIT);
        assert!(options.fixed_timestamp.is_none());
    }
}
