//! # css_styleguide
//!
//! Reads design system data declared in CSS back into a structured document.
//!
//! ## What is a CSS manifest?
//!
//! A CSS manifest is a stylesheet, usually compiled from Sass, where some rules of
//! the reserved `styleguide` namespace declare references (color palettes, spacing
//! scales, breakpoints, ...) as custom properties. This crate parses them and
//! serializes every enabled reference according to its declared structure, so the
//! values written once in Sass can be reused by templates, documentation or any
//! other tool reading JSON.
//!
//! ## Key Features
//!
//! - **Naive by design**: only the manifest rules are read, the rest of the CSS is
//!   ignored
//! - **Typed references**: flat maps, nested maps, lists, strings, numbers and
//!   arbitrary literals
//! - **Both Sass compilers**: JSON literals from libsass, looser literals from Dart
//!   Sass
//! - **Round trip**: a manifest dumps to JSON and restores from it without CSS
//! - **No code evaluation**: literals are decoded by a bounded parser
//!
//! ## Quick Start
//!
//! ```rust
//! use css_styleguide::{from_str, value};
//!
//! let manifest = from_str(r##"
//!     .styleguide-metas-references { --names: "palette spaces"; }
//!
//!     .styleguide-reference-palette {
//!         --structure: "flat";
//!         --keys: "black white";
//!         --values: "#000000 #ffffff";
//!     }
//!
//!     .styleguide-reference-spaces {
//!         --structure: "list";
//!         --items: "short normal large";
//!     }
//!
//!     .not-a-manifest-rule { color: red; }
//! "##).unwrap();
//!
//! assert_eq!(manifest.reference_names().collect::<Vec<_>>(), vec!["palette", "spaces"]);
//! assert_eq!(
//!     manifest.get_reference("palette").unwrap().to_value(),
//!     value!({ "black": "#000000", "white": "#ffffff" })
//! );
//! ```
//!
//! ### Dumping and restoring
//!
//! ```rust
//! use css_styleguide::{from_str, Manifest};
//!
//! let manifest = from_str(r#"
//!     .styleguide-metas-references { --auto: "true"; }
//!     .styleguide-reference-life { --structure: "number"; --value: "42"; }
//! "#).unwrap();
//!
//! let json = manifest.to_json(4).unwrap();
//! let restored = Manifest::from_json(&json).unwrap();
//! assert_eq!(restored.to_dict(), manifest.to_dict());
//! ```
//!
//! ### Options
//!
//! ```rust
//! use css_styleguide::{from_str_with_options, CompilerSupport, SerializerOptions};
//!
//! let options = SerializerOptions::new().with_compiler_support(CompilerSupport::Dartsass);
//! let manifest = from_str_with_options(r#"
//!     .styleguide-metas-references { --names: "config"; }
//!     .styleguide-reference-config {
//!         --structure: "object-complex";
//!         --object: "{'debug': False, 'sizes': (1, 2)}";
//!     }
//! "#, options).unwrap();
//!
//! assert_eq!(manifest.metas().compiler_support.as_deref(), Some("dartsass"));
//! ```
//!
//! ## Dialect
//!
//! The complete CSS dialect is described in the [`dialect`] module.

pub mod dialect;
pub mod error;
pub mod literal;
pub mod loader;
pub mod macros;
pub mod map;
pub mod model;
pub mod nomenclature;
pub mod options;
pub mod parser;
pub mod reference;
pub mod serializer;
pub mod value;

pub use error::{Error, NameKind, Result, ValidationRule, Warning};
pub use loader::{LoadStatus, LoadedManifest, ManifestLoader};
pub use map::ValueMap;
pub use model::{Manifest, DEFAULT_JSON_INDENT};
pub use options::{Cleaner, CompilerSupport, SerializerOptions, Splitter};
pub use parser::{RawProperties, RawRuleSet, SourceParser};
pub use reference::{ReferenceValue, StructureMode};
pub use serializer::{ManifestSerializer, Metas};
pub use value::{Number, Value};

use std::io;

/// Loads a manifest from a CSS string.
///
/// # Examples
///
/// ```rust
/// use css_styleguide::from_str;
///
/// let manifest = from_str(r#"
///     .styleguide-metas-references { --names: "version"; }
///     .styleguide-reference-version { --structure: "string"; --value: "V42.0"; }
/// "#).unwrap();
///
/// assert_eq!(manifest.get_reference("version").and_then(|r| r.as_str()), Some("V42.0"));
/// ```
///
/// # Errors
///
/// Returns an error if the CSS cannot be parsed or if the manifest rules are
/// invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(source: &str) -> Result<Manifest> {
    from_str_with_options(source, SerializerOptions::default())
}

/// Loads a manifest from a CSS string with custom options.
///
/// # Errors
///
/// Returns an error if the CSS cannot be parsed or if the manifest rules are
/// invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(source: &str, options: SerializerOptions) -> Result<Manifest> {
    let mut manifest = Manifest::with_options(options);
    manifest.load(source, None)?;
    Ok(manifest)
}

/// Loads a manifest from an I/O stream of CSS.
///
/// # Examples
///
/// ```rust
/// use css_styleguide::from_reader;
/// use std::io::Cursor;
///
/// let css = br#".styleguide-metas-references { --auto: "true"; }"#;
/// let manifest = from_reader(Cursor::new(css)).unwrap();
/// assert!(manifest.references().is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, then same as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R) -> Result<Manifest>
where
    R: io::Read,
{
    let mut manifest = Manifest::new();
    manifest.load_reader(reader, None)?;
    Ok(manifest)
}
