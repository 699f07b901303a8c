//! CSS Manifest Dialect
//!
//! This module documents the CSS dialect a manifest is written in, as understood by
//! this library.
//!
//! # Overview
//!
//! A manifest is ordinary CSS, usually compiled from Sass, where a few rules in the
//! reserved `styleguide` namespace carry design system data (palettes, spacing
//! scales, breakpoints, ...) as custom properties with string values. The library
//! reads them back into a structured document.
//!
//! ## Design Philosophy
//!
//! - **Naive parsing**: only simple selectors and `property: "string"` declarations
//!   are understood, everything outside the namespace is ignored
//! - **Explicit shapes**: every reference declares how its strings become data
//! - **Strict names**: reference and property names are valid identifiers in most
//!   languages, so templates can address them directly
//!
//! # Rules
//!
//! | Selector                        | Role |
//! |---------------------------------|------|
//! | `.styleguide-metas-references`  | **Required.** Enables references |
//! | `.styleguide-metas-compiler`    | Optional. Declares the compiler support |
//! | `.styleguide-reference-NAME`    | Declares the reference `NAME` |
//!
//! A selector made of several classes, like `.styleguide-reference-foo .bar`, is
//! named by joining its identifiers with `__`: `styleguide-reference-foo__bar`.
//! When a rule is declared twice, the last declaration wins.
//!
//! ## Declarations
//!
//! Each identifier in a rule body starts a property and the first following string
//! is its value. Leading dashes are dropped so custom properties work:
//!
//! ```css
//! .styleguide-reference-palette {
//!     --structure: "flat";
//!     --keys: "black white";
//!     --values: "#000000 #ffffff";
//! }
//! ```
//!
//! gives the properties `structure`, `keys` and `values`. Values are always strings,
//! typing only happens during serialization.
//!
//! # Enabling References
//!
//! Either list them explicitly, in the order they will be serialized:
//!
//! ```css
//! .styleguide-metas-references { --names: "palette spaces"; }
//! ```
//!
//! or enable every declared reference, in declaration order, minus some exclusions:
//!
//! ```css
//! .styleguide-metas-references { --auto: "true"; --excludes: "drafts"; }
//! ```
//!
//! `names` wins when both are declared. A name listed but not declared is an
//! error.
//!
//! # Structure Modes
//!
//! | `structure`      | Required      | Output |
//! |------------------|---------------|--------|
//! | `flat`           | `keys`, `values` | `{"black": "#000000", "white": "#ffffff"}` |
//! | `nested`         | `keys`        | `{"black": {"value": "#000000"}, ...}` |
//! | `list`           | `items`       | `["short", "normal", "large"]` |
//! | `string`         | `value`       | `"V42.0"` |
//! | `number`         | `value`       | `42` or `-4.2` |
//! | `object-complex` | `object`      | any literal |
//!
//! `structure` is mandatory. `json` is a deprecated alias of `object-complex`.
//!
//! ## Nested
//!
//! Every property other than `keys`, `splitter` and `cleaner` is split then
//! distributed by position over the keys:
//!
//! ```css
//! .styleguide-reference-schemes {
//!     --structure: "nested";
//!     --keys: "black white";
//!     --background: "#000000 #ffffff";
//!     --font_color: "#ffffff #000000";
//! }
//! ```
//!
//! Every property must hold exactly as many values as `keys`.
//!
//! # Splitters And Cleaners
//!
//! | `splitter`    | Behavior |
//! |---------------|----------|
//! | `white-space` | Default. Split on every single space, empty pieces kept |
//! | `object-list` | Decode a list literal, items keep their types |
//! | `json-list`   | Deprecated alias of `object-list` |
//!
//! The only cleaner is `whitespaces`: it drops empty pieces from a `white-space`
//! split and strips string items of an `object-list`.
//!
//! # Literals
//!
//! `object-list` values and `object` properties are decoded according to the
//! compiler support:
//!
//! - `libsass` (default): strict JSON, member order preserved
//! - `dartsass`: `True`, `False`, `None`, single or double quoted strings, lists,
//!   tuples and dictionaries
//!
//! Literals longer than the evaluation limit (1000 characters by default) are
//! truncated before decoding, with a warning.
//!
//! # Names
//!
//! Reference and property names must start with an ASCII letter and only contain
//! ASCII letters, digits and `_`. Reserved words are listed in
//! [`nomenclature`](crate::nomenclature).
//!
//! # Output Document
//!
//! ```json
//! {
//!     "metas": {
//!         "compiler_support": "libsass",
//!         "references": ["palette"],
//!         "created": "2012-10-15T10:00:00"
//!     },
//!     "palette": {"black": "#000000", "white": "#ffffff"}
//! }
//! ```
//!
//! # Limitations
//!
//! - No media queries, pseudo classes, attribute selectors or combinators other
//!   than the descendant one
//! - No unquoted values: `--value: 42` gives a property `value` without value and
//!   no property named `42`
//! - A fatal syntax error anywhere in the source, even outside the namespace,
//!   aborts the parse
