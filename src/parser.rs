//! CSS source parser.
//!
//! This parser only knows the cases the manifest syntax needs, so it is naive on
//! purpose: selectors are reduced to their identifiers and rule bodies to
//! `identifier: "string"` pairs. Anything more evolved than that gives unspecified
//! names or values instead of an error.
//!
//! Rules outside of the `styleguide-` namespace are dropped, so a manifest can live
//! next to ordinary CSS, even CSS this parser would not understand.
//!
//! Tokenizing is done by [`cssparser`]. A fatal syntax problem reported by the
//! tokenizer (a qualified rule without a `{}` block) aborts the whole parse with an
//! [`Error::Parse`] listing every problem.
//!
//! ```rust
//! use css_styleguide::SourceParser;
//!
//! let rules = SourceParser::new()
//!     .consume(r#".styleguide-foo { --myvar: "ping"; } .other { color: red; }"#)
//!     .unwrap();
//!
//! assert_eq!(rules.len(), 1);
//! assert_eq!(rules["styleguide-foo"]["myvar"].as_deref(), Some("ping"));
//! ```

use crate::nomenclature::RULE_BASE_PREFIX;
use crate::{Error, Result};
use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, ParseError, ParseErrorKind, Parser,
    ParserInput, ParserState, QualifiedRuleParser, StyleSheetParser, Token,
};
use indexmap::IndexMap;

/// Properties of a rule: property name to raw string value.
///
/// A property without a following string token has no value.
pub type RawProperties = IndexMap<String, Option<String>>;

/// Every manifest rule from a source, in first-seen order.
pub type RawRuleSet = IndexMap<String, RawProperties>;

/// Separator joining the identifiers of a descendant selector.
pub const DESCENDANT_SEPARATOR: &str = "__";

/// A token kept from a rule prelude or body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleToken {
    Ident(String),
    String(String),
    Other,
}

/// A qualified rule as token sequences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualifiedRule {
    pub prelude: Vec<RuleToken>,
    pub content: Vec<RuleToken>,
}

/// Tokenizes a stylesheet into its qualified rules.
///
/// At-rules are consumed and dropped. Nested blocks are kept as a single
/// [`RuleToken::Other`].
///
/// # Errors
///
/// Returns [`Error::Parse`] with one diagnostic per rule the tokenizer rejected.
pub fn tokenize(source: &str) -> Result<Vec<QualifiedRule>> {
    let mut input = ParserInput::new(source);
    let mut parser = Parser::new(&mut input);
    let mut collector = RuleCollector;

    let mut rules = Vec::new();
    let mut diagnostics = Vec::new();

    for result in StyleSheetParser::new(&mut parser, &mut collector) {
        match result {
            Ok(Some(rule)) => rules.push(rule),
            Ok(None) => {}
            Err((error, slice)) => diagnostics.push(describe_error(source, slice, &error)),
        }
    }

    if diagnostics.is_empty() {
        Ok(rules)
    } else {
        Err(Error::parse(diagnostics))
    }
}

fn describe_error(source: &str, slice: &str, error: &ParseError<'_, ()>) -> String {
    let message = match &error.kind {
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "EOF reached before {} block for a qualified rule.".to_string()
        }
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("Unexpected token {:?}.", token)
        }
        ParseErrorKind::Basic(BasicParseErrorKind::QualifiedRuleInvalid) => {
            "Invalid qualified rule.".to_string()
        }
        ParseErrorKind::Basic(other) => format!("{:?}.", other),
        ParseErrorKind::Custom(()) => "Invalid rule.".to_string(),
    };

    // cssparser lines are zero based, columns are one based
    let (line, column) = rule_position(source, slice).unwrap_or((
        error.location.line as usize + 1,
        error.location.column as usize,
    ));

    format!("Line {} - Column {} : [invalid] {}", line, column, message)
}

/// One based line and column where a rejected rule starts.
///
/// `slice` is the rule source as handed back by cssparser, it always borrows from
/// `source`.
fn rule_position(source: &str, slice: &str) -> Option<(usize, usize)> {
    let offset = (slice.as_ptr() as usize).checked_sub(source.as_ptr() as usize)?;
    let before = source.get(..offset)?;

    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(index) => before[index + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };

    Some((line, column))
}

fn collect_tokens(input: &mut Parser<'_, '_>) -> Vec<RuleToken> {
    let mut tokens = Vec::new();

    while let Ok(token) = input.next() {
        tokens.push(match token {
            Token::Ident(value) => RuleToken::Ident(value.to_string()),
            Token::QuotedString(value) => RuleToken::String(value.to_string()),
            _ => RuleToken::Other,
        });
    }

    tokens
}

struct RuleCollector;

impl<'i> QualifiedRuleParser<'i> for RuleCollector {
    type Prelude = Vec<RuleToken>;
    type QualifiedRule = Option<QualifiedRule>;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(collect_tokens(input))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Ok(Some(QualifiedRule {
            prelude,
            content: collect_tokens(input),
        }))
    }
}

impl<'i> AtRuleParser<'i> for RuleCollector {
    type Prelude = ();
    type AtRule = Option<QualifiedRule>;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::Prelude, ParseError<'i, Self::Error>> {
        collect_tokens(input);
        Ok(())
    }

    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> std::result::Result<Self::AtRule, ()> {
        Ok(None)
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> std::result::Result<Self::AtRule, ParseError<'i, Self::Error>> {
        collect_tokens(input);
        Ok(None)
    }
}

/// Turns CSS sources into a [`RawRuleSet`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceParser;

impl SourceParser {
    #[must_use]
    pub fn new() -> Self {
        SourceParser
    }

    /// Returns the rule name from its selector tokens.
    ///
    /// Identifiers are concatenated with `__`, so `.foo .bar` gives `foo__bar`. Only
    /// simple selectors and descendant combinators are meaningful.
    #[must_use]
    pub fn digest_prelude(&self, rule: &QualifiedRule) -> String {
        rule.prelude
            .iter()
            .filter_map(|token| match token {
                RuleToken::Ident(value) => Some(value.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(DESCENDANT_SEPARATOR)
    }

    /// Returns the properties from the rule body tokens.
    ///
    /// Each identifier opens a property, leading dashes removed so custom properties
    /// like `--names` give `names`. The first string token after it becomes its
    /// value.
    #[must_use]
    pub fn digest_content(&self, rule: &QualifiedRule) -> RawProperties {
        let mut data = RawProperties::new();
        let mut current: Option<(String, bool)> = None;

        for token in &rule.content {
            match token {
                RuleToken::Ident(value) => {
                    let name = value.trim_start_matches('-').to_string();
                    data.insert(name.clone(), None);
                    current = Some((name, false));
                }
                RuleToken::String(value) => {
                    if let Some((name, filled)) = current.as_mut() {
                        if !*filled {
                            data.insert(name.clone(), Some(value.clone()));
                            *filled = true;
                        }
                    }
                }
                RuleToken::Other => {}
            }
        }

        data
    }

    /// Parses a source and keeps the rules of the manifest namespace.
    ///
    /// A rule declared twice keeps its first position and its last properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] when the tokenizer reports fatal syntax errors.
    pub fn consume(&self, source: &str) -> Result<RawRuleSet> {
        let namespace = format!("{}-", RULE_BASE_PREFIX);
        let mut manifest = RawRuleSet::new();

        for rule in tokenize(source)? {
            let name = self.digest_prelude(&rule);

            if !name.starts_with(&namespace) {
                continue;
            }

            let properties = self.digest_content(&rule);
            manifest.insert(name, properties);
        }

        Ok(manifest)
    }

    /// Alias of [`SourceParser::consume`].
    pub fn parse(&self, source: &str) -> Result<RawRuleSet> {
        self.consume(source)
    }
}
