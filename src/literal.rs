//! Literal parser for the `dartsass` compiler support.
//!
//! Dart Sass does not produce JSON when a map or a list is inspected, it gives a
//! looser literal syntax:
//!
//! - `True`, `False` and `None` keywords
//! - strings quoted with `'` or `"`
//! - lists `[...]` and tuples `(...)`, both decoded as arrays
//! - dictionaries `{key: value}` whose keys are scalars
//! - integers and floats, sign aware, with an optional exponent
//!
//! Nothing else is accepted: there are no names, operators or calls, so decoding an
//! untrusted string can never evaluate anything. Nesting depth is bounded and the
//! caller is expected to bound the input length too.
//!
//! ## Usage
//!
//! ```rust
//! use css_styleguide::literal::parse_literal;
//! use css_styleguide::value;
//!
//! let decoded = parse_literal("{'foo': 'bar', 'life': 42, 'moo': True}").unwrap();
//! assert_eq!(decoded, value!({ "foo": "bar", "life": 42, "moo": true }));
//! ```

use crate::{Error, Number, Result, Value, ValueMap};

/// Maximum nesting of lists, tuples and dictionaries.
pub const MAX_DEPTH: usize = 128;

/// Decodes a whole literal string into a [`Value`].
///
/// # Errors
///
/// Returns [`Error::Syntax`] on any unsupported or malformed input, including
/// trailing content after the literal.
pub fn parse_literal(input: &str) -> Result<Value> {
    let mut parser = LiteralParser::new(input);
    parser.parse()
}

/// Single pass recursive descent parser over a literal string.
pub struct LiteralParser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> LiteralParser<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        LiteralParser {
            input,
            position: 0,
            line: 1,
            column: 1,
            depth: 0,
        }
    }

    /// Parses the complete input as a single literal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] when the input is not exactly one literal.
    pub fn parse(&mut self) -> Result<Value> {
        self.skip_whitespace();
        let value = self.parse_value()?;
        self.skip_whitespace();

        if !self.at_end() {
            return Err(self.error("Unexpected content after literal"));
        }

        Ok(value)
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.column, msg)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.next_char() {
            Some(ch) if ch == expected => Ok(()),
            Some(_) => Err(self.error(&format!("Expected '{}'", expected))),
            None => Err(self.error(&format!("Expected '{}', got end of input", expected))),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("Maximum nesting depth exceeded"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek_char() {
            Some('[') => self.parse_list(),
            Some('(') => self.parse_tuple(),
            Some('{') => self.parse_dict(),
            Some('\'') | Some('"') => self.parse_string().map(Value::String),
            Some(ch) if ch == '-' || ch == '+' || ch == '.' || ch.is_ascii_digit() => {
                self.parse_number().map(Value::Number)
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => self.parse_keyword(),
            Some(_) => Err(self.error("Unexpected character")),
            None => Err(self.error("Unexpected end of input")),
        }
    }

    fn parse_keyword(&mut self) -> Result<Value> {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.next_char();
            } else {
                break;
            }
        }

        match &self.input[start..self.position] {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            _ => Err(self.error("Names are not allowed in literals")),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = match self.next_char() {
            Some(ch) if ch == '\'' || ch == '"' => ch,
            _ => return Err(self.error("Expected string")),
        };
        let mut result = String::new();

        while let Some(ch) = self.next_char() {
            match ch {
                '\\' => match self.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('\'') => result.push('\''),
                    Some('"') => result.push('"'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('0') => result.push('\0'),
                    Some('\n') => {}
                    Some('u') => result.push(self.parse_unicode_escape()?),
                    Some(other) => {
                        // Unknown escapes are kept as written
                        result.push('\\');
                        result.push(other);
                    }
                    None => return Err(self.error("Unexpected end of input in string")),
                },
                '\n' => return Err(self.error("Unterminated string")),
                other if other == quote => return Ok(result),
                other => result.push(other),
            }
        }

        Err(self.error("Unterminated string"))
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let mut hex = String::with_capacity(4);
        for _ in 0..4 {
            match self.next_char() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                _ => {
                    return Err(
                        self.error("Invalid unicode escape sequence (expected 4 hex digits)")
                    )
                }
            }
        }

        let code_point = u32::from_str_radix(&hex, 16)
            .map_err(|_| self.error("Invalid hex in unicode escape"))?;

        char::from_u32(code_point).ok_or_else(|| self.error("Invalid unicode code point"))
    }

    fn parse_number(&mut self) -> Result<Number> {
        let start = self.position;

        if let Some('-') | Some('+') = self.peek_char() {
            self.next_char();
        }

        let mut is_float = false;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() || ch == '_' {
                self.next_char();
            } else if ch == '.' && !is_float {
                is_float = true;
                self.next_char();
            } else if ch == 'e' || ch == 'E' {
                is_float = true;
                self.next_char();
                if let Some('-') | Some('+') = self.peek_char() {
                    self.next_char();
                }
            } else {
                break;
            }
        }

        let number_str = self.input[start..self.position].replace('_', "");

        if is_float {
            number_str
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| self.error("Invalid float"))
        } else {
            number_str
                .parse::<i64>()
                .map(Number::Integer)
                .map_err(|_| self.error("Invalid integer"))
        }
    }

    /// Parses comma separated values up to `close`, trailing comma allowed.
    fn parse_sequence(&mut self, close: char) -> Result<Vec<Value>> {
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(close) {
                self.next_char();
                return Ok(items);
            }

            items.push(self.parse_value()?);
            self.skip_whitespace();

            match self.next_char() {
                Some(',') => continue,
                Some(ch) if ch == close => return Ok(items),
                Some(_) => return Err(self.error(&format!("Expected ',' or '{}'", close))),
                None => return Err(self.error(&format!("Expected '{}'", close))),
            }
        }
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.expect_char('[')?;
        self.enter()?;
        let items = self.parse_sequence(']')?;
        self.leave();
        Ok(Value::Array(items))
    }

    fn parse_tuple(&mut self) -> Result<Value> {
        self.expect_char('(')?;
        self.enter()?;
        self.skip_whitespace();

        if self.peek_char() == Some(')') {
            self.next_char();
            self.leave();
            return Ok(Value::Array(Vec::new()));
        }

        let first = self.parse_value()?;
        self.skip_whitespace();

        let value = match self.next_char() {
            // Parenthesized expression, not a tuple
            Some(')') => first,
            Some(',') => {
                let mut items = vec![first];
                items.extend(self.parse_sequence(')')?);
                Value::Array(items)
            }
            Some(_) => return Err(self.error("Expected ',' or ')'")),
            None => return Err(self.error("Expected ')'")),
        };

        self.leave();
        Ok(value)
    }

    fn parse_dict(&mut self) -> Result<Value> {
        self.expect_char('{')?;
        self.enter()?;
        let mut object = ValueMap::new();

        loop {
            self.skip_whitespace();
            if self.peek_char() == Some('}') {
                self.next_char();
                break;
            }

            let key = self.parse_value()?;
            let key = match key.to_key() {
                Some(key) => key,
                None => return Err(self.error("Dictionary keys must be scalar values")),
            };

            self.skip_whitespace();
            self.expect_char(':')?;
            self.skip_whitespace();

            let value = self.parse_value()?;
            object.insert(key, value);
            self.skip_whitespace();

            match self.next_char() {
                Some(',') => continue,
                Some('}') => break,
                Some(_) => return Err(self.error("Expected ',' or '}'")),
                None => return Err(self.error("Expected '}'")),
            }
        }

        self.leave();
        Ok(Value::Object(object))
    }
}
