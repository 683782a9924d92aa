// src/parser.rs
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid syntax: {0}")]
    InvalidSyntax(String),
}

/// Character cursor shared by the path lexer and the filter grammar.
/// `i` is a byte offset into `s` and always sits on a char boundary.
pub struct Parser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    /// Offset of the cursor in characters, for error reporting.
    pub fn position(&self) -> usize {
        self.s[..self.i].chars().count()
    }

    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    pub fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if c == '_' || c.is_alphanumeric() {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
        if self.i == start {
            return Err(ParseError::InvalidSyntax("identifier expected".into()));
        }
        Ok(self.s[start..self.i].to_string())
    }

    pub fn parse_number_literal(&mut self) -> Result<Value, ParseError> {
        let start = self.i;
        if self.peek_char() == Some('-') {
            self.i += 1;
        }
        self.skip_digits();
        if self.peek_char() == Some('.') {
            self.i += 1;
            self.skip_digits();
        }
        let s = &self.s[start..self.i];
        if s.is_empty() || s == "-" {
            return Err(ParseError::InvalidSyntax("number expected".into()));
        }
        if s.contains('.') {
            let f: f64 = s
                .parse()
                .map_err(|_| ParseError::InvalidSyntax(format!("bad float `{s}`")))?;
            serde_json::Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| ParseError::InvalidSyntax(format!("bad float `{s}`")))
        } else {
            let i: i64 = s
                .parse()
                .map_err(|_| ParseError::InvalidSyntax(format!("bad int `{s}`")))?;
            Ok(Value::from(i))
        }
    }

    fn skip_digits(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.i += 1;
            } else {
                break;
            }
        }
    }

    pub fn parse_quoted_string(&mut self) -> Result<String, ParseError> {
        let quote = self
            .peek_char()
            .ok_or_else(|| ParseError::InvalidSyntax("string".into()))?;
        if quote != '\'' && quote != '"' {
            return Err(ParseError::InvalidSyntax("expected quoted string".into()));
        }
        self.i += 1;
        let mut out = String::new();
        while let Some(c) = self.peek_char() {
            self.i += c.len_utf8();
            if c == quote {
                return Ok(out);
            }
            if c == '\\' {
                if let Some(nc) = self.peek_char() {
                    self.i += nc.len_utf8();
                    match nc {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '\\' | '"' | '\'' | '[' | ']' => out.push(nc),
                        _ => {
                            out.push('\\');
                            out.push(nc);
                        }
                    }
                } else {
                    break;
                }
            } else {
                out.push(c);
            }
        }
        Err(ParseError::InvalidSyntax("unterminated string".into()))
    }

    /// Consume everything up to (not including) the first `end` that is not
    /// escaped with a backslash. Returns `None` and leaves the cursor untouched
    /// when no such character exists.
    pub fn capture_until_unescaped(&mut self, end: char) -> Option<&'a str> {
        let start = self.i;
        let mut escaped = false;
        for (off, c) in self.s[start..].char_indices() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == end {
                self.i = start + off;
                return Some(&self.s[start..self.i]);
            }
        }
        None
    }

    /// Consume characters until one of `stops` (or end of input).
    pub fn take_until_any(&mut self, stops: &[char]) -> &'a str {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if stops.contains(&c) {
                break;
            }
            self.i += c.len_utf8();
        }
        &self.s[start..self.i]
    }

    pub fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(ParseError::InvalidSyntax(format!("expected '{}'", c)))
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn consume_str(&mut self, lit: &str) -> bool {
        if self.peek_str(lit) {
            self.i += lit.len();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn peek_str(&self, lit: &str) -> bool {
        self.s[self.i..].starts_with(lit)
    }

    pub fn skip_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}
