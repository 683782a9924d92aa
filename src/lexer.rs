use serde::Serialize;

use crate::errors::PathSyntaxError;
use crate::parser::Parser;

/// One step of a path, in the order it is applied to the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    Root,                  // $
    DeepScan,              // ..
    DeepScanField(String), // ..name
    Field(String),         // .name
    Wildcard,              // [*]
    Filter(String),        // [?(expr)]
    Slice {
        start: Option<i64>,
        end: Option<i64>,
    }, // [start:end]
    Index(String),         // [0] or ['key']
}

const NAME_STOPS: [char; 2] = ['.', '['];

/// Split a path into tokens in a single left-to-right pass.
pub fn tokenize(path: &str) -> Result<Vec<Token>, PathSyntaxError> {
    let mut p = Parser::new(path);
    let mut tokens = Vec::new();

    while !p.eof() {
        if p.consume_char('$') {
            tokens.push(Token::Root);
            continue;
        }
        if p.consume_str("..") {
            let name = p.take_until_any(&NAME_STOPS);
            if name.is_empty() {
                tokens.push(Token::DeepScan);
            } else {
                tokens.push(Token::DeepScanField(name.to_string()));
            }
            continue;
        }
        if p.peek_char() == Some('.') {
            let position = p.position();
            p.consume_char('.');
            let name = p.take_until_any(&NAME_STOPS);
            if name.is_empty() {
                return Err(PathSyntaxError::EmptyField { position });
            }
            tokens.push(Token::Field(name.to_string()));
            continue;
        }
        if p.peek_char() == Some('[') {
            tokens.push(bracket(&mut p)?);
            continue;
        }
        return Err(PathSyntaxError::Unexpected {
            position: p.position(),
            tail: p.rest().to_string(),
        });
    }
    Ok(tokens)
}

fn bracket(p: &mut Parser) -> Result<Token, PathSyntaxError> {
    let position = p.position();
    if p.consume_str("[*]") {
        return Ok(Token::Wildcard);
    }
    p.consume_char('[');
    let content = p
        .capture_until_unescaped(']')
        .ok_or(PathSyntaxError::UnmatchedBracket { position })?;
    p.consume_char(']');

    if let Some(expr) = content.strip_prefix('?') {
        return Ok(Token::Filter(expr.trim().to_string()));
    }
    if let Some((start, end)) = content.split_once(':') {
        let bound = |s: &str| -> Result<Option<i64>, PathSyntaxError> {
            let t = s.trim();
            if t.is_empty() {
                return Ok(None);
            }
            t.parse::<i64>()
                .map(Some)
                .map_err(|_| PathSyntaxError::InvalidSlice {
                    position,
                    bound: s.to_string(),
                })
        };
        return Ok(Token::Slice {
            start: bound(start)?,
            end: bound(end)?,
        });
    }
    let key = content.trim_matches(|c| c == '\'' || c == '"');
    Ok(Token::Index(key.replace("\\]", "]").replace("\\[", "[")))
}
