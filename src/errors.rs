use thiserror::Error;

use crate::parser::ParseError;

/// Raised by the lexer; fatal to the whole extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathSyntaxError {
    #[error("invalid path at position {position}: {tail}")]
    Unexpected { position: usize, tail: String },

    #[error("unmatched '[' at position {position}")]
    UnmatchedBracket { position: usize },

    #[error("invalid slice bound {bound:?} at position {position}")]
    InvalidSlice { position: usize, bound: String },

    #[error("empty field name at position {position}")]
    EmptyField { position: usize },
}

impl PathSyntaxError {
    /// Character offset into the path where lexing stopped.
    pub fn position(&self) -> usize {
        match self {
            Self::Unexpected { position, .. }
            | Self::UnmatchedBracket { position }
            | Self::InvalidSlice { position, .. }
            | Self::EmptyField { position } => *position,
        }
    }
}

// Never leaves the filter evaluator; it is logged and the candidate is dropped.
#[derive(Debug, Error)]
pub(crate) enum FilterError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("cannot order {left} against {right} with `{op}`")]
    Incomparable {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] PathSyntaxError),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
