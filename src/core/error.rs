//! Error types.
//!
//! Configuration problems (bad condition strings, unknown operators, bad
//! request values) are fatal and surface before any trial runs. Deck
//! exhaustion is a per-trial outcome: the runner records the trial as a
//! non-match and keeps going.

use thiserror::Error;

/// Failure while tokenizing or parsing a condition string.
///
/// Positions are character offsets into the input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown character '{ch}' at {position}")]
    UnknownCharacter { ch: char, position: usize },

    #[error("unexpected {found} at {position}")]
    UnexpectedToken { found: &'static str, position: usize },

    #[error("unexpected end of condition")]
    UnexpectedEnd,

    #[error("group opened at {position} is never closed")]
    UnclosedGroup { position: usize },

    #[error("unexpected trailing input at {position}")]
    TrailingInput { position: usize },

    #[error("invalid quantity '{text}' at {position}")]
    InvalidQuantity { text: String, position: usize },
}

/// Top-level error for building and running simulations.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid condition `{input}`: {source}")]
    InvalidCondition {
        input: String,
        #[source]
        source: ParseError,
    },

    #[error("unsupported comparison operator `{0}`")]
    UnknownOperator(String),

    #[error("cannot draw from an empty deck")]
    DeckExhausted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed request: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// True for errors that must abort a request before any trial runs.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, SimError::DeckExhausted)
    }
}

/// Result alias used across the crate.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::UnknownCharacter { ch: '&', position: 4 };
        assert_eq!(err.to_string(), "unknown character '&' at 4");

        let err = ParseError::UnclosedGroup { position: 0 };
        assert!(err.to_string().contains("never closed"));
    }

    #[test]
    fn test_invalid_condition_wraps_source() {
        let err = SimError::InvalidCondition {
            input: "A &".to_string(),
            source: ParseError::UnknownCharacter { ch: '&', position: 2 },
        };
        assert!(err.is_configuration());
        assert!(err.to_string().starts_with("invalid condition `A &`"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_deck_exhausted_is_not_configuration() {
        assert!(!SimError::DeckExhausted.is_configuration());
    }
}
