//! Condition language: what a "good" opening hand looks like.
//!
//! ```
//! use hand_odds::conditions::parse_condition;
//!
//! let condition = parse_condition("2+ Pot of Desires AND (Upstart Goblin OR 3 Spellcaster)").unwrap();
//! assert_eq!(condition.to_string(), "2+ Pot of Desires AND (Upstart Goblin OR 3 Spellcaster)");
//! ```
//!
//! - `token`: string → tokens
//! - `parser`: tokens → `Condition` tree (left-associative AND/OR)
//! - `tree`: the tree, its evaluator, and its success counters

pub mod parser;
pub mod token;
pub mod tree;

use serde::{Deserialize, Serialize};

use crate::core::error::{SimError, SimResult};

pub use parser::parse;
pub use token::{tokenize, Logic, Spanned, Token};
pub use tree::{CardCondition, CompareOp, Condition, LogicCondition};

/// Parse a condition string, attaching the input to any error.
pub fn parse_condition(input: &str) -> SimResult<Condition> {
    parse(input).map_err(|source| SimError::InvalidCondition {
        input: input.to_string(),
        source,
    })
}

/// A condition as supplied by a caller: grammar text or an already-built tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionInput {
    Text(String),
    Parsed(Condition),
}

impl ConditionInput {
    /// Parse or validate into a tree ready for evaluation.
    pub fn into_condition(self) -> SimResult<Condition> {
        let condition = match self {
            ConditionInput::Text(text) => parse_condition(&text)?,
            ConditionInput::Parsed(condition) => condition,
        };
        condition.validate()?;
        Ok(condition)
    }
}

impl From<&str> for ConditionInput {
    fn from(text: &str) -> Self {
        ConditionInput::Text(text.to_string())
    }
}

impl From<Condition> for ConditionInput {
    fn from(condition: Condition) -> Self {
        ConditionInput::Parsed(condition)
    }
}
