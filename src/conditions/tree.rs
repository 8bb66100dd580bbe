//! Condition trees and their evaluation against a hand.
//!
//! Every node keeps a success counter: how many of its evaluations
//! returned true. Composite nodes always evaluate every child, even when
//! the result is already decided, so each child's counter stays accurate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::error::{SimError, SimResult};

/// Comparison between a card count and a quantity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompareOp {
    #[default]
    AtLeast,
    Exactly,
    AtMost,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            CompareOp::AtLeast => ">=",
            CompareOp::Exactly => "=",
            CompareOp::AtMost => "<=",
        }
    }

    #[must_use]
    pub fn compare(self, count: u32, quantity: u32) -> bool {
        match self {
            CompareOp::AtLeast => count >= quantity,
            CompareOp::Exactly => count == quantity,
            CompareOp::AtMost => count <= quantity,
        }
    }
}

impl FromStr for CompareOp {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">=" => Ok(CompareOp::AtLeast),
            "=" => Ok(CompareOp::Exactly),
            "<=" => Ok(CompareOp::AtMost),
            other => Err(SimError::UnknownOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for CompareOp {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompareOp> for String {
    fn from(op: CompareOp) -> Self {
        op.symbol().to_string()
    }
}

fn default_quantity() -> u32 {
    1
}

/// Leaf: count cards in hand matching a name or tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCondition {
    pub card_name: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default)]
    pub operator: CompareOp,

    #[serde(skip)]
    successes: u32,
}

impl CardCondition {
    #[must_use]
    pub fn new(card_name: impl Into<String>, quantity: u32, operator: CompareOp) -> Self {
        Self {
            card_name: card_name.into(),
            quantity,
            operator,
            successes: 0,
        }
    }

    /// Cards in `hand` whose name or tags contain `card_name`.
    #[must_use]
    pub fn count(&self, hand: &[&Card]) -> u32 {
        hand.iter().filter(|card| card.matches(&self.card_name)).count() as u32
    }

    fn evaluate(&self, hand: &[&Card]) -> bool {
        self.operator.compare(self.count(hand), self.quantity)
    }
}

/// Children of an AND / OR node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicCondition {
    pub conditions: Vec<Condition>,

    #[serde(skip)]
    successes: u32,
}

/// A boolean expression over card counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Condition {
    Card(CardCondition),
    And(LogicCondition),
    Or(LogicCondition),
}

impl Condition {
    #[must_use]
    pub fn card(card_name: impl Into<String>, quantity: u32, operator: CompareOp) -> Self {
        Condition::Card(CardCondition::new(card_name, quantity, operator))
    }

    #[must_use]
    pub fn and(left: Condition, right: Condition) -> Self {
        Condition::And(LogicCondition {
            conditions: vec![left, right],
            successes: 0,
        })
    }

    #[must_use]
    pub fn or(left: Condition, right: Condition) -> Self {
        Condition::Or(LogicCondition {
            conditions: vec![left, right],
            successes: 0,
        })
    }

    /// Evaluate against a hand, bumping the success counter of every node
    /// that comes out true.
    pub fn evaluate(&mut self, hand: &[&Card]) -> bool {
        let (result, successes) = match self {
            Condition::Card(leaf) => (leaf.evaluate(hand), &mut leaf.successes),
            Condition::And(node) => {
                let mut all = true;
                for child in &mut node.conditions {
                    all &= child.evaluate(hand);
                }
                (all, &mut node.successes)
            }
            Condition::Or(node) => {
                let mut any = false;
                for child in &mut node.conditions {
                    any |= child.evaluate(hand);
                }
                (any, &mut node.successes)
            }
        };
        if result {
            *successes += 1;
        }
        result
    }

    /// Number of evaluations of this node that returned true.
    #[must_use]
    pub fn successes(&self) -> u32 {
        match self {
            Condition::Card(leaf) => leaf.successes,
            Condition::And(node) | Condition::Or(node) => node.successes,
        }
    }

    /// Zero every counter in the tree.
    pub fn reset_successes(&mut self) {
        match self {
            Condition::Card(leaf) => leaf.successes = 0,
            Condition::And(node) | Condition::Or(node) => {
                node.successes = 0;
                node.conditions.iter_mut().for_each(Condition::reset_successes);
            }
        }
    }

    /// Every name or tag the tree refers to.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Condition::Card(leaf) => vec![leaf.card_name.as_str()],
            Condition::And(node) | Condition::Or(node) => {
                node.conditions.iter().flat_map(Condition::names).collect()
            }
        }
    }

    /// Reject trees the grammar could never produce.
    pub fn validate(&self) -> SimResult<()> {
        match self {
            Condition::Card(leaf) => {
                if leaf.card_name.trim().is_empty() {
                    return Err(SimError::InvalidConfig("condition with empty card name".into()));
                }
                if leaf.quantity == 0 {
                    return Err(SimError::InvalidConfig(format!(
                        "condition on `{}` has quantity 0",
                        leaf.card_name
                    )));
                }
                Ok(())
            }
            Condition::And(node) | Condition::Or(node) => {
                if node.conditions.is_empty() {
                    return Err(SimError::InvalidConfig("empty AND/OR condition".into()));
                }
                node.conditions.iter().try_for_each(Condition::validate)
            }
        }
    }
}

impl fmt::Display for CardCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operator, self.quantity) {
            (CompareOp::AtLeast, 1) => write!(f, "{}", self.card_name),
            (CompareOp::AtLeast, q) => write!(f, "{q}+ {}", self.card_name),
            (CompareOp::Exactly, q) => write!(f, "{q} {}", self.card_name),
            // Not expressible in the grammar; display only
            (CompareOp::AtMost, q) => write!(f, "<={q} {}", self.card_name),
        }
    }
}

/// Renders in the condition grammar; composite children are parenthesised.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (node, keyword) = match self {
            Condition::Card(leaf) => return fmt::Display::fmt(leaf, f),
            Condition::And(node) => (node, " AND "),
            Condition::Or(node) => (node, " OR "),
        };
        for (i, child) in node.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(keyword)?;
            }
            match child {
                Condition::Card(_) => write!(f, "{child}")?,
                _ => write!(f, "({child})")?,
            }
        }
        Ok(())
    }
}
