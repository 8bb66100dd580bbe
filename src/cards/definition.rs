//! Card details as they arrive from deck configuration.
//!
//! A deck configuration maps card names to `CardDetails`:
//!
//! ```json
//! {
//!   "Pot of Desires": { "qty": 3, "tags": ["Draw"],
//!     "free": { "count": 2, "oncePerTurn": true,
//!               "cost": { "type": "BanishFromDeck", "value": 10 } } },
//!   "Ash Blossom": { "qty": 3, "tags": ["Hand Trap", "Non Engine"] }
//! }
//! ```
//!
//! These are plain values. They are read once when a deck is built and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Restrictions a free card places on the rest of the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Restriction {
    #[serde(alias = "NO_SPECIAL_SUMMON")]
    NoSpecialSummon,
    /// No further free cards may be played after this one.
    #[serde(alias = "NO_MORE_DRAWS")]
    NoMoreDraws,
    /// Only playable if no free card was played earlier this turn.
    #[serde(alias = "NO_PREVIOUS_DRAWS")]
    NoPreviousDraws,
}

/// What a free card costs to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostKind {
    #[serde(alias = "BANISH_FROM_DECK")]
    BanishFromDeck,
    #[serde(alias = "BANISH_FROM_HAND")]
    BanishFromHand,
    #[serde(alias = "DISCARD")]
    Discard,
    #[serde(alias = "PAY_LIFE")]
    PayLife,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    #[serde(rename = "type")]
    pub kind: CostKind,
    pub value: u32,
}

impl Cost {
    #[must_use]
    pub const fn new(kind: CostKind, value: u32) -> Self {
        Self { kind, value }
    }
}

/// Card-selection requirement attached to a free card's cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    #[serde(alias = "BANISH_FROM_DECK")]
    BanishFromDeck,
    #[serde(alias = "BANISH_FROM_HAND")]
    BanishFromHand,
    #[serde(alias = "DISCARD")]
    Discard,
    #[serde(alias = "REVEAL")]
    Reveal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeCondition {
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    pub value: u32,
}

/// Excavate metadata (look at the top `count` cards, keep `pick`).
///
/// Carried through from configuration but not resolved by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excavate {
    pub count: u32,
    #[serde(default)]
    pub pick: u32,
}

/// Free card metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeCardDetails {
    /// Cards drawn when played. May be zero.
    #[serde(default)]
    pub count: u32,

    #[serde(default)]
    pub once_per_turn: bool,

    #[serde(default)]
    pub restrictions: SmallVec<[Restriction; 3]>,

    #[serde(default)]
    pub cost: Option<Cost>,

    #[serde(default)]
    pub condition: Option<FreeCondition>,

    #[serde(default)]
    pub excavate: Option<Excavate>,
}

impl FreeCardDetails {
    /// A free card that draws `count` cards with no cost or restriction.
    #[must_use]
    pub fn draws(count: u32) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn once_per_turn(mut self) -> Self {
        self.once_per_turn = true;
        self
    }

    /// Add a restriction. Duplicates are ignored.
    #[must_use]
    pub fn with_restriction(mut self, restriction: Restriction) -> Self {
        if !self.restrictions.contains(&restriction) {
            self.restrictions.push(restriction);
        }
        self
    }

    #[must_use]
    pub fn with_cost(mut self, kind: CostKind, value: u32) -> Self {
        self.cost = Some(Cost::new(kind, value));
        self
    }

    #[must_use]
    pub fn with_condition(mut self, kind: ConditionKind, value: u32) -> Self {
        self.condition = Some(FreeCondition { kind, value });
        self
    }

    #[must_use]
    pub fn has_restriction(&self, restriction: Restriction) -> bool {
        self.restrictions.contains(&restriction)
    }
}

fn default_qty() -> u32 {
    1
}

/// Per-name card configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Copies in the deck.
    #[serde(default = "default_qty")]
    pub qty: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<FreeCardDetails>,
}

impl Default for CardDetails {
    fn default() -> Self {
        Self {
            tags: None,
            qty: default_qty(),
            free: None,
        }
    }
}

impl CardDetails {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_qty(mut self, qty: u32) -> Self {
        self.qty = qty;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_free(mut self, free: FreeCardDetails) -> Self {
        self.free = Some(free);
        self
    }

    /// Tags, or an empty slice when none were configured.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}
