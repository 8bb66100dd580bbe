//! Cards - the immutable unit that moves between zones.
//!
//! A `Card` is either a standard card or a free card. The variant is
//! decided once, by `Card::new`, from whether the details carry free card
//! metadata. Free card fields are read through the `FreeCard` view.
//!
//! Card identity is the `CardId` assigned by the `CardPool`, not the name:
//! three copies of "Pot of Greed" are three distinct cards.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::definition::{CardDetails, Cost, Excavate, FreeCardDetails, FreeCondition, Restriction};

/// Stable identifier of a card within one deck's pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Discriminator for the card variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Standard,
    Free,
}

/// A single card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    name: String,
    kind: CardKind,
    details: CardDetails,
}

impl Card {
    /// Build a card, choosing the variant from `details.free`.
    #[must_use]
    pub fn new(name: impl Into<String>, details: CardDetails) -> Self {
        let kind = if details.free.is_some() {
            CardKind::Free
        } else {
            CardKind::Standard
        };
        Self {
            name: name.into(),
            kind,
            details,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    #[must_use]
    pub fn details(&self) -> &CardDetails {
        &self.details
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.details.tags()
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.kind == CardKind::Free
    }

    /// Name or tag match. Names and tags share one namespace.
    #[must_use]
    pub fn matches(&self, name_or_tag: &str) -> bool {
        self.name == name_or_tag || self.tags().iter().any(|t| t == name_or_tag)
    }

    /// Typed free card view, `None` for standard cards.
    #[must_use]
    pub fn as_free(&self) -> Option<FreeCard<'_>> {
        match (self.kind, self.details.free.as_ref()) {
            (CardKind::Free, Some(free)) => Some(FreeCard { card: self, free }),
            _ => None,
        }
    }
}

/// Borrowed view over a free card's metadata.
#[derive(Clone, Copy, Debug)]
pub struct FreeCard<'a> {
    card: &'a Card,
    free: &'a FreeCardDetails,
}

impl<'a> FreeCard<'a> {
    #[must_use]
    pub fn card(&self) -> &'a Card {
        self.card
    }

    #[must_use]
    pub fn name(&self) -> &'a str {
        self.card.name()
    }

    /// Cards drawn when played.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.free.count
    }

    #[must_use]
    pub fn once_per_turn(&self) -> bool {
        self.free.once_per_turn
    }

    #[must_use]
    pub fn restrictions(&self) -> &'a [Restriction] {
        &self.free.restrictions
    }

    #[must_use]
    pub fn has_restriction(&self, restriction: Restriction) -> bool {
        self.free.has_restriction(restriction)
    }

    #[must_use]
    pub fn cost(&self) -> Option<Cost> {
        self.free.cost
    }

    #[must_use]
    pub fn condition(&self) -> Option<FreeCondition> {
        self.free.condition
    }

    #[must_use]
    pub fn excavate(&self) -> Option<Excavate> {
        self.free.excavate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::definition::CostKind;

    #[test]
    fn test_factory_picks_standard() {
        let card = Card::new("Ash Blossom", CardDetails::new().with_tags(["Hand Trap"]));
        assert_eq!(card.kind(), CardKind::Standard);
        assert!(!card.is_free());
        assert!(card.as_free().is_none());
    }

    #[test]
    fn test_factory_picks_free() {
        let free = FreeCardDetails::draws(2)
            .once_per_turn()
            .with_cost(CostKind::BanishFromDeck, 10);
        let card = Card::new("Pot of Desires", CardDetails::new().with_free(free));

        assert!(card.is_free());
        let view = card.as_free().unwrap();
        assert_eq!(view.name(), "Pot of Desires");
        assert_eq!(view.count(), 2);
        assert!(view.once_per_turn());
        assert_eq!(view.cost().map(|c| c.value), Some(10));
        assert!(view.excavate().is_none());
    }

    #[test]
    fn test_matches_name_and_tags() {
        let card = Card::new("Upstart Goblin", CardDetails::new().with_tags(["Draw", "Spell"]));
        assert!(card.matches("Upstart Goblin"));
        assert!(card.matches("Draw"));
        assert!(!card.matches("upstart goblin"));
        assert!(!card.matches("Trap"));
    }
}
