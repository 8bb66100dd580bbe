//! Card pool - the arena that owns every card of one deck.
//!
//! Zones store `CardId`s; the pool resolves them back to `Card`s. The pool
//! is built once from configuration and shared read-only by every copy of
//! a deck, so copying game state never copies cards.

use std::collections::BTreeMap;
use std::ops::Index;

use super::definition::CardDetails;
use super::instance::{Card, CardId};

/// Name of the placeholder used to pad short decks.
pub const EMPTY_CARD_NAME: &str = "Empty Card";

/// Tags carried by every placeholder.
pub const EMPTY_CARD_TAGS: [&str; 3] = ["Empty", "Blank", "Non Engine"];

/// Arena of cards addressed by `CardId`.
///
/// ## Example
///
/// ```
/// use hand_odds::cards::{CardDetails, CardPool};
///
/// let mut pool = CardPool::new();
/// let id = pool.register("Pot of Greed", CardDetails::new());
///
/// assert_eq!(pool[id].name(), "Pot of Greed");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardPool {
    cards: Vec<Card>,
}

impl CardPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand a name → details mapping into `qty` copies of each card.
    ///
    /// Names are visited in sorted order so identical configuration yields
    /// identical ids.
    #[must_use]
    pub fn from_config(config: &BTreeMap<String, CardDetails>) -> Self {
        let mut pool = Self::new();
        for (name, details) in config {
            for _ in 0..details.qty {
                pool.register(name.clone(), details.clone());
            }
        }
        pool
    }

    /// Add one card and return its id.
    pub fn register(&mut self, name: impl Into<String>, details: CardDetails) -> CardId {
        self.push(Card::new(name, details))
    }

    /// Add an already-built card and return its id.
    pub fn push(&mut self, card: Card) -> CardId {
        let id = CardId(self.cards.len() as u32);
        self.cards.push(card);
        id
    }

    /// Append placeholders until the pool holds at least `size` cards.
    pub fn pad_to(&mut self, size: usize) {
        while self.cards.len() < size {
            self.register(
                EMPTY_CARD_NAME,
                CardDetails::new().with_tags(EMPTY_CARD_TAGS),
            );
        }
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> {
        (0..self.cards.len() as u32).map(CardId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| (CardId(i as u32), card))
    }

    /// Distinct card names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cards.iter().map(Card::name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

impl Index<CardId> for CardPool {
    type Output = Card;

    fn index(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut pool = CardPool::new();
        let a = pool.register("A", CardDetails::new());
        let b = pool.register("B", CardDetails::new());

        assert_eq!(a, CardId::new(0));
        assert_eq!(b, CardId::new(1));
        assert_eq!(pool.get(b).map(Card::name), Some("B"));
        assert!(pool.get(CardId::new(99)).is_none());
    }

    #[test]
    fn test_from_config_expands_quantities() {
        let mut config = BTreeMap::new();
        config.insert("B".to_string(), CardDetails::new().with_qty(2));
        config.insert("A".to_string(), CardDetails::new().with_qty(3));

        let pool = CardPool::from_config(&config);

        assert_eq!(pool.len(), 5);
        // Sorted by name, copies contiguous
        let names: Vec<_> = pool.iter().map(|(_, c)| c.name()).collect();
        assert_eq!(names, ["A", "A", "A", "B", "B"]);
        assert_eq!(pool.names(), ["A", "B"]);
    }

    #[test]
    fn test_duplicates_are_distinct_ids() {
        let mut pool = CardPool::new();
        let first = pool.register("Pot of Greed", CardDetails::new());
        let second = pool.register("Pot of Greed", CardDetails::new());
        assert_ne!(first, second);
        assert_eq!(pool[first], pool[second]);
    }

    #[test]
    fn test_pad_to() {
        let mut pool = CardPool::new();
        pool.register("A", CardDetails::new());
        pool.pad_to(40);

        assert_eq!(pool.len(), 40);
        let blanks = pool.iter().filter(|(_, c)| c.name() == EMPTY_CARD_NAME).count();
        assert_eq!(blanks, 39);
        assert!(pool[CardId::new(39)].matches("Non Engine"));

        // Never shrinks
        pool.pad_to(10);
        assert_eq!(pool.len(), 40);
    }
}
