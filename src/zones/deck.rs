//! The deck: live cards consumed by draws plus the canonical list it resets to.
//!
//! Decks shorter than `MIN_DECK_SIZE` are padded with "Empty Card"
//! placeholders so the draw odds always reflect a legal deck size.

use std::collections::BTreeMap;
use std::sync::Arc;

use im::Vector;

use crate::cards::{Card, CardDetails, CardId, CardPool};
use crate::core::error::{SimError, SimResult};
use crate::core::rng::GameRng;

/// Decks are padded to at least this many cards.
pub const MIN_DECK_SIZE: usize = 40;

/// Outcome of `Deck::draw`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawResult {
    /// Cards that stay in hand.
    pub drawn: Vec<CardId>,
    /// Free cards that were replaced by their own draws.
    pub replaced: Vec<CardId>,
}

/// A shuffle-able, draw-able deck.
///
/// Cloning is O(1) and yields an independent deck: zones are persistent
/// vectors of ids and the card pool is immutable.
#[derive(Clone, Debug)]
pub struct Deck {
    pool: Arc<CardPool>,
    canonical: Vector<CardId>,
    live: Vector<CardId>,
}

impl Deck {
    /// Build a deck from cards, padding to `MIN_DECK_SIZE`, then shuffle.
    #[must_use]
    pub fn new(cards: Vec<Card>, rng: &mut GameRng) -> Self {
        let mut pool = CardPool::new();
        for card in cards {
            pool.push(card);
        }
        Self::from_pool(pool, rng)
    }

    /// Build a deck from a name → details mapping.
    #[must_use]
    pub fn from_config(config: &BTreeMap<String, CardDetails>, rng: &mut GameRng) -> Self {
        Self::from_pool(CardPool::from_config(config), rng)
    }

    /// Build a deck owning every card in `pool`, padded and shuffled.
    #[must_use]
    pub fn from_pool(mut pool: CardPool, rng: &mut GameRng) -> Self {
        pool.pad_to(MIN_DECK_SIZE);
        let canonical: Vector<CardId> = pool.ids().collect();
        let mut deck = Self {
            live: canonical.clone(),
            canonical,
            pool: Arc::new(pool),
        };
        deck.shuffle(rng);
        deck
    }

    #[must_use]
    pub fn pool(&self) -> &CardPool {
        &self.pool
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.pool[id]
    }

    /// Cards left to draw.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[must_use]
    pub fn live(&self) -> &Vector<CardId> {
        &self.live
    }

    /// The fixed, padded, unshuffled list used by `reset`.
    #[must_use]
    pub fn canonical(&self) -> &Vector<CardId> {
        &self.canonical
    }

    /// Remove and return the top live card.
    ///
    /// The live sequence is shuffled on construction and reset, so the top
    /// card is uniformly random. Copies of a deck draw the same cards in the
    /// same order.
    pub fn draw_card(&mut self) -> SimResult<CardId> {
        self.live.pop_back().ok_or(SimError::DeckExhausted)
    }

    /// Draw `n` cards. Each free card with a positive count drawn along the
    /// way is set aside and replaced by that many further draws.
    pub fn draw(&mut self, n: usize) -> SimResult<DrawResult> {
        let mut result = DrawResult {
            drawn: Vec::with_capacity(n),
            replaced: Vec::new(),
        };
        let mut pending = n;
        while pending > 0 {
            let id = self.draw_card()?;
            pending -= 1;
            match self.pool[id].as_free() {
                Some(free) if free.count() > 0 => {
                    result.replaced.push(id);
                    pending += free.count() as usize;
                }
                _ => result.drawn.push(id),
            }
        }
        Ok(result)
    }

    /// Remove a specific card from the live sequence.
    pub fn remove_card(&mut self, id: CardId) -> bool {
        match self.live.index_of(&id) {
            Some(index) => {
                self.live.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the top `n` live cards.
    pub fn take_top(&mut self, n: usize) -> SimResult<Vec<CardId>> {
        if n > self.live.len() {
            return Err(SimError::DeckExhausted);
        }
        let split = self.live.len() - n;
        let mut top: Vec<CardId> = self.live.split_off(split).into_iter().collect();
        top.reverse();
        Ok(top)
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.live);
    }

    /// Restore every canonical card to the live sequence and shuffle.
    pub fn reset(&mut self, rng: &mut GameRng) {
        self.live = self.canonical.clone();
        self.shuffle(rng);
    }

    /// Independent copy: later draws on either deck never affect the other.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::FreeCardDetails;

    fn plain_cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("Card {i}"), CardDetails::new()))
            .collect()
    }

    #[test]
    fn test_pads_short_deck() {
        let mut rng = GameRng::new(1);
        let deck = Deck::new(plain_cards(3), &mut rng);

        assert_eq!(deck.canonical().len(), MIN_DECK_SIZE);
        assert_eq!(deck.len(), MIN_DECK_SIZE);
        let blanks = deck
            .canonical()
            .iter()
            .filter(|&&id| deck.card(id).matches("Empty"))
            .count();
        assert_eq!(blanks, 37);
    }

    #[test]
    fn test_large_deck_not_padded() {
        let mut rng = GameRng::new(1);
        let deck = Deck::new(plain_cards(45), &mut rng);
        assert_eq!(deck.canonical().len(), 45);
    }

    #[test]
    fn test_draw_card_removes() {
        let mut rng = GameRng::new(2);
        let mut deck = Deck::new(plain_cards(40), &mut rng);
        let top = *deck.live().last().unwrap();

        let id = deck.draw_card().unwrap();
        assert_eq!(id, top);
        assert_eq!(deck.len(), 39);
        assert!(deck.live().index_of(&id).is_none());
        assert!(deck.canonical().index_of(&id).is_some());
    }

    #[test]
    fn test_draw_card_empty() {
        let mut rng = GameRng::new(2);
        let mut deck = Deck::new(plain_cards(40), &mut rng);
        for _ in 0..40 {
            deck.draw_card().unwrap();
        }
        assert!(matches!(deck.draw_card(), Err(SimError::DeckExhausted)));
    }

    #[test]
    fn test_draw_too_many_fails() {
        let mut rng = GameRng::new(3);
        let mut deck = Deck::new(plain_cards(40), &mut rng);
        assert!(matches!(deck.draw(41), Err(SimError::DeckExhausted)));
    }

    #[test]
    fn test_draw_replaces_free_cards() {
        let mut hits = 0;
        for seed in 0..200 {
            let mut rng = GameRng::new(seed);
            let mut cards = plain_cards(39);
            cards.push(Card::new(
                "Pot of Greed",
                CardDetails::new().with_free(FreeCardDetails::draws(2)),
            ));
            let mut deck = Deck::new(cards, &mut rng);

            let result = deck.draw(5).unwrap();

            // Replaced by two draws: net one extra card per free card hit
            assert_eq!(result.drawn.len(), 5 + result.replaced.len());
            assert_eq!(deck.len(), 40 - result.drawn.len() - result.replaced.len());
            assert!(result.drawn.iter().all(|&id| !deck.card(id).is_free()));
            hits += result.replaced.len();
        }
        assert!(hits > 0);
    }

    #[test]
    fn test_zero_count_free_card_stays() {
        let mut rng = GameRng::new(4);
        let cards = vec![Card::new(
            "Cost Only",
            CardDetails::new().with_free(FreeCardDetails::draws(0)),
        )];
        let mut deck = Deck::new(cards, &mut rng);
        let result = deck.draw(40).unwrap();
        assert!(result.replaced.is_empty());
        assert_eq!(result.drawn.len(), 40);
    }

    #[test]
    fn test_remove_card() {
        let mut rng = GameRng::new(5);
        let mut deck = Deck::new(plain_cards(40), &mut rng);
        let id = deck.live()[7];

        assert!(deck.remove_card(id));
        assert!(!deck.remove_card(id));
        assert_eq!(deck.len(), 39);
    }

    #[test]
    fn test_take_top() {
        let mut rng = GameRng::new(5);
        let mut deck = Deck::new(plain_cards(40), &mut rng);
        let top = *deck.live().last().unwrap();

        let taken = deck.take_top(3).unwrap();
        assert_eq!(taken.len(), 3);
        assert_eq!(taken[0], top);
        assert_eq!(deck.len(), 37);
        assert!(deck.take_top(38).is_err());
    }

    #[test]
    fn test_reset_restores_all_cards() {
        let mut rng = GameRng::new(6);
        let mut deck = Deck::new(plain_cards(40), &mut rng);
        deck.draw(10).unwrap();

        deck.reset(&mut rng);

        assert_eq!(deck.len(), 40);
        let mut live: Vec<_> = deck.live().iter().copied().collect();
        live.sort_unstable();
        let canonical: Vec<_> = deck.canonical().iter().copied().collect();
        assert_eq!(live, canonical);
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let mut rng = GameRng::new(7);
        let deck = Deck::new(plain_cards(40), &mut rng);
        let mut copy = deck.deep_copy();

        copy.draw(5).unwrap();

        assert_eq!(deck.len(), 40);
        assert_eq!(copy.len(), 35);
        assert_eq!(copy.canonical(), deck.canonical());
    }
}
