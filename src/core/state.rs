//! Game state for one trial.
//!
//! ## GameState
//!
//! - The deck (exclusively owned)
//! - Hand, graveyard, banish pile, cards played this turn
//! - The trial's RNG stream
//!
//! A card is in at most one of {deck, hand, graveyard, banish pile,
//! played}. Every move goes through the zone manager, which removes the
//! card from its source zone.

use im::Vector;

use super::error::SimResult;
use super::rng::GameRng;
use crate::cards::{Card, CardId};
use crate::zones::{Deck, Zone, ZoneManager};

/// Mutable per-trial state.
#[derive(Clone, Debug)]
pub struct GameState {
    deck: Deck,

    /// Zone manager for drawn cards.
    pub zones: ZoneManager,

    /// Deterministic RNG for this branch.
    pub rng: GameRng,
}

impl GameState {
    /// Start a trial from `deck` with an empty hand.
    #[must_use]
    pub fn new(deck: Deck, rng: GameRng) -> Self {
        Self {
            deck,
            zones: ZoneManager::new(),
            rng,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        self.deck.card(id)
    }

    // === Zones ===

    #[must_use]
    pub fn hand(&self) -> &Vector<CardId> {
        self.zones.cards_in_zone(Zone::Hand)
    }

    #[must_use]
    pub fn graveyard(&self) -> &Vector<CardId> {
        self.zones.cards_in_zone(Zone::Graveyard)
    }

    #[must_use]
    pub fn banish_pile(&self) -> &Vector<CardId> {
        self.zones.cards_in_zone(Zone::Banished)
    }

    #[must_use]
    pub fn cards_played_this_turn(&self) -> &Vector<CardId> {
        self.zones.cards_in_zone(Zone::Played)
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.zones.zone_size(Zone::Hand)
    }

    #[must_use]
    pub fn in_hand(&self, id: CardId) -> bool {
        self.zones.is_in_zone(id, Zone::Hand)
    }

    /// Resolve the hand to cards, in arrival order.
    #[must_use]
    pub fn hand_cards(&self) -> Vec<&Card> {
        self.hand().iter().map(|&id| self.card(id)).collect()
    }

    #[must_use]
    pub fn free_cards_in_hand(&self) -> Vec<CardId> {
        self.free_in(Zone::Hand)
    }

    #[must_use]
    pub fn free_cards_played_this_turn(&self) -> Vec<CardId> {
        self.free_in(Zone::Played)
    }

    fn free_in(&self, zone: Zone) -> Vec<CardId> {
        self.zones
            .cards_in_zone(zone)
            .iter()
            .copied()
            .filter(|&id| self.card(id).is_free())
            .collect()
    }

    // === Drawing ===

    pub fn shuffle_deck(&mut self) {
        self.deck.shuffle(&mut self.rng);
    }

    /// Draw the opening hand. Free cards drawn on the way are replaced by
    /// their draw count and recorded as played this turn.
    pub fn draw_hand(&mut self, n: usize) -> SimResult<()> {
        let result = self.deck.draw(n)?;
        for id in result.replaced {
            self.zones.add_to_zone(id, Zone::Played);
        }
        for id in result.drawn {
            self.zones.add_to_zone(id, Zone::Hand);
        }
        Ok(())
    }

    /// Draw `n` cards straight into hand with no free card replacement.
    pub fn draw_to_hand(&mut self, n: usize) -> SimResult<Vec<CardId>> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let id = self.deck.draw_card()?;
            self.zones.add_to_zone(id, Zone::Hand);
            drawn.push(id);
        }
        Ok(drawn)
    }

    /// Move a specific card from the deck into hand.
    ///
    /// Returns false if the card is not in the deck.
    pub fn search_deck(&mut self, id: CardId) -> bool {
        if !self.deck.remove_card(id) {
            return false;
        }
        self.zones.add_to_zone(id, Zone::Hand)
    }

    /// Banish the top `n` cards of the deck.
    pub fn banish_from_deck(&mut self, n: usize) -> SimResult<()> {
        for id in self.deck.take_top(n)? {
            self.zones.add_to_zone(id, Zone::Banished);
        }
        Ok(())
    }

    // === Moving cards out of hand ===

    /// Move a card from hand to played. Returns false if it is not in hand.
    pub fn play_card(&mut self, id: CardId) -> bool {
        if !self.in_hand(id) {
            log::warn!(
                "cannot play {} ({id}): not in hand",
                self.card(id).name()
            );
            return false;
        }
        self.zones.move_to_zone(id, Zone::Played);
        true
    }

    /// Move cards from hand to the graveyard. Cards not in hand are ignored.
    pub fn discard(&mut self, cards: &[CardId]) -> usize {
        self.move_from_hand(cards, Zone::Graveyard)
    }

    /// Move cards from hand to the banish pile. Cards not in hand are ignored.
    pub fn banish(&mut self, cards: &[CardId]) -> usize {
        self.move_from_hand(cards, Zone::Banished)
    }

    fn move_from_hand(&mut self, cards: &[CardId], zone: Zone) -> usize {
        let mut moved = 0;
        for &id in cards {
            if self.in_hand(id) {
                self.zones.move_to_zone(id, zone);
                moved += 1;
            }
        }
        moved
    }

    // === Cloning ===

    /// Independent copy for exploring a branch.
    ///
    /// O(1) thanks to persistent zones. Takes `&mut self` because forking
    /// the RNG advances the fork counter.
    #[must_use]
    pub fn deep_copy(&mut self) -> Self {
        Self {
            deck: self.deck.deep_copy(),
            zones: self.zones.clone(),
            rng: self.rng.fork(),
        }
    }
}
