//! Free card resolution: may a free card be played right now, and what
//! happens to the hand and deck when it is.
//!
//! Legality is checked in a fixed order, first failure wins:
//!
//! 1. Once per turn and a same-named card was already played
//! 2. Not enough cards left in the deck to draw `count`
//! 3. A free card played earlier this turn carries `NoMoreDraws`
//! 4. This card carries `NoPreviousDraws` and a free card was already played
//! 5. The cost cannot be paid

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CostKind, Restriction};
use crate::core::error::SimResult;
use crate::core::GameState;

/// How hand cards are chosen to pay a discard / banish-from-hand cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CostSelection {
    /// Prefer cards no condition refers to, then non-free cards.
    #[default]
    Expendable,
    /// Oldest cards in hand first.
    InHandOrder,
    /// Uniformly random cards from hand.
    Random,
}

/// Decides and applies free card plays.
#[derive(Clone, Debug, Default)]
pub struct FreeCardResolver {
    selection: CostSelection,
    protected: FxHashSet<String>,
}

impl FreeCardResolver {
    #[must_use]
    pub fn new(selection: CostSelection) -> Self {
        Self {
            selection,
            protected: FxHashSet::default(),
        }
    }

    /// Names and tags that `Expendable` selection tries to keep in hand.
    #[must_use]
    pub fn protecting<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn selection(&self) -> CostSelection {
        self.selection
    }

    /// Whether `card` may be played from the current state.
    #[must_use]
    pub fn is_playable(&self, state: &GameState, card: CardId) -> bool {
        let Some(free) = state.card(card).as_free() else {
            return false;
        };

        let played = state.cards_played_this_turn();
        if free.once_per_turn()
            && played
                .iter()
                .any(|&id| state.card(id).name() == free.name())
        {
            return false;
        }

        let draws = free.count() as usize;
        if state.deck_size() < draws {
            return false;
        }

        let free_played = state.free_cards_played_this_turn();
        let locked = free_played.iter().any(|&id| {
            state
                .card(id)
                .as_free()
                .is_some_and(|f| f.has_restriction(Restriction::NoMoreDraws))
        });
        if locked {
            return false;
        }

        if free.has_restriction(Restriction::NoPreviousDraws) && !free_played.is_empty() {
            return false;
        }

        let Some(cost) = free.cost() else {
            return true;
        };
        let value = cost.value as usize;
        match cost.kind {
            // The deck has to cover the banished cards and the draws after them
            CostKind::BanishFromDeck => state.deck_size() >= value + draws,
            CostKind::Discard | CostKind::BanishFromHand => {
                let others = if state.in_hand(card) {
                    state.hand_size() - 1
                } else {
                    state.hand_size()
                };
                others >= value
            }
            CostKind::PayLife => true,
        }
    }

    /// Play `card` from hand: pay its cost, then draw.
    ///
    /// Returns `Ok(false)` and leaves the state untouched when the card is
    /// not in hand or not playable.
    pub fn apply(&self, state: &mut GameState, card: CardId) -> SimResult<bool> {
        if !state.in_hand(card) {
            log::warn!(
                "cannot resolve {} ({card}): not in hand",
                state.card(card).name()
            );
            return Ok(false);
        }
        if !self.is_playable(state, card) {
            return Ok(false);
        }
        let Some(free) = state.card(card).as_free() else {
            return Ok(false);
        };
        let cost = free.cost();
        let draws = free.count() as usize;
        let excavate = free.excavate();

        state.play_card(card);

        if let Some(cost) = cost {
            let value = cost.value as usize;
            match cost.kind {
                CostKind::BanishFromDeck => state.banish_from_deck(value)?,
                CostKind::Discard => {
                    let chosen = self.select_from_hand(state, value);
                    state.discard(&chosen);
                }
                CostKind::BanishFromHand => {
                    let chosen = self.select_from_hand(state, value);
                    state.banish(&chosen);
                }
                CostKind::PayLife => {}
            }
        }

        if draws > 0 {
            state.draw_to_hand(draws)?;
        }

        if let Some(excavate) = excavate {
            log::trace!("excavate {} of {} left unresolved", excavate.pick, excavate.count);
        }

        Ok(true)
    }

    /// Pick `n` cards from hand to pay a cost.
    fn select_from_hand(&self, state: &mut GameState, n: usize) -> Vec<CardId> {
        let hand: Vec<CardId> = state.hand().iter().copied().collect();
        match self.selection {
            CostSelection::InHandOrder => hand.into_iter().take(n).collect(),
            CostSelection::Random => state
                .rng
                .sample_indices(hand.len(), n)
                .into_iter()
                .map(|i| hand[i])
                .collect(),
            CostSelection::Expendable => {
                let mut ranked = hand;
                // Stable: hand order breaks ties
                ranked.sort_by_key(|&id| {
                    let card = state.card(id);
                    (self.is_protected(card), card.is_free())
                });
                ranked.truncate(n);
                ranked
            }
        }
    }

    fn is_protected(&self, card: &Card) -> bool {
        self.protected.contains(card.name()) || card.tags().iter().any(|t| self.protected.contains(t))
    }
}
