//! Deck invariant tests.
//!
//! These tests verify the deck against randomly generated configurations:
//! - Padding to 40 with placeholders
//! - Shuffle preserves the multiset of cards
//! - Draw replacement never overdraws the deck

use std::collections::BTreeMap;

use hand_odds::cards::{CardDetails, FreeCardDetails, EMPTY_CARD_NAME};
use hand_odds::core::{GameRng, SimError};
use hand_odds::zones::{Deck, MIN_DECK_SIZE};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = BTreeMap<String, CardDetails>> {
    prop::collection::btree_map(
        "[A-Z][a-z]{2,8}",
        (1u32..4, prop::option::of(0u32..3)).prop_map(|(qty, free)| {
            let details = CardDetails::new().with_qty(qty);
            match free {
                Some(count) => details.with_free(FreeCardDetails::draws(count)),
                None => details,
            }
        }),
        0..12,
    )
}

#[test]
fn test_from_config_expands_quantities() {
    let config = BTreeMap::from([
        ("Pot".to_string(), CardDetails::new().with_qty(3)),
        ("Ash".to_string(), CardDetails::new().with_qty(2)),
    ]);
    let mut rng = GameRng::new(1);
    let deck = Deck::from_config(&config, &mut rng);

    let names: Vec<&str> = deck.canonical().iter().map(|&id| deck.card(id).name()).collect();
    assert_eq!(names.iter().filter(|&&n| n == "Pot").count(), 3);
    assert_eq!(names.iter().filter(|&&n| n == "Ash").count(), 2);
    assert_eq!(names.len(), MIN_DECK_SIZE);
}

#[test]
fn test_reset_restores_canonical() {
    let config = BTreeMap::from([("Pot".to_string(), CardDetails::new().with_qty(3))]);
    let mut rng = GameRng::new(2);
    let mut deck = Deck::from_config(&config, &mut rng);

    deck.draw(10).unwrap();
    deck.reset(&mut rng);
    assert_eq!(deck.len(), MIN_DECK_SIZE);
}

#[test]
fn test_overdraw_fails() {
    let mut rng = GameRng::new(3);
    let mut deck = Deck::from_config(&BTreeMap::new(), &mut rng);
    assert!(matches!(deck.draw(41), Err(SimError::DeckExhausted)));
}

proptest! {
    #[test]
    fn prop_small_decks_pad_to_forty(config in config_strategy()) {
        let mut rng = GameRng::new(7);
        let deck = Deck::from_config(&config, &mut rng);
        let configured: u32 = config.values().map(|d| d.qty).sum();

        prop_assert_eq!(deck.canonical().len(), (configured as usize).max(MIN_DECK_SIZE));
        let placeholders = deck
            .canonical()
            .iter()
            .filter(|&&id| deck.card(id).name() == EMPTY_CARD_NAME)
            .count();
        prop_assert_eq!(placeholders, MIN_DECK_SIZE.saturating_sub(configured as usize));
    }

    #[test]
    fn prop_shuffle_preserves_cards(config in config_strategy(), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let mut deck = Deck::from_config(&config, &mut rng);
        let mut before: Vec<_> = deck.live().iter().copied().collect();

        deck.shuffle(&mut rng);
        let mut after: Vec<_> = deck.live().iter().copied().collect();

        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_draw_never_overdraws(config in config_strategy(), seed in any::<u64>(), n in 1usize..10) {
        let mut rng = GameRng::new(seed);
        let mut deck = Deck::from_config(&config, &mut rng);
        let size = deck.len();

        match deck.draw(n) {
            Ok(result) => {
                // Replacements only ever add draws
                prop_assert!(result.drawn.len() >= n);
                prop_assert_eq!(result.drawn.len() + result.replaced.len() + deck.len(), size);
                prop_assert!(result.drawn.len() + result.replaced.len() <= size);
            }
            Err(err) => prop_assert!(matches!(err, SimError::DeckExhausted)),
        }
    }
}
