//! One reachable end state of a trial.

use crate::cards::{Card, CardId};
use crate::conditions::Condition;
use crate::core::GameState;

/// A sequence of free card plays and the state it leads to.
#[derive(Clone, Debug)]
pub struct SimulationBranch {
    state: GameState,
    plays: Vec<CardId>,
    results: Vec<bool>,
}

impl SimulationBranch {
    #[must_use]
    pub fn new(state: GameState, plays: Vec<CardId>) -> Self {
        Self {
            state,
            plays,
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Free cards played to reach this branch, in order.
    #[must_use]
    pub fn plays(&self) -> &[CardId] {
        &self.plays
    }

    #[must_use]
    pub fn hand(&self) -> Vec<&Card> {
        self.state.hand_cards()
    }

    /// Outcome per condition, in configuration order. Empty until evaluated.
    #[must_use]
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    /// Evaluate every condition against this branch's hand.
    pub fn evaluate(&mut self, conditions: &mut [Condition]) {
        let hand = self.state.hand_cards();
        self.results = conditions.iter_mut().map(|c| c.evaluate(&hand)).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDetails;
    use crate::conditions::parse_condition;
    use crate::core::GameRng;
    use crate::zones::Deck;

    #[test]
    fn test_evaluate_records_results_in_order() {
        let mut rng = GameRng::new(1);
        let cards = vec![Card::new("A", CardDetails::new())];
        let deck = Deck::new(cards, &mut rng);
        let mut state = GameState::new(deck, rng);
        let a = state
            .deck()
            .live()
            .iter()
            .copied()
            .find(|&id| state.card(id).name() == "A")
            .unwrap();
        state.search_deck(a);

        let mut conditions = vec![
            parse_condition("A").unwrap(),
            parse_condition("B").unwrap(),
            parse_condition("Empty").unwrap(),
        ];
        let mut branch = SimulationBranch::new(state, Vec::new());
        assert!(branch.results().is_empty());

        branch.evaluate(&mut conditions);
        assert_eq!(branch.results(), &[true, false, false]);
        assert_eq!(branch.hand().len(), 1);
        assert!(branch.plays().is_empty());
        assert_eq!(conditions[0].successes(), 1);
    }
}
