//! A single trial: draw an opening hand, explore free card plays, evaluate.
//!
//! Branches are enumerated depth-first. Every node of the play tree is a
//! branch, starting with "play nothing", so a player who gains nothing from
//! playing a free card is never forced to. At each node only the first
//! playable copy of each card name is tried; same-named copies lead to
//! equivalent states.

use rustc_hash::FxHashSet;

use super::branch::SimulationBranch;
use super::config::SimulationConfig;
use crate::cards::CardId;
use crate::conditions::Condition;
use crate::core::{GameRng, GameState};
use crate::rules::FreeCardResolver;
use crate::zones::Deck;

/// The outcome of one trial.
#[derive(Clone, Debug)]
pub struct Simulation {
    initial: Option<GameState>,
    branches: Vec<SimulationBranch>,
    condition_results: Vec<bool>,
    branch_successes: Vec<u32>,
    winner: Option<usize>,
    result: bool,
    truncated: bool,
}

impl Simulation {
    /// Run one trial against `deck`, which is copied and left untouched.
    pub fn run(
        deck: &Deck,
        rng: GameRng,
        conditions: &mut [Condition],
        resolver: &FreeCardResolver,
        config: &SimulationConfig,
    ) -> Self {
        let mut state = GameState::new(deck.deep_copy(), rng);
        state.shuffle_deck();
        let setup = if config.resolve_free_draws {
            state.draw_hand(config.hand_size)
        } else {
            state.draw_to_hand(config.hand_size).map(drop)
        };
        if let Err(err) = setup {
            log::debug!("trial setup failed: {err}");
            return Self::failed(conditions.len());
        }

        let (mut branches, truncated) = if config.explore_free_cards {
            let mut explorer = Explorer::new(resolver, config.max_branches);
            explorer.explore(state.deep_copy(), Vec::new());
            if explorer.truncated {
                log::debug!(
                    "play tree truncated at {} branches",
                    explorer.branches.len()
                );
            }
            (explorer.branches, explorer.truncated)
        } else {
            (vec![SimulationBranch::new(state.clone(), Vec::new())], false)
        };

        for branch in &mut branches {
            branch.evaluate(conditions);
        }

        let condition_results: Vec<bool> = (0..conditions.len())
            .map(|i| branches.iter().any(|b| b.results()[i]))
            .collect();
        let branch_successes = (0..conditions.len())
            .map(|i| branches.iter().filter(|b| b.results()[i]).count() as u32)
            .collect();
        let result = config.condition_mode.combine(&condition_results);
        let winner = if result {
            branches
                .iter()
                .position(|b| config.condition_mode.combine(b.results()))
        } else {
            None
        };

        Self {
            initial: Some(state),
            branches,
            condition_results,
            branch_successes,
            winner,
            result,
            truncated,
        }
    }

    /// A trial whose opening draw exhausted the deck. Counts as a non-match.
    fn failed(conditions: usize) -> Self {
        Self {
            initial: None,
            branches: Vec::new(),
            condition_results: vec![false; conditions],
            branch_successes: vec![0; conditions],
            winner: None,
            result: false,
            truncated: false,
        }
    }

    /// Whether the trial counts as a success.
    #[must_use]
    pub fn result(&self) -> bool {
        self.result
    }

    /// True if the opening draw ran out of cards.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.initial.is_none()
    }

    /// True if `max_branches` cut the play tree short.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// State right after the opening draw.
    #[must_use]
    pub fn initial(&self) -> Option<&GameState> {
        self.initial.as_ref()
    }

    #[must_use]
    pub fn branches(&self) -> &[SimulationBranch] {
        &self.branches
    }

    /// Per condition: satisfied by at least one branch.
    #[must_use]
    pub fn condition_results(&self) -> &[bool] {
        &self.condition_results
    }

    /// Per condition: number of branches that satisfied it.
    #[must_use]
    pub fn branch_successes(&self) -> &[u32] {
        &self.branch_successes
    }

    /// First branch that satisfies the trial on its own.
    ///
    /// `None` for failed trials. Under `ConditionMode::All` a trial can
    /// succeed through different branches per condition and still have no
    /// single winning branch.
    #[must_use]
    pub fn winning_branch(&self) -> Option<&SimulationBranch> {
        self.winner.map(|i| &self.branches[i])
    }
}

struct Explorer<'a> {
    resolver: &'a FreeCardResolver,
    max_branches: usize,
    branches: Vec<SimulationBranch>,
    truncated: bool,
}

impl<'a> Explorer<'a> {
    fn new(resolver: &'a FreeCardResolver, max_branches: usize) -> Self {
        Self {
            resolver,
            max_branches,
            branches: Vec::new(),
            truncated: false,
        }
    }

    fn explore(&mut self, mut state: GameState, plays: Vec<CardId>) {
        if self.branches.len() >= self.max_branches {
            self.truncated = true;
            return;
        }
        let candidates = self.candidates(&state);
        log::trace!(
            "branch {} after {} plays, {} candidates",
            self.branches.len(),
            plays.len(),
            candidates.len()
        );
        self.branches
            .push(SimulationBranch::new(state.clone(), plays.clone()));

        for card in candidates {
            if self.branches.len() >= self.max_branches {
                self.truncated = true;
                break;
            }
            let mut next = state.deep_copy();
            match self.resolver.apply(&mut next, card) {
                Ok(true) => {
                    let mut next_plays = plays.clone();
                    next_plays.push(card);
                    self.explore(next, next_plays);
                }
                Ok(false) => {}
                Err(err) => log::debug!("skipping {}: {err}", state.card(card).name()),
            }
        }
    }

    /// Playable free cards in hand, one per name.
    fn candidates(&self, state: &GameState) -> Vec<CardId> {
        let mut seen = FxHashSet::default();
        state
            .free_cards_in_hand()
            .into_iter()
            .filter(|&id| self.resolver.is_playable(state, id))
            .filter(|&id| seen.insert(state.card(id).name()))
            .collect()
    }
}
