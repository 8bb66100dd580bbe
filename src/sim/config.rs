//! Simulation configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::error::{SimError, SimResult};
use crate::rules::CostSelection;

/// How several condition trees combine into one trial result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionMode {
    /// The trial succeeds if any condition is satisfied.
    #[default]
    Any,
    /// The trial succeeds only if every condition is satisfied.
    All,
}

impl ConditionMode {
    /// Fold per-condition outcomes into one.
    #[must_use]
    pub fn combine(self, results: &[bool]) -> bool {
        match self {
            ConditionMode::Any => results.iter().any(|&r| r),
            ConditionMode::All => !results.is_empty() && results.iter().all(|&r| r),
        }
    }
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Cards in the opening hand (default: 5).
    pub hand_size: usize,

    /// Number of independent trials (default: 10,000).
    pub iterations: u32,

    /// Random seed. Same seed and same request produce the same report.
    /// Drawn from OS entropy when absent.
    pub seed: Option<u64>,

    /// Trials between progress signals (default: 100).
    pub progress_interval: u32,

    /// Replace free cards drawn into the opening hand by their draw count.
    pub resolve_free_draws: bool,

    /// Explore free card plays from the opening hand.
    /// When false every trial has exactly one branch: the opening hand.
    pub explore_free_cards: bool,

    /// Maximum branches explored per trial.
    /// Bounds the combinatorial blowup of long free card chains.
    pub max_branches: usize,

    /// How discard / banish-from-hand costs pick their cards.
    pub cost_selection: CostSelection,

    /// How multiple conditions combine.
    pub condition_mode: ConditionMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hand_size: 5,
            iterations: 10_000,
            seed: None,
            progress_interval: 100,
            resolve_free_draws: true,
            explore_free_cards: true,
            max_branches: 256,
            cost_selection: CostSelection::Expendable,
            condition_mode: ConditionMode::Any,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with custom hand size.
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Create a new config with custom trial count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with custom progress interval.
    pub fn with_progress_interval(mut self, interval: u32) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Create a new config with free card draws in the opening hand on or off.
    pub fn with_free_draws(mut self, resolve: bool) -> Self {
        self.resolve_free_draws = resolve;
        self
    }

    /// Create a new config with free card exploration on or off.
    pub fn with_exploration(mut self, explore: bool) -> Self {
        self.explore_free_cards = explore;
        self
    }

    /// Create a new config with custom branch cap per trial.
    pub fn with_max_branches(mut self, max_branches: usize) -> Self {
        self.max_branches = max_branches;
        self
    }

    /// Create a new config with custom cost selection policy.
    pub fn with_cost_selection(mut self, selection: CostSelection) -> Self {
        self.cost_selection = selection;
        self
    }

    /// Create a new config with custom condition mode.
    pub fn with_condition_mode(mut self, mode: ConditionMode) -> Self {
        self.condition_mode = mode;
        self
    }

    /// Reject settings no run can use.
    pub fn validate(&self) -> SimResult<()> {
        if self.iterations == 0 {
            return Err(SimError::InvalidConfig("iterations must be at least 1".into()));
        }
        if self.hand_size == 0 {
            return Err(SimError::InvalidConfig("hand size must be at least 1".into()));
        }
        if self.progress_interval == 0 {
            return Err(SimError::InvalidConfig(
                "progress interval must be at least 1".into(),
            ));
        }
        if self.max_branches == 0 {
            return Err(SimError::InvalidConfig("max branches must be at least 1".into()));
        }
        Ok(())
    }
}
