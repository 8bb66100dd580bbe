//! Report aggregation over completed trials.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::trial::Simulation;
use crate::cards::Card;
use crate::conditions::Condition;

/// Per-condition counters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionStats {
    /// The condition rendered in the grammar.
    pub condition: String,

    /// Trials in which at least one branch satisfied it.
    pub satisfied: u32,

    /// Branch evaluations that came out true (the root success counter).
    pub successes: u32,
}

/// Summary of a simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub successful_simulations: u32,

    /// Completed trials.
    pub iterations: u32,

    /// Card name → copies in the opening hand → trials.
    pub qty_stats: BTreeMap<String, BTreeMap<u32, u32>>,

    /// Card name → other card name → winning hands holding both.
    pub used_with: BTreeMap<String, BTreeMap<String, u32>>,

    pub average_success_rate: f64,

    pub condition_stats: Vec<ConditionStats>,

    /// Trials whose opening draw ran out of cards.
    pub exhausted_trials: u32,

    /// Trials whose play tree hit `maxBranches` before it was fully explored.
    pub truncated_trials: u32,

    /// The run stopped before all requested trials completed.
    pub cancelled: bool,
}

/// Folds trials into a `SimulationReport`.
///
/// Not shared between threads: partition trials, build one builder per
/// partition, then `merge`.
#[derive(Clone, Debug, Default)]
pub struct ReportBuilder {
    names: Vec<String>,
    trials: u32,
    successes: u32,
    exhausted: u32,
    truncated: u32,
    qty_stats: BTreeMap<String, BTreeMap<u32, u32>>,
    used_with: BTreeMap<String, BTreeMap<String, u32>>,
    conditions: Vec<ConditionStats>,
}

impl ReportBuilder {
    /// `names` are the card names tracked in `qty_stats`.
    #[must_use]
    pub fn new(names: Vec<String>, conditions: &[Condition]) -> Self {
        Self {
            names,
            conditions: conditions
                .iter()
                .map(|c| ConditionStats {
                    condition: c.to_string(),
                    ..ConditionStats::default()
                })
                .collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Fold one trial in.
    pub fn record(&mut self, sim: &Simulation) {
        self.trials += 1;
        if sim.result() {
            self.successes += 1;
        }
        if sim.is_truncated() {
            self.truncated += 1;
        }

        for (stats, (&satisfied, &successes)) in self
            .conditions
            .iter_mut()
            .zip(sim.condition_results().iter().zip(sim.branch_successes()))
        {
            if satisfied {
                stats.satisfied += 1;
            }
            stats.successes += successes;
        }

        let Some(initial) = sim.initial() else {
            self.exhausted += 1;
            return;
        };

        let hand = initial.hand_cards();
        for name in &self.names {
            let copies = hand.iter().filter(|card| card.name() == name).count() as u32;
            *self
                .qty_stats
                .entry(name.clone())
                .or_default()
                .entry(copies)
                .or_default() += 1;
        }

        if let Some(branch) = sim.winning_branch() {
            self.record_pairs(&branch.hand());
        }
    }

    /// Count every ordered pair of distinct names in a winning hand once.
    fn record_pairs(&mut self, hand: &[&Card]) {
        let mut names: Vec<&str> = hand.iter().map(|card| card.name()).collect();
        names.sort_unstable();
        names.dedup();
        for &focal in &names {
            for &other in &names {
                if focal == other {
                    continue;
                }
                *self
                    .used_with
                    .entry(focal.to_string())
                    .or_default()
                    .entry(other.to_string())
                    .or_default() += 1;
            }
        }
    }

    /// Add another builder's counts to this one.
    pub fn merge(&mut self, other: ReportBuilder) {
        self.trials += other.trials;
        self.successes += other.successes;
        self.exhausted += other.exhausted;
        self.truncated += other.truncated;
        for (name, histogram) in other.qty_stats {
            let into = self.qty_stats.entry(name).or_default();
            for (copies, trials) in histogram {
                *into.entry(copies).or_default() += trials;
            }
        }
        for (focal, partners) in other.used_with {
            let into = self.used_with.entry(focal).or_default();
            for (name, count) in partners {
                *into.entry(name).or_default() += count;
            }
        }
        for (mine, theirs) in self.conditions.iter_mut().zip(other.conditions) {
            mine.satisfied += theirs.satisfied;
            mine.successes += theirs.successes;
        }
    }

    #[must_use]
    pub fn finish(self, cancelled: bool) -> SimulationReport {
        let average_success_rate = if self.trials == 0 {
            0.0
        } else {
            f64::from(self.successes) / f64::from(self.trials)
        };
        SimulationReport {
            successful_simulations: self.successes,
            iterations: self.trials,
            qty_stats: self.qty_stats,
            used_with: self.used_with,
            average_success_rate,
            condition_stats: self.conditions,
            exhausted_trials: self.exhausted,
            truncated_trials: self.truncated,
            cancelled,
        }
    }
}
