//! Runs a batch of independent trials and folds them into a report.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::SimulationConfig;
use super::report::{ReportBuilder, SimulationReport};
use super::trial::Simulation;
use crate::cards::CardDetails;
use crate::conditions::{Condition, ConditionInput};
use crate::core::error::{SimError, SimResult};
use crate::core::GameRng;
use crate::rules::FreeCardResolver;
use crate::zones::Deck;

/// Cooperative stop flag, checked between trials.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A configured simulation, ready to run.
///
/// Construction parses and validates everything, so configuration errors
/// surface before any trial runs.
#[derive(Debug)]
pub struct SimulationRunner {
    deck: Deck,
    conditions: Vec<Condition>,
    resolver: FreeCardResolver,
    config: SimulationConfig,
    rng: GameRng,
}

impl SimulationRunner {
    pub fn new(
        deck: &BTreeMap<String, CardDetails>,
        conditions: Vec<ConditionInput>,
        config: SimulationConfig,
    ) -> SimResult<Self> {
        config.validate()?;
        if conditions.is_empty() {
            return Err(SimError::InvalidConfig("no conditions given".into()));
        }
        if let Some((name, _)) = deck.iter().find(|(_, details)| details.qty == 0) {
            return Err(SimError::InvalidConfig(format!("`{name}` has qty 0")));
        }
        let conditions = conditions
            .into_iter()
            .map(ConditionInput::into_condition)
            .collect::<SimResult<Vec<_>>>()?;

        let protected: Vec<String> = conditions
            .iter()
            .flat_map(Condition::names)
            .map(str::to_string)
            .collect();
        let resolver = FreeCardResolver::new(config.cost_selection).protecting(protected);

        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let deck = Deck::from_config(deck, &mut rng);
        log::debug!(
            "deck of {} cards, {} conditions, {:?}",
            deck.len(),
            conditions.len(),
            config
        );

        Ok(Self {
            deck,
            conditions,
            resolver,
            config,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Seed of the run's root RNG stream.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Run one trial on a fresh RNG fork.
    pub fn run_trial(&mut self) -> Simulation {
        let rng = self.rng.fork();
        Simulation::run(
            &self.deck,
            rng,
            &mut self.conditions,
            &self.resolver,
            &self.config,
        )
    }

    /// Run every configured trial.
    ///
    /// `progress` receives a percentage every `progress_interval` trials
    /// and a final 100, cancelled or not.
    pub fn run(&mut self, cancel: &CancelToken, mut progress: impl FnMut(u32)) -> SimulationReport {
        let iterations = self.config.iterations;
        let interval = self.config.progress_interval;
        log::info!("running {iterations} trials (seed {})", self.seed());

        self.conditions.iter_mut().for_each(Condition::reset_successes);
        let names = self.deck.pool().names().into_iter().map(str::to_string).collect();
        let mut builder = ReportBuilder::new(names, &self.conditions);
        let mut cancelled = false;

        for done in 1..=iterations {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let sim = self.run_trial();
            builder.record(&sim);
            if done % interval == 0 && done < iterations {
                progress((u64::from(done) * 100 / u64::from(iterations)) as u32);
            }
        }
        progress(100);

        let report = builder.finish(cancelled);
        log::info!(
            "{} of {} trials succeeded ({:.2}%){}",
            report.successful_simulations,
            report.iterations,
            report.average_success_rate * 100.0,
            if cancelled { ", cancelled" } else { "" }
        );
        report
    }
}
