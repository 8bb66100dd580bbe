//! # hand-odds
//!
//! Monte-Carlo estimation of opening hand odds for trading card decks.
//!
//! ## Design Principles
//!
//! 1. **Conditions as data**: what counts as a good hand is a small boolean
//!    language (`2+ Pot of Desires AND (Upstart Goblin OR 3 Spellcaster)`),
//!    parsed once up front. Bad conditions fail before any trial runs.
//!
//! 2. **Free cards are explored, not guessed**: every reachable sequence of
//!    free card plays is a branch, and a trial succeeds if any branch does.
//!
//! 3. **Deterministic by seed**: all randomness flows through `GameRng`.
//!    Same seed and same request give the same report.
//!
//! ## Architecture
//!
//! - **Card arena**: cards live once per deck in a `CardPool` and are
//!   addressed by `CardId`. Zones hold ids.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so branching
//!   a trial never copies a hand or a deck.
//!
//! ## Modules
//!
//! - `core`: RNG, errors, game state
//! - `cards`: card details, cards, card pool
//! - `zones`: deck and zone tracking
//! - `conditions`: tokenizer, parser, condition trees
//! - `rules`: free card resolution
//! - `sim`: trials, runner, report
//! - `worker`: request/response messages

pub mod cards;
pub mod conditions;
pub mod core;
pub mod rules;
pub mod sim;
pub mod worker;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{GameRng, GameState, ParseError, SimError, SimResult};

pub use crate::cards::{Card, CardDetails, CardId, CardPool, FreeCard, FreeCardDetails};

pub use crate::zones::{Deck, Zone, ZoneManager};

pub use crate::conditions::{parse_condition, CompareOp, Condition, ConditionInput};

pub use crate::rules::{CostSelection, FreeCardResolver};

pub use crate::sim::{
    CancelToken, ConditionMode, Simulation, SimulationConfig, SimulationReport, SimulationRunner,
};

pub use crate::worker::{run_request, SimulationRequest, WorkerMessage};
