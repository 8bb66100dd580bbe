//! Monte-Carlo simulation over opening hands.
//!
//! A trial deep-copies the deck, shuffles, draws the opening hand, then
//! explores every reachable sequence of free card plays. Each condition
//! counts as met for the trial if any branch meets it.
//!
//! - `config`: run parameters
//! - `branch`: one explored play sequence and its terminal hand
//! - `trial`: a single trial (`Simulation`)
//! - `runner`: batches of trials, progress, cancellation
//! - `report`: aggregation into `SimulationReport`

pub mod branch;
pub mod config;
pub mod report;
pub mod runner;
pub mod trial;

pub use branch::SimulationBranch;
pub use config::{ConditionMode, SimulationConfig};
pub use report::{ConditionStats, ReportBuilder, SimulationReport};
pub use runner::{CancelToken, SimulationRunner};
pub use trial::Simulation;
