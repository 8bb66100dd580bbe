//! Request / response messages for running a simulation behind a message
//! channel (a worker thread, a web worker, a subprocess).
//!
//! ```json
//! { "deck": { "Pot of Greed": { "qty": 3, "free": { "count": 2 } } },
//!   "conditions": ["Pot of Greed"],
//!   "handSize": 5,
//!   "iterations": 1000 }
//! ```
//!
//! Any other `SimulationConfig` field may appear next to `handSize`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::CardDetails;
use crate::conditions::ConditionInput;
use crate::core::error::SimResult;
use crate::sim::{CancelToken, SimulationConfig, SimulationReport, SimulationRunner};

/// A simulation request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    pub deck: BTreeMap<String, CardDetails>,
    pub conditions: Vec<ConditionInput>,
    #[serde(flatten)]
    pub config: SimulationConfig,
}

impl SimulationRequest {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Messages sent back to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WorkerMessage {
    /// Percent complete, 0 to 100.
    Progress { progress: u32 },
    #[serde(rename = "result")]
    Report { report: SimulationReport },
    Error { message: String },
}

/// Run `request`, sending progress and then either the report or an error
/// through `emit`.
pub fn run_request(
    request: SimulationRequest,
    cancel: &CancelToken,
    mut emit: impl FnMut(WorkerMessage),
) -> SimResult<SimulationReport> {
    let mut runner = match SimulationRunner::new(&request.deck, request.conditions, request.config) {
        Ok(runner) => runner,
        Err(err) => {
            log::warn!("rejected request: {err}");
            emit(WorkerMessage::Error {
                message: err.to_string(),
            });
            return Err(err);
        }
    };
    let report = runner.run(cancel, |progress| emit(WorkerMessage::Progress { progress }));
    emit(WorkerMessage::Report {
        report: report.clone(),
    });
    Ok(report)
}
