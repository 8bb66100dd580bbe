//! Core engine types: RNG, errors, per-trial game state.

pub mod error;
pub mod rng;
pub mod state;

pub use error::{ParseError, SimError, SimResult};
pub use rng::GameRng;
pub use state::GameState;
