//! Free card rules.
//!
//! The resolver decides whether a free card may be played and applies the
//! play to a `GameState`. It never enforces anything beyond drawing and
//! costs: no summoning legality, no life points.

pub mod free_card;

pub use free_card::{CostSelection, FreeCardResolver};
