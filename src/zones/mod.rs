//! Zones: where a card is during a trial.
//!
//! ## Key Types
//!
//! - `Deck`: live cards still to be drawn plus the canonical list
//! - `Zone`: hand, graveyard, banished, played this turn
//! - `ZoneManager`: location tracking and movement for drawn cards

pub mod deck;
pub mod manager;

pub use deck::{Deck, DrawResult, MIN_DECK_SIZE};
pub use manager::{Zone, ZoneManager};
