//! Card details, cards, and the per-deck card pool.
//!
//! - `CardDetails`: configuration for one card name (quantity, tags, free card data)
//! - `Card`: immutable card, standard or free, built by `Card::new`
//! - `FreeCard`: typed view over a free card's metadata
//! - `CardPool`: arena owning every card of a deck, addressed by `CardId`

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{
    CardDetails, ConditionKind, Cost, CostKind, Excavate, FreeCardDetails, FreeCondition,
    Restriction,
};
pub use instance::{Card, CardId, CardKind, FreeCard};
pub use registry::{CardPool, EMPTY_CARD_NAME, EMPTY_CARD_TAGS};
