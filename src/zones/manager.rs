//! Zone manager for card locations outside the deck.
//!
//! Tracks which zone each drawn card is in and keeps each zone's cards in
//! arrival order. A card is in at most one zone; moving it removes it from
//! its source zone.
//!
//! Backed by `im` persistent structures so cloning a manager for a new
//! branch is O(1).

use std::hash::BuildHasherDefault;

use im::{HashMap as ImHashMap, Vector};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Zones a drawn card can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    Graveyard,
    Banished,
    /// Cards played this turn.
    Played,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Hand, Zone::Graveyard, Zone::Banished, Zone::Played];

    const fn slot(self) -> usize {
        match self {
            Zone::Hand => 0,
            Zone::Graveyard => 1,
            Zone::Banished => 2,
            Zone::Played => 3,
        }
    }
}

type Locations = ImHashMap<CardId, Zone, BuildHasherDefault<FxHasher>>;

/// Manages card locations across zones.
///
/// ## Usage
///
/// ```
/// use hand_odds::cards::CardId;
/// use hand_odds::zones::{Zone, ZoneManager};
///
/// let mut zones = ZoneManager::new();
/// zones.add_to_zone(CardId(3), Zone::Hand);
/// zones.move_to_zone(CardId(3), Zone::Graveyard);
///
/// assert_eq!(zones.get_zone(CardId(3)), Some(Zone::Graveyard));
/// assert!(zones.cards_in_zone(Zone::Hand).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    locations: Locations,
    zone_order: [Vector<CardId>; 4],
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card that is not yet tracked.
    ///
    /// Returns false (and changes nothing) if the card is already in a zone.
    pub fn add_to_zone(&mut self, card: CardId, zone: Zone) -> bool {
        if self.locations.contains_key(&card) {
            log::warn!("{card} is already in {:?}", self.locations.get(&card));
            return false;
        }
        self.locations.insert(card, zone);
        self.zone_order[zone.slot()].push_back(card);
        true
    }

    /// Move a card from its current zone to `new_zone`.
    ///
    /// Returns the old zone, or `None` if the card wasn't tracked.
    pub fn move_to_zone(&mut self, card: CardId, new_zone: Zone) -> Option<Zone> {
        let old_zone = self.locations.get(&card).copied()?;
        if old_zone == new_zone {
            return Some(old_zone);
        }

        Self::remove_from_order(&mut self.zone_order[old_zone.slot()], card);
        self.locations.insert(card, new_zone);
        self.zone_order[new_zone.slot()].push_back(card);

        Some(old_zone)
    }

    /// Stop tracking a card. Returns the zone it was in.
    pub fn remove(&mut self, card: CardId) -> Option<Zone> {
        let zone = self.locations.remove(&card)?;
        Self::remove_from_order(&mut self.zone_order[zone.slot()], card);
        Some(zone)
    }

    fn remove_from_order(order: &mut Vector<CardId>, card: CardId) {
        if let Some(pos) = order.index_of(&card) {
            order.remove(pos);
        }
    }

    #[must_use]
    pub fn get_zone(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    #[must_use]
    pub fn is_in_zone(&self, card: CardId, zone: Zone) -> bool {
        self.get_zone(card) == Some(zone)
    }

    /// Cards in a zone, in arrival order.
    #[must_use]
    pub fn cards_in_zone(&self, zone: Zone) -> &Vector<CardId> {
        &self.zone_order[zone.slot()]
    }

    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.zone_order[zone.slot()].len()
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.locations.contains_key(&card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut zones = ZoneManager::new();

        assert!(zones.add_to_zone(CardId(10), Zone::Hand));
        assert!(zones.add_to_zone(CardId(11), Zone::Hand));

        assert_eq!(zones.get_zone(CardId(10)), Some(Zone::Hand));
        assert_eq!(zones.get_zone(CardId(99)), None);
        assert!(zones.is_in_zone(CardId(11), Zone::Hand));
        assert_eq!(zones.zone_size(Zone::Hand), 2);
    }

    #[test]
    fn test_arrival_order() {
        let mut zones = ZoneManager::new();
        for id in [5, 2, 9] {
            zones.add_to_zone(CardId(id), Zone::Hand);
        }
        let order: Vec<_> = zones.cards_in_zone(Zone::Hand).iter().copied().collect();
        assert_eq!(order, [CardId(5), CardId(2), CardId(9)]);
    }

    #[test]
    fn test_move_between_zones() {
        let mut zones = ZoneManager::new();
        zones.add_to_zone(CardId(10), Zone::Hand);

        let old = zones.move_to_zone(CardId(10), Zone::Banished);

        assert_eq!(old, Some(Zone::Hand));
        assert_eq!(zones.zone_size(Zone::Hand), 0);
        assert_eq!(zones.zone_size(Zone::Banished), 1);
        assert_eq!(zones.total_cards(), 1);
    }

    #[test]
    fn test_move_untracked_card() {
        let mut zones = ZoneManager::new();
        assert_eq!(zones.move_to_zone(CardId(1), Zone::Graveyard), None);
        assert_eq!(zones.total_cards(), 0);
    }

    #[test]
    fn test_duplicate_add_rejected() {
        let mut zones = ZoneManager::new();
        assert!(zones.add_to_zone(CardId(10), Zone::Hand));
        assert!(!zones.add_to_zone(CardId(10), Zone::Graveyard));
        assert_eq!(zones.get_zone(CardId(10)), Some(Zone::Hand));
        assert_eq!(zones.zone_size(Zone::Graveyard), 0);
    }

    #[test]
    fn test_remove() {
        let mut zones = ZoneManager::new();
        zones.add_to_zone(CardId(10), Zone::Played);

        assert_eq!(zones.remove(CardId(10)), Some(Zone::Played));
        assert!(!zones.contains(CardId(10)));
        assert_eq!(zones.zone_size(Zone::Played), 0);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut zones = ZoneManager::new();
        zones.add_to_zone(CardId(1), Zone::Hand);

        let mut copy = zones.clone();
        copy.move_to_zone(CardId(1), Zone::Graveyard);

        assert_eq!(zones.get_zone(CardId(1)), Some(Zone::Hand));
        assert_eq!(copy.get_zone(CardId(1)), Some(Zone::Graveyard));
    }
}
