//! The potion-relevant part of a snapshot.

use std::collections::BTreeMap;

use crate::state::{Pickup, PickupMap, Snapshot};

/// Held ids, consumables lying on the ground and the run's potion counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionObservation {
    pub potion_ids: Vec<i32>,
    /// Ground consumables; gold is left out.
    pub ground: PickupMap,
    pub used: i32,
    pub scrolls_dropped: i32,
    pub potions_dropped: i32,
    pub heals_dropped: i32,
}

impl PotionObservation {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let ground = snapshot
            .room
            .pickups
            .iter()
            .filter_map(|(cell, kinds)| {
                let potions: BTreeMap<Pickup, i32> = kinds
                    .iter()
                    .filter(|(kind, _)| **kind != Pickup::Gold)
                    .map(|(kind, total)| (*kind, *total))
                    .collect();
                (!potions.is_empty()).then_some((*cell, potions))
            })
            .collect();
        Self {
            potion_ids: snapshot.potions.clone(),
            ground,
            used: snapshot.stats.consumables_used,
            scrolls_dropped: snapshot.stats.scroll_pickups,
            potions_dropped: snapshot.stats.potion_pickups,
            heals_dropped: snapshot.stats.heal_pickups,
        }
    }

    /// `id -> copies held`
    pub fn id_totals(&self) -> BTreeMap<i32, usize> {
        let mut totals = BTreeMap::new();
        for id in &self.potion_ids {
            *totals.entry(*id).or_insert(0) += 1;
        }
        totals
    }

    pub const fn total_dropped(&self) -> i32 {
        self.scrolls_dropped + self.potions_dropped + self.heals_dropped
    }
}
