//! Explaining potion changes between two observations.

use std::collections::{BTreeMap, BTreeSet};

use super::knowledge::PotionKnowledge;
use super::observation::PotionObservation;
use super::scenario::PotionScenario;
use super::PotionError;
use crate::combinatorics::{combinations, combinations_with_replacement};
use crate::state::{DropFamily, Pickup, PickupMap};

/// Items present in `from` but missing (or fewer) in `to`, one entry per copy.
fn ground_loss(from: &PickupMap, to: &PickupMap) -> Vec<Pickup> {
    let mut lost = Vec::new();
    for (cell, kinds) in from {
        for (kind, total) in kinds {
            let left = to.get(cell).and_then(|kinds| kinds.get(kind)).copied().unwrap_or(0);
            for _ in left..*total {
                lost.push(*kind);
            }
        }
    }
    lost
}

fn distinct(kinds: &[Pickup]) -> Vec<Pickup> {
    let mut out = Vec::new();
    for kind in kinds {
        if !out.contains(kind) {
            out.push(*kind);
        }
    }
    out
}

impl PotionKnowledge {
    /// Updates the knowledge from `previous -> new` and lists every way the
    /// lost potions could have been sold or drunk.
    ///
    /// Ground items that vanished were picked up; ground items that appeared
    /// were just dropped. Drop counters that grew beyond the visible drops
    /// stand for items picked up straight away, typed only by family. Picked
    /// up potions cannot have been drunk or sold in the same transition.
    ///
    /// # Returns
    ///
    /// At least one scenario. A transition that lost nothing yields
    /// [`PotionScenario::none`] alone.
    pub fn potion_update(
        &mut self,
        previous: &PotionObservation,
        new: &PotionObservation,
        selling_allowed: bool,
    ) -> Result<Vec<PotionScenario>, PotionError> {
        let total_new_drops = new.total_dropped() - previous.total_dropped();

        let mut certain_picked_up = ground_loss(&previous.ground, &new.ground);
        let certain_drops = ground_loss(&new.ground, &previous.ground);
        let mut uncertain_picked_up: Vec<&'static [Pickup]> = Vec::new();

        let certain_count = certain_drops.len() as i32;
        if certain_count > total_new_drops {
            return Err(PotionError::TooManyCertainDrops {
                certain: certain_drops.len(),
                total: total_new_drops,
            });
        }
        if certain_count < total_new_drops {
            let mut scrolls = new.scrolls_dropped - previous.scrolls_dropped;
            let mut potions = new.potions_dropped - previous.potions_dropped;
            let mut heals = new.heals_dropped - previous.heals_dropped;
            for drop in &certain_drops {
                match drop.family() {
                    Some(DropFamily::Heal) => heals -= 1,
                    Some(DropFamily::Potion) => potions -= 1,
                    _ => scrolls -= 1,
                }
            }
            for _ in 0..scrolls {
                uncertain_picked_up.push(&Pickup::SCROLLS);
            }
            for _ in 0..potions {
                uncertain_picked_up.push(&Pickup::POTIONS);
            }
            for _ in 0..heals {
                certain_picked_up.push(Pickup::EdamameBrew);
            }
        }
        let certain_types = distinct(&certain_picked_up);

        let used_total = new.used - previous.used;
        let sold_total = (previous.potion_ids.len() + certain_picked_up.len() + uncertain_picked_up.len()) as i32
            - used_total
            - new.potion_ids.len() as i32;
        if sold_total < 0 {
            return Err(PotionError::UnexplainedPotions { count: -sold_total });
        }
        if sold_total > 0 && !selling_allowed {
            return Err(PotionError::SellingNotAllowed { sold: sold_total });
        }

        let previous_totals = previous.id_totals();
        let new_totals = new.id_totals();

        let mut certain_lost_ids = Vec::new();
        let mut remaining_ids = Vec::new();
        for (id, total) in &previous_totals {
            let left = new_totals.get(id).copied().unwrap_or(0);
            for _ in left..*total {
                certain_lost_ids.push(*id);
            }
            if left > 0 {
                remaining_ids.push(*id);
            }
        }
        let mut certain_new_ids = Vec::new();
        for (id, total) in &new_totals {
            let before = previous_totals.get(id).copied().unwrap_or(0);
            for _ in before..*total {
                certain_new_ids.push(*id);
            }
        }

        self.learn_from_pickups(&certain_picked_up, &certain_types, &uncertain_picked_up, &certain_new_ids)?;

        let lost_total = used_total + sold_total;
        if lost_total == 0 {
            return Ok(vec![PotionScenario::none()]);
        }
        let uncertain_lost = lost_total - certain_lost_ids.len() as i32;
        if uncertain_lost < 0 {
            return Err(PotionError::LossMismatch {
                lost: lost_total,
                certain: certain_lost_ids.len(),
            });
        }

        let losses = loss_scenarios(&certain_lost_ids, &remaining_ids, uncertain_lost as usize, sold_total as usize);
        let typings = self.type_scenarios(previous_totals.keys().copied());

        let mut scenarios = Vec::new();
        for (sold_ids, used_ids) in losses.values() {
            let mut seen = BTreeSet::new();
            for typing in &typings {
                let pair = |id: &i32| typing.get(id).map(|kind| (*id, *kind));
                let (Some(sold), Some(used)) = (
                    sold_ids.iter().map(pair).collect::<Option<Vec<_>>>(),
                    used_ids.iter().map(pair).collect::<Option<Vec<_>>>(),
                ) else {
                    continue;
                };
                let scenario = PotionScenario::new(&sold, &used);
                if seen.insert(scenario.type_signature()) {
                    scenarios.push(scenario);
                }
            }
        }
        Ok(scenarios)
    }

    fn learn_from_pickups(
        &mut self,
        certain: &[Pickup],
        certain_types: &[Pickup],
        uncertain: &[&[Pickup]],
        new_ids: &[i32],
    ) -> Result<(), PotionError> {
        match (certain, certain_types, uncertain, new_ids) {
            ([kind], _, [], [id]) => self.assured_guess(*id, *kind),
            (_, [kind], [], [id, ..]) => self.assured_guess(*id, *kind),
            (_, [kind], [], []) => self.reduce_new_certain(*kind),
            _ if !certain_types.is_empty() || !uncertain.is_empty() => {
                let mut possible = certain_types.to_vec();
                for kinds in uncertain {
                    for kind in *kinds {
                        if !possible.contains(kind) {
                            possible.push(*kind);
                        }
                    }
                }
                self.reduce_if_single_uncertain(&possible)?;
                for id in new_ids {
                    self.broad_guess(*id, &possible)?;
                }
                let fresh: Vec<i32> = distinct_ids(new_ids);
                self.entangle(&fresh);
                self.apply_entanglement()
            }
            _ => Ok(()),
        }
    }

    /// Every assignment of distinct types to `ids` the knowledge allows.
    fn type_scenarios(&self, ids: impl Iterator<Item = i32>) -> Vec<BTreeMap<i32, Pickup>> {
        let mut typings: Vec<BTreeMap<i32, Pickup>> = vec![BTreeMap::new()];
        for id in ids {
            let candidates = self.candidates(id);
            typings = typings
                .into_iter()
                .flat_map(|typing| {
                    candidates
                        .iter()
                        .filter(|kind| !typing.values().any(|taken| taken == *kind))
                        .map(|kind| {
                            let mut next = typing.clone();
                            next.insert(id, *kind);
                            next
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
        }
        typings
    }
}

fn distinct_ids(ids: &[i32]) -> Vec<i32> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

/// `signature -> (sold ids, used ids)` for every split of every lost-id pool.
fn loss_scenarios(
    certain_lost: &[i32],
    remaining: &[i32],
    uncertain: usize,
    sold: usize,
) -> BTreeMap<String, (Vec<i32>, Vec<i32>)> {
    let lost_total = certain_lost.len() + uncertain;
    let indices: Vec<usize> = (0..lost_total).collect();
    let mut losses = BTreeMap::new();
    for extra in combinations_with_replacement(remaining, uncertain) {
        let pool: Vec<i32> = certain_lost.iter().copied().chain(extra).collect();
        for sold_indices in combinations(&indices, sold) {
            let (sold_ids, used_ids): (Vec<_>, Vec<_>) =
                pool.iter().enumerate().partition(|(index, _)| sold_indices.contains(index));
            let sold_ids: Vec<i32> = sold_ids.into_iter().map(|(_, id)| *id).collect();
            let used_ids: Vec<i32> = used_ids.into_iter().map(|(_, id)| *id).collect();
            losses
                .entry(PotionScenario::loss_signature(&sold_ids, &used_ids))
                .or_insert((sold_ids, used_ids));
        }
    }
    losses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(ids: &[i32]) -> PotionObservation {
        PotionObservation {
            potion_ids: ids.to_vec(),
            ..PotionObservation::default()
        }
    }

    #[test]
    fn nothing_lost_is_one_empty_scenario() {
        let mut knowledge = PotionKnowledge::new(&[1]);
        let scenarios = knowledge.potion_update(&observation(&[1]), &observation(&[1]), false).unwrap();
        assert_eq!(scenarios, vec![PotionScenario::none()]);
    }

    #[test]
    fn single_certain_pickup_pins_the_new_id() {
        let mut knowledge = PotionKnowledge::new(&[]);
        let mut previous = observation(&[]);
        previous.ground.entry(3).or_default().insert(Pickup::KamiBrew, 1);
        let new = observation(&[42]);
        knowledge.potion_update(&previous, &new, false).unwrap();
        assert_eq!(knowledge.pinned(42), Some(Pickup::KamiBrew));
    }

    #[test]
    fn family_counter_gives_a_broad_guess() {
        let mut knowledge = PotionKnowledge::new(&[]);
        let previous = observation(&[]);
        let mut new = observation(&[9]);
        new.scrolls_dropped = 1;
        knowledge.potion_update(&previous, &new, false).unwrap();
        assert_eq!(knowledge.candidates(9), Pickup::SCROLLS.to_vec());
    }

    #[test]
    fn drinking_lists_each_candidate_type() {
        let mut knowledge = PotionKnowledge::new(&[1]);
        knowledge.broad_guess(1, &[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        let previous = observation(&[1]);
        let mut new = observation(&[]);
        new.used = 1;
        let scenarios = knowledge.potion_update(&previous, &new, false).unwrap();
        let descriptions: Vec<_> = scenarios.iter().filter_map(PotionScenario::description).collect();
        assert_eq!(descriptions, vec!["Used Cool Up".to_string(), "Used Mass Ice".to_string()]);
    }

    #[test]
    fn selling_needs_permission() {
        let mut knowledge = PotionKnowledge::new(&[1]);
        let result = knowledge.potion_update(&observation(&[1]), &observation(&[]), false);
        assert_eq!(result, Err(PotionError::SellingNotAllowed { sold: 1 }));
    }

    #[test]
    fn sold_and_used_splits_are_enumerated() {
        let mut knowledge = PotionKnowledge::new(&[]);
        knowledge.assured_guess(1, Pickup::LuckyDie).unwrap();
        knowledge.assured_guess(2, Pickup::MassCurse).unwrap();
        let previous = observation(&[1, 2]);
        let mut new = observation(&[]);
        new.used = 1;
        let scenarios = knowledge.potion_update(&previous, &new, true).unwrap();
        assert_eq!(scenarios.len(), 2);
        assert!(scenarios.iter().any(|s| s.sold == vec![Pickup::LuckyDie] && s.used == vec![Pickup::MassCurse]));
        assert!(scenarios.iter().any(|s| s.sold == vec![Pickup::MassCurse] && s.used == vec![Pickup::LuckyDie]));
    }

    #[test]
    fn potions_from_nowhere_are_rejected() {
        let mut knowledge = PotionKnowledge::new(&[]);
        let result = knowledge.potion_update(&observation(&[]), &observation(&[5]), true);
        assert_eq!(result, Err(PotionError::UnexplainedPotions { count: 1 }));
    }

    #[test]
    fn remaining_copies_can_be_the_lost_ones() {
        let mut knowledge = PotionKnowledge::new(&[]);
        knowledge.assured_guess(7, Pickup::EdamameBrew).unwrap();
        let previous = observation(&[7, 7]);
        let mut new = observation(&[7]);
        new.used = 1;
        let scenarios = knowledge.potion_update(&previous, &new, false).unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].used_ids, vec![7]);
    }
}
