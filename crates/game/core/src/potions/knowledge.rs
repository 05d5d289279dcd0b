//! Candidate types per potion id and the rules that narrow them.
//!
//! Ids are per-type codes: one id always stands for the same consumable and
//! two different ids never share a type. Pinning an id to a type therefore
//! removes that type from every other id, which can pin further ids in turn.

use std::collections::{BTreeMap, BTreeSet};

use super::PotionError;
use super::scenario::PotionScenario;
use crate::state::Pickup;

/// What is known about every potion id seen in the run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionKnowledge {
    /// `id -> types it may still be`. A single entry pins the id.
    guesses: BTreeMap<i32, Vec<Pickup>>,
    /// Ids guessed together in one ambiguous pickup.
    groups: Vec<BTreeSet<i32>>,
}

impl PotionKnowledge {
    /// Knowledge at the start of a run: every held id may be any consumable.
    pub fn new(held_ids: &[i32]) -> Self {
        let guesses = held_ids
            .iter()
            .map(|id| (*id, Pickup::CONSUMABLES.to_vec()))
            .collect();
        Self {
            guesses,
            groups: Vec::new(),
        }
    }

    pub fn is_known(&self, id: i32) -> bool {
        self.guesses.contains_key(&id)
    }

    /// Type `id` is pinned to, if any.
    pub fn pinned(&self, id: i32) -> Option<Pickup> {
        match self.guesses.get(&id).map(Vec::as_slice) {
            Some([kind]) => Some(*kind),
            _ => None,
        }
    }

    fn pinned_types(&self) -> BTreeSet<Pickup> {
        self.guesses
            .values()
            .filter_map(|types| match types.as_slice() {
                [kind] => Some(*kind),
                _ => None,
            })
            .collect()
    }

    /// Types `id` may be. Ids never seen may be anything not pinned elsewhere.
    pub fn candidates(&self, id: i32) -> Vec<Pickup> {
        if let Some(types) = self.guesses.get(&id) {
            return types.clone();
        }
        let pinned = self.pinned_types();
        Pickup::CONSUMABLES
            .into_iter()
            .filter(|kind| !pinned.contains(kind))
            .collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.guesses.keys().copied()
    }

    pub fn groups(&self) -> &[BTreeSet<i32>] {
        &self.groups
    }

    /// `Mass Ice/Cool Up` style rendering of the candidates of `id`.
    pub fn describe(&self, id: i32) -> String {
        self.candidates(id)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Pins `id` to `kind` and removes `kind` from every other id.
    ///
    /// # Returns
    ///
    /// [`PotionError::Contradiction`] if `id` was already pinned to another
    /// type, [`PotionError::RuledOut`] if `id` is known and `kind` is no longer
    /// among its candidates, [`PotionError::NoTypeLeft`] if the cascade
    /// empties an id. Ids never seen before may be pinned to any type.
    pub fn assured_guess(&mut self, id: i32, kind: Pickup) -> Result<(), PotionError> {
        let mut pending = vec![(id, kind)];
        while let Some((id, kind)) = pending.pop() {
            if let Some(known) = self.pinned(id)
                && known != kind
            {
                return Err(PotionError::Contradiction {
                    id,
                    known,
                    claimed: kind,
                });
            }
            if let Some(types) = self.guesses.get(&id)
                && !types.contains(&kind)
            {
                return Err(PotionError::RuledOut { id, claimed: kind });
            }
            self.guesses.insert(id, vec![kind]);
            for (other, types) in &mut self.guesses {
                if *other == id {
                    continue;
                }
                let Some(index) = types.iter().position(|candidate| *candidate == kind) else {
                    continue;
                };
                types.remove(index);
                match types.as_slice() {
                    [] => return Err(PotionError::NoTypeLeft { id: *other }),
                    [last] => pending.push((*other, *last)),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Narrows `id` to `kinds`.
    ///
    /// Known ids keep the intersection. New ids get `kinds` minus every pinned
    /// type. Either way a single remaining type pins the id.
    pub fn broad_guess(&mut self, id: i32, kinds: &[Pickup]) -> Result<(), PotionError> {
        let narrowed: Vec<Pickup> = match self.guesses.get(&id) {
            Some(current) => current.iter().filter(|kind| kinds.contains(kind)).copied().collect(),
            None => {
                let pinned = self.pinned_types();
                kinds.iter().filter(|kind| !pinned.contains(kind)).copied().collect()
            }
        };
        match narrowed.as_slice() {
            [] => Err(PotionError::NoTypeLeft { id }),
            [kind] => self.assured_guess(id, *kind),
            _ => {
                self.guesses.insert(id, narrowed);
                Ok(())
            }
        }
    }

    /// One of the known ids is certainly `kind`; pin it if only one id can be.
    pub fn reduce_new_certain(&mut self, kind: Pickup) -> Result<(), PotionError> {
        if self.pinned_types().contains(&kind) {
            return Ok(());
        }
        let possible: Vec<i32> = self
            .guesses
            .iter()
            .filter(|(_, types)| types.contains(&kind))
            .map(|(id, _)| *id)
            .collect();
        match possible.as_slice() {
            [id] => self.assured_guess(*id, kind),
            _ => Ok(()),
        }
    }

    /// Narrows the only unpinned id to `kinds`; does nothing when several are open.
    pub fn reduce_if_single_uncertain(&mut self, kinds: &[Pickup]) -> Result<(), PotionError> {
        let open: Vec<i32> = self
            .guesses
            .iter()
            .filter(|(_, types)| types.len() > 1)
            .map(|(id, _)| *id)
            .collect();
        match open.as_slice() {
            [id] => self.broad_guess(*id, kinds),
            _ => Ok(()),
        }
    }

    /// Narrows every id mentioned by the surviving scenarios to the union of
    /// the types they assumed for it.
    pub fn confirmed_guesses(&mut self, scenarios: &[PotionScenario]) -> Result<(), PotionError> {
        let mut confirmed: BTreeMap<i32, Vec<Pickup>> = BTreeMap::new();
        for scenario in scenarios {
            for (id, kind) in &scenario.guesses {
                let types = confirmed.entry(*id).or_default();
                if !types.contains(kind) {
                    types.push(*kind);
                }
            }
        }
        for (id, types) in confirmed {
            self.broad_guess(id, &types)?;
        }
        self.apply_entanglement()
    }

    /// Records that `ids` were guessed from one ambiguous pickup.
    pub fn entangle(&mut self, ids: &[i32]) {
        if ids.len() > 1 {
            self.groups.push(ids.iter().copied().collect());
        }
    }

    /// Closes entangled groups.
    ///
    /// When the open members of a group can only be as many types as there are
    /// open members, those types belong to the group and are removed from every
    /// other id. Groups whose members are all pinned are dropped.
    pub fn apply_entanglement(&mut self) -> Result<(), PotionError> {
        let mut changed = true;
        while changed {
            changed = false;
            for group in self.groups.clone() {
                let open: Vec<i32> = group.iter().copied().filter(|id| self.pinned(*id).is_none()).collect();
                if open.is_empty() {
                    continue;
                }
                let union: BTreeSet<Pickup> = open.iter().flat_map(|id| self.candidates(*id)).collect();
                if union.len() != open.len() {
                    continue;
                }
                let outsiders: Vec<i32> = self.guesses.keys().copied().filter(|id| !group.contains(id)).collect();
                for outsider in outsiders {
                    let current = self.candidates(outsider);
                    if !current.iter().any(|kind| union.contains(kind)) {
                        continue;
                    }
                    let narrowed: Vec<Pickup> = current.into_iter().filter(|kind| !union.contains(kind)).collect();
                    self.broad_guess(outsider, &narrowed)?;
                    changed = true;
                }
            }
            let pinned_groups: Vec<bool> = self
                .groups
                .iter()
                .map(|group| group.iter().all(|id| self.pinned(*id).is_some()))
                .collect();
            let mut flags = pinned_groups.into_iter();
            self.groups.retain(|_| !flags.next().unwrap_or(false));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_may_be_anything() {
        let knowledge = PotionKnowledge::new(&[10, 11]);
        assert_eq!(knowledge.candidates(10).len(), 8);
        assert_eq!(knowledge.pinned(11), None);
    }

    #[test]
    fn assured_guess_cascades() {
        let mut knowledge = PotionKnowledge::new(&[1]);
        knowledge.broad_guess(2, &[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        knowledge.broad_guess(3, &[Pickup::CoolUp, Pickup::KamiBrew]).unwrap();
        knowledge.assured_guess(1, Pickup::MassIce).unwrap();
        assert_eq!(knowledge.pinned(2), Some(Pickup::CoolUp));
        assert_eq!(knowledge.pinned(3), Some(Pickup::KamiBrew));
    }

    #[test]
    fn contradictions_are_errors() {
        let mut knowledge = PotionKnowledge::new(&[]);
        knowledge.assured_guess(5, Pickup::LuckyDie).unwrap();
        assert_eq!(
            knowledge.assured_guess(5, Pickup::CoolUp),
            Err(PotionError::Contradiction {
                id: 5,
                known: Pickup::LuckyDie,
                claimed: Pickup::CoolUp,
            })
        );
        assert_eq!(knowledge.assured_guess(5, Pickup::LuckyDie), Ok(()));
    }

    #[test]
    fn ruled_out_types_cannot_be_pinned() {
        let mut knowledge = PotionKnowledge::new(&[]);
        knowledge.broad_guess(1, &[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        assert_eq!(
            knowledge.assured_guess(1, Pickup::LuckyDie),
            Err(PotionError::RuledOut {
                id: 1,
                claimed: Pickup::LuckyDie,
            })
        );
        assert_eq!(knowledge.candidates(1), vec![Pickup::MassIce, Pickup::CoolUp]);
        assert_eq!(knowledge.assured_guess(1, Pickup::CoolUp), Ok(()));
        assert_eq!(knowledge.assured_guess(9, Pickup::LuckyDie), Ok(()));
    }

    #[test]
    fn broad_guess_skips_pinned_types_for_new_ids() {
        let mut knowledge = PotionKnowledge::new(&[]);
        knowledge.assured_guess(1, Pickup::MassIce).unwrap();
        knowledge.broad_guess(2, &[Pickup::MassIce, Pickup::MassCurse]).unwrap();
        assert_eq!(knowledge.pinned(2), Some(Pickup::MassCurse));
    }

    #[test]
    fn single_candidate_id_is_pinned_by_a_certain_type() {
        let mut knowledge = PotionKnowledge::new(&[]);
        knowledge.broad_guess(1, &[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        knowledge.broad_guess(2, &[Pickup::KamiBrew, Pickup::LuckyDie]).unwrap();
        knowledge.reduce_new_certain(Pickup::CoolUp).unwrap();
        assert_eq!(knowledge.pinned(1), Some(Pickup::CoolUp));
        assert_eq!(knowledge.pinned(2), None);
    }

    #[test]
    fn only_a_lone_open_id_is_narrowed() {
        let mut knowledge = PotionKnowledge::new(&[1, 2]);
        knowledge.reduce_if_single_uncertain(&[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        assert_eq!(knowledge.candidates(1).len(), 8);
        knowledge.assured_guess(2, Pickup::EdamameBrew).unwrap();
        knowledge.reduce_if_single_uncertain(&[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        assert_eq!(knowledge.candidates(1), vec![Pickup::CoolUp, Pickup::MassIce]);
    }

    #[test]
    fn confirmed_guesses_keep_the_union() {
        let mut knowledge = PotionKnowledge::new(&[1]);
        let scenarios = [
            PotionScenario::new(&[], &[(1, Pickup::MassIce)]),
            PotionScenario::new(&[], &[(1, Pickup::MassPoison)]),
        ];
        knowledge.confirmed_guesses(&scenarios).unwrap();
        assert_eq!(knowledge.describe(1), "Mass Ice/Mass Poison");
    }

    #[test]
    fn closed_groups_exclude_their_types_elsewhere() {
        let mut knowledge = PotionKnowledge::new(&[]);
        knowledge.broad_guess(1, &[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        knowledge.broad_guess(2, &[Pickup::MassIce, Pickup::CoolUp]).unwrap();
        knowledge.broad_guess(3, &[Pickup::MassIce, Pickup::CoolUp, Pickup::KamiBrew]).unwrap();
        knowledge.entangle(&[1, 2]);
        knowledge.apply_entanglement().unwrap();
        assert_eq!(knowledge.pinned(3), Some(Pickup::KamiBrew));
        assert_eq!(knowledge.groups().len(), 1);
    }
}
