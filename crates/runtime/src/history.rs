//! What the runtime remembers between snapshots of one run.

use showdown_core::{GameStats, PotionKnowledge, RoomHazards, Snapshot, Transition};

use crate::api::BattleTally;

/// Counters at the moment a battle started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleMarker {
    pub turns: i32,
    pub time: i64,
    pub hits: i32,
    pub consumables_used: i32,
    pub combos: i32,
}

impl BattleMarker {
    pub fn new(stats: &GameStats) -> Self {
        Self {
            turns: stats.turns,
            time: stats.time,
            hits: stats.hits,
            consumables_used: stats.consumables_used,
            combos: stats.combos,
        }
    }

    /// Counters accumulated between the marker and `stats`.
    pub fn tally(&self, stats: &GameStats) -> BattleTally {
        BattleTally {
            turns: stats.turns - self.turns,
            time: stats.time - self.time,
            hits: stats.hits - self.hits,
            potions_used: stats.consumables_used - self.consumables_used,
            combos: stats.combos - self.combos,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunHistory {
    /// Run number the history belongs to.
    pub day: i32,
    pub knowledge: PotionKnowledge,
    pub hazards: RoomHazards,
    /// `None` until a battle start was observed.
    pub battle_start: Option<BattleMarker>,
}

impl RunHistory {
    /// History for the run `first` belongs to.
    ///
    /// Without stored knowledge every held potion may be anything.
    pub fn new(first: &Snapshot, stored: Option<PotionKnowledge>) -> Self {
        Self {
            day: first.stats.day,
            knowledge: stored.unwrap_or_else(|| PotionKnowledge::new(&first.potions)),
            hazards: RoomHazards::new(),
            battle_start: None,
        }
    }

    pub fn start_battle(&mut self, snapshot: &Snapshot) {
        self.hazards = RoomHazards::new();
        self.battle_start = Some(BattleMarker::new(&snapshot.stats));
    }

    /// Closes the current battle.
    ///
    /// # Returns
    ///
    /// The battle's counters, or `None` when its start was never observed.
    pub fn finish_battle(&mut self, last: &Snapshot) -> Option<BattleTally> {
        self.hazards = RoomHazards::new();
        self.battle_start.take().map(|marker| marker.tally(&last.stats))
    }

    /// Adopts the knowledge and hazards a resolved transition left behind.
    pub fn absorb(&mut self, transition: &Transition) {
        self.knowledge = transition.knowledge.clone();
        self.hazards = transition.hazards.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_core::{BattleRoom, Entity, Facing, HeroKind, Hp, Position, RoomKind};

    fn snapshot(turns: i32, time: i64) -> Snapshot {
        let hero = Entity::hero(HeroKind::Wanderer, Position::new(2, Facing::Right), Hp::full(5));
        let mut snapshot = Snapshot::new(BattleRoom::new(Some(RoomKind::BambooGrove), 0, 0, hero)).with_potions(vec![5]);
        snapshot.stats.turns = turns;
        snapshot.stats.time = time;
        snapshot
    }

    #[test]
    fn splits_count_from_the_battle_start() {
        let mut history = RunHistory::new(&snapshot(0, 0), None);
        history.hazards.set_trap(3, 2);
        history.start_battle(&snapshot(10, 100));
        assert!(history.hazards.is_empty());

        let mut end = snapshot(17, 161);
        end.stats.hits = 2;
        let tally = history.finish_battle(&end);
        assert_eq!(
            tally,
            Some(BattleTally {
                turns: 7,
                time: 61,
                hits: 2,
                potions_used: 0,
                combos: 0,
            })
        );
        assert_eq!(history.finish_battle(&end), None);
    }

    #[test]
    fn fresh_runs_know_nothing_about_held_potions() {
        let history = RunHistory::new(&snapshot(0, 0), None);
        assert_eq!(history.knowledge, PotionKnowledge::new(&[5]));
    }
}
