//! The mutable state of one simulated branch.

use super::predictions::Predictions;
use super::trace::Trace;
use crate::combat::{Battlefield, HitData, Striker, hit_entities};
use crate::catalog::{Weapon, WeaponKind};
use crate::config::EngineConfig;
use crate::potions::PotionScenario;
use crate::state::{BattleRoom, EntityId, GamePhase, Pickup, RoomHazards, Snapshot};

/// A snapshot being pushed forward through one hypothesis.
///
/// Branches never share state: every candidate action starts from a clone of
/// the same base simulation.
#[derive(Clone, Debug)]
pub struct Simulation {
    pub snapshot: Snapshot,
    pub predictions: Predictions,
    /// Traps, thorns, bombs and waves carried over from earlier transitions.
    pub hazards: RoomHazards,
    pub trace: Trace,
    pub config: EngineConfig,
}

impl Simulation {
    pub fn new(snapshot: &Snapshot, hazards: &RoomHazards, config: &EngineConfig) -> Self {
        Self {
            snapshot: snapshot.clone(),
            predictions: Predictions::new(),
            hazards: hazards.clone(),
            trace: Trace::new(),
            config: config.clone(),
        }
    }

    pub fn hero_cell(&self) -> i32 {
        self.snapshot.room.hero.position.cell
    }

    /// Moves an entity, collecting pickups for the hero and springing traps
    /// under enemies.
    ///
    /// A dash visits every cell between the start and `cell`; a plain move
    /// only visits `cell`.
    pub(crate) fn simulate_move(&mut self, id: EntityId, cell: i32, dash: bool) -> HitData {
        let Some(mover) = self.snapshot.room.entity(id) else {
            return HitData::empty();
        };
        let from = mover.position.cell;
        let alive = mover.is_alive();
        let route: Vec<i32> = if dash {
            let direction = if from < cell { 1 } else { -1 };
            (1..=(cell - from).abs()).map(|step| from + step * direction).collect()
        } else {
            vec![cell]
        };

        let mut hit_data = HitData::empty();
        if id.is_hero() {
            for &visited in &route {
                self.collect_pickups(visited);
            }
            if !route.is_empty() {
                self.snapshot.room.hero.position.cell = cell;
            }
            return hit_data;
        }

        if !alive {
            return hit_data;
        }
        for &visited in &route {
            if let Some(entity) = self.snapshot.room.entity_mut(id) {
                entity.position.cell = cell;
            }
            if let Some(strength) = self.hazards.check_trap(visited) {
                self.trace.note(format!("trap on cell {visited} sprung"));
                hit_data += hit_entities(self, &Striker::hero(), &[cell], &Weapon::trap(strength));
            }
        }
        hit_data
    }

    /// Picks up gold, and potions when every one of them fits.
    fn collect_pickups(&mut self, cell: i32) {
        let capacity = self.snapshot.potion_capacity(&self.config);
        let free = capacity.saturating_sub(self.snapshot.potions.len());
        let Some(kinds) = self.snapshot.room.pickups.get_mut(&cell) else {
            return;
        };
        if let Some(gold) = kinds.remove(&Pickup::Gold) {
            self.snapshot.stats.coins += gold;
        }
        let count: i32 = kinds.values().sum();
        if count > 0 && count as usize <= free {
            for (kind, total) in std::mem::take(kinds) {
                let placeholder = if kind == Pickup::Any {
                    Snapshot::UNTYPED_PLACEHOLDER
                } else {
                    Snapshot::TYPED_PLACEHOLDER
                };
                self.snapshot
                    .potions
                    .extend(std::iter::repeat_n(placeholder, total.max(0) as usize));
            }
        }
        if kinds.is_empty() {
            self.snapshot.room.pickups.remove(&cell);
        }
    }

    /// Swaps `attacker` with whatever stands on `target_cell`.
    ///
    /// # Arguments
    ///
    /// * `target_required` - do nothing when the cell is empty
    /// * `flip` - both participants turn around afterwards
    pub(crate) fn simulate_swap(
        &mut self,
        attacker: EntityId,
        target_cell: i32,
        target_required: bool,
        flip: bool,
    ) -> HitData {
        let room = &self.snapshot.room;
        let target = room.find_targets(&[target_cell]).first().copied();
        match target {
            None if target_required => return HitData::empty(),
            Some(id) if room.entity(id).is_some_and(|entity| entity.is_heavy()) => {
                return HitData::empty();
            }
            _ => {}
        }
        let Some(attacker_cell) = room.entity(attacker).map(|entity| entity.position.cell) else {
            return HitData::empty();
        };

        let mut hit_data = self.simulate_move(attacker, target_cell, false);
        if flip {
            self.turn_entity(attacker);
        }
        if let Some(target) = target {
            hit_data += self.simulate_move(target, attacker_cell, false);
            if flip {
                self.turn_entity(target);
            }
        }
        hit_data
    }

    /// Flips an entity; the hero's turn counts toward the run statistics.
    pub(crate) fn turn_entity(&mut self, id: EntityId) {
        if let Some(entity) = self.snapshot.room.entity_mut(id) {
            entity.position.flip();
        }
        if id.is_hero() {
            self.snapshot.stats.turn_arounds += 1;
        }
    }

    /// Bookkeeping of a hero action that takes a turn.
    ///
    /// # Arguments
    ///
    /// * `skip_recharge` - the deck was already replaced by the executed queue
    pub(crate) fn passing_turn(&mut self, skip_recharge: bool) {
        self.snapshot.stats.turns += 1;
        let hero = &mut self.snapshot.room.hero;
        if let Some(data) = hero.hero_mut() {
            data.special_cooldown += 1;
        }
        hero.status.pass_turn();
        if !skip_recharge {
            self.snapshot.deck.iter_mut().for_each(Weapon::recharge);
        }
        for weapon in &mut hero.attack_queue {
            if weapon.kind == WeaponKind::BladeOfPatience {
                weapon.grow();
            }
        }
    }

    /// A cleared room hands over to the rewards screen and counts as cleared.
    ///
    /// Only applied when the observed snapshot already shows the rewards
    /// screen; rooms with more waves keep fighting.
    pub fn settle_cleared_room(&mut self, observed: GamePhase) {
        if self.predictions.enemies_cleared && observed == GamePhase::BattleRewards {
            self.snapshot.phase = GamePhase::BattleRewards;
            self.snapshot.stats.combat_rooms_cleared += 1;
        }
    }

    /// Applies the potions a scenario drinks and drops the sold and drunk ids.
    pub fn apply_potion_scenario(&mut self, scenario: &PotionScenario) {
        for kind in &scenario.used {
            self.snapshot.stats.consumables_used += 1;
            let room = &mut self.snapshot.room;
            match kind {
                Pickup::EdamameBrew => room.hero.hp.heal(3),
                Pickup::KamiBrew => room.hero.status.shield = true,
                Pickup::CoolUp => {
                    if let Some(data) = room.hero.hero_mut() {
                        data.special_cooldown = 5;
                    }
                    self.snapshot.deck.iter_mut().for_each(Weapon::refill);
                }
                Pickup::MassIce => room.enemies.iter_mut().for_each(|enemy| enemy.status.ice = 4),
                Pickup::MassPoison => room.enemies.iter_mut().for_each(|enemy| enemy.status.poison = 3),
                Pickup::MassCurse => room.enemies.iter_mut().for_each(|enemy| enemy.status.curse = true),
                Pickup::RainOfMirrors => room.enemies.iter_mut().for_each(|enemy| enemy.position.flip()),
                Pickup::LuckyDie | Pickup::Gold | Pickup::Any => {}
            }
        }
        for id in scenario.sold_ids.iter().chain(&scenario.used_ids) {
            if let Some(index) = self.snapshot.potions.iter().position(|held| held == id) {
                self.snapshot.potions.remove(index);
            }
        }
        if let Some(description) = scenario.description() {
            self.trace.note(description);
        }
        self.predictions.scenario = scenario.clone();
    }
}

impl Battlefield for Simulation {
    fn room(&self) -> &BattleRoom {
        &self.snapshot.room
    }

    fn room_mut(&mut self) -> &mut BattleRoom {
        &mut self.snapshot.room
    }

    fn move_entity(&mut self, id: EntityId, cell: i32, dash: bool) -> HitData {
        self.simulate_move(id, cell, dash)
    }

    fn push_range(&self) -> i32 {
        self.config.push_range
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::state::{EnemyKind, Entity, Facing, HeroKind, Hp, Position, RoomKind};

    pub(crate) fn hero_at(cell: i32, facing: Facing) -> Entity {
        Entity::hero(HeroKind::Wanderer, Position::new(cell, facing), Hp::full(5))
    }

    pub(crate) fn enemy_at(id: u32, kind: EnemyKind, cell: i32, hp: i32) -> Entity {
        Entity::enemy(EntityId(id), kind, Position::new(cell, Facing::Left), Hp::full(hp))
    }

    /// A seven-cell Bamboo Grove with the given hero and enemies.
    pub(crate) fn simulation(hero: Entity, enemies: Vec<Entity>) -> Simulation {
        let mut room = BattleRoom::new(Some(RoomKind::BambooGrove), 0, 0, hero).with_enemies(enemies);
        room.board_size = 7;
        Simulation::new(&Snapshot::new(room), &RoomHazards::new(), &EngineConfig::default())
    }
}
