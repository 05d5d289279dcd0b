//! Bookkeeping after a weapon resolved: deaths, drops, combos and the
//! retaliation of thorns and wardens.

use std::collections::BTreeSet;

use super::errors::SimulationError;
use super::predictions::Relaxations;
use super::simulation::Simulation;
use crate::catalog::{Weapon, WeaponKind};
use crate::combat::{HitData, Striker, hit_entities};
use crate::error::CoreError;
use crate::state::{EnemyKind, EntityId, Facing, Pickup, Position};

impl Simulation {
    /// Resolves everything that follows a hit.
    ///
    /// Dead enemies leave the board and drop an unknown pickup; corrupted
    /// elites leave progeny behind. Destroyed thorns retaliate against an
    /// adjacent non-hero killer and dead wardens explode. A double-strike
    /// weapon then executes once more without its effect.
    ///
    /// # Arguments
    ///
    /// * `weapon` - `None` for deaths that no weapon caused directly, such as
    ///   poison ticking
    pub(crate) fn aftermath(
        &mut self,
        striker: &Striker,
        mut weapon: Option<&mut Weapon>,
        previous_hero_cell: i32,
        hit_data: HitData,
    ) -> Result<(), SimulationError> {
        if let Some(weapon) = weapon.as_deref_mut() {
            weapon.consume();
        }

        let attacker_is_hero = striker.is_hero();
        let attacker_kind = striker.enemy_kind(&self.snapshot.room);
        let boss_room = self.snapshot.room.is_boss_room();
        let mut next_id = self.snapshot.room.allocate_id().0;
        let mut boss_killed = false;
        let mut warden_cells = Vec::new();
        let mut thorns_cells = Vec::new();

        let enemies = std::mem::take(&mut self.snapshot.room.enemies);
        let mut survivors = Vec::with_capacity(enemies.len());
        for enemy in enemies {
            if enemy.is_alive() {
                survivors.push(enemy);
                continue;
            }
            let death_cell = enemy.position.death_cell();
            self.trace.note(format!("{} died on cell {death_cell}", enemy.name()));
            match enemy.enemy_kind() {
                _ if enemy.is_boss() => boss_killed = true,
                Some(EnemyKind::Warden) => warden_cells.push(death_cell),
                Some(EnemyKind::Thorns) => thorns_cells.push(death_cell),
                _ => {}
            }

            self.snapshot
                .room
                .pickups
                .entry(death_cell)
                .or_default()
                .insert(Pickup::Any, 1);
            self.predictions.new_potions += 1;
            self.predictions.relaxations |= Relaxations::MORE_COINS;

            self.grow_chakrams();

            if !boss_room && !enemy.is_thorns() {
                if !self.predictions.combo_started {
                    self.predictions.combo_started = true;
                } else if enemy.enemy_kind().is_some_and(EnemyKind::extends_combo) {
                    self.snapshot.stats.combos += 1;
                }
            }
            if !attacker_is_hero && attacker_kind != Some(EnemyKind::Thorns) && !enemy.is_thorns() {
                self.snapshot.stats.friendly_kills += 1;
            }
            if enemy.is_corrupted() {
                survivors.push(enemy.corrupted_progeny(EntityId(next_id)));
                next_id += 1;
            }
        }
        self.snapshot.room.enemies = survivors;
        if self.snapshot.room.enemies.is_empty() || boss_killed {
            self.predictions.enemies_cleared = true;
        }
        self.snapshot.stats.hits += hit_data.hits;

        for cell in thorns_cells {
            self.thorns_retaliation(striker, cell, attacker_is_hero, previous_hero_cell)?;
        }
        self.warden_explosion(&warden_cells, previous_hero_cell)?;

        if let Some(weapon) = weapon {
            let mut undoubled = weapon.without_attack_effect();
            weapon.strength = weapon.base_strength;
            if weapon.is_double_strike() {
                return self.execute_weapon(striker, &mut undoubled, previous_hero_cell);
            }
        }
        Ok(())
    }

    /// Every kill grows the hero's chakrams, in the queue and in the deck.
    fn grow_chakrams(&mut self) {
        let queue = self.snapshot.room.hero.attack_queue.iter_mut();
        for weapon in queue.chain(self.snapshot.deck.iter_mut()) {
            if weapon.kind == WeaponKind::Chakram {
                weapon.grow();
            }
        }
    }

    /// Destroyed thorns hit back at an adjacent killer that is not the hero.
    fn thorns_retaliation(
        &mut self,
        striker: &Striker,
        cell: i32,
        killed_by_hero: bool,
        previous_hero_cell: i32,
    ) -> Result<(), SimulationError> {
        let weapon = match self.hazards.hit_thorns(cell) {
            Some(weapon) => weapon,
            None => self
                .snapshot
                .deck
                .iter()
                .find(|weapon| weapon.kind == WeaponKind::Thorns)
                .cloned()
                .ok_or(CoreError::ThornsWeaponMissing)?,
        };
        let attacker_cell = striker.position(&self.snapshot.room).cell;
        if killed_by_hero || (attacker_cell - cell).abs() != 1 {
            return Ok(());
        }
        let thorns = Striker::postmortem(EnemyKind::Thorns, Position::new(cell, Facing::Right));
        let mut weapon = weapon;
        let hit_data = hit_entities(self, &thorns, &[attacker_cell], &weapon);
        self.aftermath(&thorns, Some(&mut weapon), previous_hero_cell, hit_data)
    }

    /// Dead wardens explode on both sides of every cell they died on.
    fn warden_explosion(&mut self, cells: &[i32], previous_hero_cell: i32) -> Result<(), SimulationError> {
        let Some(&first) = cells.first() else {
            return Ok(());
        };
        let targets: BTreeSet<i32> = cells.iter().flat_map(|cell| [cell - 1, cell + 1]).collect();
        let targets: Vec<i32> = targets.into_iter().collect();
        let warden = Striker::postmortem(EnemyKind::Warden, Position::new(first, Facing::Left));
        let mut explosion = Weapon::explosion(2);
        let hit_data = hit_entities(self, &warden, &targets, &explosion);
        self.aftermath(&warden, Some(&mut explosion), previous_hero_cell, hit_data)
    }
}

#[cfg(test)]
mod tests {
    use super::super::simulation::fixtures::*;
    use crate::catalog::{Weapon, WeaponKind};
    use crate::combat::{HitData, Striker};
    use crate::state::{EliteKind, EnemyKind, EntityId, Facing, Pickup, RoomKind};

    fn kill(sim: &mut super::Simulation, id: u32) {
        if let Some(enemy) = sim.snapshot.room.entity_mut(EntityId(id)) {
            enemy.hp.hp = 0;
            enemy.position.died_in = Some(enemy.position.cell);
        }
    }

    #[test]
    fn dead_enemies_drop_an_unknown_pickup() {
        let mut sim = simulation(hero_at(0, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2)]);
        kill(&mut sim, 1);
        sim.aftermath(&Striker::hero(), None, 0, HitData::empty()).unwrap();
        assert!(sim.snapshot.room.enemies.is_empty());
        assert_eq!(sim.snapshot.room.pickups[&3][&Pickup::Any], 1);
        assert_eq!(sim.predictions.new_potions, 1);
        assert!(sim.predictions.enemies_cleared);
    }

    #[test]
    fn second_kill_extends_the_combo() {
        let mut sim = simulation(
            hero_at(0, Facing::Right),
            vec![
                enemy_at(1, EnemyKind::Ashigaru, 3, 2),
                enemy_at(2, EnemyKind::Ashigaru, 4, 2),
                enemy_at(3, EnemyKind::Ashigaru, 6, 2),
            ],
        );
        kill(&mut sim, 1);
        kill(&mut sim, 2);
        sim.aftermath(&Striker::hero(), None, 0, HitData::empty()).unwrap();
        assert!(sim.predictions.combo_started);
        assert_eq!(sim.snapshot.stats.combos, 1);
        assert!(!sim.predictions.enemies_cleared);
    }

    #[test]
    fn boss_rooms_never_combo() {
        let mut sim = simulation(
            hero_at(0, Facing::Right),
            vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2), enemy_at(2, EnemyKind::Ashigaru, 4, 2)],
        );
        sim.snapshot.room.room = Some(RoomKind::BambooGrove);
        sim.snapshot.room.progression = RoomKind::BambooGrove.boss_progression();
        kill(&mut sim, 1);
        kill(&mut sim, 2);
        sim.aftermath(&Striker::hero(), None, 0, HitData::empty()).unwrap();
        assert!(!sim.predictions.combo_started);
        assert_eq!(sim.snapshot.stats.combos, 0);
    }

    #[test]
    fn enemy_kills_are_friendly() {
        let mut sim = simulation(
            hero_at(0, Facing::Right),
            vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2), enemy_at(2, EnemyKind::Ashigaru, 4, 2)],
        );
        kill(&mut sim, 1);
        sim.aftermath(&Striker::entity(EntityId(2)), None, 0, HitData::empty()).unwrap();
        assert_eq!(sim.snapshot.stats.friendly_kills, 1);
    }

    #[test]
    fn corrupted_elites_leave_progeny() {
        let corrupted = enemy_at(1, EnemyKind::Ashigaru, 3, 2).with_elite(EliteKind::Corrupted);
        let mut sim = simulation(hero_at(0, Facing::Right), vec![corrupted]);
        kill(&mut sim, 1);
        sim.aftermath(&Striker::hero(), None, 0, HitData::empty()).unwrap();
        let progeny = sim.snapshot.room.enemies.first().and_then(|enemy| enemy.enemy_kind());
        assert_eq!(progeny, Some(EnemyKind::CorruptedProgeny));
        assert!(!sim.predictions.enemies_cleared);
    }

    #[test]
    fn kills_grow_chakrams() {
        let mut sim = simulation(hero_at(0, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2)]);
        sim.snapshot.deck = vec![Weapon::new(WeaponKind::Chakram, 3, 1)];
        kill(&mut sim, 1);
        sim.aftermath(&Striker::hero(), None, 0, HitData::empty()).unwrap();
        assert_eq!(sim.snapshot.deck[0].strength, 2);
    }

    #[test]
    fn wardens_explode_next_to_their_death_cell() {
        let mut sim = simulation(
            hero_at(2, Facing::Right),
            vec![enemy_at(1, EnemyKind::Warden, 3, 2), enemy_at(2, EnemyKind::Ashigaru, 4, 3)],
        );
        sim.snapshot.room.hero.hp.hp = 5;
        kill(&mut sim, 1);
        sim.aftermath(&Striker::hero(), None, 2, HitData::empty()).unwrap();
        assert_eq!(sim.snapshot.room.hero.hp.hp, 3);
        assert_eq!(sim.snapshot.stats.hits, 1);
        let survivor = sim.snapshot.room.entity(EntityId(2)).map(|enemy| enemy.hp.hp);
        assert_eq!(survivor, Some(1));
    }
}
