//! The enemy turn that follows every hero action.

use super::errors::SimulationError;
use super::simulation::Simulation;
use crate::catalog::{Weapon, WeaponKind};
use crate::combat::{HitData, Striker, hit_entities};
use crate::combinatorics::permutations;
use crate::config::EnemyOrder;
use crate::error::CoreError;
use crate::state::{EnemyAction, EnemyKind, EntityId};

impl Simulation {
    /// Plays the enemy turn.
    ///
    /// Hazards resolve first, then declared moves and turns, then every
    /// declared attack in the configured order, then poison and status decay.
    ///
    /// # Returns
    ///
    /// One simulation per attack order; a single one unless the order is
    /// [`EnemyOrder::Exhaustive`].
    pub fn simulate_enemies(mut self, previous_hero_cell: i32) -> Result<Vec<Simulation>, SimulationError> {
        if self.predictions.enemies_cleared {
            return Ok(vec![self]);
        }
        for enemy in &mut self.snapshot.room.enemies {
            if let Some(data) = enemy.enemy_mut()
                && data.kind != EnemyKind::CorruptedProgeny
            {
                data.first_turn = false;
            }
        }
        self.resolve_hazards()?;
        self.move_enemies();

        let orders = self.attack_orders();
        let mut outcomes = Vec::with_capacity(orders.len());
        let mut unsimulatable = None;
        for order in orders {
            let mut branch = self.clone();
            match branch.run_attacks(&order, previous_hero_cell) {
                Ok(()) => {}
                Err(err @ SimulationError::Unsimulatable { .. }) => {
                    unsimulatable = Some(err);
                    continue;
                }
                Err(err) => return Err(err),
            }
            branch.finish_enemy_turn(previous_hero_cell)?;
            outcomes.push(branch);
        }
        match (outcomes.is_empty(), unsimulatable) {
            (true, Some(err)) => Err(err),
            _ => Ok(outcomes),
        }
    }

    /// Waves strike the cell they stand on and ripe bombs explode.
    fn resolve_hazards(&mut self) -> Result<(), SimulationError> {
        let waves = self.hazards.waves.clone();
        let explosions = self.hazards.tick_bombs();
        if waves.is_empty() && explosions.is_empty() {
            return Ok(());
        }
        let boss = self.snapshot.room.the_boss()?.map(|boss| boss.id);
        for wave in waves {
            let boss = boss.ok_or(CoreError::MissingAttacker {
                weapon: WeaponKind::CorruptedWave,
            })?;
            let weapon = Weapon::corrupted_wave(wave.strength);
            let hit_data = hit_entities(self, &Striker::entity(boss), &[wave.position.cell], &weapon);
            self.snapshot.stats.hits += hit_data.hits;
        }
        for (cell, strength) in explosions {
            let boss = boss.ok_or(CoreError::MissingAttacker {
                weapon: WeaponKind::Bomb,
            })?;
            self.trace.note(format!("bomb on cell {cell} exploded"));
            let weapon = Weapon::explosion(strength);
            let hit_data = hit_entities(self, &Striker::entity(boss), &[cell - 1, cell, cell + 1], &weapon);
            self.snapshot.stats.hits += hit_data.hits;
        }
        Ok(())
    }

    /// Applies declared moves and turns of enemies that are not frozen.
    fn move_enemies(&mut self) {
        let ids: Vec<EntityId> = self.snapshot.room.enemies.iter().map(|enemy| enemy.id).collect();
        for id in ids {
            let room = &self.snapshot.room;
            let Some(enemy) = room.entity(id) else {
                continue;
            };
            let Some(data) = enemy.enemy_data() else {
                continue;
            };
            if enemy.status.ice > 0 {
                continue;
            }
            let cell = enemy.position.cell;
            let direction = match data.action {
                EnemyAction::MoveRight => 1,
                EnemyAction::MoveLeft => -1,
                EnemyAction::TurnAround | EnemyAction::TurnAroundBoss => {
                    if let Some(enemy) = self.snapshot.room.entity_mut(id) {
                        enemy.position.flip();
                    }
                    continue;
                }
                EnemyAction::Wait | EnemyAction::ExecuteQueue | EnemyAction::ExpandQueue => continue,
            };
            let target = if data.kind.is_strider() {
                room.last_free_space(cell, direction)
            } else {
                cell + direction
            };
            if room.is_legal(target) && !room.is_occupied(target) {
                self.simulate_move(id, target, true);
            }
        }
    }

    /// Attack orders to branch over.
    fn attack_orders(&self) -> Vec<Vec<EntityId>> {
        let mut attackers: Vec<(EntityId, i32)> = self
            .snapshot
            .room
            .enemies
            .iter()
            .filter(|enemy| enemy.will_attack() && enemy.status.ice == 0)
            .map(|enemy| (enemy.id, enemy.position.cell))
            .collect();
        match self.config.enemy_order {
            EnemyOrder::LeftToRight => attackers.sort_by_key(|(_, cell)| *cell),
            EnemyOrder::RightToLeft => attackers.sort_by_key(|(_, cell)| core::cmp::Reverse(*cell)),
            EnemyOrder::FileOrder => {}
            EnemyOrder::Exhaustive => {
                let ids: Vec<EntityId> = attackers.iter().map(|(id, _)| *id).collect();
                return permutations(&ids, ids.len());
            }
        }
        vec![attackers.into_iter().map(|(id, _)| id).collect()]
    }

    /// Runs each attacker's queue; an attacker that dies or freezes midway stops.
    fn run_attacks(&mut self, order: &[EntityId], previous_hero_cell: i32) -> Result<(), SimulationError> {
        for &id in order {
            let Some(queue) = self.snapshot.room.entity(id).map(|enemy| enemy.attack_queue.clone()) else {
                continue;
            };
            let striker = Striker::entity(id);
            for mut weapon in queue {
                let ready = self
                    .snapshot
                    .room
                    .entity(id)
                    .is_some_and(|enemy| enemy.is_alive() && enemy.status.ice == 0);
                if !ready {
                    break;
                }
                if weapon.kind == WeaponKind::ShieldAlly {
                    self.trace.note("shield ally is not simulated");
                    continue;
                }
                self.execute_weapon(&striker, &mut weapon, previous_hero_cell)?;
            }
        }
        Ok(())
    }

    /// Poison ticks, statuses decay and waves advance.
    fn finish_enemy_turn(&mut self, previous_hero_cell: i32) -> Result<(), SimulationError> {
        let poison = Weapon::poison_tick();
        for enemy in &mut self.snapshot.room.enemies {
            if enemy.status.poison > 0 {
                enemy.hit(&poison);
            }
            enemy.status.pass_turn();
        }
        self.aftermath(&Striker::hero(), None, previous_hero_cell, HitData::empty())?;
        if self.snapshot.room.enemies.is_empty() {
            self.predictions.enemies_cleared = true;
        }
        self.hazards.move_waves(self.snapshot.room.board_size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::simulation::fixtures::*;
    use crate::catalog::{Weapon, WeaponKind};
    use crate::config::EnemyOrder;
    use crate::state::{EnemyAction, EnemyKind, EntityId, Facing};

    #[test]
    fn declared_moves_happen_before_attacks() {
        let walker = enemy_at(1, EnemyKind::Ashigaru, 4, 2).with_action(EnemyAction::MoveLeft);
        let sim = simulation(hero_at(1, Facing::Right), vec![walker]);
        let outcomes = sim.simulate_enemies(1).unwrap();
        assert_eq!(outcomes.len(), 1);
        let cell = outcomes[0].snapshot.room.entity(EntityId(1)).map(|enemy| enemy.position.cell);
        assert_eq!(cell, Some(3));
    }

    #[test]
    fn frozen_enemies_neither_move_nor_attack() {
        let mut archer = enemy_at(1, EnemyKind::AshigaruArcher, 3, 2)
            .with_action(EnemyAction::ExecuteQueue)
            .with_queue(vec![Weapon::new(WeaponKind::Arrow, 0, 2)]);
        archer.status.ice = 2;
        let sim = simulation(hero_at(1, Facing::Right), vec![archer]);
        let outcomes = sim.simulate_enemies(1).unwrap();
        assert_eq!(outcomes[0].snapshot.room.hero.hp.hp, 5);
        assert_eq!(outcomes[0].snapshot.room.enemies[0].status.ice, 1);
    }

    #[test]
    fn declared_attacks_hit_the_hero() {
        let mut archer = enemy_at(1, EnemyKind::AshigaruArcher, 3, 2)
            .with_action(EnemyAction::ExecuteQueue)
            .with_queue(vec![Weapon::new(WeaponKind::Arrow, 0, 2)]);
        archer.position.flip();
        let sim = simulation(hero_at(5, Facing::Left), vec![archer]);
        let outcomes = sim.simulate_enemies(5).unwrap();
        assert_eq!(outcomes[0].snapshot.room.hero.hp.hp, 3);
        assert_eq!(outcomes[0].snapshot.stats.hits, 1);
    }

    #[test]
    fn poison_ticks_and_can_clear_the_room() {
        let mut enemy = enemy_at(1, EnemyKind::Ashigaru, 3, 1);
        enemy.status.poison = 2;
        let sim = simulation(hero_at(0, Facing::Right), vec![enemy]);
        let outcomes = sim.simulate_enemies(0).unwrap();
        assert!(outcomes[0].predictions.enemies_cleared);
        assert!(outcomes[0].snapshot.room.enemies.is_empty());
    }

    #[test]
    fn exhaustive_order_branches_per_permutation() {
        let attacker = |id, cell| {
            enemy_at(id, EnemyKind::Ashigaru, cell, 2)
                .with_action(EnemyAction::ExecuteQueue)
                .with_queue(vec![Weapon::new(WeaponKind::Katana, 0, 1)])
        };
        let mut sim = simulation(hero_at(0, Facing::Right), vec![attacker(1, 3), attacker(2, 5)]);
        sim.config.enemy_order = EnemyOrder::Exhaustive;
        assert_eq!(sim.simulate_enemies(0).unwrap().len(), 2);
    }

    #[test]
    fn cleared_rooms_skip_the_enemy_turn() {
        let mut sim = simulation(hero_at(0, Facing::Right), vec![]);
        sim.predictions.enemies_cleared = true;
        let outcomes = sim.simulate_enemies(0).unwrap();
        assert_eq!(outcomes[0].snapshot.stats.turns, 0);
    }
}
