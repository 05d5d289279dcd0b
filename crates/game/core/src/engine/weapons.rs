//! Executing one weapon tile from the profile table.

use super::errors::SimulationError;
use super::simulation::Simulation;
use crate::catalog::{Execution, Side, Targeting, WaveSpawn, Weapon, WeaponProfile};
use crate::combat::{HitData, Striker, hit_entities};
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::state::{EntityId, Entity, Facing};

impl Simulation {
    /// Executes `weapon` from `striker`, then resolves the aftermath.
    ///
    /// `previous_hero_cell` is where the hero stood before this turn's hero
    /// action; volleys land there.
    pub(crate) fn execute_weapon(
        &mut self,
        striker: &Striker,
        weapon: &mut Weapon,
        previous_hero_cell: i32,
    ) -> Result<(), SimulationError> {
        let WeaponProfile {
            execution, coin_cost, ..
        } = weapon.kind.profile();
        let attacker = striker.position(&self.snapshot.room);
        self.trace.note(format!("executing {} at cell {}", weapon.pretty(), attacker.cell));
        let mut hit_data = HitData::empty();

        match execution {
            Execution::Strike(targeting) => {
                let cells = self.target_cells(targeting, striker, previous_hero_cell);
                if coin_cost > 0 {
                    self.snapshot.stats.coins -= coin_cost;
                }
                hit_data = hit_entities(self, striker, &cells, weapon);
            }
            Execution::Kunai => return self.execute_kunai(striker, weapon, previous_hero_cell),
            Execution::Hookblade => return self.execute_hookblade(striker, weapon, previous_hero_cell),
            Execution::MeteorHammer => {
                let first = self.snapshot.room.first_target_space_ahead_in_range(&attacker, 3);
                hit_data = hit_entities(self, striker, &Vec::from_iter(first), weapon);
                if hit_data.targets_hit > 0 {
                    let behind = striker.position(&self.snapshot.room).spaces(&[-1]);
                    hit_data += hit_entities(self, striker, &behind, weapon);
                }
            }
            Execution::BlazingSuisei => {
                let first = self.snapshot.room.first_target_space_ahead_in_range(&attacker, 3);
                hit_data = hit_entities(self, striker, &Vec::from_iter(first), weapon);
                let killed = self.snapshot.room.enemies.iter().any(|enemy| !enemy.is_alive());
                if let (true, Some(target)) = (killed, first) {
                    hit_data += hit_entities(self, striker, &[target - 1, target + 1], &Weapon::explosion(2));
                }
            }
            Execution::Chakram => {
                let cells = self.snapshot.room.first_target_spaces_around(&attacker);
                let thrown = weapon.clone();
                weapon.strength = weapon.base_strength;
                hit_data = hit_entities(self, striker, &cells, &thrown);
            }
            Execution::SpawnWave(spawn) => {
                let board_size = self.snapshot.room.board_size;
                match spawn {
                    WaveSpawn::LeftToRight => self.hazards.spawn_wave(0, Facing::Right, weapon.strength),
                    WaveSpawn::RightToLeft => self.hazards.spawn_wave(board_size, Facing::Left, weapon.strength),
                    WaveSpawn::Barrage => {
                        self.hazards.spawn_wave(attacker.cell + 1, Facing::Right, weapon.strength);
                        self.hazards.spawn_wave(attacker.cell - 1, Facing::Left, weapon.strength);
                    }
                }
            }
            Execution::Trap => {
                for cell in attacker.spaces(&[1]) {
                    self.hazards.set_trap(cell, weapon.strength);
                }
            }
            Execution::Bomb => {
                for cell in attacker.spaces(&[1]) {
                    self.hazards.add_bomb(cell, weapon.strength);
                }
            }
            Execution::Mirror => {
                let id = self.mover(striker, weapon)?;
                let mirrored = self.snapshot.room.board_size - attacker.cell - 1;
                hit_data = self.simulate_swap(id, mirrored, false, true);
            }
            Execution::Dash => {
                let id = self.mover(striker, weapon)?;
                let cell = self.snapshot.room.last_free_space_ahead(&attacker);
                hit_data = self.simulate_move(id, cell, true);
            }
            Execution::SwapToss => {
                let id = self.mover(striker, weapon)?;
                hit_data = self.swap_toss(id, attacker.cell);
            }
            Execution::OriginOfSymmetry => {
                let id = self.mover(striker, weapon)?;
                let center = (self.snapshot.room.board_size - 1) / 2;
                hit_data = self.simulate_swap(id, center, false, false);
            }
            Execution::BossSwap => {
                let id = self.mover(striker, weapon)?;
                let boss_cell = self
                    .snapshot
                    .room
                    .the_boss()?
                    .map(|boss| boss.position.cell)
                    .ok_or(CoreError::BossMissing)?;
                hit_data = self.simulate_swap(id, boss_cell, true, false);
            }
            Execution::SharpTurn => {
                hit_data = hit_entities(self, striker, &attacker.spaces(&[-1, 1]), weapon);
                let id = self.mover(striker, weapon)?;
                self.turn_entity(id);
            }
            Execution::Charge(side) => {
                let id = self.mover(striker, weapon)?;
                let cell = self
                    .snapshot
                    .room
                    .last_free_space(attacker.cell, attacker.direction() * side.sign());
                hit_data = self.simulate_move(id, cell, true);
                if striker.is_alive(&self.snapshot.room) {
                    let ahead = striker.position(&self.snapshot.room).spaces(&[side.sign()]);
                    hit_data += hit_entities(self, striker, &ahead, weapon);
                }
            }
            Execution::ShadowDash(side) => {
                let id = self.mover(striker, weapon)?;
                hit_data = self.shadow_dash(striker, id, side, weapon);
            }
            Execution::SmokeBomb(side) => {
                let id = self.mover(striker, weapon)?;
                let room = &self.snapshot.room;
                let target_cell = room.first_target_space(
                    attacker.cell,
                    attacker.direction() * side.sign(),
                    EngineConfig::TARGET_RANGE,
                );
                let target = target_cell
                    .and_then(|cell| room.find_targets(&[cell]).first().copied())
                    .filter(|target| room.entity(*target).is_some_and(|entity| !entity.is_heavy()));
                if let (Some(cell), Some(target)) = (target_cell, target) {
                    hit_data = self.simulate_swap(id, cell, true, false);
                    let landed = self.snapshot.room.entity(target).map(|entity| entity.position.cell);
                    if let Some(landed) = landed {
                        hit_data += hit_entities(self, striker, &[landed], weapon);
                    }
                }
            }
            Execution::BossSummon => self.predictions.summons += 1,
            Execution::Thorns => {
                if let Some(cell) = self.free_cell(attacker.spaces(&[1])) {
                    let id = self.snapshot.room.allocate_id();
                    self.snapshot.room.enemies.push(Entity::thorns(id, cell));
                    self.hazards.summon_thorns(cell, weapon.clone());
                }
            }
            Execution::Barricade => {
                if let Some(cell) = self.free_cell(attacker.spaces(&[1])) {
                    let id = self.snapshot.room.allocate_id();
                    self.snapshot.room.enemies.push(Entity::barricade(id, cell));
                }
            }
            Execution::Curse => {
                if let Some(target) = self.snapshot.room.first_target_ahead(&attacker)
                    && let Some(entity) = self.snapshot.room.entity_mut(target)
                {
                    entity.status.curse = true;
                }
            }
            Execution::ShieldSelf => {
                let id = self.mover(striker, weapon)?;
                if let Some(entity) = self.snapshot.room.entity_mut(id) {
                    entity.status.shield = true;
                }
            }
            Execution::SignatureMove => {
                if !striker.is_hero() {
                    let kind = striker
                        .enemy_kind(&self.snapshot.room)
                        .map_or_else(|| "an unknown enemy".to_string(), |kind| kind.to_string());
                    return Err(CoreError::EnemySignatureMove { kind }.into());
                }
                // hits were already counted by the signature's own aftermath
                self.execute_signature(false)?;
            }
            Execution::ShieldAlly | Execution::Inert => {}
            Execution::Unsimulatable => {
                return Err(SimulationError::Unsimulatable { weapon: weapon.kind });
            }
        }

        self.aftermath(striker, Some(weapon), previous_hero_cell, hit_data)
    }

    fn target_cells(&self, targeting: Targeting, striker: &Striker, previous_hero_cell: i32) -> Vec<i32> {
        let room = &self.snapshot.room;
        let attacker = striker.position(room);
        match targeting {
            Targeting::Offsets(offsets) => attacker.spaces(offsets),
            Targeting::FirstAhead => Vec::from_iter(room.first_target_space_ahead(&attacker)),
            Targeting::LastAhead => Vec::from_iter(room.last_target_space_ahead(&attacker)),
            Targeting::Crossbow => room.crossbow_targets(&attacker),
            Targeting::PreviousHeroCell => vec![previous_hero_cell],
            Targeting::AllCells => room.all_cells(),
            Targeting::HurtEnemies => room.hurt_enemy_cells(),
        }
    }

    /// Id of an attacker that has to move or change itself.
    fn mover(&self, striker: &Striker, weapon: &Weapon) -> Result<EntityId, SimulationError> {
        striker
            .id()
            .ok_or_else(|| CoreError::MissingAttacker { weapon: weapon.kind }.into())
    }

    /// First of `cells` on the board with nobody standing on it.
    fn free_cell(&self, cells: Vec<i32>) -> Option<i32> {
        let room = &self.snapshot.room;
        cells
            .into_iter()
            .find(|cell| room.is_legal(*cell) && !room.is_occupied(*cell))
    }

    /// Throws the neighbours of `cell` to the opposite sides.
    fn swap_toss(&mut self, id: EntityId, cell: i32) -> HitData {
        let room = &self.snapshot.room;
        if room.is_edge(cell) {
            return HitData::empty();
        }
        let left = room.find_targets(&[cell - 1]).first().copied().filter(|target| *target != id);
        let right = room.find_targets(&[cell + 1]).first().copied().filter(|target| *target != id);
        let heavy = [left, right]
            .into_iter()
            .flatten()
            .any(|target| room.entity(target).is_some_and(|entity| entity.is_heavy()));
        if heavy {
            return HitData::empty();
        }
        let mut hit_data = HitData::empty();
        if let Some(left) = left {
            hit_data += self.simulate_move(left, cell + 1, false);
        }
        if let Some(right) = right {
            hit_data += self.simulate_move(right, cell - 1, false);
        }
        hit_data
    }

    /// Dashes past the chain of targets on `side` and hits all of them.
    fn shadow_dash(&mut self, striker: &Striker, id: EntityId, side: Side, weapon: &Weapon) -> HitData {
        let room = &self.snapshot.room;
        let attacker = striker.position(room);
        let direction = attacker.direction() * side.sign();
        let Some(first) = room.first_target_space(attacker.cell, direction, EngineConfig::TARGET_RANGE) else {
            return HitData::empty();
        };
        let (direct, chained) = room.connected_targets(attacker.cell, &[first]);
        let cells: Vec<i32> = direct.into_iter().chain(chained).collect();
        let landing = if direction > 0 {
            cells.iter().max().map(|cell| cell + 1)
        } else {
            cells.iter().min().map(|cell| cell - 1)
        };
        let Some(landing) = landing.filter(|cell| room.is_legal(*cell)) else {
            return HitData::empty();
        };
        let mut hit_data = self.simulate_move(id, landing, true);
        hit_data += hit_entities(self, striker, &cells, weapon);
        hit_data
    }

    /// Throws one kunai per strength point at the first target ahead.
    ///
    /// Double strike doubles the throws; any other attack effect rides on
    /// every kunai.
    fn execute_kunai(
        &mut self,
        striker: &Striker,
        weapon: &mut Weapon,
        previous_hero_cell: i32,
    ) -> Result<(), SimulationError> {
        let mut kunai = Weapon::kunai();
        let mut throws = weapon.strength;
        match weapon.attack_effect {
            _ if weapon.is_double_strike() => throws *= 2,
            Some(effect) => kunai.attack_effect = Some(effect),
            None => {}
        }
        weapon.consume();
        for _ in 0..throws {
            let room = &self.snapshot.room;
            let attacker = striker.position(room);
            let cells = Vec::from_iter(room.first_target_space_ahead(&attacker));
            let hit_data = hit_entities(self, striker, &cells, &kunai);
            self.aftermath(striker, Some(&mut kunai), previous_hero_cell, hit_data)?;
        }
        Ok(())
    }

    /// Hits the adjacent target and, each time it dies, steps into its cell
    /// and strikes again one strength weaker.
    fn execute_hookblade(
        &mut self,
        striker: &Striker,
        weapon: &mut Weapon,
        previous_hero_cell: i32,
    ) -> Result<(), SimulationError> {
        let passes = if weapon.is_double_strike() { 2 } else { 1 };
        let mut link = if weapon.is_double_strike() {
            weapon.without_attack_effect()
        } else {
            weapon.clone()
        };
        let id = self.mover(striker, weapon)?;

        'passes: for _ in 0..passes {
            let mut strength = weapon.strength;
            loop {
                let Some(cell) = striker.position(&self.snapshot.room).spaces(&[1]).first().copied() else {
                    break 'passes;
                };
                if !self.snapshot.room.is_occupied(cell) {
                    break 'passes;
                }
                link.strength = strength;
                let hit_data = hit_entities(self, striker, &[cell], &link);
                self.aftermath(striker, Some(&mut link), previous_hero_cell, hit_data)?;
                if self.snapshot.room.is_occupied(cell) {
                    break 'passes;
                }
                self.simulate_move(id, cell, false);
                if strength > 0 {
                    strength -= 1;
                } else {
                    break;
                }
            }
        }
        weapon.consume();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::simulation::fixtures::*;
    use crate::catalog::{AttackEffect, Weapon, WeaponKind};
    use crate::combat::Striker;
    use crate::state::{EnemyKind, EntityId, Facing};

    fn hp_of(sim: &super::Simulation, id: u32) -> Option<i32> {
        sim.snapshot.room.entity(EntityId(id)).map(|entity| entity.hp.hp)
    }

    #[test]
    fn katana_hits_the_adjacent_cell() {
        let mut sim = simulation(hero_at(2, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 3, 4)]);
        let mut katana = Weapon::new(WeaponKind::Katana, 2, 3).with_charge(2);
        sim.execute_weapon(&Striker::hero(), &mut katana, 2).unwrap();
        assert_eq!(hp_of(&sim, 1), Some(1));
        assert_eq!(katana.cooldown_charge, 0);
    }

    #[test]
    fn kunai_throws_one_blade_per_strength() {
        let mut sim = simulation(
            hero_at(0, Facing::Right),
            vec![enemy_at(1, EnemyKind::Ashigaru, 3, 1), enemy_at(2, EnemyKind::Ashigaru, 5, 5)],
        );
        let mut kunai = Weapon::new(WeaponKind::Kunai, 3, 3);
        sim.execute_weapon(&Striker::hero(), &mut kunai, 0).unwrap();
        // the first blade kills the near enemy, the other two reach the far one
        assert_eq!(hp_of(&sim, 1), None);
        assert_eq!(hp_of(&sim, 2), Some(3));
    }

    #[test]
    fn double_strike_executes_twice() {
        let mut sim = simulation(hero_at(2, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 3, 5)]);
        let mut katana = Weapon::new(WeaponKind::Katana, 2, 2).with_attack_effect(AttackEffect::DoubleStrike);
        sim.execute_weapon(&Striker::hero(), &mut katana, 2).unwrap();
        assert_eq!(hp_of(&sim, 1), Some(1));
    }

    #[test]
    fn dash_stops_before_the_first_target() {
        let mut sim = simulation(hero_at(0, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 5, 2)]);
        let mut dash = Weapon::new(WeaponKind::Dash, 2, 0);
        sim.execute_weapon(&Striker::hero(), &mut dash, 0).unwrap();
        assert_eq!(sim.hero_cell(), 4);
    }

    #[test]
    fn hookblade_steps_into_each_kill() {
        let mut sim = simulation(
            hero_at(0, Facing::Right),
            vec![enemy_at(1, EnemyKind::Ashigaru, 1, 2), enemy_at(2, EnemyKind::Ashigaru, 2, 3)],
        );
        let mut hookblade = Weapon::new(WeaponKind::Hookblade, 3, 2);
        sim.execute_weapon(&Striker::hero(), &mut hookblade, 0).unwrap();
        assert_eq!(hp_of(&sim, 1), None);
        assert_eq!(hp_of(&sim, 2), Some(2));
        assert_eq!(sim.hero_cell(), 1);
    }

    #[test]
    fn thorns_are_summoned_ahead() {
        let mut sim = simulation(hero_at(2, Facing::Left), vec![]);
        let mut thorns = Weapon::new(WeaponKind::Thorns, 3, 1);
        sim.execute_weapon(&Striker::hero(), &mut thorns, 2).unwrap();
        let summoned = sim.snapshot.room.enemies.first().map(|enemy| (enemy.enemy_kind(), enemy.position.cell));
        assert_eq!(summoned, Some((Some(EnemyKind::Thorns), 1)));
        assert!(sim.hazards.thorns.contains_key(&1));
    }

    #[test]
    fn unsimulatable_weapons_fail_the_branch() {
        let mut sim = simulation(hero_at(2, Facing::Left), vec![]);
        let mut shock = Weapon::shock();
        let err = sim.execute_weapon(&Striker::hero(), &mut shock, 2).unwrap_err();
        assert!(matches!(err, super::SimulationError::Unsimulatable { .. }));
    }

    #[test]
    fn mon_spends_a_coin() {
        let mut sim = simulation(hero_at(2, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 5, 9)]);
        sim.snapshot.stats.coins = 10;
        let mut mon = Weapon::new(WeaponKind::Mon, 2, 2);
        sim.execute_weapon(&Striker::hero(), &mut mon, 2).unwrap();
        assert_eq!(sim.snapshot.stats.coins, 9);
        assert_eq!(hp_of(&sim, 1), Some(7));
    }
}
