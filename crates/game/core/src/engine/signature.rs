//! Hero signature moves.

use super::errors::SimulationError;
use super::simulation::Simulation;
use crate::catalog::Weapon;
use crate::combat::{HitData, Striker, hit_entities};
use crate::state::{BattleRoom, EntityId, HeroKind, SkillKind};

/// Where the Shadow lands after dashing through the chain in `direction`.
fn shadow_landing(room: &BattleRoom, cell: i32, direction: i32) -> Option<i32> {
    let (direct, chained) = room.connected_targets(cell, &[cell + direction]);
    let cells = direct.into_iter().chain(chained);
    let landing = if direction > 0 {
        cells.max().map(|cell| cell + 1)
    } else {
        cells.min().map(|cell| cell - 1)
    };
    landing.filter(|cell| room.is_legal(*cell))
}

fn light_target(room: &BattleRoom, cell: i32) -> Option<EntityId> {
    room.find_targets(&[cell])
        .into_iter()
        .find(|id| !id.is_hero())
        .filter(|id| room.entity(*id).is_some_and(|entity| !entity.is_heavy()))
}

impl Simulation {
    fn signature_direction(&self, other_direction: bool) -> i32 {
        let direction = self.snapshot.room.hero.position.direction();
        if other_direction { -direction } else { direction }
    }

    /// Whether the hero's signature move has a valid target.
    pub(crate) fn can_execute_signature(&self, other_direction: bool) -> bool {
        let room = &self.snapshot.room;
        let Some(kind) = room.hero.hero_data().map(|data| data.kind) else {
            return false;
        };
        let cell = room.hero.position.cell;
        let direction = self.signature_direction(other_direction);
        match kind {
            HeroKind::Wanderer => light_target(room, cell + direction).is_some(),
            HeroKind::Ronin => !room.is_edge(cell + direction) && light_target(room, cell + direction).is_some(),
            HeroKind::Jujitsuka => {
                light_target(room, cell - direction).is_some()
                    && room.is_legal(cell + direction)
                    && !room.is_occupied(cell + direction)
            }
            HeroKind::ChainMaster => {
                !room.is_edge(cell)
                    && light_target(room, cell - direction).is_some()
                    && light_target(room, cell + direction).is_some()
            }
            HeroKind::Shadow => shadow_landing(room, cell, direction).is_some(),
        }
    }

    /// Executes the signature move and its skill riders.
    ///
    /// Does nothing when [`Self::can_execute_signature`] is false.
    ///
    /// # Returns
    ///
    /// Hits on the hero, already added to the run statistics.
    pub(crate) fn execute_signature(&mut self, other_direction: bool) -> Result<HitData, SimulationError> {
        if !self.can_execute_signature(other_direction) {
            return Ok(HitData::empty());
        }
        let room = &self.snapshot.room;
        let Some(kind) = room.hero.hero_data().map(|data| data.kind) else {
            return Ok(HitData::empty());
        };
        let cell = room.hero.position.cell;
        let direction = self.signature_direction(other_direction);
        let hero = Striker::hero();
        let mut hit_data = HitData::empty();
        let mut targets = Vec::new();

        match kind {
            HeroKind::Wanderer => {
                if let Some(target) = light_target(room, cell + direction) {
                    hit_data += self.simulate_move(EntityId::HERO, cell + direction, false);
                    hit_data += self.simulate_move(target, cell, false);
                    targets.push(target);
                }
            }
            HeroKind::Ronin => {
                if let Some(target) = light_target(room, cell + direction) {
                    hit_data += hit_entities(self, &hero, &[cell + direction], &Weapon::push());
                    targets.push(target);
                }
            }
            HeroKind::Jujitsuka => {
                if let Some(target) = light_target(room, cell - direction) {
                    hit_data += self.simulate_move(target, cell + direction, false);
                    if self.snapshot.room.entity(target).is_some_and(|entity| entity.is_alive()) {
                        hit_data += hit_entities(self, &hero, &[cell + direction], &Weapon::push());
                    }
                    targets.push(target);
                }
            }
            HeroKind::ChainMaster => {
                let behind = light_target(room, cell - direction);
                let ahead = light_target(room, cell + direction);
                if let (Some(behind), Some(ahead)) = (behind, ahead) {
                    hit_data += self.simulate_move(behind, cell + direction, false);
                    hit_data += self.simulate_move(ahead, cell - direction, false);
                    targets.extend([behind, ahead]);
                }
            }
            HeroKind::Shadow => {
                if let Some(landing) = shadow_landing(room, cell, direction) {
                    hit_data += self.simulate_move(EntityId::HERO, landing, true);
                }
            }
        }

        let skills = &self.snapshot.skills;
        let damaging = skills.has(SkillKind::DamagingMove);
        let cursing = skills.has(SkillKind::CursingMove);
        let mamushi = skills.has(SkillKind::MamushiMove);
        let signature = Weapon::signature_move();
        for target in targets {
            let Some(entity) = self.snapshot.room.entity_mut(target) else {
                continue;
            };
            if damaging {
                hit_data.hits += entity.hit(&signature);
            }
            if cursing {
                entity.status.curse = true;
            }
            if mamushi {
                entity.status.poison = 3;
            }
        }

        self.aftermath(&hero, None, -1, hit_data)?;
        Ok(hit_data)
    }
}

#[cfg(test)]
mod tests {
    use super::super::simulation::fixtures::*;
    use crate::state::{EliteKind, EnemyKind, Entity, EntityId, Facing, HeroData, HeroKind, Role, SkillKind, Skills};

    fn as_hero(kind: HeroKind, cell: i32, facing: Facing) -> Entity {
        let mut hero = hero_at(cell, facing);
        hero.role = Role::Hero(HeroData {
            kind,
            special_cooldown: 0,
            reactive_shield: false,
        });
        hero
    }

    fn cell_of(sim: &super::Simulation, id: u32) -> Option<i32> {
        sim.snapshot.room.entity(EntityId(id)).map(|entity| entity.position.cell)
    }

    #[test]
    fn wanderer_swaps_with_the_target_ahead() {
        let mut sim = simulation(hero_at(2, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2)]);
        sim.execute_signature(false).unwrap();
        assert_eq!(sim.hero_cell(), 3);
        assert_eq!(cell_of(&sim, 1), Some(2));
    }

    #[test]
    fn heavy_targets_block_the_signature() {
        let heavy = enemy_at(1, EnemyKind::Guardian, 3, 4).with_elite(EliteKind::Heavy);
        let sim = simulation(hero_at(2, Facing::Right), vec![heavy]);
        assert!(!sim.can_execute_signature(false));
        assert!(!sim.can_execute_signature(true));
    }

    #[test]
    fn ronin_pushes_the_target_away() {
        let mut sim = simulation(
            as_hero(HeroKind::Ronin, 2, Facing::Right),
            vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2)],
        );
        sim.execute_signature(false).unwrap();
        assert_eq!(cell_of(&sim, 1), Some(6));
        assert_eq!(sim.hero_cell(), 2);
    }

    #[test]
    fn chain_master_needs_targets_on_both_sides() {
        let mut sim = simulation(
            as_hero(HeroKind::ChainMaster, 3, Facing::Right),
            vec![enemy_at(1, EnemyKind::Ashigaru, 2, 2), enemy_at(2, EnemyKind::Ashigaru, 4, 2)],
        );
        assert!(sim.can_execute_signature(false));
        sim.execute_signature(false).unwrap();
        assert_eq!(cell_of(&sim, 1), Some(4));
        assert_eq!(cell_of(&sim, 2), Some(2));
    }

    #[test]
    fn shadow_dashes_behind_the_chain() {
        let mut sim = simulation(
            as_hero(HeroKind::Shadow, 1, Facing::Right),
            vec![enemy_at(1, EnemyKind::Ashigaru, 2, 2), enemy_at(2, EnemyKind::Ashigaru, 3, 2)],
        );
        sim.execute_signature(false).unwrap();
        assert_eq!(sim.hero_cell(), 4);
    }

    #[test]
    fn cursing_move_curses_the_targets() {
        let mut sim = simulation(hero_at(2, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2)]);
        sim.snapshot.skills = Skills::new().with(SkillKind::CursingMove, 1);
        sim.execute_signature(false).unwrap();
        assert!(sim.snapshot.room.enemies[0].status.curse);
    }
}
