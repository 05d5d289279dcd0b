//! Hit resolution: damage, status effects, twin mirroring and positional
//! follow-ups of a weapon landing on a set of cells.

use super::result::HitData;
use super::striker::Striker;
use crate::catalog::{AttackEffect, FollowUp, Weapon, WeaponKind};
use crate::config::EngineConfig;
use crate::state::{BattleRoom, EnemyKind, EntityId};

/// Board access the hit engine needs.
///
/// All positional side effects go through [`Battlefield::move_entity`] so the
/// implementor can spring traps, collect gold or record dashes on the way.
pub trait Battlefield {
    fn room(&self) -> &BattleRoom;

    fn room_mut(&mut self) -> &mut BattleRoom;

    /// Moves an entity to `cell`.
    ///
    /// # Arguments
    ///
    /// * `dash` - the entity travels through every cell on the way
    ///
    /// # Returns
    ///
    /// Hits caused by whatever the entity crossed.
    fn move_entity(&mut self, id: EntityId, cell: i32, dash: bool) -> HitData;

    /// Maximum distance a push travels.
    fn push_range(&self) -> i32 {
        EngineConfig::DEFAULT_PUSH_RANGE
    }
}

/// Hits `id` with `weapon`, mirroring hits on Twin B onto Twin A.
///
/// The mirrored hit keeps only a poison effect.
pub fn strike_entity(room: &mut BattleRoom, id: EntityId, weapon: &Weapon, twin: Option<EntityId>) -> i32 {
    let Some(target) = room.entity_mut(id) else {
        return 0;
    };
    let mut hits = target.hit(weapon);
    let mirrored = target.enemy_kind() == Some(EnemyKind::TwinsB);
    if let (true, Some(twin)) = (mirrored, twin) {
        let mut clone = weapon.clone();
        if clone.attack_effect != Some(AttackEffect::Poison) {
            clone.attack_effect = None;
        }
        if let Some(twin) = room.entity_mut(twin) {
            hits += twin.hit(&clone);
        }
    }
    hits
}

fn alive_ids(room: &BattleRoom) -> Vec<EntityId> {
    core::iter::once(&room.hero)
        .chain(room.enemies.iter())
        .filter(|entity| entity.is_alive())
        .map(|entity| entity.id)
        .collect()
}

/// Applies `weapon` from `striker` to every entity on `cells`.
///
/// Shockwave weapons also hit every target chained to a direct one with a
/// one-strength shock. A corrupted wave landing on the boss that summoned it
/// heals the boss instead.
///
/// # Returns
///
/// Hits on the hero, the number of direct targets and the kills, or an empty
/// [`HitData`] when no entity stands on `cells`.
pub fn hit_entities(
    board: &mut (impl Battlefield + ?Sized),
    striker: &Striker,
    cells: &[i32],
    weapon: &Weapon,
) -> HitData {
    let mut hit_data = HitData::empty();
    let room = board.room();
    let twin = room.twin_a();
    let attacker = striker.position(room);
    let (direct_cells, shock_cells) = if weapon.is_shocking() {
        room.connected_targets(attacker.cell, cells)
    } else {
        (cells.to_vec(), Vec::new())
    };
    let direct = room.find_targets(&direct_cells);
    let shocked = room.find_targets(&shock_cells);
    if direct.is_empty() {
        return hit_data;
    }
    let alive_before = alive_ids(room);

    for &target in &direct {
        let self_hit = striker.id() == Some(target);
        if weapon.kind == WeaponKind::CorruptedWave && self_hit {
            if let Some(boss) = board.room_mut().entity_mut(target) {
                boss.hp.heal(weapon.strength);
            }
        } else {
            hit_data.hits += strike_entity(board.room_mut(), target, weapon, twin);
        }
    }
    let shock = Weapon::shock();
    for &target in &shocked {
        hit_data.hits += strike_entity(board.room_mut(), target, &shock, twin);
    }

    let stop = Weapon::stop();
    match weapon.kind.profile().follow_up {
        FollowUp::None => {}
        FollowUp::Flip => {
            for &target in &direct {
                if let Some(entity) = board.room_mut().entity_mut(target) {
                    entity.position.flip();
                }
            }
        }
        FollowUp::Push => {
            let range = board.push_range();
            for &target in &direct {
                if let Some(moved) = push(board, striker, target, range, &stop, twin) {
                    hit_data.merge(moved);
                }
            }
        }
        FollowUp::Recoil => {
            for &target in &direct {
                let Some(moved) = push(board, striker, target, 1, &stop, twin) else {
                    continue;
                };
                hit_data.merge(moved);
                // the shooter is thrown back one cell
                if let Some(shooter) = striker.id() {
                    let target_cell = board.room().entity(target).map(|entity| entity.position.cell);
                    if let Some(target_cell) = target_cell {
                        let direction = -striker.position(board.room()).direction_towards(target_cell);
                        hit_data.merge(recoil(board, shooter, direction, &stop, twin));
                    }
                }
            }
        }
        FollowUp::Pull => {
            for &target in &direct {
                let room = board.room();
                let Some(entity) = room.entity(target) else {
                    continue;
                };
                if entity.is_heavy() {
                    continue;
                }
                let attacker_cell = striker.position(room).cell;
                let direction = if attacker_cell < entity.position.cell { 1 } else { -1 };
                hit_data.merge(board.move_entity(target, attacker_cell + direction, true));
            }
        }
    }

    hit_data.targets_hit = direct.len() as i32;
    let room = board.room();
    hit_data.kills = alive_before
        .iter()
        .filter(|id| room.entity(**id).is_some_and(|entity| !entity.is_alive()))
        .count() as i32;
    hit_data
}

/// Pushes a non-heavy target away from the striker.
///
/// A collision stops the target one cell short and hits both it and the
/// blocker with a collision hit. Returns `None` for heavy or missing targets.
fn push(
    board: &mut (impl Battlefield + ?Sized),
    striker: &Striker,
    target: EntityId,
    range: i32,
    stop: &Weapon,
    twin: Option<EntityId>,
) -> Option<HitData> {
    let room = board.room();
    let entity = room.entity(target)?;
    if entity.is_heavy() {
        return None;
    }
    let from = entity.position.cell;
    let direction = striker.position(room).direction_towards(from);
    let (rest, blocker) = room.push_target(from, direction, range);
    let mut hit_data = HitData::empty();
    if let Some(blocker) = blocker {
        hit_data.hits += strike_entity(board.room_mut(), target, stop, twin);
        hit_data.hits += strike_entity(board.room_mut(), blocker, stop, twin);
    }
    hit_data.merge(board.move_entity(target, rest, true));
    Some(hit_data)
}

fn recoil(
    board: &mut (impl Battlefield + ?Sized),
    shooter: EntityId,
    direction: i32,
    stop: &Weapon,
    twin: Option<EntityId>,
) -> HitData {
    let mut hit_data = HitData::empty();
    let Some(from) = board.room().entity(shooter).map(|entity| entity.position.cell) else {
        return hit_data;
    };
    let (rest, blocker) = board.room().push_target(from, direction, 1);
    if let Some(blocker) = blocker {
        hit_data.hits += strike_entity(board.room_mut(), shooter, stop, twin);
        hit_data.hits += strike_entity(board.room_mut(), blocker, stop, twin);
    }
    hit_data.merge(board.move_entity(shooter, rest, true));
    hit_data
}
