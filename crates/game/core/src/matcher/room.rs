//! Battle room comparison: enemies by wave, then the room and the hero.

use super::Mismatch;
use crate::catalog::Weapon;
use crate::state::{BattleRoom, EnemyKind, Entity};

/// Whether `simulated` predicts the observed enemy `actual`.
///
/// Ids are not compared; the simulation allocates ids for spawns on its own.
/// Attack queues are not compared either, enemies redraw them every turn.
fn predicts(simulated: &Entity, actual: &Entity) -> bool {
    let (Some(expected), Some(observed)) = (simulated.enemy_data(), actual.enemy_data()) else {
        return false;
    };
    expected.kind == observed.kind
        && expected.elite == observed.elite
        && expected.first_turn == observed.first_turn
        && simulated.status == actual.status
        && simulated
            .position
            .matches(&actual.position, expected.kind != EnemyKind::Thorns)
        && simulated.hp == actual.hp
}

fn check_enemies(actual: &BattleRoom, simulated: &BattleRoom, summons: i32) -> Result<(), Mismatch> {
    let summons = usize::try_from(summons).unwrap_or(0);
    if actual.wave_number == simulated.wave_number {
        if actual.enemies.len() != simulated.enemies.len() + summons {
            return Err(Mismatch::EnemyCount {
                wave: "same",
                actual: actual.enemies.len(),
                simulated: simulated.enemies.len() + summons,
            });
        }
        let mut unclaimed: Vec<&Entity> = simulated.enemies.iter().collect();
        let mut unmatched = 0;
        for enemy in &actual.enemies {
            match unclaimed.iter().position(|candidate| predicts(candidate, enemy)) {
                Some(index) => {
                    unclaimed.remove(index);
                }
                None => unmatched += 1,
            }
        }
        if unmatched != summons {
            return Err(Mismatch::UnmatchedEnemies { unmatched, summons });
        }
        return Ok(());
    }

    if actual.enemies.len() <= simulated.enemies.len() {
        return Err(Mismatch::EnemyCount {
            wave: "new",
            actual: actual.enemies.len(),
            simulated: simulated.enemies.len(),
        });
    }
    let explained = actual.enemies.iter().all(|enemy| {
        simulated.enemies.iter().any(|candidate| predicts(candidate, enemy)) || !enemy.hp.is_hurt()
    });
    if explained { Ok(()) } else { Err(Mismatch::NewWave) }
}

fn check_hero(actual: &Entity, simulated: &Entity, queue: &[Weapon]) -> Result<(), Mismatch> {
    let (Some(observed), Some(expected)) = (actual.hero_data(), simulated.hero_data()) else {
        return Err(Mismatch::Room);
    };
    let hero = observed.kind.to_string();
    let wrong = |field: String| {
        Err(Mismatch::Hero {
            field,
            hero: hero.clone(),
        })
    };
    if observed.kind != expected.kind {
        return wrong("hero".into());
    }
    let cooldown = observed.special_cooldown;
    if cooldown != expected.special_cooldown && cooldown != expected.special_cooldown - 1 {
        return wrong(format!(
            "special move cooldown is {cooldown} expected {}",
            expected.special_cooldown
        ));
    }
    if actual.attack_queue.as_slice() != queue {
        return wrong("attack queue".into());
    }
    if let Some(field) = actual.status.first_difference(&simulated.status) {
        return wrong(format!("{field} state"));
    }
    if !actual.position.matches(&simulated.position, true) {
        return wrong(format!(
            "position is {} {} expected {} {}",
            actual.position.cell,
            actual.position.facing.describe(),
            simulated.position.cell,
            simulated.position.facing.describe()
        ));
    }
    if actual.hp != simulated.hp {
        return wrong(format!(
            "hp is {}/{} expected {}/{}",
            actual.hp.hp, actual.hp.max_hp, simulated.hp.hp, simulated.hp.max_hp
        ));
    }
    Ok(())
}

pub(super) fn check_room(
    actual: &BattleRoom,
    simulated: &BattleRoom,
    queue: &[Weapon],
    summons: i32,
) -> Result<(), Mismatch> {
    check_enemies(actual, simulated, summons)?;
    if actual.room != simulated.room || actual.progression != simulated.progression {
        return Err(Mismatch::Room);
    }
    check_hero(&actual.hero, &simulated.hero, queue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Facing, HeroKind, Hp, Position, RoomKind};

    fn room(enemies: Vec<Entity>) -> BattleRoom {
        let hero = Entity::hero(HeroKind::Wanderer, Position::new(1, Facing::Right), Hp::full(5));
        BattleRoom::new(Some(RoomKind::BambooGrove), 2, 0, hero).with_enemies(enemies)
    }

    fn ashigaru(id: u32, cell: i32, hp: i32) -> Entity {
        Entity::enemy(
            crate::state::EntityId(id),
            EnemyKind::Ashigaru,
            Position::new(cell, Facing::Left),
            Hp::new(hp, 3),
        )
    }

    #[test]
    fn enemies_match_regardless_of_order_and_id() {
        let simulated = room(vec![ashigaru(1, 3, 2), ashigaru(2, 5, 3)]);
        let actual = room(vec![ashigaru(7, 5, 3), ashigaru(8, 3, 2)]);
        assert_eq!(check_room(&actual, &simulated, &[], 0), Ok(()));
    }

    #[test]
    fn summons_stay_unmatched() {
        let simulated = room(vec![ashigaru(1, 3, 2)]);
        let actual = room(vec![ashigaru(1, 3, 2), ashigaru(2, 6, 3)]);
        assert_eq!(check_room(&actual, &simulated, &[], 1), Ok(()));
        assert!(matches!(
            check_room(&actual, &simulated, &[], 0),
            Err(Mismatch::EnemyCount { wave: "same", .. })
        ));
    }

    #[test]
    fn thorns_facing_is_ignored() {
        let thorns = |facing| {
            Entity::enemy(
                crate::state::EntityId(3),
                EnemyKind::Thorns,
                Position::new(2, facing),
                Hp::full(1),
            )
        };
        let simulated = room(vec![thorns(Facing::Right)]);
        let actual = room(vec![thorns(Facing::Left)]);
        assert_eq!(check_room(&actual, &simulated, &[], 0), Ok(()));
    }

    #[test]
    fn new_waves_accept_fresh_enemies_only() {
        let simulated = room(vec![ashigaru(1, 3, 2)]);
        let mut actual = room(vec![ashigaru(1, 3, 2), ashigaru(2, 5, 3)]);
        actual.wave_number = 1;
        assert_eq!(check_room(&actual, &simulated, &[], 0), Ok(()));
        actual.enemies[1].hp.hp = 1;
        assert_eq!(check_room(&actual, &simulated, &[], 0), Err(Mismatch::NewWave));
    }

    #[test]
    fn special_cooldown_may_lag_by_one() {
        let mut simulated = room(vec![]);
        if let Some(data) = simulated.hero.hero_mut() {
            data.special_cooldown = 3;
        }
        let mut actual = simulated.clone();
        if let Some(data) = actual.hero.hero_mut() {
            data.special_cooldown = 2;
        }
        assert_eq!(check_room(&actual, &simulated, &[], 0), Ok(()));
        if let Some(data) = actual.hero.hero_mut() {
            data.special_cooldown = 1;
        }
        assert!(matches!(check_room(&actual, &simulated, &[], 0), Err(Mismatch::Hero { .. })));
    }

    #[test]
    fn hero_queue_must_equal_the_reduced_queue() {
        let simulated = room(vec![]);
        let mut actual = simulated.clone();
        actual.hero.attack_queue = vec![Weapon::new(crate::catalog::WeaponKind::Katana, 2, 3)];
        let err = check_room(&actual, &simulated, &[], 0).unwrap_err();
        assert_eq!(err.to_string(), "wrong attack queue (The Wanderer)");
    }
}
