//! Phase dispatcher.
//!
//! Every decoded snapshot is compared against the one before it. A phase
//! change selects an `entered` handler, a repeated phase its `update`
//! handler. Handlers narrate what happened as [`Report`]s and keep the
//! [`RunHistory`] current.
mod battle;
mod map;
mod reward;
mod shop;

use showdown_core::{CoreError, EngineConfig, GamePhase, Snapshot, Weapon};

use crate::api::Report;
use crate::history::RunHistory;

/// Whether `new` opens a run rather than repeating its first write.
pub fn is_run_start(previous: Option<&Snapshot>, new: &Snapshot) -> bool {
    new.stats.turns == 0
        && previous.is_none_or(|previous| previous.stats.turns != 0 || previous.stats.day != new.stats.day)
}

/// Narrates the step from `previous` to `new`.
///
/// # Arguments
///
/// * `history` - state of the run `new` belongs to
/// * `previous` - last processed snapshot, `None` right after following began
/// * `new` - freshly decoded snapshot
/// * `config` - engine policies for battle transitions
///
/// # Errors
///
/// Fatal [`CoreError`]s from the engine. Transitions the engine cannot
/// explain are reported, not returned.
pub fn compare_snapshots(
    history: &mut RunHistory,
    previous: Option<&Snapshot>,
    new: &Snapshot,
    config: &EngineConfig,
) -> Result<Vec<Report>, CoreError> {
    let mut reports = Vec::new();

    if new.stats.turns == 0 {
        if is_run_start(previous, new) {
            reports.push(Report::RunStarted { day: new.stats.day });
            battle::started(history, Some(new), new, &mut reports);
        }
        return Ok(reports);
    }
    if previous.is_none() {
        reports.push(Report::JoinedMidRun);
    }

    let phase_changed = previous.is_none_or(|previous| previous.phase != new.phase);
    if phase_changed {
        match new.phase {
            GamePhase::Battle => battle::started(history, previous, new, &mut reports),
            GamePhase::BattleRewards => {
                if let Some(previous) = previous {
                    battle::update(history, previous, new, config, &mut reports)?;
                }
                reward::entered(history, previous, new, &mut reports);
            }
            GamePhase::MapJourney => map::entered(&mut reports),
            GamePhase::Shop => shop::entered(previous, new, &mut reports),
        }
        return Ok(reports);
    }

    let Some(previous) = previous else {
        return Ok(reports);
    };
    match new.phase {
        GamePhase::Battle => battle::update(history, previous, new, config, &mut reports)?,
        GamePhase::BattleRewards => reward::update(previous, new, &mut reports),
        // The map has a single action, leaving it.
        GamePhase::MapJourney => {}
        GamePhase::Shop => shop::update(history, previous, new, &mut reports)?,
    }
    Ok(reports)
}

/// Display name of where `snapshot` stands.
///
/// Boss rooms lose their boss once it is beaten, so the reward screen after a
/// boss battle is named without it.
pub(crate) fn room_label(snapshot: &Snapshot, splits: bool) -> String {
    snapshot.room_name(splits).unwrap_or_else(|_| {
        let room = snapshot.room.room.map_or("Unknown room", |room| room.display_name());
        if snapshot.phase == GamePhase::BattleRewards {
            format!("{room}, boss battle rewards")
        } else {
            format!("{room}, boss battle")
        }
    })
}

/// Tiles gained and lost between two decks, as pretty names.
///
/// Tiles are matched ignoring their charge.
pub(crate) fn deck_changes(before: &[Weapon], after: &[Weapon]) -> (Vec<String>, Vec<String>) {
    let mut removed: Vec<&Weapon> = before.iter().collect();
    let mut added = Vec::new();
    for tile in after {
        match removed.iter().position(|old| old.is_same_tile(tile)) {
            Some(index) => {
                removed.remove(index);
            }
            None => added.push(tile.pretty()),
        }
    }
    (added, removed.into_iter().map(Weapon::pretty).collect())
}

/// `id: candidates` for every distinct held potion.
pub(crate) fn potion_lines(history: &RunHistory, snapshot: &Snapshot) -> Vec<String> {
    let mut ids = snapshot.potions.clone();
    ids.sort_unstable();
    ids.dedup();
    ids.into_iter()
        .map(|id| format!("{id}: {}", history.knowledge.describe(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_core::{
        BattleRoom, EnemyKind, Entity, EntityId, Facing, HeroKind, Hp, Position, RoomKind, WeaponKind,
    };

    fn battle(turns: i32) -> Snapshot {
        let hero = Entity::hero(HeroKind::Wanderer, Position::new(0, Facing::Left), Hp::full(5));
        let enemy = Entity::enemy(EntityId(1), EnemyKind::Ashigaru, Position::new(5, Facing::Left), Hp::full(3));
        let mut snapshot =
            Snapshot::new(BattleRoom::new(Some(RoomKind::BambooGrove), 0, 0, hero).with_enemies(vec![enemy]));
        snapshot.stats.turns = turns;
        snapshot.stats.day = 4;
        snapshot
    }

    #[test]
    fn only_the_first_turn_zero_write_starts_a_run() {
        let first = battle(0);
        assert!(is_run_start(None, &first));
        assert!(!is_run_start(Some(&first), &first));
        assert!(is_run_start(Some(&battle(30)), &first));

        let mut history = RunHistory::new(&first, None);
        let reports = compare_snapshots(&mut history, None, &first, &EngineConfig::default()).unwrap();
        assert_eq!(reports[0], Report::RunStarted { day: 4 });
        assert!(history.battle_start.is_some());

        let repeated = compare_snapshots(&mut history, Some(&first), &first, &EngineConfig::default()).unwrap();
        assert!(repeated.is_empty());
    }

    #[test]
    fn joining_mid_battle_leaves_the_split_open() {
        let snapshot = battle(12);
        let mut history = RunHistory::new(&snapshot, None);
        let reports = compare_snapshots(&mut history, None, &snapshot, &EngineConfig::default()).unwrap();
        assert_eq!(reports[0], Report::JoinedMidRun);
        assert!(matches!(reports[1], Report::BattleStarted { resumed: true, .. }));
        assert_eq!(history.battle_start, None);
    }

    #[test]
    fn beaten_boss_rooms_fall_back_to_a_plain_label() {
        let hero = Entity::hero(HeroKind::Wanderer, Position::new(2, Facing::Right), Hp::full(5));
        let mut snapshot = Snapshot::new(BattleRoom::new(Some(RoomKind::BambooGrove), 4, 0, hero));
        snapshot.phase = GamePhase::BattleRewards;
        assert!(snapshot.room_name(true).is_err());
        assert_eq!(room_label(&snapshot, true), "Bamboo Grove, boss battle rewards");
    }

    #[test]
    fn deck_changes_ignore_charge() {
        let katana = Weapon::new(WeaponKind::Katana, 2, 3);
        let arrow = Weapon::new(WeaponKind::Arrow, 3, 2);
        let before = vec![katana.clone(), arrow.clone()];
        let after = vec![katana.with_charge(0), Weapon::new(WeaponKind::Spear, 3, 2)];
        let (added, removed) = deck_changes(&before, &after);
        assert_eq!(added, vec![Weapon::new(WeaponKind::Spear, 3, 2).pretty()]);
        assert_eq!(removed, vec![arrow.pretty()]);
    }
}
