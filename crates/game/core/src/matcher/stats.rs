//! Run statistics comparison.

use super::Mismatch;
use crate::engine::{Predictions, Relaxations};
use crate::state::GameStats;

fn exact(stat: &'static str, actual: i64, simulated: i64) -> Result<(), Mismatch> {
    if actual == simulated {
        Ok(())
    } else {
        Err(Mismatch::Stat {
            stat,
            actual,
            simulated,
        })
    }
}

/// Exact unless `relaxed`, in which case the observed value may be larger.
fn at_least(stat: &'static str, actual: i64, simulated: i64, relaxed: bool) -> Result<(), Mismatch> {
    if relaxed && actual >= simulated {
        return Ok(());
    }
    exact(stat, actual, simulated)
}

fn drops(family: &'static str, actual: i32, simulated: i32, new_potions: i32) -> Result<(), Mismatch> {
    let allowed = simulated + new_potions;
    if actual <= allowed {
        Ok(())
    } else {
        Err(Mismatch::Drops {
            family,
            actual,
            allowed,
        })
    }
}

pub(super) fn check_stats(actual: &GameStats, simulated: &GameStats, predictions: &Predictions) -> Result<(), Mismatch> {
    at_least(
        "turn arounds",
        actual.turn_arounds.into(),
        simulated.turn_arounds.into(),
        predictions.allows(Relaxations::MORE_TURN_AROUNDS),
    )?;
    at_least(
        "coins",
        actual.coins.into(),
        simulated.coins.into(),
        predictions.allows(Relaxations::MORE_COINS),
    )?;
    exact("combos", actual.combos.into(), simulated.combos.into())?;
    exact("turns", actual.turns.into(), simulated.turns.into())?;
    exact(
        "combat rooms cleared",
        actual.combat_rooms_cleared.into(),
        simulated.combat_rooms_cleared.into(),
    )?;
    exact("friendly kills", actual.friendly_kills.into(), simulated.friendly_kills.into())?;
    exact("hits", actual.hits.into(), simulated.hits.into())?;
    exact(
        "consumables used",
        actual.consumables_used.into(),
        simulated.consumables_used.into(),
    )?;

    let new_potions = predictions.new_potions;
    drops("scroll", actual.scroll_pickups, simulated.scroll_pickups, new_potions)?;
    drops("potion", actual.potion_pickups, simulated.potion_pickups, new_potions)?;
    drops("heal", actual.heal_pickups, simulated.heal_pickups, new_potions)?;
    drops("consumable", actual.total_drops(), simulated.total_drops(), new_potions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coins_may_exceed_only_when_relaxed() {
        let simulated = GameStats {
            coins: 3,
            ..GameStats::default()
        };
        let actual = GameStats {
            coins: 5,
            ..GameStats::default()
        };
        let mut predictions = Predictions::new();
        assert_eq!(
            check_stats(&actual, &simulated, &predictions),
            Err(Mismatch::Stat {
                stat: "coins",
                actual: 5,
                simulated: 3
            })
        );
        predictions.relaxations |= Relaxations::MORE_COINS;
        assert_eq!(check_stats(&actual, &simulated, &predictions), Ok(()));
        assert!(check_stats(&simulated, &actual, &predictions).is_err());
    }

    #[test]
    fn drops_are_bounded_by_possible_new_potions() {
        let simulated = GameStats::default();
        let actual = GameStats {
            scroll_pickups: 1,
            heal_pickups: 1,
            ..GameStats::default()
        };
        let mut predictions = Predictions::new();
        predictions.new_potions = 1;
        let err = check_stats(&actual, &simulated, &predictions).unwrap_err();
        assert_eq!(err.to_string(), "wrong number of consumable pickups: is 2 expected at most 1");
        predictions.new_potions = 2;
        assert_eq!(check_stats(&actual, &simulated, &predictions), Ok(()));
    }

    #[test]
    fn turn_counter_is_exact() {
        let actual = GameStats {
            turns: 2,
            ..GameStats::default()
        };
        let err = check_stats(&actual, &GameStats::default(), &Predictions::new()).unwrap_err();
        assert_eq!(err.to_string(), "wrong number of turns: is 2 expected 0");
    }
}
