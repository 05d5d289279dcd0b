//! Loosened comparison of a simulated branch against the observed snapshot.
//!
//! A branch cannot know everything: immediates may have joined the queue, any
//! of several deck slots may have been spent, a kill may have dropped gold or
//! a potion. [`is_good_prediction`] first narrows those choices to the one the
//! observed snapshot shows, then compares what must match exactly.

mod room;
mod stats;

use crate::catalog::Weapon;
use crate::engine::Simulation;
use crate::state::{GamePhase, Snapshot};

/// Why a simulated branch does not explain the observed snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("none of the predicted attack queues check out")]
    AttackQueue,

    #[error("none of the predicted hero decks check out")]
    Deck,

    #[error("wrong number of potions is {actual} expected at least {min} and at most {max}")]
    PotionCount { actual: usize, min: usize, max: usize },

    #[error("predicted potion {id} missing")]
    PotionMissing { id: i32 },

    #[error("wrong hero deck state: {reason}")]
    DeckState { reason: String },

    #[error("wrong game phase: is {actual} expected {simulated}")]
    Phase { actual: GamePhase, simulated: GamePhase },

    #[error("wrong number of {stat}: is {actual} expected {simulated}")]
    Stat {
        stat: &'static str,
        actual: i64,
        simulated: i64,
    },

    #[error("wrong number of {family} pickups: is {actual} expected at most {allowed}")]
    Drops {
        family: &'static str,
        actual: i32,
        allowed: i32,
    },

    #[error("wrong number of enemies in {wave} wave: is {actual} expected {simulated}")]
    EnemyCount {
        wave: &'static str,
        actual: usize,
        simulated: usize,
    },

    #[error("{unmatched} enemies unaccounted for, expected {summons} summons")]
    UnmatchedEnemies { unmatched: usize, summons: usize },

    #[error("wrong enemies in new wave")]
    NewWave,

    #[error("wrong room")]
    Room,

    #[error("wrong {field} ({hero})")]
    Hero { field: String, hero: String },
}

/// Picks the predicted candidate equal to `actual`.
///
/// An empty candidate list means the simulated value itself is the prediction.
fn reduce<'a>(candidates: &'a [Vec<Weapon>], simulated: &'a [Weapon], actual: &[Weapon]) -> Option<&'a [Weapon]> {
    if candidates.is_empty() {
        return Some(simulated);
    }
    candidates
        .iter()
        .find(|candidate| candidate.as_slice() == actual)
        .map(Vec::as_slice)
}

/// Checks whether `simulated` explains `actual`.
///
/// Pure: the same inputs always give the same verdict and reason.
pub fn is_good_prediction(actual: &Snapshot, simulated: &Simulation) -> Result<(), Mismatch> {
    let predictions = &simulated.predictions;
    let expected = &simulated.snapshot;
    let rewards = actual.phase == GamePhase::BattleRewards;

    let queue: &[Weapon] = if rewards {
        &[]
    } else {
        reduce(
            &predictions.attack_queues,
            &expected.room.hero.attack_queue,
            &actual.room.hero.attack_queue,
        )
        .ok_or(Mismatch::AttackQueue)?
    };
    let deck: &[Weapon] = if rewards {
        &actual.deck
    } else {
        reduce(&predictions.decks, &expected.deck, &actual.deck).ok_or(Mismatch::Deck)?
    };

    check_potions(actual, expected)?;

    if actual.deck.len() != deck.len() {
        return Err(Mismatch::DeckState {
            reason: format!("wrong len {} vs {}", actual.deck.len(), deck.len()),
        });
    }
    if let Some(slot) = actual.deck.iter().zip(deck).position(|(real, predicted)| real != predicted) {
        return Err(Mismatch::DeckState {
            reason: format!("wrong weapon #{slot}"),
        });
    }
    if actual.phase != expected.phase {
        return Err(Mismatch::Phase {
            actual: actual.phase,
            simulated: expected.phase,
        });
    }

    stats::check_stats(&actual.stats, &expected.stats, predictions)?;
    room::check_room(&actual.room, &expected.room, queue, predictions.summons)
}

fn check_potions(actual: &Snapshot, expected: &Snapshot) -> Result<(), Mismatch> {
    let untyped = expected
        .potions
        .iter()
        .filter(|id| **id == Snapshot::UNTYPED_PLACEHOLDER)
        .count();
    let max = expected.potions.len();
    let min = max - untyped;
    let count = actual.potions.len();
    if count < min || count > max {
        return Err(Mismatch::PotionCount {
            actual: count,
            min,
            max,
        });
    }
    let placeholders = [Snapshot::TYPED_PLACEHOLDER, Snapshot::UNTYPED_PLACEHOLDER];
    match expected
        .potions
        .iter()
        .find(|id| !placeholders.contains(id) && !actual.potions.contains(id))
    {
        Some(&id) => Err(Mismatch::PotionMissing { id }),
        None => Ok(()),
    }
}
