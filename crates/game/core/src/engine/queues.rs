//! Candidate hero queues and decks.
//!
//! Immediate tiles join the queue without spending a turn, so the queue the
//! next save shows may hold any of them in any order. These helpers list
//! every queue and deck the matcher accepts.

use crate::catalog::Weapon;
use crate::combinatorics::{combinations, permutations};
use crate::error::CoreError;

fn copies(weapons: &[Weapon], weapon: &Weapon) -> usize {
    weapons.iter().filter(|tile| *tile == weapon).count()
}

/// The queue plus every immediate deck tile not already queued as often as
/// the deck holds it.
pub fn queue_with_immediates(queue: &[Weapon], deck: &[Weapon]) -> Vec<Weapon> {
    let mut pool = queue.to_vec();
    for weapon in deck.iter().filter(|weapon| weapon.is_immediate()) {
        if copies(deck, weapon) > copies(&pool, weapon) {
            pool.push(weapon.clone());
        }
    }
    pool
}

/// Every ordering of every non-empty selection of up to `max_length` tiles
/// from the queue and the immediates.
pub fn possible_attack_queues(queue: &[Weapon], deck: &[Weapon], max_length: usize) -> Vec<Vec<Weapon>> {
    let pool = queue_with_immediates(queue, deck);
    let longest = pool.len().min(max_length);
    let mut queues: Vec<Vec<Weapon>> = Vec::new();
    for length in 1..=longest {
        for candidate in permutations(&pool, length) {
            if !queues.contains(&candidate) {
                queues.push(candidate);
            }
        }
    }
    queues
}

/// Queues reachable without executing: the current queue followed by any
/// ordering of any immediates it does not hold yet.
///
/// Empty when there is no immediate to add, meaning the queue must stay as is.
pub fn idle_queues(queue: &[Weapon], deck: &[Weapon]) -> Vec<Vec<Weapon>> {
    let pool = queue_with_immediates(queue, deck);
    let extra = &pool[queue.len()..];
    if extra.is_empty() {
        return Vec::new();
    }
    let mut queues: Vec<Vec<Weapon>> = Vec::new();
    for length in 0..=extra.len() {
        for tail in permutations(extra, length) {
            let candidate: Vec<Weapon> = queue.iter().cloned().chain(tail).collect();
            if !queues.contains(&candidate) {
                queues.push(candidate);
            }
        }
    }
    queues
}

/// Queues after adding `new`: up to `max_combination` tiles of the current
/// queue and immediates survive, in any order around the new tile.
pub fn queues_with_new_weapon(
    queue: &[Weapon],
    deck: &[Weapon],
    new: &Weapon,
    max_combination: usize,
) -> Vec<Vec<Weapon>> {
    let pool = queue_with_immediates(queue, deck);
    let mut queues: Vec<Vec<Weapon>> = Vec::new();
    for size in 0..=pool.len().min(max_combination) {
        for mut kept in combinations(&pool, size) {
            kept.push(new.clone());
            for candidate in permutations(&kept, kept.len()) {
                if !queues.contains(&candidate) {
                    queues.push(candidate);
                }
            }
        }
    }
    queues
}

/// Decks after executing `executed`: every deck slot holding the same tile
/// may be the one that was spent, so each executed tile replaces one of them.
///
/// The untouched slots recharge by one.
pub fn candidate_decks(deck: &[Weapon], executed: &[Weapon]) -> Result<Vec<Vec<Weapon>>, CoreError> {
    let mut base = deck.to_vec();
    base.iter_mut().for_each(Weapon::recharge);
    let mut decks = vec![base];
    for weapon in executed {
        let slots: Vec<usize> = deck
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_same_tile(weapon))
            .map(|(slot, _)| slot)
            .collect();
        if slots.is_empty() {
            return Err(CoreError::DeckSlotNotFound {
                weapon: weapon.pretty(),
            });
        }
        decks = decks
            .into_iter()
            .flat_map(|candidate| {
                slots.iter().map(move |&slot| {
                    let mut replaced = candidate.clone();
                    replaced[slot] = weapon.clone();
                    replaced
                })
            })
            .collect();
    }
    let mut unique: Vec<Vec<Weapon>> = Vec::with_capacity(decks.len());
    for candidate in decks {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TileEffect, WeaponKind};

    fn katana() -> Weapon {
        Weapon::new(WeaponKind::Katana, 2, 3)
    }

    fn arrow() -> Weapon {
        Weapon::new(WeaponKind::Arrow, 3, 2)
    }

    fn smoke_bomb() -> Weapon {
        Weapon::new(WeaponKind::SmokeBomb, 2, 0).with_tile_effect(TileEffect::Immediate)
    }

    #[test]
    fn immediates_join_the_pool_once_per_copy() {
        let deck = vec![katana(), smoke_bomb(), smoke_bomb()];
        let pool = queue_with_immediates(&[smoke_bomb()], &deck);
        assert_eq!(pool, vec![smoke_bomb(), smoke_bomb()]);
    }

    #[test]
    fn attack_queues_cover_every_ordering() {
        let queues = possible_attack_queues(&[katana(), arrow()], &[katana(), arrow()], 3);
        assert_eq!(queues.len(), 4);
        assert!(queues.contains(&vec![arrow(), katana()]));
        assert!(queues.contains(&vec![katana()]));
    }

    #[test]
    fn idle_queues_only_append_immediates() {
        let deck = vec![katana(), smoke_bomb()];
        assert!(idle_queues(&[katana()], &[katana()]).is_empty());
        let queues = idle_queues(&[katana()], &deck);
        assert_eq!(queues, vec![vec![katana()], vec![katana(), smoke_bomb()]]);
    }

    #[test]
    fn new_weapon_keeps_at_most_two_companions() {
        let queue = vec![katana(), arrow(), katana().with_charge(1)];
        let new = Weapon::new(WeaponKind::Spear, 2, 2);
        let queues = queues_with_new_weapon(&queue, &queue, &new, 2);
        assert!(queues.iter().all(|candidate| candidate.len() <= 3 && candidate.contains(&new)));
        assert!(queues.contains(&vec![new.clone()]));
        assert!(queues.contains(&vec![arrow(), new.clone(), katana()]));
    }

    #[test]
    fn executed_tiles_replace_a_matching_slot() {
        let deck = vec![katana().with_charge(2), arrow().with_charge(1), katana().with_charge(2)];
        let spent = katana().with_charge(0);
        let decks = candidate_decks(&deck, &[spent.clone()]).unwrap();
        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0][0], spent);
        assert_eq!(decks[0][1].cooldown_charge, 2);
        assert_eq!(decks[1][2], spent);
    }

    #[test]
    fn tiles_missing_from_the_deck_are_an_error() {
        let err = candidate_decks(&[katana()], &[arrow()]).unwrap_err();
        assert!(matches!(err, CoreError::DeckSlotNotFound { .. }));
    }
}
