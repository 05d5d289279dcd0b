use proptest::prelude::*;
use showdown_core::engine::possible_attack_queues;
use showdown_core::{Pickup, PotionKnowledge, Weapon, WeaponKind};

const KINDS: [WeaponKind; 5] = [
    WeaponKind::Katana,
    WeaponKind::Arrow,
    WeaponKind::Spear,
    WeaponKind::Sai,
    WeaponKind::Tetsubo,
];

fn falling_factorial(n: usize, k: usize) -> usize {
    (n - k + 1..=n).product()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]
    #[test]
    fn attack_queues_enumerate_every_ordering(tiles in 1_usize..=4, max_length in 1_usize..=4) {
        let queue: Vec<Weapon> = KINDS[..tiles].iter().map(|kind| Weapon::new(*kind, 2, 2)).collect();
        let queues = possible_attack_queues(&queue, &queue, max_length);
        let expected: usize = (1..=tiles.min(max_length)).map(|k| falling_factorial(tiles, k)).sum();
        prop_assert_eq!(queues.len(), expected);
        for candidate in &queues {
            prop_assert!(candidate.len() <= max_length);
            prop_assert!(candidate.iter().all(|tile| queue.contains(tile)));
        }
    }

    #[test]
    fn pinned_potions_stay_pinned(
        pinned in 0_usize..8,
        guesses in proptest::collection::vec((1_i32..6, proptest::collection::vec(0_usize..8, 1..5)), 0..12)
    ) {
        let kind = Pickup::CONSUMABLES[pinned];
        let mut knowledge = PotionKnowledge::new(&[0, 1, 2]);
        prop_assert!(knowledge.assured_guess(0, kind).is_ok());
        for (id, picks) in guesses {
            let kinds: Vec<Pickup> = picks.iter().map(|index| Pickup::CONSUMABLES[*index]).collect();
            if knowledge.broad_guess(id, &kinds).is_err() {
                break;
            }
            prop_assert_eq!(knowledge.pinned(0), Some(kind));
        }
    }

    #[test]
    fn candidate_sets_only_shrink(
        held in proptest::collection::vec(1_i32..6, 0..4),
        steps in proptest::collection::vec(
            (any::<bool>(), 1_i32..6, proptest::collection::vec(0_usize..8, 1..5)),
            0..16,
        )
    ) {
        let mut knowledge = PotionKnowledge::new(&held);
        for (assured, id, picks) in steps {
            let kinds: Vec<Pickup> = picks.iter().map(|index| Pickup::CONSUMABLES[*index]).collect();
            let mut next = knowledge.clone();
            let outcome = if assured {
                next.assured_guess(id, kinds[0])
            } else {
                next.broad_guess(id, &kinds)
            };
            if outcome.is_err() {
                continue;
            }
            for known in next.ids() {
                let before = knowledge.candidates(known);
                let after = next.candidates(known);
                prop_assert!(!after.is_empty());
                prop_assert!(
                    after.iter().all(|kind| before.contains(kind)),
                    "id {} grew from {:?} to {:?}", known, before, after
                );
            }
            knowledge = next;
        }
    }
}
