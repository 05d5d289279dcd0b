use std::collections::BTreeMap;

use showdown_core::state::{ShopItemKind, ShopService};
use showdown_core::{
    CoreError, Pickup, PotionObservation, PotionScenario, ShopItem, ShopRoom, ShowdownError, Snapshot,
};
use tracing::{debug, warn};

use super::{deck_changes, potion_lines, room_label};
use crate::api::Report;
use crate::history::RunHistory;

pub(super) fn entered(previous: Option<&Snapshot>, new: &Snapshot, reports: &mut Vec<Report>) {
    let Some(shop) = &new.shop else {
        warn!(location = %new.location, "shop phase without shop data");
        return;
    };
    reports.push(Report::ShopEntered {
        shop: format!("{}: {}", room_label(new, false), shop.pretty_shop()),
        inventory: shop.pretty_everything(),
        resumed: previous.is_none(),
    });
}

pub(super) fn update(
    history: &mut RunHistory,
    previous: &Snapshot,
    new: &Snapshot,
    reports: &mut Vec<Report>,
) -> Result<(), CoreError> {
    let (Some(old_shop), Some(new_shop)) = (&previous.shop, &new.shop) else {
        return Ok(());
    };
    let purchase = purchased_item(old_shop, new_shop);

    update_potions(history, previous, new, purchase, reports)?;

    if let Some(item) = purchase {
        reports.push(Report::ShopPurchase {
            description: item.purchase(),
        });
    } else if was_restocked(old_shop, new_shop) {
        if new.room.hero.hp.hp >= previous.room.hero.hp.hp {
            warn!("shop restocked without the blood price being paid");
        }
        reports.push(Report::ShopRestocked {
            inventory: new_shop.pretty_items(),
        });
    } else if new_shop.upgrade_price != old_shop.upgrade_price {
        reports.push(Report::ShopPurchase {
            description: format!(
                "Purchased the upgrade. Price increased to {} coins.",
                new_shop.upgrade_price
            ),
        });
    }
    if new_shop.already_upgraded != old_shop.already_upgraded {
        debug!(already_upgraded = new_shop.already_upgraded, "shop upgrade flag changed");
    }

    let spent = previous.stats.coins - new.stats.coins;
    if spent > 0 {
        reports.push(Report::CoinsSpent {
            amount: spent,
            left: new.stats.coins,
        });
    }
    let (added, removed) = deck_changes(&previous.deck, &new.deck);
    if !added.is_empty() || !removed.is_empty() {
        reports.push(Report::DeckChanged { added, removed });
    }
    Ok(())
}

/// First item that left the stall, when the stall shrank.
fn purchased_item<'a>(old: &'a ShopRoom, new: &ShopRoom) -> Option<&'a ShopItem> {
    if new.items.len() >= old.items.len() {
        return None;
    }
    old.items
        .iter()
        .enumerate()
        .find(|(index, item)| new.items.get(*index) != Some(*item))
        .map(|(_, item)| item)
}

fn was_restocked(old: &ShopRoom, new: &ShopRoom) -> bool {
    new.items.len() > old.items.len()
        || (old.service() == Some(ShopService::RerollForHp) && new.service() != Some(ShopService::RerollForHp))
}

/// Ids whose held count grew between the two snapshots, one entry per copy.
fn gained_ids(previous: &[i32], new: &[i32]) -> Vec<i32> {
    let mut counts: BTreeMap<i32, i32> = BTreeMap::new();
    for id in new {
        *counts.entry(*id).or_default() += 1;
    }
    for id in previous {
        *counts.entry(*id).or_default() -= 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .flat_map(|(id, count)| std::iter::repeat_n(id, count as usize))
        .collect()
}

/// Sold potions, plus potions bought or handed out for free.
///
/// Bought and free potions are not picked up from the ground, so they are
/// counted as already held before the potion bookkeeping runs.
fn update_potions(
    history: &mut RunHistory,
    previous: &Snapshot,
    new: &Snapshot,
    purchase: Option<&ShopItem>,
    reports: &mut Vec<Report>,
) -> Result<(), CoreError> {
    let bought_edamame = purchase.is_some_and(|item| item.kind == ShopItemKind::EdamameBrew);
    let took_free_potion = previous.shop.as_ref().is_some_and(|shop| shop.free_potion)
        && new.shop.as_ref().is_some_and(|shop| !shop.free_potion);
    let handed_over = usize::from(bought_edamame) + usize::from(took_free_potion);

    let mut before = PotionObservation::from_snapshot(previous);
    let after = PotionObservation::from_snapshot(new);
    let gained: Vec<i32> = gained_ids(&previous.potions, &new.potions)
        .into_iter()
        .take(handed_over)
        .collect();
    before.potion_ids.extend(&gained);

    let mut knowledge = history.knowledge.clone();
    let scenarios = match knowledge.potion_update(&before, &after, new.selling_allowed()) {
        Ok(scenarios) => scenarios,
        Err(error) if error.severity().skips_transition() => {
            warn!(code = error.error_code(), "potion change in shop left unexplained: {error}");
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };
    if let [scenario] = scenarios.as_slice() {
        knowledge.confirmed_guesses(core::slice::from_ref(scenario))?;
    }
    if bought_edamame && let Some(id) = gained.first() {
        knowledge.assured_guess(*id, Pickup::EdamameBrew)?;
    }

    let mut sold: Vec<String> = scenarios
        .iter()
        .filter(|scenario| !scenario.sold.is_empty())
        .filter_map(PotionScenario::description)
        .collect();
    sold.dedup();
    if !sold.is_empty() {
        reports.push(Report::PotionsSold { descriptions: sold });
    }

    let changed = knowledge != history.knowledge;
    history.knowledge = knowledge;
    if changed {
        reports.push(Report::Potions {
            lines: potion_lines(history, new),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_core::state::{ShopLocation, ShopType};
    use showdown_core::{BattleRoom, Entity, Facing, GamePhase, HeroKind, Hp, Position, PotionKnowledge};

    fn shop_snapshot(items: &[&str], potions: Vec<i32>, coins: i32) -> Snapshot {
        let hero = Entity::hero(HeroKind::Wanderer, Position::new(2, Facing::Right), Hp::full(5));
        let mut snapshot = Snapshot::new(BattleRoom::new(None, 0, -1, hero)).with_potions(potions);
        snapshot.phase = GamePhase::Shop;
        snapshot.stats.coins = coins;
        snapshot.shop = Some(ShopRoom {
            location: ShopLocation::BambooGroveUp,
            types: [ShopType::Damage, ShopType::Warring],
            items: items.iter().map(|code| ShopItem::from_code(code, false)).collect(),
            upgrade: 0,
            upgrade_price: 10,
            already_upgraded: false,
            free_potion: false,
            exhausted: false,
        });
        snapshot
    }

    #[test]
    fn buying_edamame_pins_the_new_id() {
        let previous = shop_snapshot(&["EdamameBrewShopItem", "MindfulnessShopItem"], vec![3], 30);
        let new = shop_snapshot(&["MindfulnessShopItem"], vec![3, 9], 25);
        let mut history = RunHistory::new(&previous, Some(PotionKnowledge::new(&[3])));

        let mut reports = Vec::new();
        update(&mut history, &previous, &new, &mut reports).unwrap();

        assert_eq!(history.knowledge.pinned(9), Some(Pickup::EdamameBrew));
        assert!(reports.contains(&Report::ShopPurchase {
            description: "Purchased Edamame Brew for 5 coins".into()
        }));
        assert!(reports.contains(&Report::CoinsSpent { amount: 5, left: 25 }));
    }

    #[test]
    fn selling_the_last_potion_is_reported() {
        let previous = shop_snapshot(&["MindfulnessShopItem"], vec![3], 10);
        let new = shop_snapshot(&["MindfulnessShopItem"], vec![], 14);
        let mut history = RunHistory::new(&previous, None);

        let mut reports = Vec::new();
        update(&mut history, &previous, &new, &mut reports).unwrap();
        assert!(reports.iter().any(|report| matches!(report, Report::PotionsSold { .. })));
        assert!(!reports.iter().any(|report| matches!(report, Report::CoinsSpent { .. })));
    }

    #[test]
    fn gained_ids_count_copies() {
        assert_eq!(gained_ids(&[1, 2], &[1, 1, 2, 5]), vec![1, 5]);
        assert!(gained_ids(&[1], &[]).is_empty());
    }
}
