use showdown_core::Snapshot;
use showdown_core::state::Upgrade;

use super::{battle, deck_changes, room_label};
use crate::api::Report;
use crate::history::RunHistory;

pub(super) fn entered(history: &mut RunHistory, previous: Option<&Snapshot>, new: &Snapshot, reports: &mut Vec<Report>) {
    if let Some(previous) = previous {
        battle::finished(history, previous, new, reports);
    }
    reports.push(Report::RewardEntered {
        room: room_label(new, false),
        offer: new.reward.as_ref().map(|reward| reward.describe()).unwrap_or_default(),
        resumed: previous.is_none(),
    });
}

/// Picks, upgrades and rerolls on the reward screen.
pub(super) fn update(previous: &Snapshot, new: &Snapshot, reports: &mut Vec<Report>) {
    let (Some(old_offer), Some(new_offer)) = (&previous.reward, &new.reward) else {
        return;
    };
    let (added, removed) = deck_changes(&previous.deck, &new.deck);

    if !old_offer.exhausted && new_offer.exhausted {
        let description = if old_offer.upgrade != 0 {
            format!("Took the {} upgrade", Upgrade::describe(old_offer.upgrade))
        } else if added.is_empty() {
            "Skipped the reward".to_string()
        } else {
            format!("Picked {}", added.join(", "))
        };
        reports.push(Report::RewardTaken { description });
    } else {
        let same_offer = old_offer.upgrade == new_offer.upgrade
            && old_offer.tiles.len() == new_offer.tiles.len()
            && old_offer
                .tiles
                .iter()
                .zip(&new_offer.tiles)
                .all(|(old, new)| old.is_same_tile(new));
        if !same_offer {
            reports.push(Report::RewardRerolled {
                price: (previous.stats.coins - new.stats.coins).max(0),
            });
        }
    }

    if !added.is_empty() || !removed.is_empty() {
        reports.push(Report::DeckChanged { added, removed });
    }
}
