use showdown_core::{CoreError, EngineConfig, Resolution, Snapshot, resolve_transition};
use tracing::{debug, warn};

use super::{potion_lines, room_label};
use crate::api::{Report, Split};
use crate::history::RunHistory;

/// A battle is on screen.
///
/// Without a previous snapshot following began mid-battle and its counters
/// at the start are unknown.
pub(super) fn started(history: &mut RunHistory, previous: Option<&Snapshot>, new: &Snapshot, reports: &mut Vec<Report>) {
    if previous.is_some() {
        history.start_battle(new);
    }
    reports.push(Report::BattleStarted {
        room: room_label(new, false),
        resumed: previous.is_none(),
    });
}

pub(super) fn update(
    history: &mut RunHistory,
    previous: &Snapshot,
    new: &Snapshot,
    config: &EngineConfig,
    reports: &mut Vec<Report>,
) -> Result<(), CoreError> {
    let Some(transition) = resolve_transition(previous, new, &history.knowledge, &history.hazards, config)? else {
        debug!(turn = new.stats.turns, "turn counter did not advance, skipping write");
        return Ok(());
    };
    reports.push(Report::Turn {
        turn: new.stats.turns,
        time: new.stats.time,
    });
    for line in transition.trace.lines() {
        debug!(target: "showdown::engine", "{line}");
    }

    match &transition.resolution {
        Resolution::Unique(explanation) => reports.push(Report::Explained {
            description: explanation.description.clone(),
        }),
        Resolution::Ambiguous(explanations) => {
            warn!(turn = new.stats.turns, count = explanations.len(), "more than one action explains the turn");
            reports.push(Report::Ambiguous {
                descriptions: explanations.iter().map(|explanation| explanation.description.clone()).collect(),
            });
        }
        Resolution::NoneFound(rejections) => {
            warn!(turn = new.stats.turns, tried = rejections.len(), "no action explains the turn");
            reports.push(Report::Unexplained {
                rejections: rejections.clone(),
            });
        }
    }

    let knowledge_changed = transition.knowledge != history.knowledge;
    history.absorb(&transition);
    if knowledge_changed {
        reports.push(Report::Potions {
            lines: potion_lines(history, new),
        });
    }
    Ok(())
}

/// The battle in `last` was won; `new` is the first snapshot after it.
pub(super) fn finished(history: &mut RunHistory, last: &Snapshot, new: &Snapshot, reports: &mut Vec<Report>) {
    let split = Split {
        room: room_label(last, true),
        tally: history.finish_battle(new),
    };
    debug!(room = %split.room, known = split.tally.is_some(), "battle won");
    reports.push(Report::BattleFinished(split));
}
