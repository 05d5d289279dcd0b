//! Explaining one observed transition.

use super::actions::HeroAction;
use super::errors::SimulationError;
use super::simulation::Simulation;
use super::trace::Trace;
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::matcher::is_good_prediction;
use crate::potions::{PotionKnowledge, PotionObservation, PotionScenario};
use crate::state::{RoomHazards, Snapshot};

/// A hypothesis whose simulation matched the observed snapshot.
#[derive(Clone, Debug)]
pub struct Explanation {
    pub action: HeroAction,
    pub scenario: PotionScenario,
    /// Potion scenario and hero action as one line.
    pub description: String,
    pub simulation: Simulation,
}

/// A hypothesis that was simulated and did not match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejection {
    pub description: String,
    pub reason: String,
}

#[derive(Clone, Debug)]
pub enum Resolution {
    Unique(Explanation),
    Ambiguous(Vec<Explanation>),
    NoneFound(Vec<Rejection>),
}

impl Resolution {
    pub fn explanations(&self) -> &[Explanation] {
        match self {
            Self::Unique(explanation) => core::slice::from_ref(explanation),
            Self::Ambiguous(explanations) => explanations,
            Self::NoneFound(_) => &[],
        }
    }
}

/// Everything learned from one transition.
#[derive(Clone, Debug)]
pub struct Transition {
    pub resolution: Resolution,
    /// Potion knowledge narrowed to what the matching scenarios agree on.
    pub knowledge: PotionKnowledge,
    /// Hazards to carry into the next transition.
    pub hazards: RoomHazards,
    pub trace: Trace,
}

fn describe(scenario: &PotionScenario, action: &HeroAction) -> String {
    match scenario.description() {
        Some(potions) => format!("{potions}. {action}"),
        None => action.to_string(),
    }
}

/// Explains how `previous` turned into `next`.
///
/// Every potion scenario is combined with every candidate hero action; each
/// combination is simulated through the enemy turn and compared against
/// `next`. Transitions that did not advance the turn counter are skipped.
///
/// # Returns
///
/// `Ok(None)` for skipped transitions. Hazards are taken from the unique
/// explanation, or from ambiguous ones when they all agree; otherwise the
/// previous hazards carry over.
///
/// # Errors
///
/// Potion bookkeeping no scenario can explain, and simulation inconsistencies
/// such as a queued tile missing from the deck.
pub fn resolve_transition(
    previous: &Snapshot,
    next: &Snapshot,
    knowledge: &PotionKnowledge,
    hazards: &RoomHazards,
    config: &EngineConfig,
) -> Result<Option<Transition>, CoreError> {
    if previous.stats.turns == next.stats.turns {
        return Ok(None);
    }
    let mut trace = Trace::new();
    let mut knowledge = knowledge.clone();
    let scenarios = knowledge.potion_update(
        &PotionObservation::from_snapshot(previous),
        &PotionObservation::from_snapshot(next),
        previous.selling_allowed(),
    )?;
    trace.note(format!("{} potion scenario(s)", scenarios.len()));

    let base = Simulation::new(previous, hazards, config);
    let actions = HeroAction::candidates(previous, config.max_queue_length);
    let previous_hero_cell = base.hero_cell();
    let mut explanations: Vec<Explanation> = Vec::new();
    let mut rejections = Vec::new();

    for scenario in &scenarios {
        let mut start = base.clone();
        start.apply_potion_scenario(scenario);
        for action in &actions {
            let description = describe(scenario, action);
            let branch = match start.branch(action) {
                Ok(Some(branch)) => branch,
                Ok(None) => continue,
                Err(SimulationError::Unsimulatable { weapon }) => {
                    rejections.push(Rejection {
                        description,
                        reason: format!("{weapon} has no simulated effect"),
                    });
                    continue;
                }
                Err(SimulationError::Core(err)) => return Err(err),
            };
            let outcomes = match branch.simulate_enemies(previous_hero_cell) {
                Ok(outcomes) => outcomes,
                Err(SimulationError::Unsimulatable { weapon }) => {
                    rejections.push(Rejection {
                        description,
                        reason: format!("{weapon} has no simulated effect"),
                    });
                    continue;
                }
                Err(SimulationError::Core(err)) => return Err(err),
            };
            for mut outcome in outcomes {
                outcome.settle_cleared_room(next.phase);
                match is_good_prediction(next, &outcome) {
                    Ok(()) => {
                        if explanations.iter().any(|known| known.description == description) {
                            continue;
                        }
                        explanations.push(Explanation {
                            action: action.clone(),
                            scenario: scenario.clone(),
                            description: description.clone(),
                            simulation: outcome,
                        });
                    }
                    Err(mismatch) => rejections.push(Rejection {
                        description: description.clone(),
                        reason: mismatch.to_string(),
                    }),
                }
            }
        }
    }

    if !explanations.is_empty() {
        let mut confirmed: Vec<PotionScenario> = Vec::new();
        for explanation in &explanations {
            if !confirmed.contains(&explanation.scenario) {
                confirmed.push(explanation.scenario.clone());
            }
        }
        knowledge.confirmed_guesses(&confirmed)?;
    }

    let hazards = match explanations.as_slice() {
        [only] => only.simulation.hazards.clone(),
        [first, rest @ ..]
            if rest
                .iter()
                .all(|explanation| explanation.simulation.hazards == first.simulation.hazards) =>
        {
            first.simulation.hazards.clone()
        }
        _ => hazards.clone(),
    };

    let resolution = match explanations.len() {
        0 => {
            trace.note(format!("no explanation among {} rejected branches", rejections.len()));
            Resolution::NoneFound(rejections)
        }
        1 => Resolution::Unique(explanations.remove(0)),
        count => {
            trace.note(format!("{count} explanations match"));
            Resolution::Ambiguous(explanations)
        }
    };

    Ok(Some(Transition {
        resolution,
        knowledge,
        hazards,
        trace,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::simulation::fixtures::*;
    use super::*;
    use crate::state::{EnemyKind, Facing, SkillKind, Skills};

    #[test]
    fn unchanged_turn_counters_are_skipped() {
        let snapshot = simulation(hero_at(2, Facing::Right), vec![]).snapshot;
        let resolved = resolve_transition(
            &snapshot,
            &snapshot,
            &PotionKnowledge::default(),
            &RoomHazards::new(),
            &EngineConfig::default(),
        )
        .unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn a_step_right_is_the_unique_explanation() {
        let before = simulation(hero_at(2, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 6, 3)]);
        let mut after = before.snapshot.clone();
        after.stats.turns += 1;
        after.room.hero.position.cell = 3;

        let transition = resolve_transition(
            &before.snapshot,
            &after,
            &PotionKnowledge::default(),
            &RoomHazards::new(),
            &EngineConfig::default(),
        )
        .unwrap()
        .unwrap();
        let Resolution::Unique(explanation) = transition.resolution else {
            panic!("expected a unique explanation");
        };
        assert_eq!(explanation.description, "Hero has moved right");
    }

    #[test]
    fn two_free_turns_before_waiting_are_explained() {
        let before = simulation(hero_at(2, Facing::Right), vec![])
            .snapshot
            .with_skills(Skills::new().with(SkillKind::TwoWayMove, 1));
        let mut after = before.clone();
        after.stats.turns += 1;
        after.stats.turn_arounds += 2;

        let transition = resolve_transition(
            &before,
            &after,
            &PotionKnowledge::default(),
            &RoomHazards::new(),
            &EngineConfig::default(),
        )
        .unwrap()
        .unwrap();
        let Resolution::Unique(explanation) = transition.resolution else {
            panic!("expected a unique explanation, got {:?}", transition.resolution);
        };
        assert_eq!(explanation.description, "Hero has turned around twice and waited a turn");
    }

    #[test]
    fn impossible_states_list_the_rejections() {
        let before = simulation(hero_at(2, Facing::Right), vec![]);
        let mut after = before.snapshot.clone();
        after.stats.turns += 1;
        after.room.hero.position.cell = 6;

        let transition = resolve_transition(
            &before.snapshot,
            &after,
            &PotionKnowledge::default(),
            &RoomHazards::new(),
            &EngineConfig::default(),
        )
        .unwrap()
        .unwrap();
        let Resolution::NoneFound(rejections) = transition.resolution else {
            panic!("no action teleports the hero");
        };
        assert!(!rejections.is_empty());
    }
}
