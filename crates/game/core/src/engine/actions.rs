//! Hero actions a transition may hide, and how each one is simulated.

use core::fmt;

use super::errors::SimulationError;
use super::predictions::Relaxations;
use super::queues::{candidate_decks, idle_queues, possible_attack_queues, queues_with_new_weapon};
use super::simulation::Simulation;
use crate::catalog::Weapon;
use crate::combat::Striker;
use crate::state::{EntityId, HeroKind, SkillKind, Snapshot};

/// One hypothesis about what the hero did between two saves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroAction {
    MoveRight,
    MoveLeft,
    TurnAround,
    Wait,
    SignatureMove,
    ExecuteQueue(Vec<Weapon>),
    AddToQueue(Weapon),
    /// A free Two-Way Move turn, then the inner action.
    TurnedThen(Box<HeroAction>),
    /// An even number of free turns, then the inner action. Facing is kept
    /// and the turn-around counter is only known to be at least two higher.
    TurnedTwiceThen(Box<HeroAction>),
}

impl HeroAction {
    fn verb(&self) -> String {
        match self {
            Self::MoveRight => "moved right".into(),
            Self::MoveLeft => "moved left".into(),
            Self::TurnAround => "turned around".into(),
            Self::Wait => "waited a turn".into(),
            Self::SignatureMove => "executed their signature move".into(),
            Self::ExecuteQueue(_) => "executed the queue".into(),
            Self::AddToQueue(weapon) => format!("added {} to the queue", weapon.pretty()),
            Self::TurnedThen(inner) => format!("turned around and {}", inner.verb()),
            Self::TurnedTwiceThen(inner) => format!("turned around twice and {}", inner.verb()),
        }
    }

    /// Every action worth simulating from `snapshot`.
    ///
    /// Execute branches come one per candidate queue, the current queue first.
    /// Add branches come one per distinct deck tile the queue can still take.
    /// With Two-Way Move, every turn-taking action also gets a variant that
    /// turns around for free first, and one that turns back and forth before
    /// acting.
    pub fn candidates(snapshot: &Snapshot, max_queue_length: usize) -> Vec<HeroAction> {
        let queue = &snapshot.room.hero.attack_queue;
        let deck = &snapshot.deck;

        let mut executions: Vec<Vec<Weapon>> = Vec::new();
        if !queue.is_empty() {
            executions.push(queue.clone());
        }
        for candidate in possible_attack_queues(queue, deck, max_queue_length) {
            if !executions.contains(&candidate) {
                executions.push(candidate);
            }
        }

        let mut additions: Vec<Weapon> = Vec::new();
        for weapon in deck.iter().filter(|weapon| !weapon.is_immediate()) {
            let queued = queue.iter().filter(|tile| *tile == weapon).count();
            if queued < snapshot.deck_copies(weapon) && !additions.contains(weapon) {
                additions.push(weapon.clone());
            }
        }

        let mut turning = vec![Self::MoveRight, Self::MoveLeft, Self::Wait, Self::SignatureMove];
        turning.extend(executions.into_iter().map(Self::ExecuteQueue));

        let mut actions = turning.clone();
        actions.insert(2, Self::TurnAround);
        actions.extend(additions.into_iter().map(Self::AddToQueue));
        if snapshot.skills.has(SkillKind::TwoWayMove) {
            actions.extend(turning.iter().cloned().map(|action| Self::TurnedThen(Box::new(action))));
            actions.extend(turning.into_iter().map(|action| Self::TurnedTwiceThen(Box::new(action))));
        }
        actions
    }
}

impl fmt::Display for HeroAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hero has {}", self.verb())
    }
}

impl Simulation {
    /// Simulates `action` on a copy of this simulation.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the action is impossible from this state, such as a
    /// move into an occupied cell or a signature move without a target.
    pub fn branch(&self, action: &HeroAction) -> Result<Option<Simulation>, SimulationError> {
        let mut branch = self.clone();
        if !branch.apply_action(action)? {
            return Ok(None);
        }
        branch.trace.note(action.to_string());
        Ok(Some(branch))
    }

    fn apply_action(&mut self, action: &HeroAction) -> Result<bool, SimulationError> {
        match action {
            HeroAction::MoveRight => Ok(self.hero_move(1)),
            HeroAction::MoveLeft => Ok(self.hero_move(-1)),
            HeroAction::TurnAround => {
                self.passing_turn(false);
                self.turn_entity(EntityId::HERO);
                self.predictions.attack_queues = self.idle_queues();
                Ok(true)
            }
            HeroAction::Wait => {
                self.passing_turn(false);
                if self.snapshot.skills.has(SkillKind::Mindfulness) {
                    if let Some(data) = self.snapshot.room.hero.hero_mut() {
                        data.special_cooldown += 1;
                    }
                    self.snapshot.deck.iter_mut().for_each(Weapon::recharge);
                }
                self.predictions.attack_queues = self.idle_queues();
                Ok(true)
            }
            HeroAction::SignatureMove => {
                if !self.can_execute_signature(false) {
                    return Ok(false);
                }
                self.execute_signature(false)?;
                if let Some(data) = self.snapshot.room.hero.hero_mut() {
                    data.special_cooldown = 0;
                }
                self.passing_turn(false);
                self.predictions.attack_queues = self.idle_queues();
                Ok(true)
            }
            HeroAction::ExecuteQueue(queue) => {
                self.execute_queue(queue)?;
                Ok(true)
            }
            HeroAction::AddToQueue(weapon) => {
                self.passing_turn(false);
                let hero_queue = &self.snapshot.room.hero.attack_queue;
                self.predictions.attack_queues = queues_with_new_weapon(
                    hero_queue,
                    &self.snapshot.deck,
                    weapon,
                    self.config.max_added_combination,
                );
                Ok(true)
            }
            HeroAction::TurnedThen(inner) => {
                self.turn_entity(EntityId::HERO);
                self.predictions.relaxations |= Relaxations::MORE_TURN_AROUNDS;
                self.apply_action(inner)
            }
            HeroAction::TurnedTwiceThen(inner) => {
                self.turn_entity(EntityId::HERO);
                self.turn_entity(EntityId::HERO);
                self.predictions.relaxations |= Relaxations::MORE_TURN_AROUNDS;
                self.apply_action(inner)
            }
        }
    }

    fn idle_queues(&self) -> Vec<Vec<Weapon>> {
        idle_queues(&self.snapshot.room.hero.attack_queue, &self.snapshot.deck)
    }

    /// One step, or for the Shadow a dash to the last free cell.
    fn hero_move(&mut self, direction: i32) -> bool {
        let room = &self.snapshot.room;
        let cell = room.hero.position.cell;
        let shadow = room.hero.hero_data().is_some_and(|data| data.kind == HeroKind::Shadow);
        let target = if shadow {
            room.last_free_space(cell, direction)
        } else {
            cell + direction
        };
        if !room.is_legal(target) || room.is_occupied(target) {
            return false;
        }
        self.simulate_move(EntityId::HERO, target, shadow);
        self.passing_turn(false);
        self.predictions.attack_queues = self.idle_queues();
        true
    }

    /// Executes `queue` tile by tile and lists the decks it can leave behind.
    fn execute_queue(&mut self, queue: &[Weapon]) -> Result<(), SimulationError> {
        let previous_hero_cell = self.hero_cell();
        let hero = Striker::hero();
        let mut executed = queue.to_vec();
        for weapon in &mut executed {
            self.execute_weapon(&hero, weapon, previous_hero_cell)?;
        }
        self.predictions.decks = candidate_decks(&self.snapshot.deck, &executed)?;
        self.snapshot.room.hero.attack_queue.clear();
        self.passing_turn(true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::simulation::fixtures::*;
    use super::*;
    use crate::catalog::WeaponKind;
    use crate::state::{EnemyKind, Facing, Skills};

    #[test]
    fn descriptions_read_as_sentences() {
        assert_eq!(HeroAction::MoveRight.to_string(), "Hero has moved right");
        assert_eq!(
            HeroAction::TurnedThen(Box::new(HeroAction::ExecuteQueue(vec![]))).to_string(),
            "Hero has turned around and executed the queue"
        );
        let katana = Weapon::new(WeaponKind::Katana, 2, 3);
        assert_eq!(
            HeroAction::AddToQueue(katana.clone()).to_string(),
            format!("Hero has added {} to the queue", katana.pretty())
        );
    }

    #[test]
    fn moving_into_an_enemy_is_impossible() {
        let sim = simulation(hero_at(2, Facing::Right), vec![enemy_at(1, EnemyKind::Ashigaru, 3, 2)]);
        assert!(sim.branch(&HeroAction::MoveRight).unwrap().is_none());
        let moved = sim.branch(&HeroAction::MoveLeft).unwrap();
        assert_eq!(moved.map(|branch| branch.hero_cell()), Some(1));
    }

    #[test]
    fn waiting_at_the_edge_passes_a_turn() {
        let sim = simulation(hero_at(0, Facing::Right), vec![]);
        assert!(sim.branch(&HeroAction::MoveLeft).unwrap().is_none());
        let waited = sim.branch(&HeroAction::Wait).unwrap();
        assert_eq!(waited.map(|branch| branch.snapshot.stats.turns), Some(1));
    }

    #[test]
    fn executing_spends_the_tiles_and_clears_the_queue() {
        let katana = Weapon::new(WeaponKind::Katana, 2, 3);
        let mut hero = hero_at(2, Facing::Right);
        hero.attack_queue = vec![katana.clone()];
        let mut sim = simulation(hero, vec![enemy_at(1, EnemyKind::Ashigaru, 3, 5)]);
        sim.snapshot.deck = vec![katana.clone()];
        let executed = sim.branch(&HeroAction::ExecuteQueue(vec![katana])).unwrap();
        let Some(executed) = executed else {
            panic!("executing a queue is always possible");
        };
        assert!(executed.snapshot.room.hero.attack_queue.is_empty());
        assert_eq!(executed.predictions.decks.len(), 1);
        assert_eq!(executed.predictions.decks[0][0].cooldown_charge, 0);
        assert_eq!(executed.snapshot.room.enemies[0].hp.hp, 2);
    }

    #[test]
    fn two_way_move_adds_free_turn_variants() {
        let plain = simulation(hero_at(2, Facing::Right), vec![]).snapshot;
        let skilled = plain.clone().with_skills(Skills::new().with(SkillKind::TwoWayMove, 1));
        let without = HeroAction::candidates(&plain, 3);
        let with = HeroAction::candidates(&skilled, 3);
        assert_eq!(with.len(), without.len() + 8);
        assert!(with.contains(&HeroAction::TurnedThen(Box::new(HeroAction::Wait))));
        assert!(with.contains(&HeroAction::TurnedTwiceThen(Box::new(HeroAction::Wait))));
    }

    #[test]
    fn free_turns_relax_the_turn_counter() {
        let sim = simulation(hero_at(2, Facing::Right), vec![]);
        let action = HeroAction::TurnedThen(Box::new(HeroAction::Wait));
        let Some(branch) = sim.branch(&action).unwrap() else {
            panic!("waiting is always possible");
        };
        assert_eq!(branch.snapshot.room.hero.position.facing, Facing::Left);
        assert!(branch.predictions.allows(Relaxations::MORE_TURN_AROUNDS));
    }

    #[test]
    fn turning_back_and_forth_keeps_the_facing() {
        let sim = simulation(hero_at(2, Facing::Right), vec![]);
        let action = HeroAction::TurnedTwiceThen(Box::new(HeroAction::Wait));
        assert_eq!(action.to_string(), "Hero has turned around twice and waited a turn");
        let Some(branch) = sim.branch(&action).unwrap() else {
            panic!("waiting is always possible");
        };
        assert_eq!(branch.snapshot.room.hero.position.facing, Facing::Right);
        assert_eq!(branch.snapshot.stats.turn_arounds, 2);
        assert!(branch.predictions.allows(Relaxations::MORE_TURN_AROUNDS));
    }
}
