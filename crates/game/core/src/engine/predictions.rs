//! What a simulated branch could not determine exactly.

use bitflags::bitflags;

use crate::catalog::Weapon;
use crate::potions::PotionScenario;

bitflags! {
    /// Observed values allowed to exceed their simulated counterparts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Relaxations: u8 {
        /// A kill may have dropped gold the simulation cannot see.
        const MORE_COINS = 1 << 0;
        /// A Two-Way Move free turn does not pass a turn.
        const MORE_TURN_AROUNDS = 1 << 1;
    }
}

/// Side information attached to a simulated branch for the matcher.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Predictions {
    /// Hero queues the observed one may equal; empty means "the simulated queue".
    pub attack_queues: Vec<Vec<Weapon>>,
    /// Hero decks the observed one may equal; empty means "the simulated deck".
    pub decks: Vec<Vec<Weapon>>,
    /// Set once the first non-boss kill of the branch has been seen.
    pub combo_started: bool,
    /// Enemies summoned during the branch that the board does not show.
    pub summons: i32,
    pub enemies_cleared: bool,
    /// Kills that may have dropped a potion.
    pub new_potions: i32,
    pub relaxations: Relaxations,
    /// Potions sold and drunk before the hero acted.
    pub scenario: PotionScenario,
}

impl Predictions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allows(&self, relaxation: Relaxations) -> bool {
        self.relaxations.contains(relaxation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxations_accumulate() {
        let mut predictions = Predictions::new();
        assert!(!predictions.allows(Relaxations::MORE_COINS));
        predictions.relaxations |= Relaxations::MORE_COINS;
        predictions.relaxations |= Relaxations::MORE_TURN_AROUNDS;
        assert!(predictions.allows(Relaxations::MORE_COINS | Relaxations::MORE_TURN_AROUNDS));
    }
}
