//! Common error infrastructure for showdown-core.
//!
//! This module provides the severity classification shared by every error type
//! in the crate, plus [`CoreError`], the fatal inconsistencies that stop a run.
//! Branch-local failures live next to the code that produces them
//! ([`crate::engine::SimulationError`], [`crate::potions::PotionError`]) and a
//! failed comparison is a [`crate::matcher::Mismatch`] value, not an error.

use crate::catalog::WeaponKind;
use crate::potions::PotionError;

/// What a failure costs the follower.
///
/// Resolving a transition fans out into branches, so the ladder is measured
/// by how much of that work has to be thrown away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The branch is dropped; sibling hypotheses still run.
    Recoverable,
    /// The save pair cannot be explained as recorded. The transition is
    /// reported and skipped, and history carries over unchanged.
    Validation,
    /// The simulation disagrees with itself, like a queued tile missing from
    /// the deck. Following stops.
    Internal,
    /// Inferred history contradicts itself, like a potion id pinned twice.
    /// Nothing learned since the run started can be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Only the failing branch is lost.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// The transition can be skipped without stopping the run.
    pub const fn skips_transition(&self) -> bool {
        matches!(self, Self::Validation)
    }

    /// Following cannot continue.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Classification shared by the engine and potion bookkeeping errors.
pub trait ShowdownError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable `SCREAMING_SNAKE` code for log fields.
    fn error_code(&self) -> &'static str;
}

/// Inconsistencies between the simulation and the observed run.
///
/// Any of these aborts the whole transition, not a single branch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("could not find the tile corresponding to {weapon} in the deck")]
    DeckSlotNotFound { weapon: String },

    #[error("could not find the boss in a boss room")]
    BossMissing,

    #[error("{kind} cannot execute a signature move")]
    EnemySignatureMove { kind: String },

    #[error("could not find a thorns weapon in the deck")]
    ThornsWeaponMissing,

    #[error("{weapon} cannot be resolved against an absent attacker")]
    MissingAttacker { weapon: WeaponKind },

    #[error(transparent)]
    Potion(#[from] PotionError),
}

impl ShowdownError for CoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DeckSlotNotFound { .. } | Self::BossMissing | Self::MissingAttacker { .. } => {
                ErrorSeverity::Internal
            }
            Self::EnemySignatureMove { .. } | Self::ThornsWeaponMissing => ErrorSeverity::Validation,
            Self::Potion(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DeckSlotNotFound { .. } => "DECK_SLOT_NOT_FOUND",
            Self::BossMissing => "BOSS_MISSING",
            Self::EnemySignatureMove { .. } => "ENEMY_SIGNATURE_MOVE",
            Self::ThornsWeaponMissing => "THORNS_WEAPON_MISSING",
            Self::MissingAttacker { .. } => "MISSING_ATTACKER",
            Self::Potion(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(ErrorSeverity::Validation.skips_transition());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(!ErrorSeverity::Fatal.skips_transition());
        assert_eq!(CoreError::BossMissing.severity(), ErrorSeverity::Internal);
        assert_eq!(CoreError::BossMissing.error_code(), "BOSS_MISSING");
    }

    #[test]
    fn deck_slot_message_names_the_weapon() {
        let err = CoreError::DeckSlotNotFound {
            weapon: "Katana (2, 3)".into(),
        };
        assert_eq!(
            err.to_string(),
            "could not find the tile corresponding to Katana (2, 3) in the deck"
        );
    }
}
