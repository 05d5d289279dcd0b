//! Errors raised while simulating one branch.

use crate::catalog::WeaponKind;
use crate::error::{CoreError, ErrorSeverity, ShowdownError};

/// Failure of a single simulated branch.
///
/// [`SimulationError::Unsimulatable`] only drops the branch; a wrapped
/// [`CoreError`] aborts the whole transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimulationError {
    #[error("{weapon} has no simulated effect")]
    Unsimulatable { weapon: WeaponKind },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ShowdownError for SimulationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unsimulatable { .. } => ErrorSeverity::Recoverable,
            Self::Core(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unsimulatable { .. } => "UNSIMULATABLE_WEAPON",
            Self::Core(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsimulatable_weapons_only_drop_the_branch() {
        let err = SimulationError::Unsimulatable {
            weapon: WeaponKind::KillSummons,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "UNSIMULATABLE_WEAPON");

        let core: SimulationError = CoreError::BossMissing.into();
        assert_eq!(core.severity(), ErrorSeverity::Internal);
        assert_eq!(core.error_code(), "BOSS_MISSING");
    }
}
