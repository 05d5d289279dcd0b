//! Potion identity inference.
//!
//! The save file lists held potions by an opaque per-type id. Which id stands
//! for which consumable is learned from pickups, drop counters and the effects
//! of drinking them. [`PotionKnowledge`] holds the candidate types per id,
//! [`PotionObservation`] is the potion-relevant slice of a snapshot, and
//! [`PotionKnowledge::potion_update`] turns two observations into the
//! [`PotionScenario`]s (what was sold, what was drunk) a transition allows.

mod knowledge;
mod observation;
mod scenario;
mod update;

pub use knowledge::PotionKnowledge;
pub use observation::PotionObservation;
pub use scenario::PotionScenario;

use crate::error::{ErrorSeverity, ShowdownError};
use crate::state::Pickup;

/// Potion bookkeeping that no scenario can explain.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PotionError {
    #[error("wrong number of certain drops: {certain} vs expected total {total}")]
    TooManyCertainDrops { certain: usize, total: i32 },

    #[error("selling potions is not allowed at this time, yet {sold} were sold")]
    SellingNotAllowed { sold: i32 },

    #[error("{count} potions appeared without being picked up")]
    UnexplainedPotions { count: i32 },

    #[error("{lost} potions were lost but {certain} ids are certainly gone")]
    LossMismatch { lost: i32, certain: usize },

    #[error("wrong assumption made for id {id}: was {known}, is {claimed}")]
    Contradiction { id: i32, known: Pickup, claimed: Pickup },

    #[error("id {id} was already ruled out as {claimed}")]
    RuledOut { id: i32, claimed: Pickup },

    #[error("no potion type is left for id {id}")]
    NoTypeLeft { id: i32 },
}

impl ShowdownError for PotionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TooManyCertainDrops { .. }
            | Self::SellingNotAllowed { .. }
            | Self::UnexplainedPotions { .. }
            | Self::LossMismatch { .. } => ErrorSeverity::Validation,
            Self::Contradiction { .. } | Self::RuledOut { .. } | Self::NoTypeLeft { .. } => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyCertainDrops { .. } => "TOO_MANY_CERTAIN_DROPS",
            Self::SellingNotAllowed { .. } => "SELLING_NOT_ALLOWED",
            Self::UnexplainedPotions { .. } => "UNEXPLAINED_POTIONS",
            Self::LossMismatch { .. } => "LOSS_MISMATCH",
            Self::Contradiction { .. } => "POTION_CONTRADICTION",
            Self::RuledOut { .. } => "POTION_RULED_OUT",
            Self::NoTypeLeft { .. } => "NO_POTION_TYPE_LEFT",
        }
    }
}
