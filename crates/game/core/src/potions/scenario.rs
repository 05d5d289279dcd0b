//! One explanation of where the missing potions went.

use std::collections::{BTreeMap, BTreeSet};

use sha2::{Digest, Sha256};

use crate::state::Pickup;

/// Potions sold and drunk during one transition, with the types assumed for
/// their ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PotionScenario {
    pub sold_ids: Vec<i32>,
    pub sold: Vec<Pickup>,
    pub used_ids: Vec<i32>,
    pub used: Vec<Pickup>,
    /// `id -> type` this scenario assumes.
    pub guesses: BTreeMap<i32, Pickup>,
}

impl PotionScenario {
    /// Nothing sold, nothing drunk.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(sold: &[(i32, Pickup)], used: &[(i32, Pickup)]) -> Self {
        let guesses = sold.iter().chain(used).copied().collect();
        Self {
            sold_ids: sold.iter().map(|(id, _)| *id).collect(),
            sold: sold.iter().map(|(_, kind)| *kind).collect(),
            used_ids: used.iter().map(|(id, _)| *id).collect(),
            used: used.iter().map(|(_, kind)| *kind).collect(),
            guesses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sold.is_empty() && self.used.is_empty()
    }

    /// `Sold X`, `Used Y` or `Sold X and used Y`; `None` when nothing happened.
    pub fn description(&self) -> Option<String> {
        let names = |kinds: &[Pickup]| kinds.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        match (self.sold.is_empty(), self.used.is_empty()) {
            (true, true) => None,
            (false, true) => Some(format!("Sold {}", names(&self.sold))),
            (true, false) => Some(format!("Used {}", names(&self.used))),
            (false, false) => Some(format!("Sold {} and used {}", names(&self.sold), names(&self.used))),
        }
    }

    /// Hex SHA-256 of the canonical `s<ids>u<ids>` form of a loss.
    pub fn loss_signature(sold_ids: &[i32], used_ids: &[i32]) -> String {
        signature(sold_ids.iter().copied(), used_ids.iter().copied())
    }

    /// Signature of the sold and used type sets, ignoring multiplicity and order.
    pub fn type_signature(&self) -> String {
        let sold: BTreeSet<i32> = self.sold.iter().map(|kind| kind.code()).collect();
        let used: BTreeSet<i32> = self.used.iter().map(|kind| kind.code()).collect();
        signature(sold, used)
    }
}

fn join(codes: impl IntoIterator<Item = i32>) -> String {
    codes.into_iter().map(|code| code.to_string()).collect::<Vec<_>>().join(",")
}

fn signature(sold: impl IntoIterator<Item = i32>, used: impl IntoIterator<Item = i32>) -> String {
    let canonical = format!("s{}u{}", join(sold), join(used));
    hex::encode(Sha256::digest(canonical.as_bytes()))
}
