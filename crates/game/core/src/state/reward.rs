use super::shop::Upgrade;
use crate::catalog::Weapon;

/// Reward screen after a won battle: either new tiles or one upgrade.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardRoom {
    pub reroll_price: i32,
    pub exhausted: bool,
    pub tiles: Vec<Weapon>,
    /// Upgrade code on offer, `0` when tiles are offered instead.
    pub upgrade: i32,
}

impl RewardRoom {
    pub fn describe(&self) -> String {
        if self.upgrade == 0 {
            self.tiles.iter().map(Weapon::pretty).collect::<Vec<_>>().join(" or ")
        } else {
            format!("Upgrade {}", Upgrade::describe(self.upgrade))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_upgrade_offers() {
        let reward = RewardRoom {
            upgrade: Upgrade::Poison.code(),
            ..RewardRoom::default()
        };
        assert_eq!(reward.describe(), "Upgrade Poison");
    }
}
