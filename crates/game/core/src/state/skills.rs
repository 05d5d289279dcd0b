use std::collections::BTreeMap;

/// Passive skills the hero can own, keyed by save code.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum SkillKind {
    #[strum(to_string = "Back Stabber")]
    BackStabber = 1001,
    #[strum(to_string = "Unfriendly Fire")]
    UnfriendlyFire = 1003,
    #[strum(to_string = "Sniper")]
    Sniper = 1004,
    #[strum(to_string = "Monomancer")]
    Monomancer = 1006,
    #[strum(to_string = "Close Combat")]
    CloseCombat = 1007,
    #[strum(to_string = "Central Dominion")]
    CentralDominion = 1008,
    #[strum(to_string = "Combo Coin")]
    ComboCoin = 2001,
    #[strum(to_string = "Triple-Combo Heal")]
    TripleComboHeal = 2002,
    #[strum(to_string = "Combo Curse")]
    ComboCurse = 2004,
    #[strum(to_string = "Combo Deal")]
    ComboDeal = 2005,
    #[strum(to_string = "Kobushi Combo")]
    KobushiCombo = 2006,
    #[strum(to_string = "Combo Boon")]
    ComboBoon = 2007,
    #[strum(to_string = "Chilling Combo")]
    ChillingCombo = 2008,
    #[strum(to_string = "Healthy")]
    Healthy = 3001,
    #[strum(to_string = "Reactive Shield")]
    ReactiveShield = 3003,
    #[strum(to_string = "Karma")]
    Karma = 3005,
    #[strum(to_string = "Chilling Blood")]
    ChillingBlood = 3007,
    #[strum(to_string = "Iron Skin")]
    IronSkin = 3008,
    #[strum(to_string = "Quick Recovery")]
    QuickRecovery = 4002,
    #[strum(to_string = "Damaging Move")]
    DamagingMove = 4003,
    #[strum(to_string = "Dynamic Boost")]
    DynamicBoost = 4005,
    #[strum(to_string = "Cursing Move")]
    CursingMove = 4006,
    #[strum(to_string = "Two-Faced Danger")]
    TwoFacedDanger = 4009,
    #[strum(to_string = "Fenghuang's Feather")]
    FenghuangsFeather = 5001,
    #[strum(to_string = "Big Pockets")]
    BigPockets = 9002,
    #[strum(to_string = "Rogue Retail")]
    RogueRetail = 9003,
    #[strum(to_string = "Mindfulness")]
    Mindfulness = -3,
    #[strum(to_string = "Odd Curse")]
    OddCurse = -11,
    #[strum(to_string = "Combo Recharge")]
    ComboRecharge = -13,
    #[strum(to_string = "Fortress")]
    Fortress = -21,
    #[strum(to_string = "Shield Retention")]
    ShieldRetention = -23,
    #[strum(to_string = "Overflow Guard")]
    OverflowGuard = -27,
    #[strum(to_string = "Two-Way Move")]
    TwoWayMove = -28,
    #[strum(to_string = "Chikara Crush")]
    ChikaraCrush = -33,
    #[strum(to_string = "Mamushi Move")]
    MamushiMove = -34,
    #[strum(to_string = "Seiryu's Scale")]
    SeiryusScale = -37,
}

impl SkillKind {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }

    /// Full shop price, `None` for skills the shops never sell.
    pub const fn price(self) -> Option<i32> {
        match self {
            Self::UnfriendlyFire | Self::BigPockets | Self::CentralDominion | Self::Karma | Self::RogueRetail => {
                Some(10)
            }
            Self::ComboCoin
            | Self::ComboCurse
            | Self::QuickRecovery
            | Self::CursingMove
            | Self::DamagingMove
            | Self::KobushiCombo
            | Self::ShieldRetention
            | Self::Healthy
            | Self::BackStabber
            | Self::Sniper => Some(15),
            Self::IronSkin
            | Self::TripleComboHeal
            | Self::Mindfulness
            | Self::MamushiMove
            | Self::ComboRecharge
            | Self::CloseCombat => Some(20),
            _ => None,
        }
    }
}

/// Owned skills with their levels.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skills(pub BTreeMap<SkillKind, i32>);

impl Skills {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, skill: SkillKind, level: i32) -> Self {
        self.0.insert(skill, level);
        self
    }

    pub fn has(&self, skill: SkillKind) -> bool {
        self.0.contains_key(&skill)
    }

    pub fn level(&self, skill: SkillKind) -> Option<i32> {
        self.0.get(&skill).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillKind, i32)> + '_ {
        self.0.iter().map(|(skill, level)| (*skill, *level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_prices() {
        let skills = Skills::new().with(SkillKind::Mindfulness, 1);
        assert!(skills.has(SkillKind::Mindfulness));
        assert_eq!(skills.level(SkillKind::TwoWayMove), None);
        assert_eq!(SkillKind::Mindfulness.price(), Some(20));
        assert_eq!(SkillKind::SeiryusScale.price(), None);
    }
}
