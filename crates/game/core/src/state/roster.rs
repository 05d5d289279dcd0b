//! Hero archetypes, enemy kinds, elite modifiers and declared enemy actions.

/// Playable archetype; decides the signature move.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum HeroKind {
    #[strum(to_string = "The Wanderer")]
    Wanderer = 0,
    #[strum(to_string = "The Ronin")]
    Ronin = -1,
    #[strum(to_string = "The Shadow")]
    Shadow = -2,
    #[strum(to_string = "The Jujitsuka")]
    Jujitsuka = 3,
    #[strum(to_string = "The Chain Master")]
    ChainMaster = 4,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum EnemyKind {
    #[strum(to_string = "Ashigaru Archer")]
    AshigaruArcher = 0,
    #[strum(to_string = "Spike Charger")]
    SpikeCharger = 1,
    #[strum(to_string = "Grappler")]
    Grappler = 2,
    #[strum(to_string = "Shinobi")]
    Shinobi = 3,
    #[strum(to_string = "Guardian")]
    Guardian = 4,
    #[strum(to_string = "Shadow Charger")]
    ShadowCharger = 5,
    #[strum(to_string = "Yari Master")]
    YariMaster = 6,
    /// Summoner variant fighting next to the Statue.
    #[strum(to_string = "Summoner")]
    SummonerAlt = 7,
    #[strum(to_string = "Twin Tachi")]
    TwinTachi = 8,
    #[strum(to_string = "Ashigaru")]
    Ashigaru = 9,
    #[strum(to_string = "Summoner")]
    Summoner = 12,
    #[strum(to_string = "Grappler")]
    GrapplerAlt = 13,
    #[strum(to_string = "Yumi Sniper")]
    YumiSniper = 14,
    #[strum(to_string = "Barricade")]
    Barricade = 15,
    #[strum(to_string = "Strider")]
    Strider = 16,
    #[strum(to_string = "Blight Charger")]
    BlightCharger = 17,
    #[strum(to_string = "Warden")]
    Warden = 18,
    #[strum(to_string = "Kabukai")]
    Kabukai = 19,
    #[strum(to_string = "Thorns")]
    Thorns = 20,
    #[strum(to_string = "Swapper")]
    Swapper = 21,
    #[strum(to_string = "Corrupted Progeny")]
    CorruptedProgeny = 22,

    // ===== bosses =====
    #[strum(to_string = "Corrupted Daisuke")]
    Daisuke = 100,
    #[strum(to_string = "Kowa the Coward")]
    Kowa = 103,
    #[strum(to_string = "Baru the Barricader")]
    Baru = 104,
    #[strum(to_string = "The Statue")]
    TheStatue = 105,
    #[strum(to_string = "Ieiasu the Cruel")]
    Ieiasu = 106,
    #[strum(to_string = "Iwao the Impaler")]
    Iwao = 108,
    #[strum(to_string = "Nobunaga the Wicked")]
    Nobunaga = 109,
    #[strum(to_string = "Hideyoshi the Cunning")]
    Hideyoshi = 110,
    #[strum(to_string = "The A Twin")]
    TwinsA = 111,
    #[strum(to_string = "The B Twin")]
    TwinsB = 112,
    #[strum(to_string = "Fumiko the Fallen")]
    Fumiko = 113,
    #[strum(to_string = "Sato the Stagemaster")]
    Sato = 114,
    #[strum(to_string = "Rei the Ruthless")]
    Rei = 115,
    #[strum(to_string = "The Shogun")]
    TheShogun = 120,
    #[strum(to_string = "The Shogun")]
    TheShogunPhaseTwo = 121,
    #[strum(to_string = "Corrupted Soul")]
    CorruptedSoul = 122,
}

impl EnemyKind {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }

    pub const fn is_boss(self) -> bool {
        matches!(
            self,
            Self::Rei
                | Self::Daisuke
                | Self::Iwao
                | Self::Baru
                | Self::TwinsA
                | Self::TwinsB
                | Self::TheStatue
                | Self::Kowa
                | Self::Fumiko
                | Self::Sato
                | Self::Hideyoshi
                | Self::Nobunaga
                | Self::Ieiasu
                | Self::TheShogun
                | Self::TheShogunPhaseTwo
        )
    }

    /// Moves to the last free cell instead of stepping one cell.
    pub const fn is_strider(self) -> bool {
        matches!(self, Self::Strider | Self::Fumiko)
    }

    /// Whether killing this kind extends a running combo.
    pub const fn extends_combo(self) -> bool {
        !matches!(self, Self::BlightCharger | Self::Thorns)
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum EliteKind {
    #[default]
    #[strum(to_string = "")]
    None = 0,
    #[strum(to_string = "Reactive Shield")]
    ReactiveShield = 1,
    #[strum(to_string = "Double Striker")]
    DoubleStriker = 2,
    #[strum(to_string = "Heavy")]
    Heavy = 3,
    #[strum(to_string = "Quick")]
    Quick = 4,
    #[strum(to_string = "Corrupted")]
    Corrupted = 5,
}

/// What an enemy declared it will do on the coming enemy turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::FromRepr, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum EnemyAction {
    #[default]
    Wait = 0,
    MoveLeft = 1,
    MoveRight = 2,
    ExecuteQueue = 3,
    ExpandQueue = 4,
    TurnAround = 5,
    TurnAroundBoss = 6,
}

impl EnemyAction {
    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Self::Wait => "waiting",
            Self::MoveLeft => "moving left",
            Self::MoveRight => "moving right",
            Self::ExecuteQueue => "about to execute",
            Self::ExpandQueue => "about to add to the attack queue",
            Self::TurnAround | Self::TurnAroundBoss => "turning around",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn enemy_codes_round_trip() {
        for kind in EnemyKind::iter() {
            assert_eq!(EnemyKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(EnemyKind::from_code(10), None);
    }

    #[test]
    fn boss_classification() {
        assert!(EnemyKind::TwinsB.is_boss());
        assert!(!EnemyKind::CorruptedSoul.is_boss());
        assert!(!EnemyKind::Warden.is_boss());
    }

    #[test]
    fn names() {
        assert_eq!(HeroKind::ChainMaster.to_string(), "The Chain Master");
        assert_eq!(EliteKind::None.to_string(), "");
        assert_eq!(EnemyKind::TheShogunPhaseTwo.to_string(), "The Shogun");
    }
}
