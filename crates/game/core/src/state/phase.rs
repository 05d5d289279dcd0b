#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::FromRepr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum GamePhase {
    #[default]
    #[strum(to_string = "battle")]
    Battle = 0,
    #[strum(to_string = "battle rewards")]
    BattleRewards = 1,
    #[strum(to_string = "map journey")]
    MapJourney = 2,
    #[strum(to_string = "shop")]
    Shop = 3,
}
