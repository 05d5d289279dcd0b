use std::collections::BTreeMap;

/// Items lying on the board and the consumables they turn into.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::FromRepr, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum Pickup {
    /// Placeholder for a drop whose type is not known yet.
    #[strum(to_string = "Any")]
    Any = -1,
    #[strum(to_string = "Gold")]
    Gold = 0,
    #[strum(to_string = "Edamame Brew")]
    EdamameBrew = 100,
    #[strum(to_string = "Cool Up")]
    CoolUp = 101,
    #[strum(to_string = "Kami Brew")]
    KamiBrew = 102,
    #[strum(to_string = "Lucky Die")]
    LuckyDie = 103,
    #[strum(to_string = "Mass Curse")]
    MassCurse = 200,
    #[strum(to_string = "Mass Ice")]
    MassIce = 201,
    #[strum(to_string = "Mass Poison")]
    MassPoison = 202,
    #[strum(to_string = "Rain of Mirrors")]
    RainOfMirrors = 204,
}

/// Drop counters the run statistics keep, one per consumable family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropFamily {
    Scroll,
    Potion,
    Heal,
}

impl Pickup {
    /// Every type a potion id can stand for.
    pub const CONSUMABLES: [Self; 8] = [
        Self::EdamameBrew,
        Self::CoolUp,
        Self::KamiBrew,
        Self::LuckyDie,
        Self::MassCurse,
        Self::MassIce,
        Self::MassPoison,
        Self::RainOfMirrors,
    ];

    pub const SCROLLS: [Self; 4] = [Self::MassCurse, Self::MassIce, Self::MassPoison, Self::RainOfMirrors];

    pub const POTIONS: [Self; 3] = [Self::CoolUp, Self::KamiBrew, Self::LuckyDie];

    pub const fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::from_repr(code)
    }

    pub const fn is_consumable(self) -> bool {
        !matches!(self, Self::Any | Self::Gold)
    }

    pub const fn family(self) -> Option<DropFamily> {
        match self {
            Self::MassCurse | Self::MassIce | Self::MassPoison | Self::RainOfMirrors => Some(DropFamily::Scroll),
            Self::CoolUp | Self::KamiBrew | Self::LuckyDie => Some(DropFamily::Potion),
            Self::EdamameBrew => Some(DropFamily::Heal),
            Self::Any | Self::Gold => None,
        }
    }
}

/// `cell -> kind -> count`, ordered so snapshots compare structurally.
pub type PickupMap = BTreeMap<i32, BTreeMap<Pickup, i32>>;

/// Total count of one pickup kind across the board.
pub fn count_of(pickups: &PickupMap, kind: Pickup) -> i32 {
    pickups.values().filter_map(|cell| cell.get(&kind)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_partition_consumables() {
        let scrolls = Pickup::CONSUMABLES
            .iter()
            .filter(|kind| kind.family() == Some(DropFamily::Scroll))
            .count();
        assert_eq!(scrolls, Pickup::SCROLLS.len());
        assert_eq!(Pickup::Gold.family(), None);
        assert!(!Pickup::Any.is_consumable());
    }

    #[test]
    fn counts_across_cells() {
        let mut pickups = PickupMap::new();
        pickups.entry(1).or_default().insert(Pickup::Gold, 2);
        pickups.entry(4).or_default().insert(Pickup::Gold, 1);
        pickups.entry(4).or_default().insert(Pickup::CoolUp, 1);
        assert_eq!(count_of(&pickups, Pickup::Gold), 3);
        assert_eq!(count_of(&pickups, Pickup::MassIce), 0);
    }
}
