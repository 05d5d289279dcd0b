//! Combat rooms: identity, board geometry and the entities fighting in them.

use super::entity::{Entity, EntityId};
use super::pickup::PickupMap;
use super::roster::EnemyKind;
use crate::error::CoreError;

/// Combat locations, keyed by their map location id.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomKind {
    #[strum(serialize = "green-combat-1")]
    BambooGrove,
    #[strum(serialize = "brown-combat-1A")]
    WhisperingCaves,
    #[strum(serialize = "brown-combat-1B")]
    HibikuWastelands,
    #[strum(serialize = "brown-combat-2")]
    MoonlitPort,
    #[strum(serialize = "red-combat-1")]
    SpiritGateway,
    #[strum(serialize = "red-combat-2")]
    HotSprings,
    #[strum(serialize = "purple-combat-1")]
    ForsakenGrounds,
    #[strum(serialize = "purple-combat-2")]
    TheatreOfIllusions,
    #[strum(serialize = "white-combat-1")]
    Hideyoshi,
    #[strum(serialize = "gray-combat-1")]
    Nobunaga,
    #[strum(serialize = "darkGreen-combat-1")]
    Ieiasu,
    #[strum(serialize = "shogun-combat-1")]
    Shogun,
}

impl RoomKind {
    /// Map location id as written in the save file.
    pub fn location_id(self) -> &'static str {
        self.into()
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BambooGrove => "Bamboo Grove",
            Self::WhisperingCaves => "Whispering Caves",
            Self::HibikuWastelands => "Hibiku Wastelands",
            Self::MoonlitPort => "Moonlit Port",
            Self::SpiritGateway => "Spirit Gateway",
            Self::HotSprings => "Hot Springs",
            Self::ForsakenGrounds => "Forsaken Grounds",
            Self::TheatreOfIllusions => "Theatre of Illusions",
            Self::Hideyoshi => "Hideyoshi's Keep",
            Self::Nobunaga => "Nobunaga's Fortress",
            Self::Ieiasu => "Ieiasu's Gardens",
            Self::Shogun => "The Shogun's Castle",
        }
    }

    /// Sector number the corrupted-boss list refers to.
    pub const fn sector(self) -> i32 {
        self as i32
    }

    pub const fn boss_progression(self) -> i32 {
        match self {
            Self::BambooGrove | Self::WhisperingCaves | Self::HibikuWastelands => 4,
            Self::MoonlitPort
            | Self::SpiritGateway
            | Self::HotSprings
            | Self::ForsakenGrounds
            | Self::TheatreOfIllusions => 6,
            Self::Hideyoshi | Self::Nobunaga | Self::Ieiasu | Self::Shogun => 2,
        }
    }
}

/// Board width for a room at a given progression and variant.
///
/// Odd progressions are reward rooms and variant `-1` means no combat room; both
/// yield `-1`, as does any combination the game never produces. Moonlit Port's
/// shop stop reports `-2`.
pub fn board_size(room: RoomKind, progression: i32, variant: i32) -> i32 {
    if progression % 2 != 0 || variant == -1 {
        return -1;
    }
    match (room, progression, variant) {
        (RoomKind::BambooGrove, 0, 0) => 5,
        (RoomKind::BambooGrove, 2, 0) => 7,
        (RoomKind::BambooGrove, 4, 0) => 5,
        (RoomKind::BambooGrove, 4, 1) => 7,
        (RoomKind::WhisperingCaves, 0, 0) => 5,
        (RoomKind::WhisperingCaves, 2 | 4, 0) => 7,
        (RoomKind::HibikuWastelands, 0 | 4, 0) => 7,
        (RoomKind::HibikuWastelands, 2, 0) => 5,
        (RoomKind::MoonlitPort, 0 | 6, 0) => 7,
        (RoomKind::MoonlitPort, 2, 0) => 5,
        (RoomKind::MoonlitPort, 4, 0) => 9,
        (RoomKind::MoonlitPort, 8, 0) => -2,
        (RoomKind::SpiritGateway, 0 | 2 | 6, 0) => 7,
        (RoomKind::SpiritGateway, 4, 0) => 9,
        (RoomKind::HotSprings, 0 | 6, 0) => 7,
        (RoomKind::HotSprings, 2, 0) => 5,
        (RoomKind::HotSprings, 4, 0) => 9,
        (RoomKind::ForsakenGrounds, 0 | 4 | 6, 0) => 7,
        (RoomKind::ForsakenGrounds, 2, 0) => 9,
        (RoomKind::TheatreOfIllusions, 0, 0) => 7,
        (RoomKind::TheatreOfIllusions, 2, 0) => 5,
        (RoomKind::TheatreOfIllusions, 4, 0) => 9,
        (RoomKind::Hideyoshi | RoomKind::Nobunaga, 0 | 2, 0) => 7,
        (RoomKind::Ieiasu, 0, 0) => 7,
        (RoomKind::Ieiasu, 2, 0) => 9,
        (RoomKind::Shogun, 0, 0) => 9,
        (RoomKind::Shogun, 2, 0) => 7,
        _ => -1,
    }
}

/// The combat room of a snapshot, also present outside battles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleRoom {
    /// `None` when the hero stands on a non-combat location.
    pub room: Option<RoomKind>,
    pub progression: i32,
    pub variant: i32,
    /// Sectors whose boss is corrupted in this run.
    pub corrupted_sectors: Vec<i32>,
    pub board_size: i32,
    pub hero: Entity,
    pub enemies: Vec<Entity>,
    pub pickups: PickupMap,
    pub wave_number: i32,
    pub until_next_wave: i32,
}

impl BattleRoom {
    pub fn new(room: Option<RoomKind>, progression: i32, variant: i32, hero: Entity) -> Self {
        let board_size = room.map_or(-1, |room| board_size(room, progression, variant));
        Self {
            room,
            progression,
            variant,
            corrupted_sectors: Vec::new(),
            board_size,
            hero,
            enemies: Vec::new(),
            pickups: PickupMap::new(),
            wave_number: 0,
            until_next_wave: 0,
        }
    }

    #[must_use]
    pub fn with_enemies(mut self, enemies: Vec<Entity>) -> Self {
        self.enemies = enemies;
        self
    }

    pub fn is_boss_corrupted(&self) -> bool {
        self.room
            .is_some_and(|room| self.corrupted_sectors.contains(&room.sector()))
    }

    pub fn is_boss_room(&self) -> bool {
        self.room
            .is_some_and(|room| room.boss_progression() == self.progression)
    }

    /// The boss of a boss room.
    ///
    /// # Returns
    ///
    /// `Ok(None)` outside boss rooms, [`CoreError::BossMissing`] when a boss room
    /// has no boss left in its enemy list.
    pub fn the_boss(&self) -> Result<Option<&Entity>, CoreError> {
        if !self.is_boss_room() {
            return Ok(None);
        }
        self.enemies
            .iter()
            .find(|enemy| enemy.is_boss())
            .map(Some)
            .ok_or(CoreError::BossMissing)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if id.is_hero() {
            Some(&self.hero)
        } else {
            self.enemies.iter().find(|enemy| enemy.id == id)
        }
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if id.is_hero() {
            Some(&mut self.hero)
        } else {
            self.enemies.iter_mut().find(|enemy| enemy.id == id)
        }
    }

    /// Fresh id for an entity spawned mid-battle.
    pub fn allocate_id(&self) -> EntityId {
        let highest = self.enemies.iter().map(|enemy| enemy.id.0).max().unwrap_or(0);
        EntityId(highest + 1)
    }

    pub fn twin_a(&self) -> Option<EntityId> {
        self.enemies
            .iter()
            .find(|enemy| enemy.enemy_kind() == Some(EnemyKind::TwinsA))
            .map(|enemy| enemy.id)
    }

    /// Room display name.
    ///
    /// # Arguments
    ///
    /// * `reward` - name the reward screen after the battle
    /// * `splits` - drop the board size and boss name, as split tables do
    pub fn name(&self, reward: bool, splits: bool) -> Result<String, CoreError> {
        let Some(room) = self.room else {
            return Ok("Unknown room".into());
        };
        let mut room_name = room.display_name().to_string();
        if !splits {
            room_name = format!("{room_name}[{}]", self.board_size);
        }
        if let Some(boss) = self.the_boss()? {
            let boss_name = match boss.enemy_kind() {
                Some(kind) if self.is_boss_corrupted() => format!("Corrupted {kind}"),
                Some(kind) => kind.to_string(),
                None => "Unknown boss".to_string(),
            };
            return Ok(if reward {
                format!("{room_name}, boss battle ({boss_name}) rewards")
            } else if splits {
                format!("{room_name}, boss battle")
            } else {
                format!("{room_name}, boss battle ({boss_name})")
            });
        }
        Ok(if reward {
            format!("{room_name}, battle #{} rewards", (self.progression + 1) / 2)
        } else {
            format!("{room_name}, battle #{}", self.progression / 2 + 1)
        })
    }

    pub fn pretty_pickups(&self) -> String {
        self.pickups
            .iter()
            .map(|(cell, kinds)| {
                let kinds = kinds
                    .iter()
                    .map(|(kind, total)| format!("{kind}({total})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{cell}: {kinds}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
