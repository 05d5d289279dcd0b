//! Raw shape of the save file's JSON payload.
//!
//! Field names follow the game's keys. Sections the game omits outside their
//! phase default to empty values.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSave {
    pub version: String,
    pub run_stats: RawRunStats,
    #[serde(default)]
    pub skills: Vec<i32>,
    #[serde(default)]
    pub skills_level: Vec<i32>,
    #[serde(default)]
    pub deck: Vec<RawTile>,
    #[serde(default)]
    pub potions: Vec<i32>,
    #[serde(default)]
    pub pickups: Vec<i32>,
    #[serde(default)]
    pub pickups_cell_index: Vec<i32>,
    #[serde(default)]
    pub map_selection_in_progress: bool,
    pub progression_save_data: RawProgression,
    pub map_save_data: RawMapSave,
    #[serde(default)]
    pub combat_room: Option<RawCombatRoom>,
    #[serde(default)]
    pub hero: RawHero,
    #[serde(default)]
    pub reward_room: RawRewardRoom,
    #[serde(default)]
    pub shop_room: RawShopRoom,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRunStats {
    #[serde(rename = "nTurnArounds", default)]
    pub turn_arounds: i32,
    #[serde(default)]
    pub coins: i32,
    #[serde(default)]
    pub combos: i32,
    pub turns: i32,
    pub time: i64,
    #[serde(rename = "numberOfCombatRoomsCleared")]
    pub combat_rooms_cleared: i32,
    #[serde(rename = "nScrollsPickupDrops")]
    pub scroll_pickups: i32,
    #[serde(rename = "nPotionsPickupDrops")]
    pub potion_pickups: i32,
    #[serde(rename = "nHealPickupDrops")]
    pub heal_pickups: i32,
    #[serde(rename = "friendlyKills")]
    pub friendly_kills: i32,
    pub hits: i32,
    pub day: i32,
    #[serde(rename = "consumablesUsed")]
    pub consumables_used: i32,
    #[serde(rename = "newTilesPicked")]
    pub new_tiles_picked: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProgression {
    pub progression: i32,
    pub room_variant: i32,
    #[serde(default)]
    pub corrupted_boss_sectors: Vec<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMapSave {
    #[serde(rename = "currentMapLocationID")]
    pub current_location: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCombatRoom {
    #[serde(default)]
    pub enemies: Vec<RawEnemy>,
    pub wave_number: i32,
    pub until_next_wave: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEntityState {
    pub shield: bool,
    pub curse: bool,
    pub ice: i32,
    pub poison: i32,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawHero {
    pub hero_enum: i32,
    pub entity_state: RawEntityState,
    pub facing: i32,
    pub cell: i32,
    pub attack_queue: Vec<RawTile>,
    pub special_move_cooldown: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawEnemy {
    pub enemy_enum: i32,
    pub entity_state: RawEntityState,
    pub facing: i32,
    pub cell: i32,
    pub attack_queue: Vec<RawTile>,
    pub action: i32,
    pub previous_action: i32,
    /// `-1` when no tile is announced.
    pub tile_to_play: i32,
    pub enemy_tile_effect: i32,
    pub first_turn: bool,
    pub elite_type: i32,
    pub pattern_index: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTile {
    pub weapon_type: i32,
    pub cooldown: i32,
    pub cooldown_charge: i32,
    pub strength: i32,
    pub base_strength: i32,
    pub level: i32,
    pub max_level: i32,
    /// `0` for none.
    #[serde(default)]
    pub attack_effect: i32,
    /// `0` for none.
    #[serde(default)]
    pub tile_effect: i32,
}

/// Offer shared by the reward screen and the shop's upgrade stall.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReward {
    pub in_progress: bool,
    pub exhausted: bool,
    pub tile_rewards: Vec<RawTile>,
    pub tile_upgrade: i32,
    pub price: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawRewardRoom {
    pub reward: RawReward,
    pub reroll_price: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShopData {
    pub shop_item_names: Vec<String>,
    pub shop_items_sale: Vec<bool>,
    pub already_upgraded: bool,
    pub free_potion: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawShopRoom {
    pub reward: RawReward,
    pub shop_data: RawShopData,
    pub left_shop_type: String,
    pub right_shop_type: String,
}
