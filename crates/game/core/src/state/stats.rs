/// Run statistics the game keeps in its save file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStats {
    pub version: String,
    pub turn_arounds: i32,
    pub coins: i32,
    pub combos: i32,
    pub turns: i32,
    /// Elapsed run time in seconds.
    pub time: i64,
    pub combat_rooms_cleared: i32,
    pub scroll_pickups: i32,
    pub potion_pickups: i32,
    pub heal_pickups: i32,
    pub friendly_kills: i32,
    pub hits: i32,
    /// Run number, one per in-game day.
    pub day: i32,
    pub consumables_used: i32,
    pub new_tiles_picked: i32,
}

impl GameStats {
    /// All consumable drops counted so far.
    pub const fn total_drops(&self) -> i32 {
        self.scroll_pickups + self.potion_pickups + self.heal_pickups
    }
}
