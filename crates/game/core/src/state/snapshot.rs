//! One observed save-file state.

use super::phase::GamePhase;
use super::reward::RewardRoom;
use super::room::BattleRoom;
use super::shop::ShopRoom;
use super::skills::{SkillKind, Skills};
use super::stats::GameStats;
use crate::catalog::Weapon;
use crate::config::EngineConfig;
use crate::error::CoreError;

/// Everything the engine reads from one save write.
///
/// Snapshots are built once and never mutated; simulations work on clones.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub skills: Skills,
    pub stats: GameStats,
    pub deck: Vec<Weapon>,
    /// Held potion instance ids. Simulations use `-1`/`-2` for potions picked
    /// up with a known/unknown type.
    pub potions: Vec<i32>,
    pub phase: GamePhase,
    /// Map location id the hero stands on.
    pub location: String,
    pub room: BattleRoom,
    pub shop: Option<ShopRoom>,
    pub reward: Option<RewardRoom>,
}

impl Snapshot {
    /// Placeholder id of a picked-up potion whose type is known.
    pub const TYPED_PLACEHOLDER: i32 = -1;
    /// Placeholder id of a picked-up potion whose type is unknown.
    pub const UNTYPED_PLACEHOLDER: i32 = -2;

    pub fn new(room: BattleRoom) -> Self {
        let location = room
            .room
            .map(|kind| kind.location_id().to_string())
            .unwrap_or_default();
        Self {
            skills: Skills::new(),
            stats: GameStats::default(),
            deck: Vec::new(),
            potions: Vec::new(),
            phase: GamePhase::Battle,
            location,
            room,
            shop: None,
            reward: None,
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Vec<Weapon>) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_skills(mut self, skills: Skills) -> Self {
        self.skills = skills;
        self
    }

    #[must_use]
    pub fn with_potions(mut self, potions: Vec<i32>) -> Self {
        self.potions = potions;
        self
    }

    /// Display name of wherever the hero currently is.
    pub fn room_name(&self, splits: bool) -> Result<String, CoreError> {
        match self.phase {
            GamePhase::Battle => self.room.name(false, splits),
            GamePhase::BattleRewards => self.room.name(true, splits),
            GamePhase::Shop => Ok(self
                .shop
                .as_ref()
                .map_or("Unknown shop", |shop| shop.location.display_name())
                .to_string()),
            GamePhase::MapJourney => Ok("Map".into()),
        }
    }

    /// Potions the hero can hold at once.
    pub fn potion_capacity(&self, config: &EngineConfig) -> usize {
        if self.skills.has(SkillKind::BigPockets) {
            config.potion_capacity + config.big_pockets_bonus
        } else {
            config.potion_capacity
        }
    }

    /// Potions can be sold in shops, and in battle with Rogue Retail.
    pub fn selling_allowed(&self) -> bool {
        self.phase == GamePhase::Shop || self.skills.has(SkillKind::RogueRetail)
    }

    /// Copies of `weapon` in the deck.
    pub fn deck_copies(&self, weapon: &Weapon) -> usize {
        self.deck.iter().filter(|tile| *tile == weapon).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::entity::{Entity, Facing, Hp, Position};
    use crate::state::room::RoomKind;
    use crate::state::roster::HeroKind;

    fn snapshot() -> Snapshot {
        let hero = Entity::hero(HeroKind::Wanderer, Position::new(2, Facing::Right), Hp::full(5));
        Snapshot::new(BattleRoom::new(Some(RoomKind::BambooGrove), 0, 0, hero))
    }

    #[test]
    fn capacity_grows_with_big_pockets() {
        let config = EngineConfig::default();
        let plain = snapshot();
        assert_eq!(plain.potion_capacity(&config), 3);
        let pockets = plain.with_skills(Skills::new().with(SkillKind::BigPockets, 1));
        assert_eq!(pockets.potion_capacity(&config), 4);
    }

    #[test]
    fn names_follow_the_phase() {
        let mut snapshot = snapshot();
        assert_eq!(snapshot.location, "green-combat-1");
        assert_eq!(snapshot.room_name(true).as_deref(), Ok("Bamboo Grove, battle #1"));
        snapshot.phase = GamePhase::MapJourney;
        assert_eq!(snapshot.room_name(false).as_deref(), Ok("Map"));
    }

    #[test]
    fn selling_needs_a_shop_or_rogue_retail() {
        let mut snapshot = snapshot();
        assert!(!snapshot.selling_allowed());
        snapshot.phase = GamePhase::Shop;
        assert!(snapshot.selling_allowed());
    }
}
