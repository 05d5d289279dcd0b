/// Order in which declared enemy attacks are resolved during the enemy turn.
///
/// The save file does not record the order the game used, so the engine either
/// commits to one rule or branches over every distinct order.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyOrder {
    /// Ascending cell order.
    #[default]
    LeftToRight,
    /// Descending cell order.
    RightToLeft,
    /// Order of the enemy list in the save file.
    FileOrder,
    /// One branch per distinct permutation of the attackers.
    Exhaustive,
}

/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// How declared enemy attacks are ordered.
    pub enemy_order: EnemyOrder,
    /// Potions the hero can carry without skills.
    pub potion_capacity: usize,
    /// Extra potion slots granted by Big Pockets.
    pub big_pockets_bonus: usize,
    /// Maximum distance a push travels before it is clamped to the board.
    pub push_range: i32,
    /// Longest attack queue considered when the hero executes.
    pub max_queue_length: usize,
    /// Longest combination of queued weapons kept ahead of a newly added one.
    pub max_added_combination: usize,
}

impl EngineConfig {
    // ===== compile-time constants =====
    /// Weapons at or above this strength stop growing.
    pub const MAX_WEAPON_STRENGTH: i32 = 9;
    /// Default scan distance of targeting queries.
    pub const TARGET_RANGE: i32 = 10;
    /// Eight consumable types can hide behind a potion id.
    pub const CONSUMABLE_TYPES: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POTION_CAPACITY: usize = 3;
    pub const DEFAULT_BIG_POCKETS_BONUS: usize = 1;
    pub const DEFAULT_PUSH_RANGE: i32 = 10;
    pub const DEFAULT_MAX_QUEUE_LENGTH: usize = 3;
    pub const DEFAULT_MAX_ADDED_COMBINATION: usize = 2;

    pub fn new() -> Self {
        Self {
            enemy_order: EnemyOrder::default(),
            potion_capacity: Self::DEFAULT_POTION_CAPACITY,
            big_pockets_bonus: Self::DEFAULT_BIG_POCKETS_BONUS,
            push_range: Self::DEFAULT_PUSH_RANGE,
            max_queue_length: Self::DEFAULT_MAX_QUEUE_LENGTH,
            max_added_combination: Self::DEFAULT_MAX_ADDED_COMBINATION,
        }
    }

    #[must_use]
    pub fn with_enemy_order(mut self, enemy_order: EnemyOrder) -> Self {
        self.enemy_order = enemy_order;
        self
    }

    #[must_use]
    pub fn with_potion_capacity(mut self, potion_capacity: usize) -> Self {
        self.potion_capacity = potion_capacity;
        self
    }

    #[must_use]
    pub fn with_big_pockets_bonus(mut self, big_pockets_bonus: usize) -> Self {
        self.big_pockets_bonus = big_pockets_bonus;
        self
    }

    #[must_use]
    pub fn with_push_range(mut self, push_range: i32) -> Self {
        self.push_range = push_range;
        self
    }

    #[must_use]
    pub fn with_max_queue_length(mut self, max_queue_length: usize) -> Self {
        self.max_queue_length = max_queue_length;
        self
    }

    #[must_use]
    pub fn with_max_added_combination(mut self, max_added_combination: usize) -> Self {
        self.max_added_combination = max_added_combination;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn enemy_order_parses_kebab_case() {
        assert_eq!(EnemyOrder::from_str("right-to-left"), Ok(EnemyOrder::RightToLeft));
        assert_eq!(EnemyOrder::Exhaustive.to_string(), "exhaustive");
        assert!(EnemyOrder::from_str("random").is_err());
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = EngineConfig::new()
            .with_enemy_order(EnemyOrder::FileOrder)
            .with_potion_capacity(4);
        assert_eq!(config.enemy_order, EnemyOrder::FileOrder);
        assert_eq!(config.potion_capacity, 4);
        assert_eq!(config.push_range, EngineConfig::DEFAULT_PUSH_RANGE);
    }
}
