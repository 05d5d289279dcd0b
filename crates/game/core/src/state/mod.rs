//! Observed game state.
//!
//! Everything a save write describes: the combat room with its entities and
//! board, run statistics, skills, the shop and reward screens, plus the
//! hazards the engine remembers because the save file does not. Snapshots are
//! plain data; the engine clones them into branches and mutates the clones.
mod board;
pub mod entity;
mod hazards;
mod phase;
mod pickup;
mod reward;
mod room;
mod roster;
mod shop;
mod skills;
mod snapshot;
mod stats;

pub use entity::{EnemyData, Entity, EntityId, Facing, HeroData, Hp, Position, Role, Status, TileIntent};
pub use hazards::{BOMB_FUSE, Bomb, CorruptedWave, RoomHazards};
pub use phase::GamePhase;
pub use pickup::{DropFamily, Pickup, PickupMap, count_of};
pub use reward::RewardRoom;
pub use room::{BattleRoom, RoomKind, board_size};
pub use roster::{EliteKind, EnemyAction, EnemyKind, HeroKind};
pub use shop::{ShopItem, ShopItemKind, ShopLocation, ShopRoom, ShopService, ShopType, Upgrade};
pub use skills::{SkillKind, Skills};
pub use snapshot::Snapshot;
pub use stats::GameStats;
