//! Deterministic combat model and transition inference for Shogun Showdown runs.
//!
//! `showdown-core` rebuilds what happened between two save-file snapshots. It
//! owns the board model, the weapon catalog, hit resolution, the forward
//! simulation of every candidate hero action, the comparator that checks a
//! simulated state against the observed one, and potion identity inference.
//!
//! Everything here is synchronous and free of I/O. Diagnostics travel back to
//! the caller as [`engine::Trace`] lines instead of log records.
//!
//! Modules:
//! - [`catalog`]: weapon kinds, effects and the data-driven profile table
//! - [`state`]: snapshot, room, entity and hazard types
//! - [`combat`]: hit resolution against the [`combat::Battlefield`] port
//! - [`engine`]: branch enumeration, action simulation and [`engine::resolve_transition`]
//! - [`matcher`]: loosened comparison of simulated and observed states
//! - [`potions`]: constraint propagation over potion identities
pub mod catalog;
pub mod combat;
mod combinatorics;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod potions;
pub mod state;

pub use catalog::{AttackEffect, Execution, FollowUp, Targeting, TileEffect, Weapon, WeaponKind, WeaponProfile};
pub use combat::{Actor, Battlefield, HitData, Striker, hit_entities};
pub use config::{EngineConfig, EnemyOrder};
pub use engine::{
    Explanation, HeroAction, Predictions, Rejection, Relaxations, Resolution, Simulation,
    SimulationError, Trace, Transition, resolve_transition,
};
pub use error::{CoreError, ErrorSeverity, ShowdownError};
pub use matcher::{Mismatch, is_good_prediction};
pub use potions::{PotionError, PotionKnowledge, PotionObservation, PotionScenario};
pub use state::{
    BattleRoom, EliteKind, EnemyAction, EnemyData, EnemyKind, Entity, EntityId, Facing, GamePhase,
    GameStats, HeroData, HeroKind, Hp, Pickup, Position, RewardRoom, Role, RoomHazards, RoomKind,
    ShopItem, ShopRoom, SkillKind, Skills, Snapshot, Status,
};
