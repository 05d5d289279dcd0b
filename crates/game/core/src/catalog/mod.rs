//! Weapon catalog: kinds, effects, tile state and the behavior table.
mod kinds;
mod profile;
mod weapon;

pub use kinds::{AttackEffect, TileEffect, WeaponKind};
pub use profile::{Execution, FollowUp, Side, Targeting, WaveSpawn, WeaponProfile};
pub use weapon::{Weapon, debug_list, is_list_reordered, pretty_list, short_list};
