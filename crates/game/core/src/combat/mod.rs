//! Hit resolution.
//!
//! Applies a weapon to a set of cells: damage, attack effects, shockwave
//! chains, twin mirroring and positional follow-ups (flip, push, recoil, pull).
//! The engine drives it through the [`Battlefield`] port so every movement
//! caused by a hit passes through the same trap and pickup handling as any
//! other move.

mod hit;
mod result;
mod striker;

pub use hit::{Battlefield, hit_entities, strike_entity};
pub use result::HitData;
pub use striker::{Actor, Striker};
