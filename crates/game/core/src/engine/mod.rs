//! Transition inference.
//!
//! A [`Simulation`] is a snapshot clone plus what the branch cannot pin down
//! exactly ([`Predictions`]) and the hazards the save file does not carry.
//! [`resolve_transition`] enumerates potion scenarios and [`HeroAction`]s,
//! simulates each one through the enemy turn and keeps the branches the
//! matcher accepts.
//!
//! Layout:
//! - `simulation`: branch state, movement, swaps, turn passing, potions
//! - `weapons`: per-tile execution driven by the catalog profile
//! - `aftermath`: kills, drops, combos, summons and retaliation
//! - `signature`: hero signature moves
//! - `enemies`: the enemy turn
//! - `queues`: candidate hero queues and decks
//! - `actions`: the hero actions a transition may hide
//! - `resolve`: the entry point

mod actions;
mod aftermath;
mod enemies;
mod errors;
mod predictions;
mod queues;
mod resolve;
mod signature;
mod simulation;
mod trace;
mod weapons;

pub use actions::HeroAction;
pub use errors::SimulationError;
pub use predictions::{Predictions, Relaxations};
pub use queues::{
    candidate_decks, idle_queues, possible_attack_queues, queue_with_immediates, queues_with_new_weapon,
};
pub use resolve::{Explanation, Rejection, Resolution, Transition, resolve_transition};
pub use simulation::Simulation;
pub use trace::Trace;
