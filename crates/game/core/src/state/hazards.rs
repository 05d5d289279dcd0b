//! Hazards the save file does not record.
//!
//! Traps, thorns, bombs and corrupted waves are only visible while they are
//! created, so they are remembered here between transitions and cloned into
//! every simulated branch.

use std::collections::BTreeMap;

use super::entity::{Facing, Position};
use crate::catalog::Weapon;

/// Turns a freshly planted bomb waits before it explodes.
pub const BOMB_FUSE: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bomb {
    pub timer: i32,
    pub strength: i32,
}

/// A corrupted wave travelling across the board one cell per enemy turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorruptedWave {
    pub strength: i32,
    pub position: Position,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomHazards {
    /// `cell -> strength`
    pub traps: BTreeMap<i32, i32>,
    /// `cell -> weapon that summoned the thorns`
    pub thorns: BTreeMap<i32, Weapon>,
    pub bombs: BTreeMap<i32, Vec<Bomb>>,
    pub waves: Vec<CorruptedWave>,
}

impl RoomHazards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.traps.is_empty() && self.thorns.is_empty() && self.bombs.is_empty() && self.waves.is_empty()
    }

    /// Springs the trap on `cell`, if any.
    pub fn check_trap(&mut self, cell: i32) -> Option<i32> {
        self.traps.remove(&cell)
    }

    /// A second trap on an armed cell is ignored.
    pub fn set_trap(&mut self, cell: i32, strength: i32) {
        self.traps.entry(cell).or_insert(strength);
    }

    /// Takes the weapon of the thorns that stood on `cell`.
    pub fn hit_thorns(&mut self, cell: i32) -> Option<Weapon> {
        self.thorns.remove(&cell)
    }

    pub fn summon_thorns(&mut self, cell: i32, weapon: Weapon) {
        self.thorns.entry(cell).or_insert(weapon);
    }

    pub fn spawn_wave(&mut self, cell: i32, facing: Facing, strength: i32) {
        self.waves.push(CorruptedWave {
            strength,
            position: Position::new(cell, facing),
        });
    }

    /// Advances every wave one cell and drops those leaving the board.
    pub fn move_waves(&mut self, board_size: i32) {
        self.waves.retain_mut(|wave| {
            wave.position.cell += wave.position.direction();
            (0..board_size).contains(&wave.position.cell)
        });
    }

    pub fn add_bomb(&mut self, cell: i32, strength: i32) {
        self.bombs.entry(cell).or_default().push(Bomb {
            timer: BOMB_FUSE,
            strength,
        });
    }

    /// Counts every fuse down.
    ///
    /// # Returns
    ///
    /// `(cell, strength)` of each bomb that exploded this turn.
    pub fn tick_bombs(&mut self) -> Vec<(i32, i32)> {
        let mut explosions = Vec::new();
        for (cell, bombs) in &mut self.bombs {
            bombs.retain_mut(|bomb| {
                bomb.timer -= 1;
                if bomb.timer == 0 {
                    explosions.push((*cell, bomb.strength));
                    false
                } else {
                    true
                }
            });
        }
        self.bombs.retain(|_, bombs| !bombs.is_empty());
        explosions
    }
}
