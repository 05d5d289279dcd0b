//! Hit bookkeeping returned by every combat resolution.

/// Totals of one or more resolved hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitData {
    /// Hits the hero took; the run statistics count these.
    pub hits: i32,
    /// Direct targets of the weapon.
    pub targets_hit: i32,
    /// Entities whose HP dropped to zero or below.
    pub kills: i32,
}

impl HitData {
    pub const fn empty() -> Self {
        Self {
            hits: 0,
            targets_hit: 0,
            kills: 0,
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.hits += other.hits;
        self.targets_hit += other.targets_hit;
        self.kills += other.kills;
    }
}

impl core::ops::AddAssign for HitData {
    fn add_assign(&mut self, other: Self) {
        self.merge(other);
    }
}
