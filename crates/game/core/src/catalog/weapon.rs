use super::kinds::{AttackEffect, TileEffect, WeaponKind};
use crate::config::EngineConfig;

/// One tile: a weapon kind plus its cooldown, strength and upgrade state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub kind: WeaponKind,
    pub cooldown: i32,
    pub cooldown_charge: i32,
    /// In-flight strength. `-1` marks tiles without a damage value.
    pub strength: i32,
    pub base_strength: i32,
    pub level: i32,
    pub max_level: i32,
    pub attack_effect: Option<AttackEffect>,
    pub tile_effect: Option<TileEffect>,
}

impl Weapon {
    pub fn new(kind: WeaponKind, cooldown: i32, strength: i32) -> Self {
        Self {
            kind,
            cooldown,
            cooldown_charge: cooldown,
            strength,
            base_strength: strength,
            level: 0,
            max_level: 0,
            attack_effect: None,
            tile_effect: None,
        }
    }

    /// Engine-made tile with no cooldown and no upgrades.
    pub const fn auxiliary(kind: WeaponKind, strength: i32) -> Self {
        Self {
            kind,
            cooldown: 0,
            cooldown_charge: 0,
            strength,
            base_strength: strength,
            level: 0,
            max_level: 0,
            attack_effect: None,
            tile_effect: None,
        }
    }

    #[must_use]
    pub fn with_attack_effect(mut self, effect: AttackEffect) -> Self {
        self.attack_effect = Some(effect);
        self
    }

    #[must_use]
    pub fn with_tile_effect(mut self, effect: TileEffect) -> Self {
        self.tile_effect = Some(effect);
        self
    }

    #[must_use]
    pub fn with_charge(mut self, cooldown_charge: i32) -> Self {
        self.cooldown_charge = cooldown_charge;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: i32, max_level: i32) -> Self {
        self.level = level;
        self.max_level = max_level;
        self
    }

    pub const fn signature_move() -> Self {
        Self::auxiliary(WeaponKind::SignatureMove, 1)
    }

    pub const fn corrupted_explosion() -> Self {
        Self::auxiliary(WeaponKind::CorruptedExplosion, 1)
    }

    pub const fn corrupted_wave(strength: i32) -> Self {
        Self::auxiliary(WeaponKind::CorruptedWave, strength)
    }

    pub const fn trap(strength: i32) -> Self {
        Self::auxiliary(WeaponKind::Trap, strength)
    }

    pub const fn shock() -> Self {
        Self::auxiliary(WeaponKind::Shock, 1)
    }

    pub const fn poison_tick() -> Self {
        Self::auxiliary(WeaponKind::PoisonTick, 1)
    }

    pub const fn push() -> Self {
        Self::auxiliary(WeaponKind::Push, 0)
    }

    pub const fn stop() -> Self {
        Self::auxiliary(WeaponKind::Stop, 1)
    }

    pub const fn kunai() -> Self {
        Self::auxiliary(WeaponKind::Kunai, 1)
    }

    pub const fn explosion(strength: i32) -> Self {
        Self::auxiliary(WeaponKind::Explosion, strength)
    }

    pub const fn any() -> Self {
        Self::auxiliary(WeaponKind::Any, 1)
    }

    /// Same physical tile, ignoring the charge and the in-flight strength.
    pub fn is_same_tile(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.cooldown == other.cooldown
            && self.base_strength == other.base_strength
            && self.level == other.level
            && self.max_level == other.max_level
            && self.attack_effect == other.attack_effect
            && self.tile_effect == other.tile_effect
    }

    /// Name of the first field that differs from `other`, for mismatch reports.
    pub fn first_difference(&self, other: &Self) -> Option<String> {
        if self.kind != other.kind {
            return Some("wrong weapon type".into());
        }
        if self.cooldown != other.cooldown {
            return Some("wrong cooldown".into());
        }
        if self.cooldown_charge != other.cooldown_charge {
            return Some(format!(
                "wrong cooldown charge self: {} other: {}",
                self.cooldown_charge, other.cooldown_charge
            ));
        }
        if self.strength != other.strength {
            return Some("wrong strength".into());
        }
        if self.base_strength != other.base_strength {
            return Some("wrong base strength".into());
        }
        if self.level != other.level {
            return Some("wrong level".into());
        }
        if self.max_level != other.max_level {
            return Some("wrong max level".into());
        }
        if self.attack_effect != other.attack_effect {
            return Some("wrong attack effect".into());
        }
        if self.tile_effect != other.tile_effect {
            return Some("wrong tile effect".into());
        }
        None
    }

    pub fn is_shocking(&self) -> bool {
        self.attack_effect == Some(AttackEffect::Shockwave)
    }

    pub fn is_immediate(&self) -> bool {
        self.tile_effect == Some(TileEffect::Immediate)
    }

    pub fn is_double_strike(&self) -> bool {
        self.attack_effect == Some(AttackEffect::DoubleStrike)
    }

    /// Marks the tile as spent.
    pub fn consume(&mut self) {
        self.cooldown_charge = 0;
    }

    pub fn recharge(&mut self) {
        self.cooldown_charge = (self.cooldown_charge + 1).min(self.cooldown);
    }

    pub fn refill(&mut self) {
        self.cooldown_charge = self.cooldown;
    }

    /// Adds one strength, saturating at [`EngineConfig::MAX_WEAPON_STRENGTH`].
    pub fn grow(&mut self) {
        self.strength = (self.strength + 1).min(EngineConfig::MAX_WEAPON_STRENGTH);
    }

    /// Copy of this tile without its attack effect.
    #[must_use]
    pub fn without_attack_effect(&self) -> Self {
        Self {
            attack_effect: None,
            ..self.clone()
        }
    }

    pub fn print_name(&self) -> String {
        let prefix = self
            .attack_effect
            .map(|effect| effect.to_string())
            .or_else(|| self.tile_effect.map(|effect| effect.to_string()));
        match prefix {
            Some(prefix) => format!("{prefix} {}", self.kind),
            None => self.kind.to_string(),
        }
    }

    /// `Katana (2,3)`: strength and cooldown.
    pub fn short(&self) -> String {
        if self.strength == -1 {
            format!("{} ({})", self.print_name(), self.cooldown)
        } else {
            format!("{} ({},{})", self.print_name(), self.strength, self.cooldown)
        }
    }

    /// `Katana (power 2, cooldown 3)`.
    pub fn pretty(&self) -> String {
        if self.strength == -1 {
            format!("{} (cooldown {})", self.print_name(), self.cooldown)
        } else {
            format!(
                "{} (power {}, cooldown {})",
                self.print_name(),
                self.strength,
                self.cooldown
            )
        }
    }

    /// `Katana (2(2), 1/3, 0/2)`: strength, base, charge, level.
    pub fn debug(&self) -> String {
        let levels = format!(
            "{}/{}, {}/{}",
            self.cooldown_charge, self.cooldown, self.level, self.max_level
        );
        if self.strength == -1 {
            format!("{} ({levels})", self.print_name())
        } else {
            format!(
                "{} ({}({}), {levels})",
                self.print_name(),
                self.strength,
                self.base_strength
            )
        }
    }
}

pub fn short_list(weapons: &[Weapon]) -> String {
    weapons.iter().map(Weapon::short).collect::<Vec<_>>().join(", ")
}

pub fn pretty_list(weapons: &[Weapon]) -> String {
    weapons.iter().map(Weapon::pretty).collect::<Vec<_>>().join(", ")
}

pub fn debug_list(weapons: &[Weapon]) -> String {
    weapons.iter().map(Weapon::debug).collect::<Vec<_>>().join(", ")
}

/// True when both lists hold the same weapons, in any order.
pub fn is_list_reordered(first: &[Weapon], other: &[Weapon]) -> bool {
    if first.len() != other.len() {
        return false;
    }
    let mut remaining: Vec<&Weapon> = other.iter().collect();
    for item in first {
        match remaining.iter().position(|candidate| *candidate == item) {
            Some(index) => {
                remaining.remove(index);
            }
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tile_ignores_charge_and_strength() {
        let fresh = Weapon::new(WeaponKind::Katana, 3, 2);
        let mut used = fresh.clone();
        used.consume();
        used.strength = 4;
        assert!(fresh.is_same_tile(&used));
        assert_ne!(fresh, used);

        let upgraded = fresh.clone().with_attack_effect(AttackEffect::Ice);
        assert!(!fresh.is_same_tile(&upgraded));
    }

    #[test]
    fn printing_formats() {
        let weapon = Weapon::new(WeaponKind::Katana, 3, 2)
            .with_attack_effect(AttackEffect::Poison)
            .with_charge(1);
        assert_eq!(weapon.short(), "Poison Katana (2,3)");
        assert_eq!(weapon.pretty(), "Poison Katana (power 2, cooldown 3)");
        assert_eq!(weapon.debug(), "Poison Katana (2(2), 1/3, 0/0)");

        let mirror = Weapon::new(WeaponKind::Mirror, 4, -1);
        assert_eq!(mirror.short(), "Mirror (4)");
        assert_eq!(mirror.pretty(), "Mirror (cooldown 4)");
    }

    #[test]
    fn charge_and_strength_are_capped() {
        let mut weapon = Weapon::new(WeaponKind::BladeOfPatience, 2, 8).with_charge(1);
        weapon.recharge();
        weapon.recharge();
        assert_eq!(weapon.cooldown_charge, 2);
        weapon.grow();
        weapon.grow();
        assert_eq!(weapon.strength, EngineConfig::MAX_WEAPON_STRENGTH);
    }

    #[test]
    fn reordered_lists_match_multiset() {
        let katana = Weapon::new(WeaponKind::Katana, 3, 2);
        let arrow = Weapon::new(WeaponKind::Arrow, 4, 1);
        assert!(is_list_reordered(
            &[katana.clone(), arrow.clone()],
            &[arrow.clone(), katana.clone()]
        ));
        assert!(!is_list_reordered(
            &[katana.clone(), katana.clone()],
            &[katana, arrow]
        ));
    }

    #[test]
    fn first_difference_reports_charge() {
        let weapon = Weapon::new(WeaponKind::Spear, 3, 1);
        let spent = weapon.clone().with_charge(0);
        assert_eq!(
            weapon.first_difference(&spent).as_deref(),
            Some("wrong cooldown charge self: 3 other: 0")
        );
        assert_eq!(weapon.first_difference(&weapon), None);
    }
}
