//! Entities on the board: the hero, enemies and summoned obstacles.
//!
//! A single [`Entity`] struct carries everything the combat model needs; the
//! hero/enemy specific data lives in its [`Role`] payload.

use core::fmt;

use super::roster::{EliteKind, EnemyAction, EnemyKind, HeroKind};
use crate::catalog::{AttackEffect, Weapon, WeaponKind, short_list};

/// Unique identifier of an entity inside one battle room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the hero.
    pub const HERO: Self = Self(0);

    #[inline]
    pub const fn is_hero(self) -> bool {
        self.0 == Self::HERO.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub const fn code(self) -> i32 {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    /// Any non-zero code faces right.
    pub const fn from_code(code: i32) -> Self {
        if code == 0 { Self::Left } else { Self::Right }
    }

    /// `+1` when facing right, `-1` otherwise.
    pub const fn direction(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub cell: i32,
    pub facing: Facing,
    /// Cell the entity stood on when its HP dropped to zero.
    pub died_in: Option<i32>,
}

impl Position {
    pub const fn new(cell: i32, facing: Facing) -> Self {
        Self {
            cell,
            facing,
            died_in: None,
        }
    }

    pub fn flip(&mut self) {
        self.facing = self.facing.flipped();
    }

    pub const fn direction(&self) -> i32 {
        self.facing.direction()
    }

    /// Cells at the given offsets, mirrored by the facing direction.
    pub fn spaces(&self, offsets: &[i32]) -> Vec<i32> {
        let direction = self.direction();
        offsets
            .iter()
            .map(|offset| self.cell + offset * direction)
            .collect()
    }

    /// Direction pointing from this position towards `cell`.
    pub const fn direction_towards(&self, cell: i32) -> i32 {
        if self.cell < cell { 1 } else { -1 }
    }

    pub const fn death_cell(&self) -> i32 {
        match self.died_in {
            Some(cell) => cell,
            None => self.cell,
        }
    }

    /// Position matches `other`, optionally ignoring the facing.
    pub fn matches(&self, other: &Self, facing_matters: bool) -> bool {
        self.cell == other.cell && (!facing_matters || self.facing == other.facing)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hp {
    pub hp: i32,
    pub max_hp: i32,
}

impl Hp {
    pub const fn new(hp: i32, max_hp: i32) -> Self {
        Self { hp, max_hp }
    }

    pub const fn full(max_hp: i32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    pub const fn is_hurt(&self) -> bool {
        self.hp < self.max_hp
    }

    pub fn heal(&mut self, amount: i32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    pub shield: bool,
    pub curse: bool,
    /// Remaining frozen turns.
    pub ice: i32,
    /// Remaining poisoned turns.
    pub poison: i32,
}

impl Status {
    pub fn pass_turn(&mut self) {
        self.ice = (self.ice - 1).max(0);
        self.poison = (self.poison - 1).max(0);
    }

    /// First differing field, worded for a mismatch report.
    pub fn first_difference(&self, other: &Self) -> Option<&'static str> {
        if self.shield != other.shield {
            Some("shield")
        } else if self.curse != other.curse {
            Some("curse")
        } else if self.ice != other.ice {
            Some("ice")
        } else if self.poison != other.poison {
            Some("poison")
        } else {
            None
        }
    }
}

/// Compact `CSIIPP` rendering: curse, shield, one letter per ice/poison turn.
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.curse {
            f.write_str("C")?;
        }
        if self.shield {
            f.write_str("S")?;
        }
        for _ in 0..self.ice {
            f.write_str("I")?;
        }
        for _ in 0..self.poison {
            f.write_str("P")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroData {
    pub kind: HeroKind,
    pub special_cooldown: i32,
    /// Derived from the Reactive Shield skill.
    pub reactive_shield: bool,
}

/// Tile an enemy intends to add next, as raw save codes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileIntent {
    pub tile: i32,
    pub effect: i32,
}

impl TileIntent {
    pub fn name(&self) -> String {
        match WeaponKind::from_code(self.tile) {
            Some(kind) => kind.to_string(),
            None => format!("tile #{}", self.tile),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyData {
    pub kind: EnemyKind,
    pub action: EnemyAction,
    pub previous_action: EnemyAction,
    pub next_tile: Option<TileIntent>,
    pub elite: EliteKind,
    pub first_turn: bool,
    pub pattern_index: i32,
}

impl EnemyData {
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            action: EnemyAction::Wait,
            previous_action: EnemyAction::Wait,
            next_tile: None,
            elite: EliteKind::None,
            first_turn: false,
            pattern_index: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Hero(HeroData),
    Enemy(EnemyData),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub hp: Hp,
    pub status: Status,
    pub attack_queue: Vec<Weapon>,
    pub role: Role,
}

impl Entity {
    pub fn hero(kind: HeroKind, position: Position, hp: Hp) -> Self {
        Self {
            id: EntityId::HERO,
            position,
            hp,
            status: Status::default(),
            attack_queue: Vec::new(),
            role: Role::Hero(HeroData {
                kind,
                special_cooldown: 0,
                reactive_shield: false,
            }),
        }
    }

    pub fn enemy(id: EntityId, kind: EnemyKind, position: Position, hp: Hp) -> Self {
        Self {
            id,
            position,
            hp,
            status: Status::default(),
            attack_queue: Vec::new(),
            role: Role::Enemy(EnemyData::new(kind)),
        }
    }

    /// Thorns summoned next to the hero; always spawns facing right.
    pub fn thorns(id: EntityId, cell: i32) -> Self {
        let mut thorns = Self::enemy(id, EnemyKind::Thorns, Position::new(cell, Facing::Right), Hp::full(1));
        if let Some(data) = thorns.enemy_mut() {
            data.first_turn = true;
        }
        thorns
    }

    pub fn barricade(id: EntityId, cell: i32) -> Self {
        let mut barricade =
            Self::enemy(id, EnemyKind::Barricade, Position::new(cell, Facing::Left), Hp::full(1));
        if let Some(data) = barricade.enemy_mut() {
            data.first_turn = true;
        }
        barricade
    }

    /// Progeny a corrupted elite leaves behind where it died.
    pub fn corrupted_progeny(&self, id: EntityId) -> Self {
        let position = Position::new(self.position.death_cell(), self.position.facing);
        let mut progeny = Self::enemy(id, EnemyKind::CorruptedProgeny, position, Hp::full(1));
        if let Some(data) = progeny.enemy_mut() {
            data.first_turn = true;
            data.next_tile = Some(TileIntent {
                tile: WeaponKind::CorruptedExplosion.code(),
                effect: 0,
            });
        }
        progeny
    }

    #[must_use]
    pub fn with_queue(mut self, queue: Vec<Weapon>) -> Self {
        self.attack_queue = queue;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: EnemyAction) -> Self {
        if let Some(data) = self.enemy_mut() {
            data.action = action;
            data.previous_action = action;
        }
        self
    }

    #[must_use]
    pub fn with_elite(mut self, elite: EliteKind) -> Self {
        if let Some(data) = self.enemy_mut() {
            data.elite = elite;
        }
        self
    }

    pub fn hero_data(&self) -> Option<&HeroData> {
        match &self.role {
            Role::Hero(data) => Some(data),
            Role::Enemy(_) => None,
        }
    }

    pub fn hero_mut(&mut self) -> Option<&mut HeroData> {
        match &mut self.role {
            Role::Hero(data) => Some(data),
            Role::Enemy(_) => None,
        }
    }

    pub fn enemy_data(&self) -> Option<&EnemyData> {
        match &self.role {
            Role::Enemy(data) => Some(data),
            Role::Hero(_) => None,
        }
    }

    pub fn enemy_mut(&mut self) -> Option<&mut EnemyData> {
        match &mut self.role {
            Role::Enemy(data) => Some(data),
            Role::Hero(_) => None,
        }
    }

    pub fn enemy_kind(&self) -> Option<EnemyKind> {
        self.enemy_data().map(|data| data.kind)
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.role, Role::Hero(_))
    }

    pub fn is_alive(&self) -> bool {
        self.hp.hp > 0
    }

    fn elite(&self) -> EliteKind {
        self.enemy_data().map_or(EliteKind::None, |data| data.elite)
    }

    pub fn is_heavy(&self) -> bool {
        self.elite() == EliteKind::Heavy
    }

    pub fn is_corrupted(&self) -> bool {
        self.elite() == EliteKind::Corrupted
    }

    /// Raises a shield after taking damage.
    pub fn is_reactive(&self) -> bool {
        match &self.role {
            Role::Hero(data) => data.reactive_shield,
            Role::Enemy(data) => data.elite == EliteKind::ReactiveShield,
        }
    }

    /// Declared to execute its queue this enemy turn.
    pub fn will_attack(&self) -> bool {
        self.enemy_data()
            .is_some_and(|data| data.action == EnemyAction::ExecuteQueue)
    }

    pub fn is_boss(&self) -> bool {
        self.enemy_kind().is_some_and(EnemyKind::is_boss)
    }

    pub fn is_thorns(&self) -> bool {
        self.enemy_kind() == Some(EnemyKind::Thorns)
    }

    /// Applies the damage part of a hit and returns the hits it counts.
    ///
    /// Only hits on the hero count. A shield absorbs the hit and is consumed by
    /// any positive strength.
    ///
    /// # Formula
    ///
    /// `damage = strength × (2 if cursed) × (2 if Sai against an enemy about to attack)`
    pub fn actual_hit(&mut self, weapon: &Weapon) -> i32 {
        let mut strength = weapon.strength;
        let mut hits = i32::from(self.is_hero());
        if self.status.shield {
            if strength > 0 {
                self.status.shield = false;
            }
            hits = 0;
        } else {
            if self.status.curse {
                strength *= 2;
                self.status.curse = false;
            }
            if weapon.kind == WeaponKind::Sai && self.will_attack() {
                strength *= 2;
            }
            self.hp.hp -= strength;
            if weapon.kind == WeaponKind::Nagiboku && self.hp.hp < 1 {
                self.hp.hp = 1;
            }
            if strength > 0 && self.is_reactive() {
                self.status.shield = true;
            }
        }
        if self.hp.hp <= 0 {
            self.position.died_in = Some(self.position.cell);
        }
        hits
    }

    /// Damage plus the status the weapon's attack effect leaves behind.
    pub fn hit(&mut self, weapon: &Weapon) -> i32 {
        let hits = self.actual_hit(weapon);
        match weapon.attack_effect {
            Some(AttackEffect::Poison) => self.status.poison = 3,
            Some(AttackEffect::Ice) => self.status.ice = 4,
            Some(AttackEffect::Curse) => self.status.curse = true,
            Some(AttackEffect::DoubleStrike | AttackEffect::Shockwave | AttackEffect::PerfectStrike) | None => {}
        }
        hits
    }

    pub fn name(&self) -> String {
        match &self.role {
            Role::Hero(data) => data.kind.to_string(),
            Role::Enemy(data) => {
                let elite = data.elite.to_string();
                let prefix = if elite.is_empty() { String::new() } else { format!("{elite} ") };
                format!(
                    "{prefix}{} {}/{} [{}]",
                    data.kind, self.hp.hp, self.hp.max_hp, self.status
                )
            }
        }
    }

    pub fn short(&self) -> String {
        match &self.role {
            Role::Hero(_) => self.name(),
            Role::Enemy(_) => format!("{} cell {}", self.name(), self.position.cell),
        }
    }

    pub fn pretty(&self) -> String {
        let position = format!(
            "cell {}, facing {}",
            self.position.cell,
            self.position.facing.describe()
        );
        let Role::Enemy(data) = &self.role else {
            return format!("{} {position}", self.name());
        };
        let action = match (data.action, data.next_tile) {
            (EnemyAction::ExpandQueue, Some(tile)) => {
                format!("about to add {} to attack queue", tile.name())
            }
            (action, _) => action.describe().to_string(),
        };
        let mut parts = vec![self.name(), position, action];
        if data.first_turn {
            parts.push("(first turn)".into());
        }
        if data.pattern_index != 0 {
            parts.push(format!("pattern: {}", data.pattern_index));
        }
        if self.attack_queue.is_empty() {
            parts.push("empty attack queue".into());
        } else {
            parts.push(format!("attack queue: {}", short_list(&self.attack_queue)));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ashigaru(hp: i32) -> Entity {
        Entity::enemy(EntityId(1), EnemyKind::Ashigaru, Position::new(3, Facing::Left), Hp::new(hp, 3))
    }

    #[test]
    fn shield_absorbs_and_is_consumed() {
        let mut hero = Entity::hero(HeroKind::Wanderer, Position::new(0, Facing::Right), Hp::full(5));
        hero.status.shield = true;
        let hits = hero.hit(&Weapon::new(WeaponKind::Katana, 3, 2));
        assert_eq!(hits, 0);
        assert_eq!(hero.hp.hp, 5);
        assert!(!hero.status.shield);
    }

    #[test]
    fn zero_strength_keeps_shield() {
        let mut enemy = ashigaru(3);
        enemy.status.shield = true;
        enemy.hit(&Weapon::push());
        assert!(enemy.status.shield);
    }

    #[test]
    fn unshielded_hero_counts_one_hit() {
        let mut hero = Entity::hero(HeroKind::Ronin, Position::new(2, Facing::Left), Hp::full(5));
        assert_eq!(hero.hit(&Weapon::new(WeaponKind::Arrow, 4, 2)), 1);
        assert_eq!(hero.hp.hp, 3);
    }

    #[test]
    fn curse_doubles_and_is_consumed() {
        let mut enemy = ashigaru(3);
        enemy.status.curse = true;
        enemy.hit(&Weapon::new(WeaponKind::Katana, 3, 1));
        assert_eq!(enemy.hp.hp, 1);
        assert!(!enemy.status.curse);
    }

    #[test]
    fn sai_doubles_against_declared_attackers() {
        let mut enemy = ashigaru(3).with_action(EnemyAction::ExecuteQueue);
        enemy.hit(&Weapon::new(WeaponKind::Sai, 2, 1));
        assert_eq!(enemy.hp.hp, 1);
    }

    #[test]
    fn nagiboku_never_kills() {
        let mut enemy = ashigaru(2);
        enemy.hit(&Weapon::new(WeaponKind::Nagiboku, 3, 5));
        assert_eq!(enemy.hp.hp, 1);
        assert_eq!(enemy.position.died_in, None);
    }

    #[test]
    fn death_records_cell_and_effects_apply() {
        let mut enemy = ashigaru(1);
        let poison = Weapon::new(WeaponKind::Katana, 3, 1).with_attack_effect(AttackEffect::Poison);
        enemy.hit(&poison);
        assert_eq!(enemy.position.died_in, Some(3));
        assert_eq!(enemy.status.poison, 3);
    }

    #[test]
    fn reactive_elite_raises_shield() {
        let mut enemy = ashigaru(3).with_elite(EliteKind::ReactiveShield);
        enemy.hit(&Weapon::new(WeaponKind::Katana, 3, 1));
        assert!(enemy.status.shield);
        assert_eq!(enemy.name(), "Reactive Shield Ashigaru 2/3 [S]");
    }

    #[test]
    fn progeny_spawns_where_parent_died() {
        let mut parent = ashigaru(1).with_elite(EliteKind::Corrupted);
        parent.hit(&Weapon::new(WeaponKind::Katana, 3, 2));
        parent.position.cell = 5;
        let progeny = parent.corrupted_progeny(EntityId(9));
        assert_eq!(progeny.position.cell, 3);
        assert_eq!(progeny.enemy_kind(), Some(EnemyKind::CorruptedProgeny));
        assert!(progeny.enemy_data().is_some_and(|data| data.first_turn));
    }

    #[test]
    fn spaces_follow_facing() {
        let position = Position::new(4, Facing::Left);
        assert_eq!(position.spaces(&[1, 2]), vec![3, 2]);
        assert_eq!(position.direction_towards(6), 1);
        assert_eq!(position.direction_towards(4), -1);
    }
}
