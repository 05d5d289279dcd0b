//! Who is attacking.

use crate::state::{BattleRoom, EnemyKind, EntityId, Position};

/// Source of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Actor {
    /// An entity still tracked by the room.
    Entity(EntityId),
    /// An attacker that left the board before its attack resolved, such as a
    /// warden exploding on death or thorns retaliating after being destroyed.
    Postmortem(EnemyKind),
}

/// An attacker plus the position it attacks from.
///
/// Entity strikers read their live position from the room, so movement
/// during a multi-step weapon (dashes, recoil) is always observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Striker {
    pub actor: Actor,
    position: Position,
}

impl Striker {
    pub const fn hero() -> Self {
        Self::entity(EntityId::HERO)
    }

    pub const fn entity(id: EntityId) -> Self {
        Self {
            actor: Actor::Entity(id),
            position: Position::new(-1, crate::state::Facing::Left),
        }
    }

    pub const fn postmortem(kind: EnemyKind, position: Position) -> Self {
        Self {
            actor: Actor::Postmortem(kind),
            position,
        }
    }

    pub const fn id(&self) -> Option<EntityId> {
        match self.actor {
            Actor::Entity(id) => Some(id),
            Actor::Postmortem(_) => None,
        }
    }

    pub const fn is_hero(&self) -> bool {
        matches!(self.actor, Actor::Entity(id) if id.is_hero())
    }

    /// Current position: the live one for entities still in the room.
    pub fn position(&self, room: &BattleRoom) -> Position {
        match self.actor {
            Actor::Entity(id) => room.entity(id).map_or(self.position, |entity| entity.position),
            Actor::Postmortem(_) => self.position,
        }
    }

    /// Kind of the enemy behind this attack, if it is one.
    pub fn enemy_kind(&self, room: &BattleRoom) -> Option<EnemyKind> {
        match self.actor {
            Actor::Entity(id) => room.entity(id).and_then(|entity| entity.enemy_kind()),
            Actor::Postmortem(kind) => Some(kind),
        }
    }

    /// Still standing on the board with HP left.
    pub fn is_alive(&self, room: &BattleRoom) -> bool {
        match self.actor {
            Actor::Entity(id) => room.entity(id).is_some_and(|entity| entity.is_alive()),
            Actor::Postmortem(_) => false,
        }
    }
}
