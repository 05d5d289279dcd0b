//! Targeting queries over a battle room's one-dimensional board.
//!
//! Queries never fail: cells off the board and empty scans come back as `None`
//! or an empty list. Every query takes the attacker's [`Position`] rather than
//! an entity so postmortem attackers (a dead warden, spent thorns) can use them.

use std::collections::BTreeSet;

use super::entity::{EntityId, Position};
use super::room::BattleRoom;
use crate::config::EngineConfig;

impl BattleRoom {
    pub fn is_legal(&self, cell: i32) -> bool {
        0 <= cell && cell < self.board_size
    }

    pub fn is_edge(&self, cell: i32) -> bool {
        cell == 0 || cell == self.board_size - 1
    }

    /// Entities standing on any of `cells`: enemies in room order, hero last.
    pub fn find_targets(&self, cells: &[i32]) -> Vec<EntityId> {
        let mut targets: Vec<EntityId> = self
            .enemies
            .iter()
            .filter(|enemy| cells.contains(&enemy.position.cell))
            .map(|enemy| enemy.id)
            .collect();
        if cells.contains(&self.hero.position.cell) {
            targets.push(EntityId::HERO);
        }
        targets
    }

    pub fn is_occupied(&self, cell: i32) -> bool {
        self.hero.position.cell == cell || self.enemies.iter().any(|enemy| enemy.position.cell == cell)
    }

    fn occupant(&self, cell: i32) -> Option<EntityId> {
        self.enemies
            .iter()
            .find(|enemy| enemy.position.cell == cell)
            .map(|enemy| enemy.id)
            .or_else(|| (self.hero.position.cell == cell).then_some(EntityId::HERO))
    }

    /// First occupied cell within `range` steps of `from` in `direction`.
    pub fn first_target_space(&self, from: i32, direction: i32, range: i32) -> Option<i32> {
        let mut cell = from;
        for _ in 0..range {
            cell += direction;
            if !self.is_legal(cell) {
                return None;
            }
            if self.is_occupied(cell) {
                return Some(cell);
            }
        }
        None
    }

    pub fn first_target_space_ahead(&self, attacker: &Position) -> Option<i32> {
        self.first_target_space(attacker.cell, attacker.direction(), EngineConfig::TARGET_RANGE)
    }

    pub fn first_target_space_behind(&self, attacker: &Position) -> Option<i32> {
        self.first_target_space(attacker.cell, -attacker.direction(), EngineConfig::TARGET_RANGE)
    }

    pub fn first_target_space_ahead_in_range(&self, attacker: &Position, range: i32) -> Option<i32> {
        self.first_target_space(attacker.cell, attacker.direction(), range)
    }

    /// Nearest occupied cell on the right, then on the left.
    pub fn first_target_spaces_around(&self, attacker: &Position) -> Vec<i32> {
        [1, -1]
            .into_iter()
            .filter_map(|direction| self.first_target_space(attacker.cell, direction, EngineConfig::TARGET_RANGE))
            .collect()
    }

    pub fn first_target_ahead(&self, attacker: &Position) -> Option<EntityId> {
        self.first_target_space_ahead(attacker)
            .and_then(|cell| self.occupant(cell))
    }

    pub fn first_target_behind(&self, attacker: &Position) -> Option<EntityId> {
        self.first_target_space_behind(attacker)
            .and_then(|cell| self.occupant(cell))
    }

    /// Farthest occupied cell ahead, scanning back from the board edge.
    pub fn last_target_space_ahead(&self, attacker: &Position) -> Option<i32> {
        let direction = -attacker.direction();
        let mut cell = if attacker.direction() > 0 { self.board_size } else { -1 };
        for _ in 0..=self.board_size {
            cell += direction;
            if cell == attacker.cell || !self.is_legal(cell) {
                return None;
            }
            if self.is_occupied(cell) {
                return Some(cell);
            }
        }
        None
    }

    /// Last free cell before an edge or an occupied cell.
    pub fn last_free_space(&self, from: i32, direction: i32) -> i32 {
        let mut cell = from;
        loop {
            let next = cell + direction;
            if !self.is_legal(next) || self.is_occupied(next) {
                return cell;
            }
            cell = next;
        }
    }

    pub fn last_free_space_ahead(&self, attacker: &Position) -> i32 {
        self.last_free_space(attacker.cell, attacker.direction())
    }

    pub fn last_free_space_behind(&self, attacker: &Position) -> i32 {
        self.last_free_space(attacker.cell, -attacker.direction())
    }

    /// Where an entity at `from` comes to rest when pushed.
    ///
    /// # Returns
    ///
    /// The resting cell, and the entity it collided with if the push was
    /// stopped by one. A push stops one cell before the collision or at the edge.
    pub fn push_target(&self, from: i32, direction: i32, range: i32) -> (i32, Option<EntityId>) {
        let mut cell = from;
        for _ in 0..range {
            if !self.is_legal(cell + direction) {
                return (cell, None);
            }
            cell += direction;
            if let Some(blocker) = self.occupant(cell) {
                return (cell - direction, Some(blocker));
            }
        }
        (cell, None)
    }

    /// First target ahead plus whatever a push along the bolt would hit.
    pub fn crossbow_targets(&self, attacker: &Position) -> Vec<i32> {
        let Some(first_cell) = self.first_target_space_ahead(attacker) else {
            return Vec::new();
        };
        let (_, second) = self.push_target(first_cell, attacker.direction(), EngineConfig::TARGET_RANGE);
        let mut cells = vec![first_cell];
        if let Some(second) = second.and_then(|id| self.entity(id)) {
            cells.push(second.position.cell);
        }
        cells
    }

    pub fn all_cells(&self) -> Vec<i32> {
        (0..self.board_size.max(0)).collect()
    }

    pub fn hurt_enemy_cells(&self) -> Vec<i32> {
        self.enemies
            .iter()
            .filter(|enemy| enemy.hp.is_hurt())
            .map(|enemy| enemy.position.cell)
            .collect()
    }

    /// Direct target cells and the cells a shockwave chains into.
    ///
    /// From every direct target the chain grows outwards over consecutive
    /// occupied cells, skipping the attacker's cell and cells already chained,
    /// until it reaches a gap or the edge.
    pub fn connected_targets(&self, attacker_cell: i32, cells: &[i32]) -> (Vec<i32>, Vec<i32>) {
        let direct: Vec<i32> = self
            .find_targets(cells)
            .into_iter()
            .filter_map(|id| self.entity(id).map(|entity| entity.position.cell))
            .collect();
        let mut chained = BTreeSet::new();
        for &origin in &direct {
            for direction in [1, -1] {
                let mut cell = origin;
                loop {
                    cell += direction;
                    if !self.is_legal(cell) {
                        break;
                    }
                    if chained.contains(&cell) || cell == attacker_cell {
                        continue;
                    }
                    if !self.is_occupied(cell) {
                        break;
                    }
                    chained.insert(cell);
                }
            }
        }
        (direct, chained.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::entity::{Entity, EntityId, Facing, Hp, Position};
    use crate::state::room::{BattleRoom, RoomKind};
    use crate::state::roster::{EnemyKind, HeroKind};

    fn room(hero_cell: i32, enemy_cells: &[i32]) -> BattleRoom {
        let hero = Entity::hero(HeroKind::Wanderer, Position::new(hero_cell, Facing::Right), Hp::full(5));
        let enemies = enemy_cells
            .iter()
            .enumerate()
            .map(|(index, &cell)| {
                Entity::enemy(
                    EntityId(index as u32 + 1),
                    EnemyKind::Ashigaru,
                    Position::new(cell, Facing::Left),
                    Hp::full(2),
                )
            })
            .collect();
        // Bamboo Grove, first battle: five cells
        BattleRoom::new(Some(RoomKind::BambooGrove), 0, 0, hero).with_enemies(enemies)
    }

    #[test]
    fn find_targets_orders_hero_last() {
        let room = room(1, &[3, 1]);
        assert_eq!(room.find_targets(&[1, 3]), vec![EntityId(1), EntityId(2), EntityId::HERO]);
        assert!(room.find_targets(&[4]).is_empty());
    }

    #[test]
    fn first_and_last_targets_ahead() {
        let room = room(0, &[2, 4]);
        let hero = room.hero.position;
        assert_eq!(room.first_target_space_ahead(&hero), Some(2));
        assert_eq!(room.last_target_space_ahead(&hero), Some(4));
        assert_eq!(room.first_target_space_behind(&hero), None);
        assert_eq!(room.first_target_space_ahead_in_range(&hero, 1), None);
    }

    #[test]
    fn last_target_stops_at_attacker() {
        let room = room(4, &[1]);
        let mut hero = room.hero.position;
        assert_eq!(room.last_target_space_ahead(&hero), None);
        hero.flip();
        assert_eq!(room.last_target_space_ahead(&hero), Some(1));
    }

    #[test]
    fn last_free_space_stops_before_blockers() {
        let room = room(0, &[3]);
        assert_eq!(room.last_free_space(0, 1), 2);
        assert_eq!(room.last_free_space(0, -1), 0);
        assert_eq!(room.last_free_space(4, 1), 4);
    }

    #[test]
    fn push_collides_or_stops_at_edge() {
        let room = room(0, &[1, 3]);
        assert_eq!(room.push_target(1, 1, 10), (2, Some(EntityId(2))));
        assert_eq!(room.push_target(3, 1, 10), (4, None));
        assert_eq!(room.push_target(3, 1, 0), (3, None));
    }

    #[test]
    fn crossbow_hits_the_blocker_too() {
        let room = room(0, &[2, 4]);
        assert_eq!(room.crossbow_targets(&room.hero.position), vec![2, 4]);
    }

    #[test]
    fn shockwave_chains_over_adjacent_cells() {
        let room = room(0, &[1, 2, 4]);
        let (direct, chained) = room.connected_targets(0, &[1]);
        assert_eq!(direct, vec![1]);
        assert_eq!(chained, vec![2]);
    }

    #[test]
    fn targets_around_prefer_right() {
        let room = room(2, &[0, 4]);
        assert_eq!(room.first_target_spaces_around(&room.hero.position), vec![4, 0]);
    }
}
