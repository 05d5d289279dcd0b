//! Conversion between the raw save layout and core snapshots.

use std::collections::BTreeMap;
use std::str::FromStr;

use showdown_core::state::{PickupMap, ShopLocation, ShopType, TileIntent};
use showdown_core::{
    AttackEffect, BattleRoom, EliteKind, EnemyAction, EnemyData, EnemyKind, Entity, EntityId, Facing, GamePhase,
    GameStats, HeroData, HeroKind, Hp, Pickup, Position, RewardRoom, Role, RoomKind, ShopItem, ShopRoom, SkillKind,
    Skills, Snapshot, Status, TileEffect, Weapon, WeaponKind,
};

use super::SaveError;
use super::layout::{
    RawCombatRoom, RawEnemy, RawEntityState, RawHero, RawMapSave, RawProgression, RawReward, RawRewardRoom,
    RawRunStats, RawSave, RawShopData, RawShopRoom, RawTile,
};

fn unknown(field: &'static str, value: impl ToString) -> SaveError {
    SaveError::UnknownValue {
        field,
        value: value.to_string(),
    }
}

fn same_length(left: &'static str, left_len: usize, right: &'static str, right_len: usize) -> Result<(), SaveError> {
    if left_len == right_len {
        Ok(())
    } else {
        Err(SaveError::LengthMismatch {
            left,
            left_len,
            right,
            right_len,
        })
    }
}

// ============================================================================
// Raw -> Snapshot
// ============================================================================

/// Builds the snapshot a save file describes.
///
/// The phase follows the save's precedence: map selection, then an open shop,
/// then an open reward screen, otherwise battle.
///
/// # Errors
///
/// Enum codes the game does not define and paired lists of different lengths.
pub fn to_snapshot(raw: &RawSave) -> Result<Snapshot, SaveError> {
    let skills = skills_from(&raw.skills, &raw.skills_level)?;
    let room = battle_room_from(raw, &skills)?;
    let shop = shop_from(&raw.shop_room, &raw.map_save_data.current_location)?;
    let reward = reward_from(&raw.reward_room)?;

    let phase = if raw.map_selection_in_progress {
        GamePhase::MapJourney
    } else if shop.is_some() {
        GamePhase::Shop
    } else if reward.is_some() {
        GamePhase::BattleRewards
    } else {
        GamePhase::Battle
    };

    Ok(Snapshot {
        skills,
        stats: stats_from(&raw.version, &raw.run_stats),
        deck: raw.deck.iter().map(weapon_from).collect::<Result<_, _>>()?,
        potions: raw.potions.clone(),
        phase,
        location: raw.map_save_data.current_location.clone(),
        room,
        shop,
        reward,
    })
}

fn stats_from(version: &str, raw: &RawRunStats) -> GameStats {
    GameStats {
        version: version.to_string(),
        turn_arounds: raw.turn_arounds,
        coins: raw.coins,
        combos: raw.combos,
        turns: raw.turns,
        time: raw.time,
        combat_rooms_cleared: raw.combat_rooms_cleared,
        scroll_pickups: raw.scroll_pickups,
        potion_pickups: raw.potion_pickups,
        heal_pickups: raw.heal_pickups,
        friendly_kills: raw.friendly_kills,
        hits: raw.hits,
        day: raw.day,
        consumables_used: raw.consumables_used,
        new_tiles_picked: raw.new_tiles_picked,
    }
}

fn skills_from(codes: &[i32], levels: &[i32]) -> Result<Skills, SaveError> {
    same_length("skills", codes.len(), "skillsLevel", levels.len())?;
    let mut skills = BTreeMap::new();
    for (code, level) in codes.iter().zip(levels) {
        let skill = SkillKind::from_code(*code).ok_or_else(|| unknown("skill", code))?;
        skills.insert(skill, *level);
    }
    Ok(Skills(skills))
}

fn weapon_from(raw: &RawTile) -> Result<Weapon, SaveError> {
    let kind = WeaponKind::from_code(raw.weapon_type).ok_or_else(|| unknown("weapon type", raw.weapon_type))?;
    let attack_effect = match raw.attack_effect {
        0 => None,
        code => Some(AttackEffect::from_code(code).ok_or_else(|| unknown("attack effect", code))?),
    };
    let tile_effect = match raw.tile_effect {
        0 => None,
        code => Some(TileEffect::from_code(code).ok_or_else(|| unknown("tile effect", code))?),
    };
    Ok(Weapon {
        kind,
        cooldown: raw.cooldown,
        cooldown_charge: raw.cooldown_charge,
        strength: raw.strength,
        base_strength: raw.base_strength,
        level: raw.level,
        max_level: raw.max_level,
        attack_effect,
        tile_effect,
    })
}

fn queue_from(raw: &[RawTile]) -> Result<Vec<Weapon>, SaveError> {
    raw.iter().map(weapon_from).collect()
}

fn status_from(raw: &RawEntityState) -> (Status, Hp) {
    let status = Status {
        shield: raw.shield,
        curse: raw.curse,
        ice: raw.ice,
        poison: raw.poison,
    };
    (status, Hp::new(raw.hp, raw.max_hp))
}

fn hero_from(raw: &RawHero, skills: &Skills) -> Result<Entity, SaveError> {
    let kind = HeroKind::from_repr(raw.hero_enum).ok_or_else(|| unknown("hero", raw.hero_enum))?;
    let (status, hp) = status_from(&raw.entity_state);
    let mut hero = Entity::hero(kind, Position::new(raw.cell, Facing::from_code(raw.facing)), hp);
    hero.status = status;
    hero.attack_queue = queue_from(&raw.attack_queue)?;
    hero.role = Role::Hero(HeroData {
        kind,
        special_cooldown: raw.special_move_cooldown,
        reactive_shield: skills.has(SkillKind::ReactiveShield),
    });
    Ok(hero)
}

fn enemy_from(index: usize, raw: &RawEnemy) -> Result<Entity, SaveError> {
    let kind = EnemyKind::from_code(raw.enemy_enum).ok_or_else(|| unknown("enemy", raw.enemy_enum))?;
    let action = EnemyAction::from_code(raw.action).ok_or_else(|| unknown("enemy action", raw.action))?;
    let previous_action =
        EnemyAction::from_code(raw.previous_action).ok_or_else(|| unknown("enemy action", raw.previous_action))?;
    let elite = EliteKind::from_repr(raw.elite_type).ok_or_else(|| unknown("elite type", raw.elite_type))?;
    let next_tile = (raw.tile_to_play >= 0).then_some(TileIntent {
        tile: raw.tile_to_play,
        effect: raw.enemy_tile_effect,
    });

    let (status, hp) = status_from(&raw.entity_state);
    let id = EntityId(index as u32 + 1);
    let mut enemy = Entity::enemy(id, kind, Position::new(raw.cell, Facing::from_code(raw.facing)), hp);
    enemy.status = status;
    enemy.attack_queue = queue_from(&raw.attack_queue)?;
    enemy.role = Role::Enemy(EnemyData {
        kind,
        action,
        previous_action,
        next_tile,
        elite,
        first_turn: raw.first_turn,
        pattern_index: raw.pattern_index,
    });
    Ok(enemy)
}

fn pickups_from(kinds: &[i32], cells: &[i32]) -> Result<PickupMap, SaveError> {
    same_length("pickups", kinds.len(), "pickupsCellIndex", cells.len())?;
    let mut pickups = PickupMap::new();
    for (code, cell) in kinds.iter().zip(cells) {
        let kind = Pickup::from_code(*code)
            .filter(|kind| *kind != Pickup::Any)
            .ok_or_else(|| unknown("pickup", code))?;
        *pickups.entry(*cell).or_default().entry(kind).or_insert(0) += 1;
    }
    Ok(pickups)
}

fn battle_room_from(raw: &RawSave, skills: &Skills) -> Result<BattleRoom, SaveError> {
    let progression = &raw.progression_save_data;
    let kind = RoomKind::from_str(&raw.map_save_data.current_location).ok();
    let variant = if kind.is_some() { progression.room_variant } else { -1 };

    let mut room = BattleRoom::new(kind, progression.progression, variant, hero_from(&raw.hero, skills)?);
    room.corrupted_sectors = progression.corrupted_boss_sectors.clone();
    room.pickups = pickups_from(&raw.pickups, &raw.pickups_cell_index)?;
    match &raw.combat_room {
        Some(combat) => {
            room.enemies = combat
                .enemies
                .iter()
                .enumerate()
                .map(|(index, enemy)| enemy_from(index, enemy))
                .collect::<Result<_, _>>()?;
            room.wave_number = combat.wave_number;
            room.until_next_wave = combat.until_next_wave;
        }
        None => {
            room.wave_number = -1;
            room.until_next_wave = -1;
        }
    }
    Ok(room)
}

fn reward_from(raw: &RawRewardRoom) -> Result<Option<RewardRoom>, SaveError> {
    if !raw.reward.in_progress {
        return Ok(None);
    }
    Ok(Some(RewardRoom {
        reroll_price: raw.reroll_price,
        exhausted: raw.reward.exhausted,
        tiles: queue_from(&raw.reward.tile_rewards)?,
        upgrade: raw.reward.tile_upgrade,
    }))
}

fn shop_from(raw: &RawShopRoom, location: &str) -> Result<Option<ShopRoom>, SaveError> {
    if !raw.reward.in_progress {
        return Ok(None);
    }
    let data = &raw.shop_data;
    same_length(
        "shopItemNames",
        data.shop_item_names.len(),
        "shopItemsSale",
        data.shop_items_sale.len(),
    )?;
    let shop_type = |name: &str| ShopType::from_str(name).map_err(|_| unknown("shop type", name));
    Ok(Some(ShopRoom {
        location: ShopLocation::from_str(location).map_err(|_| unknown("shop location", location))?,
        types: [shop_type(&raw.left_shop_type)?, shop_type(&raw.right_shop_type)?],
        items: data
            .shop_item_names
            .iter()
            .zip(&data.shop_items_sale)
            .map(|(name, on_sale)| ShopItem::from_code(name, *on_sale))
            .collect(),
        upgrade: raw.reward.tile_upgrade,
        upgrade_price: raw.reward.price,
        already_upgraded: data.already_upgraded,
        free_potion: data.free_potion,
        exhausted: raw.reward.exhausted,
    }))
}

// ============================================================================
// Snapshot -> Raw
// ============================================================================

/// Writes a snapshot back into the save layout.
///
/// Only the phase's own screen is marked in progress, so decoding the result
/// yields the same snapshot.
pub fn from_snapshot(snapshot: &Snapshot) -> RawSave {
    let stats = &snapshot.stats;
    let room = &snapshot.room;

    let mut pickups = Vec::new();
    let mut pickups_cell_index = Vec::new();
    for (cell, kinds) in &room.pickups {
        for (kind, total) in kinds {
            for _ in 0..*total {
                pickups.push(kind.code());
                pickups_cell_index.push(*cell);
            }
        }
    }

    RawSave {
        version: stats.version.clone(),
        run_stats: RawRunStats {
            turn_arounds: stats.turn_arounds,
            coins: stats.coins,
            combos: stats.combos,
            turns: stats.turns,
            time: stats.time,
            combat_rooms_cleared: stats.combat_rooms_cleared,
            scroll_pickups: stats.scroll_pickups,
            potion_pickups: stats.potion_pickups,
            heal_pickups: stats.heal_pickups,
            friendly_kills: stats.friendly_kills,
            hits: stats.hits,
            day: stats.day,
            consumables_used: stats.consumables_used,
            new_tiles_picked: stats.new_tiles_picked,
        },
        skills: snapshot.skills.iter().map(|(skill, _)| skill.code()).collect(),
        skills_level: snapshot.skills.iter().map(|(_, level)| level).collect(),
        deck: snapshot.deck.iter().map(raw_tile).collect(),
        potions: snapshot.potions.clone(),
        pickups,
        pickups_cell_index,
        map_selection_in_progress: snapshot.phase == GamePhase::MapJourney,
        progression_save_data: RawProgression {
            progression: room.progression,
            room_variant: room.variant,
            corrupted_boss_sectors: room.corrupted_sectors.clone(),
        },
        map_save_data: RawMapSave {
            current_location: snapshot.location.clone(),
        },
        combat_room: Some(RawCombatRoom {
            enemies: room.enemies.iter().filter_map(raw_enemy).collect(),
            wave_number: room.wave_number,
            until_next_wave: room.until_next_wave,
        }),
        hero: raw_hero(&room.hero),
        reward_room: snapshot.reward.as_ref().map(raw_reward_room).unwrap_or_default(),
        shop_room: snapshot.shop.as_ref().map(raw_shop_room).unwrap_or_default(),
    }
}

fn raw_tile(weapon: &Weapon) -> RawTile {
    RawTile {
        weapon_type: weapon.kind.code(),
        cooldown: weapon.cooldown,
        cooldown_charge: weapon.cooldown_charge,
        strength: weapon.strength,
        base_strength: weapon.base_strength,
        level: weapon.level,
        max_level: weapon.max_level,
        attack_effect: weapon.attack_effect.map_or(0, AttackEffect::code),
        tile_effect: weapon.tile_effect.map_or(0, TileEffect::code),
    }
}

fn raw_state(entity: &Entity) -> RawEntityState {
    RawEntityState {
        shield: entity.status.shield,
        curse: entity.status.curse,
        ice: entity.status.ice,
        poison: entity.status.poison,
        hp: entity.hp.hp,
        max_hp: entity.hp.max_hp,
    }
}

fn raw_hero(hero: &Entity) -> RawHero {
    let data = hero.hero_data();
    RawHero {
        hero_enum: data.map_or(HeroKind::Wanderer, |data| data.kind) as i32,
        entity_state: raw_state(hero),
        facing: hero.position.facing.code(),
        cell: hero.position.cell,
        attack_queue: hero.attack_queue.iter().map(raw_tile).collect(),
        special_move_cooldown: data.map_or(0, |data| data.special_cooldown),
    }
}

fn raw_enemy(enemy: &Entity) -> Option<RawEnemy> {
    let data = enemy.enemy_data()?;
    Some(RawEnemy {
        enemy_enum: data.kind.code(),
        entity_state: raw_state(enemy),
        facing: enemy.position.facing.code(),
        cell: enemy.position.cell,
        attack_queue: enemy.attack_queue.iter().map(raw_tile).collect(),
        action: data.action.code(),
        previous_action: data.previous_action.code(),
        tile_to_play: data.next_tile.map_or(-1, |intent| intent.tile),
        enemy_tile_effect: data.next_tile.map_or(0, |intent| intent.effect),
        first_turn: data.first_turn,
        elite_type: data.elite as i32,
        pattern_index: data.pattern_index,
    })
}

fn raw_reward_room(reward: &RewardRoom) -> RawRewardRoom {
    RawRewardRoom {
        reward: RawReward {
            in_progress: true,
            exhausted: reward.exhausted,
            tile_rewards: reward.tiles.iter().map(raw_tile).collect(),
            tile_upgrade: reward.upgrade,
            price: 0,
        },
        reroll_price: reward.reroll_price,
    }
}

fn raw_shop_room(shop: &ShopRoom) -> RawShopRoom {
    RawShopRoom {
        reward: RawReward {
            in_progress: true,
            exhausted: shop.exhausted,
            tile_rewards: Vec::new(),
            tile_upgrade: shop.upgrade,
            price: shop.upgrade_price,
        },
        shop_data: RawShopData {
            shop_item_names: shop.items.iter().map(|item| item.code.clone()).collect(),
            shop_items_sale: shop.items.iter().map(|item| item.on_sale).collect(),
            already_upgraded: shop.already_upgraded,
            free_potion: shop.free_potion,
        },
        left_shop_type: shop.types[0].save_name().to_string(),
        right_shop_type: shop.types[1].save_name().to_string(),
    }
}
