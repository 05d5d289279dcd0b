use showdown_core::{
    BattleRoom, EngineConfig, EnemyAction, EnemyKind, Entity, EntityId, Facing, GamePhase, HeroKind, Hp, Pickup,
    Position, PotionKnowledge, Resolution, RoomHazards, RoomKind, Snapshot, Transition, Weapon, WeaponKind,
    resolve_transition,
};

fn room(hero: Entity, enemies: Vec<Entity>) -> BattleRoom {
    BattleRoom::new(Some(RoomKind::BambooGrove), 2, 0, hero).with_enemies(enemies)
}

fn wanderer(cell: i32, facing: Facing) -> Entity {
    Entity::hero(HeroKind::Wanderer, Position::new(cell, facing), Hp::full(5))
}

fn ashigaru(id: u32, cell: i32, hp: i32) -> Entity {
    Entity::enemy(EntityId(id), EnemyKind::Ashigaru, Position::new(cell, Facing::Left), Hp::new(hp, 3))
        .with_action(EnemyAction::Wait)
}

/// The snapshot one turn later, before the caller edits what changed.
fn next_turn(previous: &Snapshot) -> Snapshot {
    let mut next = previous.clone();
    next.stats.turns += 1;
    next
}

fn resolve(previous: &Snapshot, next: &Snapshot, knowledge: &PotionKnowledge) -> Transition {
    resolve_transition(previous, next, knowledge, &RoomHazards::new(), &EngineConfig::default())
        .expect("transition resolves")
        .expect("turn counter advanced")
}

fn unique_description(transition: &Transition) -> &str {
    match &transition.resolution {
        Resolution::Unique(explanation) => &explanation.description,
        Resolution::Ambiguous(explanations) => panic!("{} explanations match", explanations.len()),
        Resolution::NoneFound(rejections) => panic!("nothing matches: {rejections:?}"),
    }
}

#[test]
fn stepping_right_is_recognised() {
    let previous = Snapshot::new(room(wanderer(3, Facing::Right), vec![ashigaru(1, 6, 3)]));
    let mut next = next_turn(&previous);
    next.room.hero.position.cell = 4;

    let transition = resolve(&previous, &next, &PotionKnowledge::default());
    assert_eq!(unique_description(&transition), "Hero has moved right");
}

#[test]
fn waiting_against_the_left_edge_is_recognised() {
    let previous = Snapshot::new(room(wanderer(0, Facing::Left), vec![ashigaru(1, 6, 3)]));
    let next = next_turn(&previous);

    let transition = resolve(&previous, &next, &PotionKnowledge::default());
    assert_eq!(unique_description(&transition), "Hero has waited a turn");
}

#[test]
fn executing_the_queue_clears_a_lone_enemy() {
    let katana = Weapon::new(WeaponKind::Katana, 2, 3);
    let mut hero = wanderer(2, Facing::Right);
    hero.attack_queue = vec![katana.clone()];
    let previous = Snapshot::new(room(hero, vec![ashigaru(1, 3, 2)])).with_deck(vec![katana.clone()]);

    let mut next = next_turn(&previous);
    next.phase = GamePhase::BattleRewards;
    next.stats.combat_rooms_cleared += 1;
    next.room.enemies.clear();
    next.room.hero.attack_queue.clear();
    next.deck = vec![katana.with_charge(0)];

    let transition = resolve(&previous, &next, &PotionKnowledge::default());
    assert_eq!(unique_description(&transition), "Hero has executed the queue");
}

#[test]
fn walking_over_a_scroll_pins_the_new_potion() {
    let mut previous = Snapshot::new(room(wanderer(2, Facing::Right), vec![ashigaru(1, 6, 3)]));
    previous.room.pickups.entry(3).or_default().insert(Pickup::MassIce, 1);

    let mut next = next_turn(&previous);
    next.room.hero.position.cell = 3;
    next.room.pickups.clear();
    next.potions = vec![7];

    let transition = resolve(&previous, &next, &PotionKnowledge::default());
    assert_eq!(unique_description(&transition), "Hero has moved right");
    assert_eq!(transition.knowledge.pinned(7), Some(Pickup::MassIce));
}

#[test]
fn turns_that_did_not_advance_are_skipped() {
    let snapshot = Snapshot::new(room(wanderer(2, Facing::Right), vec![]));
    let resolved = resolve_transition(
        &snapshot,
        &snapshot,
        &PotionKnowledge::default(),
        &RoomHazards::new(),
        &EngineConfig::default(),
    )
    .unwrap();
    assert!(resolved.is_none());
}
