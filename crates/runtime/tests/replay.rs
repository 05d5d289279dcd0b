use showdown_core::{
    BattleRoom, EnemyAction, EnemyKind, Entity, EntityId, Facing, GamePhase, HeroKind, Hp, Position, PotionKnowledge,
    RoomKind, Snapshot,
};
use showdown_runtime::{InMemoryKnowledgeRepository, KnowledgeRepository, MemorySource, Report, Runtime};

fn battle_start() -> Snapshot {
    let hero = Entity::hero(HeroKind::Wanderer, Position::new(3, Facing::Right), Hp::full(5));
    let ashigaru = Entity::enemy(EntityId(1), EnemyKind::Ashigaru, Position::new(6, Facing::Left), Hp::full(3))
        .with_action(EnemyAction::Wait);
    let mut snapshot =
        Snapshot::new(BattleRoom::new(Some(RoomKind::BambooGrove), 2, 0, hero).with_enemies(vec![ashigaru]));
    snapshot.stats.day = 3;
    snapshot
}

async fn collect(mut runtime: Runtime) -> Vec<Report> {
    let mut reports = Vec::new();
    while let Some(report) = runtime.next_report().await {
        reports.push(report);
    }
    runtime.shutdown().await.expect("worker finished cleanly");
    reports
}

#[tokio::test]
async fn a_replayed_run_is_narrated_turn_by_turn() {
    let start = battle_start();
    let mut moved = start.clone();
    moved.stats.turns = 1;
    moved.stats.time = 4;
    moved.room.hero.position.cell = 4;
    let mut map = moved.clone();
    map.phase = GamePhase::MapJourney;

    let runtime = Runtime::builder()
        .source(MemorySource::new([start, moved, map]))
        .knowledge_repository(InMemoryKnowledgeRepository::new())
        .build()
        .await
        .expect("runtime builds");
    let reports = collect(runtime).await;

    assert_eq!(reports[0], Report::RunStarted { day: 3 });
    assert!(matches!(&reports[1], Report::BattleStarted { resumed: false, .. }));
    assert_eq!(reports[2], Report::Turn { turn: 1, time: 4 });
    assert_eq!(
        reports[3],
        Report::Explained {
            description: "Hero has moved right".into()
        }
    );
    assert_eq!(reports[4], Report::MapEntered);
    assert_eq!(reports.last(), Some(&Report::RunFinished));
}

#[tokio::test]
async fn joining_mid_run_reuses_stored_potion_knowledge() {
    let repository = InMemoryKnowledgeRepository::new();
    let mut knowledge = PotionKnowledge::new(&[7]);
    knowledge
        .assured_guess(7, showdown_core::Pickup::MassIce)
        .expect("fresh knowledge accepts a pin");
    repository.save(3, &knowledge).expect("in-memory save");

    let mut snapshot = battle_start().with_potions(vec![7]);
    snapshot.stats.turns = 9;

    let runtime = Runtime::builder()
        .source(MemorySource::new([snapshot]))
        .knowledge_repository(repository)
        .build()
        .await
        .expect("runtime builds");
    let reports = collect(runtime).await;

    assert_eq!(reports[0], Report::JoinedMidRun);
    assert!(matches!(&reports[1], Report::BattleStarted { resumed: true, .. }));
    assert_eq!(reports.last(), Some(&Report::RunFinished));
}
