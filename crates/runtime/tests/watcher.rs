use std::time::Duration;

use showdown_core::{BattleRoom, Entity, Facing, HeroKind, Hp, Position, RoomKind, Snapshot};
use showdown_runtime::save::write_snapshot;
use showdown_runtime::{SaveFileWatcher, SnapshotSource, WatcherConfig};
use tokio::time::timeout;

fn snapshot(turns: i32) -> Snapshot {
    let hero = Entity::hero(HeroKind::Wanderer, Position::new(2, Facing::Right), Hp::full(5));
    let mut snapshot = Snapshot::new(BattleRoom::new(Some(RoomKind::BambooGrove), 0, 0, hero));
    snapshot.stats.turns = turns;
    snapshot
}

fn watcher(path: std::path::PathBuf) -> SaveFileWatcher {
    SaveFileWatcher::new(WatcherConfig {
        path,
        poll_interval: Duration::from_millis(10),
        retry_budget: 2,
        retry_delay: Duration::from_millis(5),
    })
}

#[tokio::test]
async fn waits_for_the_file_then_ends_when_it_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("RunSaveData.dat");
    let mut watcher = watcher(path.clone());

    let contents = write_snapshot(&snapshot(3)).unwrap();
    let writer_path = path.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(40)).await;
        tokio::fs::write(writer_path, contents).await.unwrap();
    });

    let first = timeout(Duration::from_secs(5), watcher.next_snapshot())
        .await
        .expect("file appears in time")
        .unwrap();
    assert_eq!(first.map(|snapshot| snapshot.stats.turns), Some(3));

    std::fs::remove_file(&path).unwrap();
    let end = timeout(Duration::from_secs(5), watcher.next_snapshot())
        .await
        .expect("removal is noticed in time")
        .unwrap();
    assert!(end.is_none());
}

#[tokio::test]
async fn undecodable_saves_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("RunSaveData.dat");
    // Valid base64 around a complete JSON document of the wrong shape.
    std::fs::write(&path, "eyJ2ZXJzaW9uIjogMX0=").unwrap();

    let mut watcher = watcher(path);
    let result = timeout(Duration::from_secs(5), watcher.next_snapshot())
        .await
        .expect("read finishes in time");
    assert!(result.is_err());
}
