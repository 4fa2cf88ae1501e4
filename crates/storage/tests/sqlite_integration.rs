use chrono::Duration;
use quiz_core::model::GameRecord;
use quiz_core::time::fixed_now;
use storage::repository::{StatisticsStore, Storage};
use storage::sqlite::SqliteRepository;

fn build_record(correct: u32, minutes: i64) -> GameRecord {
    GameRecord::new(correct, 10, fixed_now() + Duration::minutes(minutes)).unwrap()
}

#[tokio::test]
async fn sqlite_empty_store_has_no_best_game() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_empty?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let stats = repo.statistics().await.expect("statistics");
    assert_eq!(stats.games_count, 0);
    assert!(stats.best_game.is_none());
    assert!(stats.total_accuracy.abs() < f64::EPSILON);
}

#[tokio::test]
async fn sqlite_aggregates_stored_games() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_aggregate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let best = build_record(9, 1);
    repo.store(&build_record(7, 0)).await.unwrap();
    repo.store(&best).await.unwrap();
    repo.store(&build_record(9, 2)).await.unwrap();
    repo.store(&build_record(8, 3)).await.unwrap();

    let stats = repo.statistics().await.expect("statistics");
    assert_eq!(stats.games_count, 4);
    assert_eq!(stats.best_game, Some(best));
    assert!((stats.total_accuracy - 82.5).abs() < 1e-9);
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.store(&build_record(5, 0)).await.unwrap();
    repo.migrate().await.expect("second migrate");

    let stats = repo.statistics().await.expect("statistics");
    assert_eq!(stats.games_count, 1);
}

#[tokio::test]
async fn storage_facade_uses_sqlite_backend() {
    let storage = Storage::sqlite("sqlite:file:memdb_facade?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.statistics.store(&build_record(4, 0)).await.unwrap();

    let stats = storage.statistics.statistics().await.unwrap();
    assert_eq!(stats.games_count, 1);
    assert_eq!(stats.best_game.map(|g| g.correct()), Some(4));
}
