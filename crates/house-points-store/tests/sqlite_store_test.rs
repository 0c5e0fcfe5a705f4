//! Integration tests for `SqliteScoreStore`.

use std::sync::Arc;

use house_points_core::error::DomainError;
use house_points_core::house::{House, HouseRegistry};
use house_points_core::store::ScoreStore;
use house_points_store::SqliteScoreStore;
use tempfile::TempDir;

fn house(registry: &HouseRegistry, name: &str) -> House {
    registry.resolve(name).unwrap().clone()
}

async fn open_store(dir: &TempDir, registry: HouseRegistry) -> SqliteScoreStore {
    SqliteScoreStore::open(&dir.path().join("points.db"), registry)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_initialize_creates_zeroed_counters() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, HouseRegistry::default()).await;

    store.initialize().await.unwrap();

    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.len(), 4);
    assert!(standings.iter().all(|s| s.points == 0));
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let registry = HouseRegistry::default();
    let store = open_store(&dir, registry.clone()).await;
    store.initialize().await.unwrap();
    store.apply_delta(&house(&registry, "hufflepuff"), 15).await.unwrap();

    store.initialize().await.unwrap();

    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("hufflepuff"), Some(15));
}

#[tokio::test]
async fn test_initialize_adds_houses_registered_later() {
    let dir = TempDir::new().unwrap();
    let small = HouseRegistry::new(["gryffindor"]).unwrap();
    let store = open_store(&dir, small.clone()).await;
    store.initialize().await.unwrap();
    store.apply_delta(&house(&small, "gryffindor"), 3).await.unwrap();
    drop(store);

    let store = open_store(&dir, HouseRegistry::default()).await;
    store.initialize().await.unwrap();

    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("gryffindor"), Some(3));
    assert_eq!(standings.points_of("slytherin"), Some(0));
}

#[tokio::test]
async fn test_get_all_before_initialize_fails() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, HouseRegistry::default()).await;

    let result = store.get_all().await;

    assert!(matches!(result, Err(DomainError::Persistence(_))));
}

#[tokio::test]
async fn test_apply_delta_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let registry = HouseRegistry::default();
    let store = open_store(&dir, registry.clone()).await;
    store.initialize().await.unwrap();
    store.apply_delta(&house(&registry, "gryffindor"), 50).await.unwrap();
    let total = store
        .apply_delta(&house(&registry, "gryffindor"), -20)
        .await
        .unwrap();
    assert_eq!(total, 30);
    drop(store);

    let reopened = open_store(&dir, registry).await;
    let standings = reopened.get_all().await.unwrap();
    assert_eq!(standings.points_of("gryffindor"), Some(30));
}

#[tokio::test]
async fn test_apply_delta_rejects_unknown_house() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, HouseRegistry::default()).await;
    store.initialize().await.unwrap();
    let other = HouseRegistry::new(["azkaban"]).unwrap();

    let result = store.apply_delta(&other.houses()[0], 1).await;

    assert_eq!(result, Err(DomainError::UnknownHouse("azkaban".to_owned())));
}

#[tokio::test]
async fn test_apply_delta_overflow_keeps_stored_value() {
    let dir = TempDir::new().unwrap();
    let registry = HouseRegistry::default();
    let target = house(&registry, "ravenclaw");
    let store = open_store(&dir, registry).await;
    store.initialize().await.unwrap();
    store.apply_delta(&target, i64::MIN).await.unwrap();

    let result = store.apply_delta(&target, -1).await;

    assert!(matches!(result, Err(DomainError::ScoreOverflow { .. })));
    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("ravenclaw"), Some(i64::MIN));
}

#[tokio::test]
async fn test_connect_accepts_database_url() {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", dir.path().join("url.db").display());

    let store = SqliteScoreStore::connect(&url, HouseRegistry::default())
        .await
        .unwrap();
    store.initialize().await.unwrap();

    assert_eq!(store.get_all().await.unwrap().len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deltas_on_one_house_sum_exactly() {
    let dir = TempDir::new().unwrap();
    let registry = HouseRegistry::default();
    let target = house(&registry, "slytherin");
    let store = Arc::new(open_store(&dir, registry).await);
    store.initialize().await.unwrap();

    let mut tasks = Vec::new();
    for i in 1..=25_i64 {
        let store = Arc::clone(&store);
        let target = target.clone();
        tasks.push(tokio::spawn(async move {
            store.apply_delta(&target, i).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("slytherin"), Some((1..=25).sum()));
}
