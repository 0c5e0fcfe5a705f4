//! End-to-end tests for the scoring dispatcher over a real in-memory store.

use std::sync::Arc;
use std::time::Duration;

use house_points_core::house::HouseRegistry;
use house_points_core::identity::{Identity, UserId};
use house_points_core::roster::AdminRoster;
use house_points_core::store::ScoreStore;
use house_points_scoring::application::authorization::Authorizer;
use house_points_scoring::application::dispatcher::Dispatcher;
use house_points_scoring::application::replies;
use house_points_scoring::domain::commands::Direction;
use house_points_store::InMemoryScoreStore;
use house_points_test_support::{HangingAdminRoster, StaticAdminRoster};

const HEADMASTER: i64 = 1;
const PREFECT: i64 = 2;
const STUDENT: i64 = 3;
const GREAT_HALL: i64 = -1_001;

async fn setup(roster: Arc<dyn AdminRoster>) -> (Dispatcher, Arc<InMemoryScoreStore>) {
    let registry = HouseRegistry::default();
    let store = Arc::new(InMemoryScoreStore::new(registry.clone()));
    store.initialize().await.unwrap();
    let authorizer = Arc::new(Authorizer::new(
        [UserId(HEADMASTER)],
        roster,
        Duration::from_millis(100),
    ));
    let dispatcher = Dispatcher::new(registry, store.clone(), authorizer);
    (dispatcher, store)
}

#[tokio::test]
async fn test_add_subtract_then_report() {
    let (dispatcher, _store) = setup(Arc::new(StaticAdminRoster::new(&[]))).await;
    let headmaster = Identity::private(HEADMASTER);

    let added = dispatcher
        .dispatch("/add_points 50 gryffindor", headmaster)
        .await
        .unwrap();
    let subtracted = dispatcher
        .dispatch("/subtract_points 20 gryffindor", headmaster)
        .await
        .unwrap();
    let report = dispatcher.dispatch("/report", headmaster).await.unwrap();

    assert_eq!(added, "✅ Added 50 points to Gryffindor.\nTotal: 50");
    assert_eq!(subtracted, "✅ Subtracted 20 points from Gryffindor.\nTotal: 30");
    assert_eq!(
        report,
        "🏆 Current standings:\nGryffindor: 30\nSlytherin: 0\nRavenclaw: 0\nHufflepuff: 0"
    );
}

#[tokio::test]
async fn test_uppercase_house_credits_same_counter() {
    let (dispatcher, store) = setup(Arc::new(StaticAdminRoster::new(&[]))).await;
    let headmaster = Identity::private(HEADMASTER);

    dispatcher
        .dispatch("/add_points 5 GRYFFINDOR", headmaster)
        .await
        .unwrap();
    dispatcher
        .dispatch("/add_points 5 gryffindor", headmaster)
        .await
        .unwrap();

    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("gryffindor"), Some(10));
}

#[tokio::test]
async fn test_unknown_house_gets_usage_hint_and_no_mutation() {
    let (dispatcher, store) = setup(Arc::new(StaticAdminRoster::new(&[]))).await;

    let reply = dispatcher
        .dispatch("/add_points 10 azkaban", Identity::private(HEADMASTER))
        .await
        .unwrap();

    assert_eq!(reply, replies::usage(Direction::Add, dispatcher.registry()));
    let standings = store.get_all().await.unwrap();
    assert!(standings.iter().all(|s| s.points == 0));
}

#[tokio::test]
async fn test_group_admin_can_change_points_but_student_cannot() {
    let (dispatcher, store) = setup(Arc::new(StaticAdminRoster::new(&[PREFECT]))).await;

    let prefect = dispatcher
        .dispatch("/subtract_points 10 slytherin", Identity::in_group(PREFECT, GREAT_HALL))
        .await
        .unwrap();
    let student = dispatcher
        .dispatch("/add_points 100 slytherin", Identity::in_group(STUDENT, GREAT_HALL))
        .await
        .unwrap();

    assert_eq!(prefect, "✅ Subtracted 10 points from Slytherin.\nTotal: -10");
    assert_eq!(student, replies::DENIED);
    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("slytherin"), Some(-10));
}

#[tokio::test]
async fn test_anyone_can_read_the_report() {
    let (dispatcher, _store) = setup(Arc::new(HangingAdminRoster)).await;

    let reply = dispatcher
        .dispatch("/report", Identity::in_group(STUDENT, GREAT_HALL))
        .await
        .unwrap();

    assert!(reply.starts_with("🏆 Current standings:"));
}

#[tokio::test]
async fn test_roster_timeout_denies_group_user() {
    let (dispatcher, store) = setup(Arc::new(HangingAdminRoster)).await;

    let reply = dispatcher
        .dispatch("/add_points 10 ravenclaw", Identity::in_group(PREFECT, GREAT_HALL))
        .await
        .unwrap();

    assert_eq!(reply, replies::DENIED);
    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("ravenclaw"), Some(0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_commands_keep_totals_consistent() {
    let (dispatcher, store) = setup(Arc::new(StaticAdminRoster::new(&[PREFECT]))).await;
    let dispatcher = Arc::new(dispatcher);

    let mut tasks = Vec::new();
    for i in 0..60 {
        let dispatcher = Arc::clone(&dispatcher);
        let (text, identity) = match i % 4 {
            0 => ("/add_points 3 hufflepuff", Identity::private(HEADMASTER)),
            1 => ("/subtract_points 1 hufflepuff", Identity::in_group(PREFECT, GREAT_HALL)),
            2 => ("/add_points 2 ravenclaw", Identity::in_group(PREFECT, GREAT_HALL)),
            _ => ("/add_points 1000 hufflepuff", Identity::in_group(STUDENT, GREAT_HALL)),
        };
        tasks.push(tokio::spawn(async move {
            dispatcher.dispatch(text, identity).await.unwrap()
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let standings = store.get_all().await.unwrap();
    assert_eq!(standings.points_of("hufflepuff"), Some(15 * 3 - 15));
    assert_eq!(standings.points_of("ravenclaw"), Some(15 * 2));
    assert_eq!(standings.points_of("gryffindor"), Some(0));
}
