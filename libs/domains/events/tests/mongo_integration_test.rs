//! MongoDB repository tests against a real server in a container.
//!
//! Run with `cargo test -p domain_events -- --ignored` (needs Docker).

use chrono::{TimeZone, Utc};
use domain_events::{
    Event, EventFilter, EventQuery, EventRepository, EventType, MongoEventRepository,
};
use test_utils::{TestDataBuilder, TestMongo};
use uuid::Uuid;

fn event_on(day: u32, title: &str, event_type: EventType, tags: &[&str]) -> Event {
    Event::new(
        title,
        Utc.with_ymd_and_hms(2025, 6, day, 18, 0, 0).unwrap(),
        event_type,
        "topic",
        "description",
    )
    .with_tags(tags.iter().copied())
}

async fn seeded_repository(mongo: &TestMongo, test_name: &str) -> MongoEventRepository {
    let builder = TestDataBuilder::from_test_name(test_name);
    let repo = MongoEventRepository::new(&mongo.database(&builder.database_name()));
    repo.create_indexes().await.unwrap();

    for event in [
        event_on(28, "Summer Party", EventType::Offline, &["social"]),
        event_on(3, "Rust Async Deep Dive", EventType::Online, &["rust", "tokio"]),
        event_on(15, "Database Day", EventType::Offline, &["MongoDB", "rust"]),
    ] {
        repo.create(event).await.unwrap();
    }
    repo
}

fn titles(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.title.as_str()).collect()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_mongo_list_sorts_by_date() {
    let mongo = TestMongo::new().await;
    let repo = seeded_repository(&mongo, "mongo_list_sorts").await;

    let events = repo.list(&EventQuery::all()).await.unwrap();

    assert_eq!(
        titles(&events),
        vec!["Rust Async Deep Dive", "Database Day", "Summer Party"]
    );
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_mongo_list_filters_type_and_search() {
    let mongo = TestMongo::new().await;
    let repo = seeded_repository(&mongo, "mongo_list_filters").await;

    let offline = repo
        .list(&EventQuery::from(&EventFilter::default().with_type("Offline")))
        .await
        .unwrap();
    assert_eq!(titles(&offline), vec!["Database Day", "Summer Party"]);

    let by_tag = repo
        .list(&EventQuery::from(&EventFilter::default().with_search("mongo")))
        .await
        .unwrap();
    assert_eq!(titles(&by_tag), vec!["Database Day"]);

    let combined = repo
        .list(&EventQuery::from(
            &EventFilter::default().with_type("Online").with_search("RUST"),
        ))
        .await
        .unwrap();
    assert_eq!(titles(&combined), vec!["Rust Async Deep Dive"]);

    let literal = repo
        .list(&EventQuery::from(&EventFilter::default().with_search(".*")))
        .await
        .unwrap();
    assert!(literal.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_mongo_get_by_id_round_trip() {
    let mongo = TestMongo::new().await;
    let repo = seeded_repository(&mongo, "mongo_get_by_id").await;

    let created = repo
        .create(event_on(1, "Fetched", EventType::Online, &[]).with_price(12.5))
        .await
        .unwrap();

    let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, "Fetched");
    assert_eq!(fetched.date, created.date);
    assert_eq!(fetched.price, 12.5);

    assert!(repo.get_by_id(Uuid::now_v7()).await.unwrap().is_none());
    assert!(repo.ping().await.is_ok());
}
