//! MongoDB implementation of EventRepository

use crate::error::{EventError, Result};
use crate::models::{Event, EventType, Session, Speaker, Venue};
use crate::query::EventQuery;
use crate::repository::EventRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{self, Document, doc};
use mongodb::options::FindOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

const COLLECTION: &str = "events";

/// Stored shape of an [`Event`]: string id and native BSON dates, so the
/// server sorts `date` chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    date: bson::DateTime,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    topic: String,
    description: String,
    #[serde(default)]
    sessions: Vec<Session>,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    speakers: Vec<Speaker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hosted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_info: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_bson_datetime(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_datetime(dt: bson::DateTime, field: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| EventError::Database(format!("Stored {} is out of range", field)))
}

impl EventDocument {
    fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            date: to_bson_datetime(event.date),
            event_type: event.event_type.to_string(),
            image: event.image.clone(),
            topic: event.topic.clone(),
            description: event.description.clone(),
            sessions: event.sessions.clone(),
            price: event.price,
            speakers: event.speakers.clone(),
            hosted_by: event.hosted_by.clone(),
            venue: event.venue.clone(),
            additional_info: event.additional_info.clone(),
            tags: event.tags.clone(),
            created_at: to_bson_datetime(event.created_at),
            updated_at: to_bson_datetime(event.updated_at),
        }
    }

    fn into_event(self) -> Result<Event> {
        let id = Uuid::parse_str(&self.id).map_err(|e| {
            EventError::Database(format!("Stored id {} is not a UUID: {}", self.id, e))
        })?;
        let event_type = self.event_type.parse::<EventType>().map_err(|_| {
            EventError::Database(format!(
                "Stored event {} has unknown type {}",
                self.id, self.event_type
            ))
        })?;

        Ok(Event {
            id,
            title: self.title,
            date: from_bson_datetime(self.date, "date")?,
            event_type,
            image: self.image,
            topic: self.topic,
            description: self.description,
            sessions: self.sessions,
            price: self.price,
            speakers: self.speakers,
            hosted_by: self.hosted_by,
            venue: self.venue,
            additional_info: self.additional_info,
            tags: self.tags,
            created_at: from_bson_datetime(self.created_at, "createdAt")?,
            updated_at: from_bson_datetime(self.updated_at, "updatedAt")?,
        })
    }
}

/// Build filter document from EventQuery
fn build_filter(query: &EventQuery) -> Document {
    let mut filter = Document::new();

    if let Some(event_type) = &query.event_type {
        filter.insert("type", event_type.as_str());
    }

    if let Some(pattern) = query.search_pattern() {
        filter.insert(
            "$or",
            vec![
                doc! { "title": { "$regex": pattern.as_str(), "$options": "i" } },
                doc! { "tags": { "$regex": pattern.as_str(), "$options": "i" } },
            ],
        );
    }

    filter
}

/// MongoDB-based event repository
#[derive(Clone)]
pub struct MongoEventRepository {
    database: Database,
    collection: Collection<EventDocument>,
}

impl MongoEventRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(COLLECTION),
        }
    }

    /// Create indexes backing the list endpoint's sort and filters
    pub async fn create_indexes(&self) -> Result<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "date": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "type": 1, "date": 1 })
                .build(),
            IndexModel::builder().keys(doc! { "tags": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = COLLECTION, "Event indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MongoEventRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let options = FindOptions::builder()
            .sort(doc! { "date": 1, "createdAt": 1, "_id": 1 })
            .build();

        let cursor = self
            .collection
            .find(build_filter(query))
            .with_options(options)
            .await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        documents.into_iter().map(EventDocument::into_event).collect()
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        self.collection
            .find_one(doc! { "_id": id.to_string() })
            .await?
            .map(EventDocument::into_event)
            .transpose()
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: Event) -> Result<Event> {
        self.collection
            .insert_one(EventDocument::from_event(&event))
            .await?;
        Ok(event)
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventFilter;
    use chrono::TimeZone;

    fn sample_event() -> Event {
        let mut event = Event::new(
            "Tech Talk",
            Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap(),
            EventType::Online,
            "AI",
            "intro",
        )
        .with_tags(["ml", "ai"])
        .with_price(15.5);
        event.venue = Some(Venue {
            name: Some("Hall A".into()),
            address: None,
        });
        event
    }

    #[test]
    fn test_unconstrained_query_builds_empty_filter() {
        assert_eq!(build_filter(&EventQuery::all()), doc! {});
    }

    #[test]
    fn test_type_filter_is_equality() {
        let query = EventQuery::from(&EventFilter::default().with_type("Offline"));
        assert_eq!(build_filter(&query), doc! { "type": "Offline" });
    }

    #[test]
    fn test_search_filter_is_case_insensitive_or_on_title_and_tags() {
        let query = EventQuery::from(
            &EventFilter::default()
                .with_type("Online")
                .with_search("rust.rs"),
        );

        assert_eq!(
            build_filter(&query),
            doc! {
                "type": "Online",
                "$or": [
                    { "title": { "$regex": r"rust\.rs", "$options": "i" } },
                    { "tags": { "$regex": r"rust\.rs", "$options": "i" } },
                ],
            }
        );
    }

    #[test]
    fn test_document_conversion_preserves_event() {
        let mut event = sample_event();
        // BSON dates carry millisecond precision
        event.created_at = DateTime::from_timestamp_millis(event.created_at.timestamp_millis()).unwrap();
        event.updated_at = event.created_at;

        let document = EventDocument::from_event(&event);
        assert_eq!(document.id, event.id.to_string());
        assert_eq!(document.event_type, "Online");

        let stored = bson::to_document(&document).unwrap();
        assert!(matches!(stored.get("date"), Some(bson::Bson::DateTime(_))));
        assert!(stored.contains_key("createdAt"));
        assert!(!stored.contains_key("hostedBy"));

        let back: EventDocument = bson::from_document(stored).unwrap();
        assert_eq!(back.into_event().unwrap(), event);
    }

    #[test]
    fn test_document_with_bad_id_is_database_error() {
        let mut document = EventDocument::from_event(&sample_event());
        document.id = "64b7f0c2a1b2c3d4e5f60718".into();

        assert!(matches!(document.into_event(), Err(EventError::Database(_))));
    }
}
