//! Event domain models

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Query value meaning "no `type` constraint".
pub const TYPE_BOTH: &str = "Both";

/// How an event is attended
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum EventType {
    Online,
    Offline,
}

/// One slot of the event agenda
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Speaker {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Picture URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A conference or meetup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,

    pub title: String,

    /// When the event takes place
    pub date: DateTime<Utc>,

    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Cover image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub topic: String,

    pub description: String,

    /// Agenda, in the order given at creation
    #[serde(default)]
    pub sessions: Vec<Session>,

    /// Ticket price, 0 for free events
    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub speakers: Vec<Speaker>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,

    /// Labels matched by `search`
    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create an event with a fresh id, timestamps set to now and every
    /// optional field empty.
    pub fn new(
        title: impl Into<String>,
        date: DateTime<Utc>,
        event_type: EventType,
        topic: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            date,
            event_type,
            image: None,
            topic: topic.into(),
            description: description.into(),
            sessions: Vec::new(),
            price: 0.0,
            speakers: Vec::new(),
            hosted_by: None,
            venue: None,
            additional_info: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder: set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set price
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }
}

/// Request body for creating an event.
///
/// Required fields are optional here so that a missing field is reported as
/// a validation message rather than a JSON parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    /// Surrounding whitespace is removed
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        required(message = "Path `title` is required."),
        length(min = 1, message = "Path `title` is required.")
    )]
    #[schema(example = "Tech Talk")]
    pub title: Option<String>,

    /// RFC 3339 timestamp, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD` (UTC)
    #[serde(default, deserialize_with = "deserialize_event_date")]
    #[validate(required(message = "Path `date` is required."))]
    #[schema(value_type = Option<String>, example = "2025-01-10")]
    pub date: Option<DateTime<Utc>>,

    /// `Online` or `Offline`
    #[serde(default, rename = "type")]
    #[validate(
        required(message = "Path `type` is required."),
        custom(function = "validate_event_type")
    )]
    #[schema(example = "Online")]
    pub event_type: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[validate(
        required(message = "Path `topic` is required."),
        length(min = 1, message = "Path `topic` is required.")
    )]
    #[serde(default)]
    #[schema(example = "AI")]
    pub topic: Option<String>,

    #[validate(
        required(message = "Path `description` is required."),
        length(min = 1, message = "Path `description` is required.")
    )]
    #[serde(default)]
    #[schema(example = "intro")]
    pub description: Option<String>,

    #[serde(default)]
    pub sessions: Vec<Session>,

    /// Defaults to 0
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Path `price` must not be negative."))]
    pub price: Option<f64>,

    #[serde(default)]
    pub speakers: Vec<Speaker>,

    #[serde(default)]
    pub hosted_by: Option<String>,

    #[serde(default)]
    pub venue: Option<Venue>,

    #[serde(default)]
    pub additional_info: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateEvent {
    /// Apply the same normalization as deserialization, for values built in code.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.map(|t| t.trim().to_string());
        self
    }

    /// Build the stored event.
    ///
    /// Returns `None` if a required field is missing or `type` is not a
    /// known value; call [`Validate::validate`] first to get the reason.
    pub fn into_event(self) -> Option<Event> {
        let event_type = self.event_type?.parse::<EventType>().ok()?;
        let mut event = Event::new(
            self.title?,
            self.date?,
            event_type,
            self.topic?,
            self.description?,
        );

        event.image = self.image;
        event.sessions = self.sessions;
        event.price = self.price.unwrap_or(0.0);
        event.speakers = self.speakers;
        event.hosted_by = self.hosted_by;
        event.venue = self.venue;
        event.additional_info = self.additional_info;
        event.tags = self.tags;
        Some(event)
    }
}

fn validate_event_type(value: &str) -> Result<(), ValidationError> {
    value.parse::<EventType>().map(|_| ()).map_err(|_| {
        ValidationError::new("enum").with_message(
            format!("`{}` is not a valid enum value for path `type`.", value).into(),
        )
    })
}

fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

fn deserialize_event_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_event_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{}`", raw))),
        None => Ok(None),
    }
}

/// Parse an event date: RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (taken as UTC) or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Query parameters accepted by the list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    /// `Online`, `Offline` or `Both` (no constraint)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    #[param(example = "Online")]
    pub event_type: Option<String>,

    /// Case-insensitive substring of the title or of any tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl EventFilter {
    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::validation_message;
    use chrono::TimeZone;
    use serde_json::json;

    fn valid_create() -> CreateEvent {
        serde_json::from_value(json!({
            "title": "Tech Talk",
            "date": "2025-01-10",
            "type": "Online",
            "topic": "AI",
            "description": "intro"
        }))
        .unwrap()
    }

    #[test]
    fn test_event_type_round_trips_as_plain_string() {
        assert_eq!(EventType::Online.to_string(), "Online");
        assert_eq!("Offline".parse::<EventType>().unwrap(), EventType::Offline);
        assert!("Hybrid".parse::<EventType>().is_err());
        assert_eq!(json!(EventType::Offline), json!("Offline"));
    }

    #[test]
    fn test_parse_event_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap();
        assert_eq!(parse_event_date("2025-01-10"), Some(midnight));
        assert_eq!(parse_event_date("2025-01-10T00:00:00Z"), Some(midnight));
        assert_eq!(parse_event_date("2025-01-10T02:00:00+02:00"), Some(midnight));
        assert_eq!(
            parse_event_date("2025-01-10T18:30:00"),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 18, 30, 0).unwrap())
        );
        assert_eq!(parse_event_date("next tuesday"), None);
    }

    #[test]
    fn test_create_event_trims_title() {
        let create: CreateEvent = serde_json::from_value(json!({ "title": "  Rust Nights  " })).unwrap();
        assert_eq!(create.title.as_deref(), Some("Rust Nights"));
    }

    #[test]
    fn test_create_event_rejects_unparseable_date() {
        let result = serde_json::from_value::<CreateEvent>(json!({ "date": "soon" }));
        assert!(result.unwrap_err().to_string().contains("invalid date"));
    }

    #[test]
    fn test_valid_create_event_passes_validation() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields_are_reported() {
        let errors = CreateEvent::default().validate().unwrap_err();
        let message = validation_message(&errors);
        for field in ["title", "date", "type", "topic", "description"] {
            let expected = format!("Path `{}` is required.", field);
            assert!(message.contains(&expected), "{} not in {}", expected, message);
        }
    }

    #[test]
    fn test_blank_title_is_required_error() {
        let create: CreateEvent = serde_json::from_value(json!({
            "title": "   ",
            "date": "2025-01-10",
            "type": "Online",
            "topic": "AI",
            "description": "intro"
        }))
        .unwrap();

        let errors = create.validate().unwrap_err();
        let message = errors.field_errors()["title"][0].message.clone().unwrap();
        assert_eq!(message, "Path `title` is required.");
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let create = CreateEvent {
            event_type: Some("Hybrid".to_string()),
            ..valid_create()
        };

        let errors = create.validate().unwrap_err();
        assert!(
            validation_message(&errors)
                .ends_with("`Hybrid` is not a valid enum value for path `type`.")
        );
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let create = CreateEvent {
            price: Some(-5.0),
            ..valid_create()
        };
        assert!(create.validate().unwrap_err().field_errors().contains_key("price"));
    }

    #[test]
    fn test_into_event_defaults_price_and_keeps_order() {
        let create = CreateEvent {
            sessions: vec![
                Session {
                    time: Some("10:00".into()),
                    speaker: Some("Ada".into()),
                },
                Session {
                    time: Some("11:00".into()),
                    speaker: Some("Grace".into()),
                },
            ],
            tags: vec!["ml".into(), "ai".into()],
            ..valid_create()
        };

        let event = create.into_event().unwrap();
        assert_eq!(event.title, "Tech Talk");
        assert_eq!(event.event_type, EventType::Online);
        assert_eq!(event.price, 0.0);
        assert_eq!(event.sessions[1].speaker.as_deref(), Some("Grace"));
        assert_eq!(event.tags, vec!["ml", "ai"]);
        assert_eq!(event.created_at, event.updated_at);
    }

    #[test]
    fn test_event_json_shape() {
        let event = Event::new(
            "Tech Talk",
            Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap(),
            EventType::Online,
            "AI",
            "intro",
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["_id"], json!(event.id.to_string()));
        assert_eq!(value["type"], "Online");
        assert_eq!(value["price"], json!(0.0));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("hostedBy").is_none());

        let back: Event = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_event_filter_reads_type_parameter() {
        let filter: EventFilter =
            serde_json::from_value(json!({ "type": "Offline", "search": "rust" })).unwrap();
        assert_eq!(filter.event_type.as_deref(), Some("Offline"));
        assert_eq!(filter.search.as_deref(), Some("rust"));
    }
}
