//! Translation of list parameters into a storage-independent predicate.

use crate::models::{Event, EventFilter, TYPE_BOTH};

/// Predicate built from [`EventFilter`].
///
/// Empty strings and `type=Both` impose no constraint. An unknown `type` is
/// kept as an equality test and so matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Exact `type` value to match
    pub event_type: Option<String>,
    /// Literal text matched case-insensitively against the title and tags
    pub search: Option<String>,
}

impl EventQuery {
    /// Query matching every event.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.event_type.is_none() && self.search.is_none()
    }

    /// Case-insensitive pattern for `search` with regex metacharacters escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(regex::escape)
    }

    /// Evaluate the predicate against an in-process event.
    ///
    /// Prefer [`EventQuery::matcher`] when testing many events.
    pub fn matches(&self, event: &Event) -> bool {
        self.matcher().matches(event)
    }

    /// Predicate with the search text folded once, for in-process filtering.
    pub fn matcher(&self) -> EventMatcher<'_> {
        EventMatcher {
            event_type: self.event_type.as_deref(),
            needle: self.search.as_deref().map(str::to_lowercase),
        }
    }
}

/// [`EventQuery`] prepared for evaluation against many events.
#[derive(Debug, Clone)]
pub struct EventMatcher<'a> {
    event_type: Option<&'a str>,
    needle: Option<String>,
}

impl EventMatcher<'_> {
    pub fn matches(&self, event: &Event) -> bool {
        let type_matches = self
            .event_type
            .is_none_or(|t| event.event_type.to_string() == t);
        if !type_matches {
            return false;
        }

        match &self.needle {
            Some(needle) => {
                contains_folded(&event.title, needle)
                    || event.tags.iter().any(|t| contains_folded(t, needle))
            }
            None => true,
        }
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl From<&EventFilter> for EventQuery {
    fn from(filter: &EventFilter) -> Self {
        let event_type = filter
            .event_type
            .as_deref()
            .filter(|t| !t.is_empty() && *t != TYPE_BOTH)
            .map(str::to_string);

        let search = filter
            .search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self { event_type, search }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventType;
    use chrono::Utc;

    fn event(title: &str, event_type: EventType, tags: &[&str]) -> Event {
        Event::new(title, Utc::now(), event_type, "topic", "description")
            .with_tags(tags.iter().copied())
    }

    #[test]
    fn test_empty_filter_is_unconstrained() {
        let query = EventQuery::from(&EventFilter::default());
        assert!(query.is_unconstrained());
        assert_eq!(query, EventQuery::all());
    }

    #[test]
    fn test_both_and_empty_type_impose_no_constraint() {
        for value in ["Both", ""] {
            let query = EventQuery::from(&EventFilter::default().with_type(value));
            assert_eq!(query.event_type, None, "type={:?}", value);
        }
    }

    #[test]
    fn test_empty_search_imposes_no_constraint() {
        let query = EventQuery::from(&EventFilter::default().with_search(""));
        assert_eq!(query.search, None);
    }

    #[test]
    fn test_type_and_search_are_combined() {
        let query = EventQuery::from(
            &EventFilter::default()
                .with_type("Offline")
                .with_search("rust"),
        );
        assert_eq!(query.event_type.as_deref(), Some("Offline"));
        assert_eq!(query.search.as_deref(), Some("rust"));

        assert!(query.matches(&event("Rust Meetup", EventType::Offline, &[])));
        assert!(!query.matches(&event("Rust Meetup", EventType::Online, &[])));
        assert!(!query.matches(&event("Go Meetup", EventType::Offline, &[])));
    }

    #[test]
    fn test_search_matches_title_or_tag_case_insensitively() {
        let query = EventQuery::from(&EventFilter::default().with_search("AI"));

        assert!(query.matches(&event("Intro to ai", EventType::Online, &[])));
        assert!(query.matches(&event("Workshop", EventType::Online, &["generative-AI"])));
        assert!(!query.matches(&event("Workshop", EventType::Online, &["web"])));
    }

    #[test]
    fn test_search_is_literal() {
        let query = EventQuery::from(&EventFilter::default().with_search("c++"));

        assert_eq!(query.search_pattern().as_deref(), Some(r"c\+\+"));
        assert!(query.matches(&event("Modern C++", EventType::Offline, &[])));
        assert!(!query.matches(&event("Modern C", EventType::Offline, &[])));
    }

    #[test]
    fn test_oversized_search_matches_nothing_unrelated() {
        let needle = "k".repeat(50_000);
        let query = EventQuery::from(&EventFilter::default().with_search(&needle));

        assert!(!query.matches(&event("Workshop", EventType::Online, &["rust"])));
        assert!(query.matches(&event(&needle.to_uppercase(), EventType::Online, &[])));
    }

    #[test]
    fn test_unknown_type_matches_nothing() {
        let query = EventQuery::from(&EventFilter::default().with_type("Hybrid"));

        assert!(!query.matches(&event("A", EventType::Online, &[])));
        assert!(!query.matches(&event("B", EventType::Offline, &[])));
    }
}
