//! Event access
//!
//! Wraps the event half of the [`DataSource`] contract and announces every
//! successful mutation on the change bus.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{PartyPlanError, Result};
use crate::service::changes::{Change, ChangeBus};
use crate::source::DataSource;
use crate::types::{Event, EventId, EventPatch, NewEvent};

/// Home screen tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Private events
    Surprise,
    /// More than [`LARGE_EVENT_THRESHOLD`] seats
    Large,
}

/// An event is "large" when it has more seats than this
pub const LARGE_EVENT_THRESHOLD: u32 = 50;

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Surprise => event.is_private(),
            EventFilter::Large => event.max_attendees > LARGE_EVENT_THRESHOLD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventFilter::All => "all",
            EventFilter::Surprise => "surprise",
            EventFilter::Large => "large",
        }
    }
}

impl FromStr for EventFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(EventFilter::All),
            "surprise" => Ok(EventFilter::Surprise),
            "large" => Ok(EventFilter::Large),
            _ => Err(format!(
                "Invalid event filter: '{}'. Valid options: all, surprise, large",
                s
            )),
        }
    }
}

impl std::fmt::Display for EventFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keep the events matching `filter`, preserving order
pub fn filter_events(events: Vec<Event>, filter: EventFilter) -> Vec<Event> {
    events.into_iter().filter(|e| filter.matches(e)).collect()
}

/// Events dated strictly after `now`
pub fn upcoming_events(events: Vec<Event>, now: DateTime<Utc>) -> Vec<Event> {
    events.into_iter().filter(|e| e.date > now).collect()
}

/// Case-insensitive substring match on title, description, location or
/// category. A blank query matches nothing.
pub fn matches_query(event: &Event, query: &str) -> bool {
    if query.trim().is_empty() {
        return false;
    }
    let query = query.to_lowercase();
    [&event.title, &event.description, &event.location, &event.category]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

#[derive(Clone)]
pub struct EventService {
    source: Arc<dyn DataSource>,
    bus: ChangeBus,
}

impl EventService {
    pub fn new(source: Arc<dyn DataSource>, bus: ChangeBus) -> Self {
        Self { source, bus }
    }

    pub async fn fetch_events(&self) -> Vec<Event> {
        self.source.fetch_events().await
    }

    pub async fn fetch_event_by_id(&self, id: EventId) -> Option<Event> {
        self.source.fetch_event_by_id(id).await
    }

    /// Like [`fetch_event_by_id`](Self::fetch_event_by_id), but absence is an
    /// error
    pub async fn get_event(&self, id: EventId) -> Result<Event> {
        self.fetch_event_by_id(id)
            .await
            .ok_or(PartyPlanError::NotFound { kind: "Event", id })
    }

    /// `None` when the payload has more attendees than seats
    pub async fn create_event(&self, event: NewEvent) -> Option<Event> {
        let event = self.source.create_event(event).await?;
        self.bus.emit(Change::EventCreated { event_id: event.id });
        Some(event)
    }

    pub async fn update_event(&self, id: EventId, patch: EventPatch) -> Option<Event> {
        let updated = self.source.update_event(id, patch).await;
        if updated.is_some() {
            self.bus.emit(Change::EventUpdated { event_id: id });
        }
        updated
    }

    pub async fn delete_event(&self, id: EventId) -> bool {
        let removed = self.source.delete_event(id).await;
        if removed {
            self.bus.emit(Change::EventDeleted { event_id: id });
        }
        removed
    }

    pub async fn register_for_event(&self, event_id: EventId, user_id: &str) -> bool {
        let registered = self.source.register_for_event(event_id, user_id).await;
        if registered {
            self.bus.emit(Change::Registered {
                event_id,
                user_id: user_id.to_string(),
            });
        }
        registered
    }

    /// Events matching `query`; see [`matches_query`]
    pub async fn search_events(&self, query: &str) -> Vec<Event> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let events = self.fetch_events().await;
        let results: Vec<Event> = events
            .into_iter()
            .filter(|e| matches_query(e, query))
            .collect();
        tracing::debug!(query, count = results.len(), "searched events");
        results
    }

    /// Events dated after `now`, in storage order
    pub async fn fetch_upcoming_events(&self, now: DateTime<Utc>) -> Vec<Event> {
        upcoming_events(self.fetch_events().await, now)
    }
}
