//! In-memory mock store
//!
//! `MockStore` is the only "database": three ordered lists (events, reminders,
//! vendors) that live for as long as the store does. Every method is a single
//! critical section over the lists, and every read hands out owned copies so
//! callers can never alias a stored record.
//!
//! Ids come from per-list counters that only grow. Deleting the newest record
//! and creating another never reissues the deleted id.

pub mod seed;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::types::{
    Event, EventId, EventPatch, NewEvent, NewReminder, Reminder, ReminderId, ReminderPatch,
    Vendor, VendorId,
};

/// Result of trying to add an attendee to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Registered { attendees: u32 },
    Full,
    EventNotFound,
}

/// Result of creating or updating an event.
///
/// A write that would leave more attendees than seats is refused and the
/// store is left as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum EventWrite {
    Written(Event),
    OverCapacity { attendees: u32, max_attendees: u32 },
    EventNotFound,
}

impl EventWrite {
    pub fn into_event(self) -> Option<Event> {
        match self {
            EventWrite::Written(event) => Some(event),
            _ => None,
        }
    }
}

/// Result of trying to book a vendor for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Booking {
    Booked,
    EventNotFound,
    VendorNotFound,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    events: Vec<Event>,
    reminders: Vec<Reminder>,
    vendors: Vec<Vendor>,
    next_event_id: EventId,
    next_reminder_id: ReminderId,
}

impl StoreState {
    fn new(events: Vec<Event>, reminders: Vec<Reminder>, vendors: Vec<Vendor>) -> Self {
        let next_event_id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let next_reminder_id = reminders.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            events,
            reminders,
            vendors,
            next_event_id,
            next_reminder_id,
        }
    }
}

/// Process-local store for events, reminders and vendors
#[derive(Debug)]
pub struct MockStore {
    state: RwLock<StoreState>,
    initial: StoreState,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl MockStore {
    /// Create a store with no records
    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new(), Vec::new())
    }

    /// Create a store holding the sample events, reminders and vendors,
    /// dated relative to `now`
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::from_parts(
            seed::sample_events(now),
            seed::sample_reminders(now),
            seed::sample_vendors(),
        )
    }

    /// Create a store holding the given records
    pub fn from_parts(events: Vec<Event>, reminders: Vec<Reminder>, vendors: Vec<Vendor>) -> Self {
        let initial = StoreState::new(events, reminders, vendors);
        Self {
            state: RwLock::new(initial.clone()),
            initial,
        }
    }

    /// Restore the records and id counters the store was created with
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        *state = self.initial.clone();
        tracing::debug!(
            events = state.events.len(),
            reminders = state.reminders.len(),
            vendors = state.vendors.len(),
            "store reset"
        );
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub async fn events(&self) -> Vec<Event> {
        self.state.read().await.events.clone()
    }

    pub async fn event(&self, id: EventId) -> Option<Event> {
        self.state
            .read()
            .await
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }

    /// Store a new event; no id is consumed when the write is refused
    pub async fn insert_event(&self, new: NewEvent) -> EventWrite {
        if new.attendees > new.max_attendees {
            return EventWrite::OverCapacity {
                attendees: new.attendees,
                max_attendees: new.max_attendees,
            };
        }

        let mut state = self.state.write().await;
        let id = state.next_event_id;
        state.next_event_id += 1;

        let event = Event::from_new(id, new);
        state.events.push(event.clone());
        EventWrite::Written(event)
    }

    pub async fn update_event(&self, id: EventId, patch: &EventPatch) -> EventWrite {
        let mut state = self.state.write().await;
        let Some(event) = state.events.iter_mut().find(|e| e.id == id) else {
            return EventWrite::EventNotFound;
        };

        let mut updated = event.clone();
        patch.apply_to(&mut updated);
        if updated.attendees > updated.max_attendees {
            return EventWrite::OverCapacity {
                attendees: updated.attendees,
                max_attendees: updated.max_attendees,
            };
        }

        *event = updated.clone();
        EventWrite::Written(updated)
    }

    pub async fn remove_event(&self, id: EventId) -> bool {
        let mut state = self.state.write().await;
        match state.events.iter().position(|e| e.id == id) {
            Some(index) => {
                state.events.remove(index);
                true
            }
            None => false,
        }
    }

    /// Add one attendee unless the event is at capacity
    pub async fn register_attendee(&self, id: EventId) -> Registration {
        let mut state = self.state.write().await;
        let Some(event) = state.events.iter_mut().find(|e| e.id == id) else {
            return Registration::EventNotFound;
        };

        if event.attendees < event.max_attendees {
            event.attendees += 1;
            Registration::Registered {
                attendees: event.attendees,
            }
        } else {
            Registration::Full
        }
    }

    // ------------------------------------------------------------------
    // Reminders
    // ------------------------------------------------------------------

    pub async fn reminders(&self) -> Vec<Reminder> {
        self.state.read().await.reminders.clone()
    }

    pub async fn reminder(&self, id: ReminderId) -> Option<Reminder> {
        self.state
            .read()
            .await
            .reminders
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub async fn reminder_count(&self) -> usize {
        self.state.read().await.reminders.len()
    }

    pub async fn insert_reminder(&self, new: NewReminder) -> Reminder {
        let mut state = self.state.write().await;
        let id = state.next_reminder_id;
        state.next_reminder_id += 1;

        let reminder = Reminder::from_new(id, new);
        state.reminders.push(reminder.clone());
        reminder
    }

    pub async fn update_reminder(&self, id: ReminderId, patch: &ReminderPatch) -> Option<Reminder> {
        let mut state = self.state.write().await;
        let reminder = state.reminders.iter_mut().find(|r| r.id == id)?;
        Some(patch.apply_to(reminder).clone())
    }

    pub async fn remove_reminder(&self, id: ReminderId) -> bool {
        let mut state = self.state.write().await;
        match state.reminders.iter().position(|r| r.id == id) {
            Some(index) => {
                state.reminders.remove(index);
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Vendors
    // ------------------------------------------------------------------

    pub async fn vendors(&self) -> Vec<Vendor> {
        self.state.read().await.vendors.clone()
    }

    pub async fn vendor(&self, id: VendorId) -> Option<Vendor> {
        self.state
            .read()
            .await
            .vendors
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    /// Vendors whose category equals `category` exactly
    pub async fn vendors_in_category(&self, category: &str) -> Vec<Vendor> {
        self.state
            .read()
            .await
            .vendors
            .iter()
            .filter(|v| v.category == category)
            .cloned()
            .collect()
    }

    /// Mark the vendor booked and attach a snapshot of it to the event.
    ///
    /// Nothing changes unless both records exist.
    pub async fn book_vendor(&self, event_id: EventId, vendor_id: VendorId) -> Booking {
        let mut state = self.state.write().await;
        let StoreState {
            events, vendors, ..
        } = &mut *state;

        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Booking::EventNotFound;
        };
        let Some(vendor) = vendors.iter_mut().find(|v| v.id == vendor_id) else {
            return Booking::VendorNotFound;
        };

        vendor.is_booked = true;
        event.vendors.get_or_insert_with(Vec::new).push(vendor.clone());
        Booking::Booked
    }
}
