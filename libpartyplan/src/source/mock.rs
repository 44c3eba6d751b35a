//! In-memory data source with simulated latency
//!
//! Each call waits out its [`Latency`] before touching the store, then runs a
//! single store operation. The store lock is never held while waiting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::latency::{Latency, Operation};
use crate::source::DataSource;
use crate::store::{Booking, EventWrite, MockStore, Registration};
use crate::types::{
    Event, EventId, EventPatch, NewEvent, NewReminder, Reminder, ReminderId, ReminderPatch,
    Vendor, VendorId,
};

/// Data source backed by a [`MockStore`]
#[derive(Debug, Clone)]
pub struct MockDataSource {
    store: Arc<MockStore>,
    latency: Latency,
}

impl MockDataSource {
    pub fn new(store: Arc<MockStore>, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// Sample data with the mobile app's delays
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(Arc::new(MockStore::seeded(now)), Latency::simulated())
    }

    /// Sample data without any delay
    pub fn seeded_instant(now: DateTime<Utc>) -> Self {
        Self::new(Arc::new(MockStore::seeded(now)), Latency::none())
    }

    /// Empty store without any delay
    pub fn empty_instant() -> Self {
        Self::new(Arc::new(MockStore::empty()), Latency::none())
    }

    pub fn store(&self) -> &Arc<MockStore> {
        &self.store
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Restore the store to how it was constructed
    pub async fn reset(&self) {
        self.store.reset().await;
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_events(&self) -> Vec<Event> {
        self.latency.wait(Operation::FetchEvents).await;
        let events = self.store.events().await;
        tracing::debug!(count = events.len(), "fetched events");
        events
    }

    async fn fetch_event_by_id(&self, id: EventId) -> Option<Event> {
        self.latency.wait(Operation::FetchEventById).await;
        let event = self.store.event(id).await;
        tracing::debug!(event_id = id, found = event.is_some(), "fetched event");
        event
    }

    async fn create_event(&self, event: NewEvent) -> Option<Event> {
        self.latency.wait(Operation::CreateEvent).await;
        match self.store.insert_event(event).await {
            EventWrite::Written(event) => {
                tracing::info!(event_id = event.id, title = %event.title, "created event");
                Some(event)
            }
            EventWrite::OverCapacity {
                attendees,
                max_attendees,
            } => {
                tracing::warn!(attendees, max_attendees, "create refused, over capacity");
                None
            }
            EventWrite::EventNotFound => None,
        }
    }

    async fn update_event(&self, id: EventId, patch: EventPatch) -> Option<Event> {
        self.latency.wait(Operation::UpdateEvent).await;
        match self.store.update_event(id, &patch).await {
            EventWrite::Written(event) => {
                tracing::info!(event_id = id, "updated event");
                Some(event)
            }
            EventWrite::OverCapacity {
                attendees,
                max_attendees,
            } => {
                tracing::warn!(
                    event_id = id,
                    attendees,
                    max_attendees,
                    "update refused, over capacity"
                );
                None
            }
            EventWrite::EventNotFound => {
                tracing::debug!(event_id = id, "update skipped, no such event");
                None
            }
        }
    }

    async fn delete_event(&self, id: EventId) -> bool {
        self.latency.wait(Operation::DeleteEvent).await;
        let removed = self.store.remove_event(id).await;
        if removed {
            tracing::info!(event_id = id, "deleted event");
        } else {
            tracing::debug!(event_id = id, "delete skipped, no such event");
        }
        removed
    }

    async fn register_for_event(&self, event_id: EventId, user_id: &str) -> bool {
        self.latency.wait(Operation::RegisterForEvent).await;
        match self.store.register_attendee(event_id).await {
            Registration::Registered { attendees } => {
                tracing::info!(event_id, user_id, attendees, "registered for event");
                true
            }
            Registration::Full => {
                tracing::warn!(event_id, user_id, "registration refused, event is full");
                false
            }
            Registration::EventNotFound => {
                tracing::warn!(event_id, user_id, "registration refused, no such event");
                false
            }
        }
    }

    async fn fetch_upcoming_reminders(&self) -> Vec<Reminder> {
        self.latency.wait(Operation::FetchReminders).await;
        let reminders = self.store.reminders().await;
        tracing::debug!(count = reminders.len(), "fetched reminders");
        reminders
    }

    async fn fetch_reminder_by_id(&self, id: ReminderId) -> Option<Reminder> {
        self.latency.wait(Operation::FetchReminderById).await;
        let reminder = self.store.reminder(id).await;
        tracing::debug!(reminder_id = id, found = reminder.is_some(), "fetched reminder");
        reminder
    }

    async fn create_reminder(&self, reminder: NewReminder) -> Reminder {
        self.latency.wait(Operation::CreateReminder).await;
        let reminder = self.store.insert_reminder(reminder).await;
        tracing::info!(reminder_id = reminder.id, kind = %reminder.kind, "created reminder");
        reminder
    }

    async fn update_reminder(&self, id: ReminderId, patch: ReminderPatch) -> Option<Reminder> {
        self.latency.wait(Operation::UpdateReminder).await;
        let updated = self.store.update_reminder(id, &patch).await;
        match &updated {
            Some(_) => tracing::info!(reminder_id = id, "updated reminder"),
            None => tracing::debug!(reminder_id = id, "update skipped, no such reminder"),
        }
        updated
    }

    async fn delete_reminder(&self, id: ReminderId) -> bool {
        self.latency.wait(Operation::DeleteReminder).await;
        let removed = self.store.remove_reminder(id).await;
        if removed {
            tracing::info!(reminder_id = id, "deleted reminder");
        } else {
            tracing::debug!(reminder_id = id, "delete skipped, no such reminder");
        }
        removed
    }

    async fn fetch_vendors(&self) -> Vec<Vendor> {
        self.latency.wait(Operation::FetchVendors).await;
        let vendors = self.store.vendors().await;
        tracing::debug!(count = vendors.len(), "fetched vendors");
        vendors
    }

    async fn fetch_vendors_by_category(&self, category: &str) -> Vec<Vendor> {
        self.latency.wait(Operation::FetchVendorsByCategory).await;
        let vendors = self.store.vendors_in_category(category).await;
        tracing::debug!(category, count = vendors.len(), "fetched vendors by category");
        vendors
    }

    async fn book_vendor(&self, event_id: EventId, vendor_id: VendorId) -> bool {
        self.latency.wait(Operation::BookVendor).await;
        match self.store.book_vendor(event_id, vendor_id).await {
            Booking::Booked => {
                tracing::info!(event_id, vendor_id, "booked vendor");
                true
            }
            Booking::EventNotFound => {
                tracing::warn!(event_id, vendor_id, "booking refused, no such event");
                false
            }
            Booking::VendorNotFound => {
                tracing::warn!(event_id, vendor_id, "booking refused, no such vendor");
                false
            }
        }
    }
}
