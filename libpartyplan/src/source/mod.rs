//! Data source abstraction
//!
//! [`DataSource`] is the full data access contract the app screens rely on.
//! Every operation is asynchronous and never fails: lookups that find
//! nothing resolve to `None`, refused actions resolve to `false`.
//!
//! The only implementation today is [`mock::MockDataSource`], which serves an
//! in-memory [`MockStore`](crate::store::MockStore) behind a simulated network
//! delay. A REST backend would be a second implementation mapping to:
//!
//! | Operation                   | Request                                      |
//! |-----------------------------|----------------------------------------------|
//! | `fetch_events`              | `GET /events`                                |
//! | `fetch_event_by_id`         | `GET /events/:id`                            |
//! | `create_event`              | `POST /events`                               |
//! | `update_event`              | `PATCH /events/:id`                          |
//! | `delete_event`              | `DELETE /events/:id`                         |
//! | `register_for_event`        | `POST /events/:id/register`                  |
//! | `fetch_upcoming_reminders`  | `GET /reminders`                             |
//! | `fetch_reminder_by_id`      | `GET /reminders/:id`                         |
//! | `create_reminder`           | `POST /reminders`                            |
//! | `update_reminder`           | `PATCH /reminders/:id`                       |
//! | `delete_reminder`           | `DELETE /reminders/:id`                      |
//! | `fetch_vendors`             | `GET /vendors`                               |
//! | `fetch_vendors_by_category` | `GET /vendors?category=`                     |
//! | `book_vendor`               | `POST /events/:id/vendors/:vendorId/book`    |

use async_trait::async_trait;

use crate::types::{
    Event, EventId, EventPatch, NewEvent, NewReminder, Reminder, ReminderId, ReminderPatch,
    Vendor, VendorId,
};

pub mod mock;

pub use mock::MockDataSource;

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Every event, in storage order
    async fn fetch_events(&self) -> Vec<Event>;

    async fn fetch_event_by_id(&self, id: EventId) -> Option<Event>;

    /// Store a new event under a fresh id and return it.
    ///
    /// `None` when the payload has more attendees than seats.
    async fn create_event(&self, event: NewEvent) -> Option<Event>;

    /// Shallow-merge `patch` into the event.
    ///
    /// `None` if no such event, or if the merged event would have more
    /// attendees than seats; the event is then left as it was.
    async fn update_event(&self, id: EventId, patch: EventPatch) -> Option<Event>;

    /// Remove the event; `false` if no such event
    async fn delete_event(&self, id: EventId) -> bool;

    /// Take one seat for `user_id`.
    ///
    /// Resolves to `false` when the event is missing or already full.
    async fn register_for_event(&self, event_id: EventId, user_id: &str) -> bool;

    /// Every reminder, regardless of date
    async fn fetch_upcoming_reminders(&self) -> Vec<Reminder>;

    async fn fetch_reminder_by_id(&self, id: ReminderId) -> Option<Reminder>;

    async fn create_reminder(&self, reminder: NewReminder) -> Reminder;

    async fn update_reminder(&self, id: ReminderId, patch: ReminderPatch) -> Option<Reminder>;

    async fn delete_reminder(&self, id: ReminderId) -> bool;

    async fn fetch_vendors(&self) -> Vec<Vendor>;

    /// Vendors whose category matches exactly (case-sensitive)
    async fn fetch_vendors_by_category(&self, category: &str) -> Vec<Vendor>;

    /// Mark the vendor booked and attach it to the event.
    ///
    /// Resolves to `false`, changing nothing, unless both exist.
    async fn book_vendor(&self, event_id: EventId, vendor_id: VendorId) -> bool;
}
