//! Party Planner - event planning and reminders
//!
//! This library provides the data service layer behind the Party Planner app:
//! events people can register for, personal reminders for birthdays and
//! anniversaries, and a vendor directory that can be booked against events.
//! All data lives in an in-memory mock store that simulates network latency.

pub mod config;
pub mod error;
pub mod latency;
pub mod logging;
pub mod service;
pub mod source;
pub mod store;
pub mod types;
pub mod when;

// Re-export commonly used types
pub use config::Config;
pub use error::{PartyPlanError, Result};
pub use latency::Latency;
pub use service::validation::{EventForm, ReminderForm};
pub use service::PartyPlanService;
pub use source::{DataSource, MockDataSource};
pub use store::MockStore;
pub use types::{
    Event, EventId, EventPatch, EventTimelineItem, GuestListItem, NewEvent, NewReminder, Reminder,
    ReminderId, ReminderPatch, ReminderType, Vendor, VendorId,
};
