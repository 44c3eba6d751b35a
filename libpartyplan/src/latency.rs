//! Simulated network latency
//!
//! Every data access waits out a fixed delay before touching the store, so
//! consumers see the same timing they would against a remote API. The delays
//! default to what the mobile app's mock backend used and can be zeroed for
//! tests.

use std::time::Duration;

use tokio::time::sleep;

/// A data access operation, used to pick its simulated delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchEvents,
    FetchEventById,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    RegisterForEvent,
    FetchReminders,
    FetchReminderById,
    CreateReminder,
    UpdateReminder,
    DeleteReminder,
    FetchVendors,
    FetchVendorsByCategory,
    BookVendor,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FetchEvents => "fetch_events",
            Operation::FetchEventById => "fetch_event_by_id",
            Operation::CreateEvent => "create_event",
            Operation::UpdateEvent => "update_event",
            Operation::DeleteEvent => "delete_event",
            Operation::RegisterForEvent => "register_for_event",
            Operation::FetchReminders => "fetch_upcoming_reminders",
            Operation::FetchReminderById => "fetch_reminder_by_id",
            Operation::CreateReminder => "create_reminder",
            Operation::UpdateReminder => "update_reminder",
            Operation::DeleteReminder => "delete_reminder",
            Operation::FetchVendors => "fetch_vendors",
            Operation::FetchVendorsByCategory => "fetch_vendors_by_category",
            Operation::BookVendor => "book_vendor",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-operation delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Listing all events
    pub fetch_all: Duration,
    /// Looking up a single event or reminder by id
    pub fetch_one: Duration,
    /// Create, update, delete and vendor booking
    pub write: Duration,
    /// Event registration
    pub register: Duration,
    /// Listing reminders and vendors
    pub list_secondary: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self::simulated()
    }
}

impl Latency {
    /// Delays of the mobile app's mock backend
    pub fn simulated() -> Self {
        Self {
            fetch_all: Duration::from_millis(1000),
            fetch_one: Duration::from_millis(500),
            write: Duration::from_millis(1000),
            register: Duration::from_millis(800),
            list_secondary: Duration::from_millis(800),
        }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }

    /// The same delay for every operation
    pub fn uniform(delay: Duration) -> Self {
        Self {
            fetch_all: delay,
            fetch_one: delay,
            write: delay,
            register: delay,
            list_secondary: delay,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::none()
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        match op {
            Operation::FetchEvents => self.fetch_all,
            Operation::FetchEventById | Operation::FetchReminderById => self.fetch_one,
            Operation::CreateEvent
            | Operation::UpdateEvent
            | Operation::DeleteEvent
            | Operation::CreateReminder
            | Operation::UpdateReminder
            | Operation::DeleteReminder
            | Operation::BookVendor => self.write,
            Operation::RegisterForEvent => self.register,
            Operation::FetchReminders
            | Operation::FetchVendors
            | Operation::FetchVendorsByCategory => self.list_secondary,
        }
    }

    /// Wait out the delay for `op`
    pub async fn wait(&self, op: Operation) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tracing::trace!(operation = %op, delay_ms = delay.as_millis() as u64, "simulating latency");
            sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_delays_match_mock_backend() {
        let latency = Latency::simulated();
        assert_eq!(latency.delay_for(Operation::FetchEvents), Duration::from_millis(1000));
        assert_eq!(latency.delay_for(Operation::FetchEventById), Duration::from_millis(500));
        assert_eq!(latency.delay_for(Operation::FetchReminderById), Duration::from_millis(500));
        assert_eq!(latency.delay_for(Operation::CreateReminder), Duration::from_millis(1000));
        assert_eq!(latency.delay_for(Operation::BookVendor), Duration::from_millis(1000));
        assert_eq!(latency.delay_for(Operation::RegisterForEvent), Duration::from_millis(800));
        assert_eq!(latency.delay_for(Operation::FetchReminders), Duration::from_millis(800));
        assert_eq!(latency.delay_for(Operation::FetchVendorsByCategory), Duration::from_millis(800));
    }

    #[test]
    fn test_none_is_zero() {
        assert!(Latency::none().is_zero());
        assert!(!Latency::simulated().is_zero());
    }

    #[tokio::test]
    async fn test_wait_sleeps_for_configured_delay() {
        let latency = Latency::uniform(Duration::from_millis(30));

        let start = std::time::Instant::now();
        latency.wait(Operation::FetchEvents).await;

        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_uses_tokio_timer() {
        let latency = Latency::simulated();

        let start = tokio::time::Instant::now();
        latency.wait(Operation::RegisterForEvent).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(800));
        assert!(elapsed < Duration::from_millis(900));
    }
}
