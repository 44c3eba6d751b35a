//! Change feed
//!
//! Screens in the app refetch when they regain focus. Here, consumers instead
//! subscribe to a [`ChangeBus`] and are told about every successful mutation.
//! Refused mutations (a `false` or `None` result) emit nothing.
//!
//! The bus is a `tokio::sync::broadcast` channel: emitting never blocks, and
//! with no subscribers a change is simply dropped. A lagging subscriber loses
//! the oldest changes first.
//!
//! ```
//! use libpartyplan::service::changes::{Change, ChangeBus};
//!
//! # async fn example() {
//! let bus = ChangeBus::new(16);
//! let mut changes = bus.subscribe();
//!
//! bus.emit(Change::EventDeleted { event_id: 4 });
//!
//! assert_eq!(changes.recv().await.unwrap(), Change::EventDeleted { event_id: 4 });
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{EventId, ReminderId, VendorId};

pub type ChangeReceiver = broadcast::Receiver<Change>;

#[derive(Debug, Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<Change>,
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ChangeBus {
    /// Create a bus buffering up to `capacity` changes per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every change emitted after this call
    pub fn subscribe(&self) -> ChangeReceiver {
        self.sender.subscribe()
    }

    pub fn emit(&self, change: Change) {
        tracing::trace!(?change, "emitting change");
        // Err only means nobody is listening
        let _ = self.sender.send(change);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// A successful mutation of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    EventCreated {
        event_id: EventId,
    },
    EventUpdated {
        event_id: EventId,
    },
    EventDeleted {
        event_id: EventId,
    },
    Registered {
        event_id: EventId,
        user_id: String,
    },
    ReminderCreated {
        reminder_id: ReminderId,
    },
    ReminderUpdated {
        reminder_id: ReminderId,
    },
    ReminderDeleted {
        reminder_id: ReminderId,
    },
    VendorBooked {
        event_id: EventId,
        vendor_id: VendorId,
    },
}

impl Change {
    /// The event this change touched, if any
    pub fn event_id(&self) -> Option<EventId> {
        match self {
            Change::EventCreated { event_id }
            | Change::EventUpdated { event_id }
            | Change::EventDeleted { event_id }
            | Change::Registered { event_id, .. }
            | Change::VendorBooked { event_id, .. } => Some(*event_id),
            _ => None,
        }
    }
}
