//! Reminder access

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PartyPlanError, Result};
use crate::service::changes::{Change, ChangeBus};
use crate::source::DataSource;
use crate::types::{Event, NewReminder, Reminder, ReminderId, ReminderPatch};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days between `now` and the reminder date, rounded up.
///
/// The distance is absolute, so a date three days ago also gives 3.
pub fn days_until(reminder: &Reminder, now: DateTime<Utc>) -> i64 {
    let millis = (reminder.date - now).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// A reminder together with the event planned for it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDetails {
    pub reminder: Reminder,
    /// `None` when no event is linked or the linked event no longer exists
    pub planned_event: Option<Event>,
}

#[derive(Clone)]
pub struct ReminderService {
    source: Arc<dyn DataSource>,
    bus: ChangeBus,
}

impl ReminderService {
    pub fn new(source: Arc<dyn DataSource>, bus: ChangeBus) -> Self {
        Self { source, bus }
    }

    /// Every reminder. Despite the name, past reminders are included; callers
    /// filter by date themselves.
    pub async fn fetch_upcoming_reminders(&self) -> Vec<Reminder> {
        self.source.fetch_upcoming_reminders().await
    }

    pub async fn fetch_reminder_by_id(&self, id: ReminderId) -> Option<Reminder> {
        self.source.fetch_reminder_by_id(id).await
    }

    pub async fn get_reminder(&self, id: ReminderId) -> Result<Reminder> {
        self.fetch_reminder_by_id(id)
            .await
            .ok_or(PartyPlanError::NotFound {
                kind: "Reminder",
                id,
            })
    }

    pub async fn create_reminder(&self, reminder: NewReminder) -> Reminder {
        let reminder = self.source.create_reminder(reminder).await;
        self.bus.emit(Change::ReminderCreated {
            reminder_id: reminder.id,
        });
        reminder
    }

    pub async fn update_reminder(&self, id: ReminderId, patch: ReminderPatch) -> Option<Reminder> {
        let updated = self.source.update_reminder(id, patch).await;
        if updated.is_some() {
            self.bus.emit(Change::ReminderUpdated { reminder_id: id });
        }
        updated
    }

    pub async fn delete_reminder(&self, id: ReminderId) -> bool {
        let removed = self.source.delete_reminder(id).await;
        if removed {
            self.bus.emit(Change::ReminderDeleted { reminder_id: id });
        }
        removed
    }

    /// The reminder plus its planned event, as the reminder detail view
    /// shows them
    pub async fn fetch_reminder_with_event(&self, id: ReminderId) -> Option<ReminderDetails> {
        let reminder = self.fetch_reminder_by_id(id).await?;

        let planned_event = match reminder.planned_event_id {
            Some(event_id) => self.source.fetch_event_by_id(event_id).await,
            None => None,
        };

        Some(ReminderDetails {
            reminder,
            planned_event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockDataSource;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    fn service() -> (ReminderService, Arc<MockDataSource>) {
        let source = Arc::new(MockDataSource::seeded_instant(now()));
        let reminders = ReminderService::new(source.clone(), ChangeBus::new(16));
        (reminders, source)
    }

    fn reminder_at(date: DateTime<Utc>) -> Reminder {
        Reminder {
            id: 1,
            title: "Check-in".to_string(),
            date,
            kind: crate::types::ReminderType::Meeting,
            description: String::new(),
            recipient_name: None,
            relationship: None,
            notify_before: vec![],
            gift_ideas: None,
            planned_surprise: None,
            planned_event_id: None,
        }
    }

    #[test]
    fn test_days_until_rounds_up() {
        assert_eq!(days_until(&reminder_at(now() + Duration::days(3)), now()), 3);
        assert_eq!(days_until(&reminder_at(now() + Duration::hours(1)), now()), 1);
        assert_eq!(
            days_until(&reminder_at(now() + Duration::days(2) + Duration::minutes(1)), now()),
            3
        );
        assert_eq!(days_until(&reminder_at(now()), now()), 0);
    }

    #[test]
    fn test_days_until_is_absolute() {
        assert_eq!(days_until(&reminder_at(now() - Duration::days(4)), now()), 4);
    }

    #[tokio::test]
    async fn test_fetch_reminder_with_event() {
        let (reminders, _) = service();

        let details = reminders.fetch_reminder_with_event(1).await.unwrap();
        assert_eq!(details.reminder.title, "Sarah's 30th Birthday");
        assert_eq!(details.planned_event.unwrap().id, 3);

        let details = reminders.fetch_reminder_with_event(3).await.unwrap();
        assert!(details.planned_event.is_none());

        assert!(reminders.fetch_reminder_with_event(99).await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_reminder_with_deleted_event() {
        let (reminders, source) = service();
        assert!(source.delete_event(5).await);

        let details = reminders.fetch_reminder_with_event(2).await.unwrap();
        assert_eq!(details.reminder.planned_event_id, Some(5));
        assert!(details.planned_event.is_none());
    }

    #[tokio::test]
    async fn test_get_reminder_not_found() {
        let (reminders, _) = service();
        let err = reminders.get_reminder(12).await.unwrap_err();
        assert_eq!(err.to_string(), "Reminder not found: 12");
    }

    #[tokio::test]
    async fn test_update_emits_only_on_success() {
        let source = Arc::new(MockDataSource::seeded_instant(now()));
        let bus = ChangeBus::new(16);
        let reminders = ReminderService::new(source, bus.clone());
        let mut changes = bus.subscribe();

        let patch = ReminderPatch {
            title: Some("Mom's 60th".to_string()),
            ..Default::default()
        };
        assert!(reminders.update_reminder(404, patch.clone()).await.is_none());
        assert!(reminders.update_reminder(3, patch).await.is_some());

        assert_eq!(
            changes.try_recv().unwrap(),
            Change::ReminderUpdated { reminder_id: 3 }
        );
        assert!(changes.try_recv().is_err());
    }
}
