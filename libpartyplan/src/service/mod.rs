//! Service layer for Party Planner
//!
//! `PartyPlanService` is the single entry point for the CLI tools and tests.
//! It owns the shared data source and change bus and hands out the
//! specialized sub-services:
//!
//! - `EventService`: event CRUD, registration, search and home filters
//! - `ReminderService`: reminder CRUD and the detail view lookup
//! - `VendorService`: vendor directory, search and booking
//! - `ValidationService`: create/edit form checks
//! - `ChangeBus`: notification of successful mutations
//!
//! ```no_run
//! use chrono::Utc;
//! use libpartyplan::service::PartyPlanService;
//!
//! # async fn example() -> libpartyplan::Result<()> {
//! let service = PartyPlanService::new()?;
//!
//! let home = service.load_home(Utc::now()).await;
//! println!("{} upcoming events", home.upcoming_events.len());
//!
//! let user = service.default_user_id().to_string();
//! let registered = service.events().register_for_event(3, &user).await;
//! # Ok(())
//! # }
//! ```

pub mod changes;
pub mod events;
pub mod reminders;
pub mod validation;
pub mod vendors;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use self::changes::{ChangeBus, ChangeReceiver};
use self::events::EventService;
use self::reminders::ReminderService;
use self::validation::ValidationService;
use self::vendors::VendorService;
use crate::source::{DataSource, MockDataSource};
use crate::store::MockStore;
use crate::types::{Event, Reminder};
use crate::{Config, Result};

/// What the home screen shows on load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub upcoming_events: Vec<Event>,
    pub reminders: Vec<Reminder>,
}

pub struct PartyPlanService {
    config: Arc<Config>,
    events: EventService,
    reminders: ReminderService,
    vendors: VendorService,
    validation: ValidationService,
    bus: ChangeBus,
}

impl PartyPlanService {
    /// Create a service from the configuration file, or the defaults when
    /// there is none
    pub fn new() -> Result<Self> {
        let config = Config::load_or_default()?;
        Ok(Self::from_config(config))
    }

    /// Create a service over a fresh mock store built from `config`
    pub fn from_config(config: Config) -> Self {
        let store = if config.store.seed {
            MockStore::seeded(Utc::now())
        } else {
            MockStore::empty()
        };
        let source = MockDataSource::new(Arc::new(store), config.latency.to_latency());

        tracing::debug!(
            seeded = config.store.seed,
            latency = ?source.latency(),
            "created mock data source"
        );

        Self::with_source(Arc::new(source), config)
    }

    /// Create a service over any data source
    pub fn with_source(source: Arc<dyn DataSource>, config: Config) -> Self {
        let bus = ChangeBus::new(100);

        Self {
            config: Arc::new(config),
            events: EventService::new(Arc::clone(&source), bus.clone()),
            reminders: ReminderService::new(Arc::clone(&source), bus.clone()),
            vendors: VendorService::new(source, bus.clone()),
            validation: ValidationService::new(),
            bus,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// User id to register with when none is given
    pub fn default_user_id(&self) -> &str {
        &self.config.defaults.user_id
    }

    pub fn events(&self) -> &EventService {
        &self.events
    }

    pub fn reminders(&self) -> &ReminderService {
        &self.reminders
    }

    pub fn vendors(&self) -> &VendorService {
        &self.vendors
    }

    pub fn validation(&self) -> &ValidationService {
        &self.validation
    }

    /// Receive a `Change` for every successful mutation from now on
    pub fn subscribe(&self) -> ChangeReceiver {
        self.bus.subscribe()
    }

    /// Fetch events and reminders concurrently, keeping only events dated
    /// after `now`
    pub async fn load_home(&self, now: DateTime<Utc>) -> HomeData {
        let (events, reminders) = tokio::join!(
            self.events.fetch_events(),
            self.reminders.fetch_upcoming_reminders()
        );

        HomeData {
            upcoming_events: events::upcoming_events(events, now),
            reminders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::Latency;
    use std::time::Duration;

    fn instant_config() -> Config {
        let mut config = Config::default_config();
        config.latency.enabled = false;
        config
    }

    #[tokio::test]
    async fn test_from_config_seeds_store() {
        let service = PartyPlanService::from_config(instant_config());

        assert_eq!(service.events().fetch_events().await.len(), 6);
        assert_eq!(service.reminders().fetch_upcoming_reminders().await.len(), 3);
        assert_eq!(service.vendors().fetch_vendors().await.len(), 8);
        assert_eq!(service.default_user_id(), "current-user-id");
    }

    #[tokio::test]
    async fn test_from_config_without_seed() {
        let mut config = instant_config();
        config.store.seed = false;
        let service = PartyPlanService::from_config(config);

        assert!(service.events().fetch_events().await.is_empty());
        assert!(service.vendors().fetch_vendors().await.is_empty());
    }

    #[tokio::test]
    async fn test_sub_services_share_state() {
        let service = PartyPlanService::from_config(instant_config());

        assert!(service.vendors().book_vendor(2, 4).await);

        let event = service.events().fetch_event_by_id(2).await.unwrap();
        assert_eq!(event.vendors.unwrap()[0].id, 4);
    }

    #[tokio::test]
    async fn test_load_home_filters_past_events() {
        let service = PartyPlanService::from_config(instant_config());

        let home = service
            .load_home(Utc::now() + chrono::Duration::days(12))
            .await;

        let ids: Vec<u32> = home.upcoming_events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 5, 6]);
        assert_eq!(home.reminders.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_home_fetches_concurrently() {
        let source = MockDataSource::new(
            Arc::new(MockStore::seeded(Utc::now())),
            Latency::simulated(),
        );
        let service = PartyPlanService::with_source(Arc::new(source), Config::default_config());

        let start = tokio::time::Instant::now();
        service.load_home(Utc::now()).await;
        let elapsed = start.elapsed();

        // events take 1s, reminders 800ms; sequential would be 1.8s
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_subscribe_sees_mutations() {
        let service = PartyPlanService::from_config(instant_config());
        let mut changes = service.subscribe();

        service.events().delete_event(1).await;

        assert_eq!(
            changes.recv().await.unwrap(),
            changes::Change::EventDeleted { event_id: 1 }
        );
    }
}
