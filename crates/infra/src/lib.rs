mod config;
mod reminders;
mod repos;
mod system;

pub use config::Config;
pub use reminders::{
    PublishError, PublishReport, ReminderBus, ReminderScheduler, ReminderSubscription,
    ScheduleOutcome, SubscribeError, SubscriptionId,
};
pub use repos::{ILocationRepo, Repos};
pub use system::{ISys, RealSys};
use std::sync::Arc;

#[derive(Clone)]
pub struct VisitContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Fans fired reminders out to the delivery transport
    pub reminder_bus: ReminderBus,
    pub reminders: ReminderScheduler,
    /// Held while a location change and its reminder side effects run
    pub mutation_lock: Arc<tokio::sync::Mutex<()>>,
}

impl VisitContext {
    pub fn new(repos: Repos, config: Config, sys: Arc<dyn ISys>) -> Self {
        let reminder_bus = ReminderBus::new(config.reminder_subscriber_buffer);
        let reminders = ReminderScheduler::new(reminder_bus.clone(), sys.clone());
        Self {
            repos,
            config,
            sys,
            reminder_bus,
            reminders,
            mutation_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn create_inmemory() -> Self {
        Self::new(Repos::create_inmemory(), Config::new(), Arc::new(RealSys {}))
    }
}

/// Will setup the infrastructure context given the environment.
/// Locations are kept in memory, the actual record store lives
/// outside of this service.
pub async fn setup_context() -> VisitContext {
    VisitContext::create_inmemory()
}
