mod bus;
mod scheduler;

pub use bus::{
    PublishError, PublishReport, ReminderBus, ReminderSubscription, SubscribeError, SubscriptionId,
};
pub use scheduler::{ReminderScheduler, ScheduleOutcome};
