use crate::{shared::entity::ID, Location};
use chrono::{DateTime, Utc};

/// Lifecycle of a `ReminderEntry`. `Fired` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderStatus {
    Pending,
    Fired,
    Cancelled,
}

/// Bookkeeping for the single reminder scheduled for a `Location`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEntry {
    pub location_id: ID,
    /// Name of the `Location` when the reminder was scheduled
    pub location_name: String,
    /// The visit time, which is also when the reminder fires
    pub fire_at: DateTime<Utc>,
    pub status: ReminderStatus,
}

impl ReminderEntry {
    pub fn pending(location: &Location) -> Self {
        Self {
            location_id: location.id,
            location_name: location.name.clone(),
            fire_at: location.visit_time,
            status: ReminderStatus::Pending,
        }
    }

    pub fn to_event(&self) -> ReminderEvent {
        ReminderEvent {
            location_id: self.location_id,
            location_name: self.location_name.clone(),
            visit_time: self.fire_at,
        }
    }
}

/// Emitted once when the visit time of a `Location` arrives
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEvent {
    pub location_id: ID,
    pub location_name: String,
    pub visit_time: DateTime<Utc>,
}

impl ReminderEvent {
    pub fn message(&self) -> String {
        format!("It's time to visit {}", self.location_name)
    }
}
