use super::bus::{PublishError, ReminderBus};
use crate::system::ISys;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use visit_reminder_domain::{Location, ReminderEntry, ReminderStatus, ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// A reminder is pending and will fire at `fire_at`
    Scheduled { fire_at: DateTime<Utc> },
    /// The visit time is not in the future, so no reminder exists
    NotInFuture,
}

/// Keeps exactly one pending reminder timer per `Location` with a visit
/// time in the future and publishes a `ReminderEvent` on the `ReminderBus`
/// when the timer elapses.
///
/// Every armed timer gets a new generation number. A timer only fires if the
/// entry for its location still has the same generation and is pending when
/// the entry lock is taken, so cancel and fire for the same location can never
/// both succeed. Must be used from within a Tokio runtime.
#[derive(Clone)]
pub struct ReminderScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    entries: Mutex<Entries>,
    bus: ReminderBus,
    sys: Arc<dyn ISys>,
}

#[derive(Default)]
struct Entries {
    by_location: HashMap<ID, ScheduledReminder>,
    next_generation: u64,
}

struct ScheduledReminder {
    entry: ReminderEntry,
    generation: u64,
    timer: JoinHandle<()>,
}

#[derive(Debug, Clone, Copy)]
enum LocationChange {
    Created,
    Updated,
}

impl SchedulerInner {
    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fire(&self, location_id: &ID, generation: u64) {
        let entry = {
            let mut entries = self.lock();
            let is_current = matches!(
                entries.by_location.get(location_id),
                Some(scheduled)
                    if scheduled.generation == generation
                        && scheduled.entry.status == ReminderStatus::Pending
            );
            if !is_current {
                debug!(
                    "Reminder timer for location: {} is stale, ignoring it",
                    location_id
                );
                return;
            }
            match entries.by_location.remove(location_id) {
                Some(mut scheduled) => {
                    scheduled.entry.status = ReminderStatus::Fired;
                    scheduled.entry
                }
                None => return,
            }
        };

        let event = entry.to_event();
        match self.bus.publish(&event) {
            Ok(report) => info!(
                "Reminder for location: {} fired, delivered to {} subscribers ({} dropped)",
                event.location_id, report.delivered, report.dropped
            ),
            Err(PublishError::NoSubscribers) => info!(
                "Reminder for location: {} fired, but nobody was listening",
                event.location_id
            ),
        }
    }
}

impl Drop for SchedulerInner {
    fn drop(&mut self) {
        let entries = self
            .entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, scheduled) in entries.by_location.drain() {
            scheduled.timer.abort();
        }
    }
}

fn cancel_entry(entries: &mut Entries, location_id: &ID) -> Option<ReminderEntry> {
    let mut scheduled = entries.by_location.remove(location_id)?;
    // The timer might already be waiting for the entry lock. It will find
    // the entry gone and do nothing.
    scheduled.timer.abort();
    scheduled.entry.status = ReminderStatus::Cancelled;
    Some(scheduled.entry)
}

async fn fire_after(
    scheduler: Weak<SchedulerInner>,
    location_id: ID,
    generation: u64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;
    if let Some(scheduler) = scheduler.upgrade() {
        scheduler.fire(&location_id, generation);
    }
}

impl ReminderScheduler {
    pub fn new(bus: ReminderBus, sys: Arc<dyn ISys>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                entries: Mutex::new(Entries::default()),
                bus,
                sys,
            }),
        }
    }

    pub fn location_created(&self, location: &Location) -> ScheduleOutcome {
        self.schedule(location, LocationChange::Created)
    }

    /// Cancels the pending reminder of the `Location`, if any, and schedules
    /// a new one for the updated visit time.
    pub fn location_updated(&self, location: &Location) -> ScheduleOutcome {
        self.schedule(location, LocationChange::Updated)
    }

    /// Returns the cancelled entry, or `None` if there was no pending
    /// reminder for the `Location`.
    pub fn location_deleted(&self, location_id: &ID) -> Option<ReminderEntry> {
        let cancelled = cancel_entry(&mut self.inner.lock(), location_id);
        if cancelled.is_some() {
            info!(
                "Cancelled reminder for deleted location: {}",
                location_id
            );
        }
        cancelled
    }

    pub fn pending(&self, location_id: &ID) -> Option<ReminderEntry> {
        self.inner
            .lock()
            .by_location
            .get(location_id)
            .map(|scheduled| scheduled.entry.clone())
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().by_location.len()
    }

    fn schedule(&self, location: &Location, change: LocationChange) -> ScheduleOutcome {
        let now = self.inner.sys.get_timestamp_millis();
        let mut entries = self.inner.lock();

        if let Some(previous) = cancel_entry(&mut entries, &location.id) {
            match change {
                LocationChange::Created => warn!(
                    "Location: {} was created while it already had a reminder at {}, replacing it",
                    location.id, previous.fire_at
                ),
                LocationChange::Updated => debug!(
                    "Cancelled reminder at {} for updated location: {}",
                    previous.fire_at, location.id
                ),
            }
        }

        let delay = match location.reminder_delay(now) {
            Some(delay) => delay,
            None => {
                debug!(
                    "Visit time {} of {:?} location: {} is not in the future, no reminder scheduled",
                    location.visit_time, change, location.id
                );
                return ScheduleOutcome::NotInFuture;
            }
        };

        let generation = entries.next_generation;
        entries.next_generation += 1;
        let timer = tokio::spawn(fire_after(
            Arc::downgrade(&self.inner),
            location.id,
            generation,
            delay,
        ));
        let entry = ReminderEntry::pending(location);
        let fire_at = entry.fire_at;
        entries.by_location.insert(
            location.id,
            ScheduledReminder {
                entry,
                generation,
                timer,
            },
        );

        info!(
            "Scheduled reminder for {:?} location: {} at {}",
            change, location.id, fire_at
        );
        ScheduleOutcome::Scheduled { fire_at }
    }
}
