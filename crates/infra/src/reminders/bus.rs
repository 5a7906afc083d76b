use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use visit_reminder_domain::ReminderEvent;

/// Identifies a subscriber on the `ReminderBus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum PublishError {
    #[error("There are no subscribers to receive the reminder")]
    NoSubscribers,
}

#[derive(Error, Debug, PartialEq)]
pub enum SubscribeError {
    #[error("The limit of {0} subscribers is reached")]
    LimitReached(usize),
}

/// Outcome of a successful `ReminderBus::publish`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers that got the reminder queued
    pub delivered: usize,
    /// Subscribers that were registered but could not take the reminder
    pub dropped: usize,
}

/// Broadcasts fired `ReminderEvent`s to every subscriber that is attached
/// at the moment of publishing. There is no replay for late subscribers.
///
/// Every subscriber has its own bounded queue, so a subscriber that is not
/// keeping up only loses its own copies.
#[derive(Clone)]
pub struct ReminderBus {
    inner: Arc<BusInner>,
}

struct BusInner {
    subscribers: Mutex<Subscribers>,
    buffer: usize,
}

#[derive(Default)]
struct Subscribers {
    senders: HashMap<SubscriptionId, mpsc::Sender<ReminderEvent>>,
    next_id: u64,
}

impl BusInner {
    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        self.lock().senders.remove(&id).is_some()
    }
}

impl ReminderBus {
    pub fn new(buffer: usize) -> Self {
        Self {
            inner: Arc::new(BusInner {
                subscribers: Mutex::new(Subscribers::default()),
                // `mpsc::channel` does not accept a zero capacity
                buffer: buffer.max(1),
            }),
        }
    }

    pub fn subscribe(&self) -> ReminderSubscription {
        let mut subscribers = self.inner.lock();
        self.attach(&mut subscribers)
    }

    /// Subscribes unless `max_subscribers` are already attached. The check
    /// and the insert happen under the same lock.
    pub fn try_subscribe(
        &self,
        max_subscribers: usize,
    ) -> Result<ReminderSubscription, SubscribeError> {
        let mut subscribers = self.inner.lock();
        if subscribers.senders.len() >= max_subscribers {
            return Err(SubscribeError::LimitReached(max_subscribers));
        }
        Ok(self.attach(&mut subscribers))
    }

    fn attach(&self, subscribers: &mut Subscribers) -> ReminderSubscription {
        let (sender, receiver) = mpsc::channel(self.inner.buffer);
        let id = SubscriptionId(subscribers.next_id);
        subscribers.next_id += 1;
        subscribers.senders.insert(id, sender);
        debug!(
            "Subscriber {} attached to reminders (total: {})",
            id,
            subscribers.senders.len()
        );

        ReminderSubscription {
            id,
            receiver,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Detaches the subscriber. Returns false if it was not attached,
    /// which is not an error.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.remove(id);
        if removed {
            debug!("Subscriber {} detached from reminders", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().senders.len()
    }

    /// Queues the reminder for every attached subscriber without waiting
    /// on any of them.
    pub fn publish(&self, event: &ReminderEvent) -> Result<PublishReport, PublishError> {
        let mut subscribers = self.inner.lock();
        if subscribers.senders.is_empty() {
            return Err(PublishError::NoSubscribers);
        }

        let mut report = PublishReport {
            delivered: 0,
            dropped: 0,
        };
        let mut closed = Vec::new();
        for (id, sender) in subscribers.senders.iter() {
            match sender.try_send(event.clone()) {
                Ok(()) => report.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Subscriber {} is not keeping up, dropping reminder for location: {}",
                        id, event.location_id
                    );
                    report.dropped += 1;
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("Subscriber {} has gone away", id);
                    report.dropped += 1;
                    closed.push(*id);
                }
            }
        }
        for id in closed {
            subscribers.senders.remove(&id);
        }

        Ok(report)
    }
}

/// Handle for receiving published reminders. Dropping it unsubscribes.
pub struct ReminderSubscription {
    id: SubscriptionId,
    receiver: mpsc::Receiver<ReminderEvent>,
    bus: Weak<BusInner>,
}

impl ReminderSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next reminder. Gives `None` once the subscription has
    /// been unsubscribed and every queued reminder is consumed.
    pub async fn recv(&mut self) -> Option<ReminderEvent> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<ReminderEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for ReminderSubscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.remove(self.id);
        }
    }
}
