//! Log observers.
//!
//! # Responsibilities
//! - Keep an ordered list of subscribed observers
//! - Notify every observer of each emitted event, in subscription order
//!
//! # Design Decisions
//! - The list lock is held only to clone a snapshot; observers run unlocked,
//!   so an observer may subscribe/unsubscribe or log from inside `on_log`
//! - A panicking observer is isolated: it is reported and the rest still
//!   run. `notify` returns the fault count for the caller to record

use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::channels::Channel;
use crate::dispatch::Priority;

/// One emitted log call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub channel: Channel,
    pub priority: Priority,
    /// The finalized message, as written to the sink.
    pub message: String,
}

/// Callback fired for every emitted event.
pub trait LogObserver: Send + Sync {
    fn on_log(&self, event: &LogEvent);
}

impl<F> LogObserver for F
where
    F: Fn(&LogEvent) + Send + Sync,
{
    fn on_log(&self, event: &LogEvent) {
        self(event)
    }
}

/// Handle returned by [`ObserverList::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Ordered set of observers.
#[derive(Default)]
pub struct ObserverList {
    next_id: AtomicU64,
    observers: Mutex<Vec<(ObserverId, Arc<dyn LogObserver>)>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer at the end of the list.
    pub fn subscribe(&self, observer: Arc<dyn LogObserver>) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((id, observer));
        id
    }

    /// Remove an observer. Returns whether it was subscribed.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every observer with `event`. Returns how many of them panicked.
    pub fn notify(&self, event: &LogEvent) -> usize {
        let snapshot: Vec<(ObserverId, Arc<dyn LogObserver>)> = self
            .observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        let mut faults = 0;
        for (id, observer) in snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| observer.on_log(event))).is_err() {
                faults += 1;
                tracing::error!(
                    observer = ?id,
                    channel = %event.channel,
                    priority = %event.priority,
                    "Log observer panicked, continuing with remaining observers"
                );
            }
        }
        faults
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> LogEvent {
        LogEvent {
            channel: Channel::AI,
            priority: Priority::Info,
            message: "[AI] hello".into(),
        }
    }

    #[test]
    fn test_notify_in_subscription_order() {
        let list = ObserverList::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..3 {
            let order = order.clone();
            list.subscribe(Arc::new(move |_: &LogEvent| order.lock().unwrap().push(n)));
        }

        assert_eq!(list.notify(&event()), 0);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let list = ObserverList::new();
        let hits = Arc::new(AtomicU64::new(0));

        let h = hits.clone();
        let id = list.subscribe(Arc::new(move |_: &LogEvent| {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        list.notify(&event());
        assert!(list.unsubscribe(id));
        assert!(!list.unsubscribe(id));
        list.notify(&event());

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let list = ObserverList::new();
        let hits = Arc::new(AtomicU64::new(0));

        list.subscribe(Arc::new(|_: &LogEvent| {
            panic!("observer bug");
        }));
        let h = hits.clone();
        list.subscribe(Arc::new(move |_: &LogEvent| {
            h.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(list.notify(&event()), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
