//! Fan-out notifier with per-subscriber fault isolation

use crate::{
    event::DomainEvent,
    metrics::{EVENT_DELIVERY_TOTAL, EVENT_PUBLISH_TOTAL},
    subscriber::Subscriber,
};
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Synchronous domain event bus
///
/// Subscribers are invoked in registration order, on the publisher's
/// execution context. Delivery is fire-and-continue: a subscriber that
/// returns an error or panics is logged and skipped, and never prevents
/// later subscribers from running or the publishing operation from
/// completing.
///
/// The bus is cheap to clone; clones share the same subscriber registry.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Arc<dyn Subscriber>>>>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a subscriber
    ///
    /// Subscribers receive events in the order they were registered.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) {
        self.subscribers.write().push(subscriber);
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Deliver an event to every subscriber, in registration order
    pub fn publish(&self, event: &DomainEvent) {
        EVENT_PUBLISH_TOTAL.with_label_values(&[event.name()]).inc();

        // Snapshot the registry so a subscriber registering from inside
        // `update` cannot deadlock against the dispatch loop.
        let subscribers: Vec<Arc<dyn Subscriber>> = self.subscribers.read().iter().cloned().collect();

        debug!(
            event = event.name(),
            subscribers = subscribers.len(),
            "dispatching event"
        );

        for subscriber in subscribers {
            let outcome = catch_unwind(AssertUnwindSafe(|| subscriber.update(event)));

            match outcome {
                Ok(Ok(())) => {
                    EVENT_DELIVERY_TOTAL
                        .with_label_values(&[event.name(), "ok"])
                        .inc();
                }
                Ok(Err(e)) => {
                    warn!(
                        event = event.name(),
                        subscriber = subscriber.name(),
                        "subscriber failed: {}",
                        e
                    );
                    EVENT_DELIVERY_TOTAL
                        .with_label_values(&[event.name(), "error"])
                        .inc();
                }
                Err(_) => {
                    error!(
                        event = event.name(),
                        subscriber = subscriber.name(),
                        "subscriber panicked"
                    );
                    EVENT_DELIVERY_TOTAL
                        .with_label_values(&[event.name(), "panic"])
                        .inc();
                }
            }
        }
    }
}
