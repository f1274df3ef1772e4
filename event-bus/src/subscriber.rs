//! Subscriber interface for domain events

use crate::{event::DomainEvent, Result};
use tracing::info;

/// Domain event listener
///
/// Subscribers are side-effect-only: they are invoked after the operation
/// that produced the event has committed, and cannot veto or roll it back.
/// A returned error is logged by the bus and does not stop delivery to
/// subscribers registered after this one.
pub trait Subscriber: Send + Sync {
    /// Subscriber name, used in dispatch logs and metrics
    fn name(&self) -> &str;

    /// Handle a delivered event
    fn update(&self, event: &DomainEvent) -> Result<()>;
}

/// Subscriber that logs every event through `tracing`
#[derive(Debug, Default)]
pub struct LogSubscriber;

impl LogSubscriber {
    /// Create new log subscriber
    pub fn new() -> Self {
        Self
    }
}

impl Subscriber for LogSubscriber {
    fn name(&self) -> &str {
        "log"
    }

    fn update(&self, event: &DomainEvent) -> Result<()> {
        info!(event = event.name(), payload = %event.payload, "domain event");
        Ok(())
    }
}
