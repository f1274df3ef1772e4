//! In-process domain event bus
//!
//! Synchronous fan-out of named domain events to registered subscribers.
//! Delivery happens on the publisher's execution context, in registration
//! order, with each subscriber invocation individually guarded so one
//! misbehaving subscriber cannot stop delivery to the rest.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod metrics;
pub mod notifier;
pub mod subscriber;

pub use error::{Error, Result};
pub use event::{DomainEvent, EventKind};
pub use notifier::EventBus;
pub use subscriber::{LogSubscriber, Subscriber};
