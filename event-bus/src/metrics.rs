//! Prometheus metrics for event dispatch

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, CounterVec};

lazy_static! {
    /// Total events published
    pub static ref EVENT_PUBLISH_TOTAL: CounterVec = register_counter_vec!(
        "event_bus_publish_total",
        "Total events published",
        &["event"]
    )
    .unwrap();

    /// Per-subscriber delivery outcomes
    pub static ref EVENT_DELIVERY_TOTAL: CounterVec = register_counter_vec!(
        "event_bus_delivery_total",
        "Per-subscriber event delivery outcomes",
        &["event", "status"]
    )
    .unwrap();
}
