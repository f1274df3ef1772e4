//! Prometheus metrics for controller operations

use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};

lazy_static! {
    /// Total controller operations processed
    pub static ref OPERATION_TOTAL: CounterVec = register_counter_vec!(
        "forum_operation_total",
        "Total controller operations processed",
        &["operation", "status"]
    )
    .unwrap();

    /// Controller operation duration
    pub static ref OPERATION_DURATION: HistogramVec = register_histogram_vec!(
        "forum_operation_duration_seconds",
        "Controller operation duration in seconds",
        &["operation"]
    )
    .unwrap();
}
