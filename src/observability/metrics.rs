//! Metrics recording.
//!
//! # Metrics
//! - `logger_events_total` (counter): emitted events by channel, priority
//! - `logger_suppressed_total` (counter): calls dropped by a disabled channel
//! - `logger_observer_faults_total` (counter): observers that panicked
//! - `logger_config_reloads_total` (counter): reload attempts by result
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding program installs
//!   a recorder (or none, making every call a no-op)
//! - Labels are static strings, so recording never allocates for names

use metrics::counter;

use crate::channels::Channel;
use crate::dispatch::Priority;

pub fn record_event(channel: Channel, priority: Priority) {
    counter!(
        "logger_events_total",
        "channel" => channel.name(),
        "priority" => priority.as_str()
    )
    .increment(1);
}

pub fn record_suppressed(channel: Channel) {
    counter!("logger_suppressed_total", "channel" => channel.name()).increment(1);
}

pub fn record_observer_faults(count: usize) {
    counter!("logger_observer_faults_total").increment(count as u64);
}

/// `result` is "applied" or "rejected".
pub fn record_config_reload(result: &'static str) {
    counter!("logger_config_reloads_total", "result" => result).increment(1);
}
