//! Observability subsystem.
//!
//! Diagnostics about the logger itself, separate from the channel log lines
//! it dispatches.
//!
//! # Data Flow
//! ```text
//! logger / config / watcher produce:
//!     → logging.rs (tracing subscriber for crate diagnostics)
//!     → metrics.rs (event, suppression, fault and reload counters)
//! ```

pub mod logging;
pub mod metrics;
