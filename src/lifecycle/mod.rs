//! Lifecycle management for long-running commands.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger_handle().send
//!
//! Shutdown (shutdown.rs):
//!     send → every subscriber's recv() resolves → loops exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
