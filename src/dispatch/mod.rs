//! Log dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! logger.log(channel, priority, message[, args])
//!     → registry.is_active(channel)        (inactive: stop, Suppressed)
//!     → format.rs ({N} substitution)       (mismatch: FormatError, nothing written)
//!     → markup.rs (colored, or plain for FatalError)
//!     → fatal.rs (FatalError only: handler decides Continue/Halt)
//!     → sink.rs (Info / Warning / Error by priority)
//!     → observer.rs (every observer, in subscription order)
//! ```
//!
//! # Design Decisions
//! - Routing is a pure function of priority
//! - The fatal handler is the only call that may block
//! - Halting is reported to the caller, never performed here

pub mod fatal;
pub mod format;
pub mod logger;
pub mod markup;
pub mod observer;
pub mod priority;
pub mod sink;

pub use fatal::{FatalDecision, FatalHandler, FatalHandlerKind};
pub use format::{format_message, FormatError};
pub use logger::{LogError, Logger, LoggerBuilder, Outcome};
pub use observer::{LogEvent, LogObserver, ObserverId};
pub use priority::{Priority, SinkLevel};
pub use sink::{ConsoleSink, LogSink, MemorySink, TracingSink};
