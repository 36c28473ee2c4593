//! Channel-based logging.
//!
//! Log calls name a [`Channel`] and a [`Priority`]. A [`ChannelRegistry`]
//! decides whether a call is emitted; emitted calls are colored per channel
//! and priority, routed to a severity-keyed [`LogSink`] and broadcast to
//! observers. FatalError calls consult a host-supplied [`FatalHandler`].
//!
//! ```
//! use enhanced_logger::{Channel, Logger, MemorySink, Priority, SinkLevel};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().sink(sink.clone()).build();
//!
//! logger.log_fmt(Channel::Physics, Priority::Info, "bodies={0}", &[&12]).unwrap();
//! logger.registry().toggle(Channel::Physics).unwrap();
//! logger.info(Channel::Physics, "not emitted");
//!
//! assert_eq!(sink.at(SinkLevel::Info).len(), 1);
//! ```

// Core
pub mod channels;
pub mod dispatch;

// Channel table management
pub mod codegen;
pub mod config;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use channels::{Channel, ChannelRegistry, Color, ColorTable, RegistryError, Theme};
pub use config::LoggerConfig;
pub use dispatch::{
    ConsoleSink, FatalDecision, FatalHandler, LogError, LogEvent, LogObserver, LogSink, Logger,
    MemorySink, Outcome, Priority, SinkLevel, TracingSink,
};
