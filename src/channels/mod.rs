//! Channel subsystem.
//!
//! # Data Flow
//! ```text
//! Channel::ALL (compile-time table)
//!     → registry.rs (Channel → enabled, all enabled at start)
//!     → color.rs (Channel → display color, theme fallback)
//!
//! On config apply:
//!     LoggerConfig.channels
//!     → replace_all on the registry
//!     → new ColorTable swapped into the logger
//! ```
//!
//! # Design Decisions
//! - Closed channel set; no runtime enumeration
//! - Absent channel = inactive
//! - Whole-table replacement is atomic for readers

pub mod channel;
pub mod color;
pub mod registry;

pub use channel::{Channel, UnknownChannel};
pub use color::{Color, ColorError, ColorTable, Theme};
pub use registry::{ChannelRegistry, ChannelStates, RegistryError};
