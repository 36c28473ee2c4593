//! Channel source generation.
//!
//! # Data Flow
//! ```text
//! LoggerConfig.channels
//!     → validation (identifier names, unique names and ids)
//!     → render.rs (rows sorted by id → channel lines, color lines)
//!     → %DATA% substituted into the two templates
//!     → writer.rs (channel.rs, channel_colors.rs on disk)
//! ```
//!
//! # Design Decisions
//! - Rendering is a pure function; only writer.rs touches the filesystem
//! - Built-in templates are compiled in; a template directory overrides them

pub mod render;
pub mod writer;

use std::path::PathBuf;

use crate::config::ValidationError;

pub use render::{generate, render_channels, render_colors, GeneratedSources, Templates};
pub use writer::{load_templates, write_sources};

/// Errors from code generation.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} template has no %DATA% placeholder")]
    MissingPlaceholder(&'static str),

    #[error("invalid channel table: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
