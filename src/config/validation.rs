//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic, colors validate on parse)
//! - Check the channel table: identifier names, unique names, unique ids
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::{HashMap, HashSet};

use crate::config::schema::{ChannelConfig, LoggerConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Channel names become enum variants in generated code.
    #[error("channel name '{0}' is not a valid identifier")]
    InvalidName(String),

    #[error("channel '{0}' is listed more than once")]
    DuplicateName(String),

    #[error("channel id {id} is used by both '{first}' and '{second}'")]
    DuplicateId { id: u32, first: String, second: String },

    #[error("channel '{0}' is not built in and needs an explicit id")]
    MissingId(String),

    #[error("log level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Validate a whole configuration.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_channels(&config.channels).err().unwrap_or_default();

    let level = config.observability.log_level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a channel table on its own (used by code generation too).
pub fn validate_channels(channels: &[ChannelConfig]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut names: HashSet<&str> = HashSet::new();
    let mut ids: HashMap<u32, &str> = HashMap::new();

    for row in channels {
        if !is_identifier(&row.name) {
            errors.push(ValidationError::InvalidName(row.name.clone()));
        }

        if !names.insert(row.name.as_str()) {
            errors.push(ValidationError::DuplicateName(row.name.clone()));
        }

        match row.resolved_id() {
            Some(id) => {
                if let Some(first) = ids.insert(id, row.name.as_str()) {
                    errors.push(ValidationError::DuplicateId {
                        id,
                        first: first.to_string(),
                        second: row.name.clone(),
                    });
                }
            }
            None => errors.push(ValidationError::MissingId(row.name.clone())),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
