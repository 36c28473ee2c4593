//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the logger.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::channels::{Channel, ChannelStates, Color, ColorTable, Theme};
use crate::dispatch::fatal::FatalHandlerKind;

/// Root configuration for a logger.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Console theme, picks the Info and fallback colors.
    pub theme: Theme,

    /// Fatal error handling.
    pub fatal: FatalConfig,

    /// Diagnostics of the logger itself.
    pub observability: ObservabilityConfig,

    /// The channel table: one row per channel.
    pub channels: Vec<ChannelConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            fatal: FatalConfig::default(),
            observability: ObservabilityConfig::default(),
            channels: default_channels(),
        }
    }
}

impl LoggerConfig {
    /// Enabled flags for every row naming a built-in channel.
    ///
    /// Rows for channels this build does not know are skipped; they only
    /// become usable after code generation.
    pub fn channel_states(&self) -> ChannelStates {
        self.known_rows()
            .map(|(channel, row)| (channel, row.enabled))
            .collect()
    }

    /// Colors for every row naming a built-in channel and carrying a color.
    pub fn color_table(&self) -> ColorTable {
        self.known_rows()
            .filter_map(|(channel, row)| row.color.clone().map(|c| (channel, c)))
            .collect()
    }

    fn known_rows(&self) -> impl Iterator<Item = (Channel, &ChannelConfig)> {
        self.channels.iter().filter_map(|row| match row.name.parse::<Channel>() {
            Ok(channel) => Some((channel, row)),
            Err(_) => {
                tracing::warn!(channel = %row.name, "Channel not known to this build, skipping");
                None
            }
        })
    }
}

/// One row of the channel table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChannelConfig {
    /// Channel name; also the identifier used by generated code.
    pub name: String,

    /// Numeric id. Defaults to the built-in id for known channel names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    /// Whether the channel is emitted.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Display color. Channels without one use the theme fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl ChannelConfig {
    /// Explicit id, or the built-in id when the name is a known channel.
    pub fn resolved_id(&self) -> Option<u32> {
        self.id
            .or_else(|| self.name.parse::<Channel>().ok().map(Channel::id))
    }
}

fn default_enabled() -> bool {
    true
}

/// Every built-in channel, enabled, with its stock color.
pub fn default_channels() -> Vec<ChannelConfig> {
    let colors = ColorTable::builtin();
    Channel::ALL
        .iter()
        .map(|&channel| ChannelConfig {
            name: channel.name().to_string(),
            id: Some(channel.id()),
            enabled: true,
            color: colors.get(channel).cloned(),
        })
        .collect()
}

/// Fatal error handling configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FatalConfig {
    /// continue | halt | prompt
    pub handler: FatalHandlerKind,
}

/// Output style for the diagnostic subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Subscriber output format.
    pub format: LogFormat,

    /// Record metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::default(),
            metrics_enabled: true,
        }
    }
}
