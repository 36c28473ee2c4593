//! Display colors for channels and priorities.
//!
//! Colors are HTML color strings as understood by rich-text consoles:
//! either `#RRGGBB` or one of a small set of named colors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::channels::Channel;

/// Named colors accepted in place of a hex code, with their hex value.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "000000"),
    ("white", "FFFFFF"),
    ("red", "FF0000"),
    ("green", "008000"),
    ("blue", "0000FF"),
    ("yellow", "FFFF00"),
    ("orange", "FFA500"),
    ("purple", "800080"),
    ("teal", "008080"),
    ("olive", "808000"),
    ("brown", "A52A2A"),
    ("navy", "000080"),
    ("maroon", "800000"),
    ("grey", "808080"),
    ("gray", "808080"),
    ("cyan", "00FFFF"),
    ("magenta", "FF00FF"),
    ("lime", "00FF00"),
    ("silver", "C0C0C0"),
];

/// Errors building a [`Color`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color '{0}': expected #RRGGBB or a named color")]
    Invalid(String),
}

/// A validated HTML color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse and validate a color string.
    pub fn new(value: impl Into<String>) -> Result<Self, ColorError> {
        let value = value.into();
        let trimmed = value.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Ok(Self(format!("#{}", hex.to_ascii_uppercase())));
            }
            return Err(ColorError::Invalid(value));
        }

        let lower = trimmed.to_ascii_lowercase();
        if NAMED_COLORS.iter().any(|(name, _)| *name == lower) {
            Ok(Self(lower))
        } else {
            Err(ColorError::Invalid(value))
        }
    }

    /// Color string as it appears in markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercase `RRGGBB` digits, resolving named colors.
    pub fn to_hex_rgb(&self) -> String {
        match self.0.strip_prefix('#') {
            Some(hex) => hex.to_string(),
            None => NAMED_COLORS
                .iter()
                .find(|(name, _)| *name == self.0)
                .map(|(_, hex)| hex.to_string())
                .unwrap_or_else(|| "000000".to_string()),
        }
    }

    pub(crate) fn named(name: &'static str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Console background the markup is rendered on.
///
/// Decides the Info priority color and the fallback color for channels
/// with no entry in the [`ColorTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Foreground color readable on this theme.
    pub fn foreground(self) -> Color {
        match self {
            Theme::Dark => Color::named("white"),
            Theme::Light => Color::named("black"),
        }
    }
}

/// Channel to color mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: HashMap<Channel, Color>,
}

impl ColorTable {
    /// An empty table; every lookup falls back.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock color for every built-in channel.
    pub fn builtin() -> Self {
        let colors = Channel::ALL
            .iter()
            .map(|&c| (c, Color(format!("#{}", builtin_hex(c)))))
            .collect();
        Self { colors }
    }

    pub fn get(&self, channel: Channel) -> Option<&Color> {
        self.colors.get(&channel)
    }

    pub fn insert(&mut self, channel: Channel, color: Color) -> Option<Color> {
        self.colors.insert(channel, color)
    }

    pub fn remove(&mut self, channel: Channel) -> Option<Color> {
        self.colors.remove(&channel)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl FromIterator<(Channel, Color)> for ColorTable {
    fn from_iter<I: IntoIterator<Item = (Channel, Color)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

fn builtin_hex(channel: Channel) -> &'static str {
    match channel {
        Channel::AI => "0000FF",
        Channel::Rendering => "008000",
        Channel::Physics => "FFFF00",
        Channel::UI => "800080",
        Channel::Audio => "008080",
        Channel::Loading => "808000",
        Channel::Localisation => "A52A2A",
        Channel::Platform => "FF0000",
        Channel::Assert => "FF0000",
        Channel::Build => "000080",
        Channel::Analytics => "800000",
        Channel::Animation => "000000",
        Channel::Player => "00F6FF",
    }
}
