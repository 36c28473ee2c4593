//! The closed set of log channels.
//!
//! Channels are declared once here and iterated through [`Channel::ALL`];
//! nothing in the crate enumerates them at runtime any other way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named category used to filter related log messages.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    AI = 0,
    Rendering = 1,
    Physics = 2,
    UI = 3,
    Audio = 4,
    Loading = 5,
    Localisation = 6,
    Platform = 7,
    Assert = 8,
    Build = 9,
    Analytics = 10,
    Animation = 11,
    Player = 12,
}

impl Channel {
    /// Every channel, in id order.
    pub const ALL: [Channel; 13] = [
        Channel::AI,
        Channel::Rendering,
        Channel::Physics,
        Channel::UI,
        Channel::Audio,
        Channel::Loading,
        Channel::Localisation,
        Channel::Platform,
        Channel::Assert,
        Channel::Build,
        Channel::Analytics,
        Channel::Animation,
        Channel::Player,
    ];

    /// Stable numeric id.
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Look a channel up by id.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.id() == id)
    }

    /// Human-readable name, as printed inside `[...]` in log lines.
    pub fn name(self) -> &'static str {
        match self {
            Channel::AI => "AI",
            Channel::Rendering => "Rendering",
            Channel::Physics => "Physics",
            Channel::UI => "UI",
            Channel::Audio => "Audio",
            Channel::Loading => "Loading",
            Channel::Localisation => "Localisation",
            Channel::Platform => "Platform",
            Channel::Assert => "Assert",
            Channel::Build => "Build",
            Channel::Analytics => "Analytics",
            Channel::Animation => "Animation",
            Channel::Player => "Player",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    /// Accepts a channel name (case-insensitive) or its numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(id) = trimmed.parse::<u32>() {
            return Self::from_id(id).ok_or_else(|| UnknownChannel(s.to_string()));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}
