//! Final message construction.

use crate::channels::{Channel, Color};

/// Wrap `message` in channel- and priority-colored rich-text markup.
pub fn colored(channel: Channel, channel_color: &Color, priority_color: &Color, message: &str) -> String {
    format!(
        "<b><color={}>[{}] </color></b> <color={}>{}</color>",
        channel_color, channel, priority_color, message
    )
}

/// Plain `[Channel] message`, for targets that cannot render markup.
pub fn plain(channel: Channel, message: &str) -> String {
    format!("[{}] {}", channel, message)
}
