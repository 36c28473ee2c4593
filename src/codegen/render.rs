//! Channel table → source text.
//!
//! Everything here is pure; file access lives in `writer.rs`.

use std::fmt::Write;

use crate::codegen::CodegenError;
use crate::config::schema::ChannelConfig;
use crate::config::validation::validate_channels;

/// Token replaced by generated rows in both templates.
pub const DATA_PLACEHOLDER: &str = "%DATA%";

/// Color used for rows without one.
const DEFAULT_HEX: &str = "000000";

/// The two templates the generator fills in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub channel: String,
    pub colors: String,
}

impl Templates {
    /// Templates shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            channel: include_str!("../../templates/channel.rs.tmpl").to_string(),
            colors: include_str!("../../templates/channel_colors.rs.tmpl").to_string(),
        }
    }
}

/// Generated source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    /// Channel enum declaration.
    pub channel: String,
    /// Channel → color table.
    pub colors: String,
}

/// One `Name = id,` line per row, sorted by id.
pub fn render_channels(rows: &[ChannelConfig]) -> String {
    let mut out = String::new();
    for (id, row) in sorted(rows) {
        let _ = writeln!(out, "    {} = {},", row.name, id);
    }
    out
}

/// One `(Channel::Name, "#RRGGBB"),` line per row, sorted by id.
pub fn render_colors(rows: &[ChannelConfig]) -> String {
    let mut out = String::new();
    for (_, row) in sorted(rows) {
        let hex = row
            .color
            .as_ref()
            .map(|c| c.to_hex_rgb())
            .unwrap_or_else(|| DEFAULT_HEX.to_string());
        let _ = writeln!(out, "    (Channel::{}, \"#{}\"),", row.name, hex);
    }
    out
}

/// Validate `rows` and fill both templates.
pub fn generate(rows: &[ChannelConfig], templates: &Templates) -> Result<GeneratedSources, CodegenError> {
    validate_channels(rows).map_err(CodegenError::Validation)?;

    Ok(GeneratedSources {
        channel: fill("channel", &templates.channel, &render_channels(rows))?,
        colors: fill("colors", &templates.colors, &render_colors(rows))?,
    })
}

fn fill(name: &'static str, template: &str, data: &str) -> Result<String, CodegenError> {
    if !template.contains(DATA_PLACEHOLDER) {
        return Err(CodegenError::MissingPlaceholder(name));
    }
    Ok(template.replace(DATA_PLACEHOLDER, data))
}

/// Rows paired with their id, in id order. Rows without an id sort last;
/// validation rejects them before rendering in `generate`.
fn sorted(rows: &[ChannelConfig]) -> Vec<(u32, &ChannelConfig)> {
    let mut rows: Vec<(u32, &ChannelConfig)> = rows
        .iter()
        .map(|row| (row.resolved_id().unwrap_or(u32::MAX), row))
        .collect();
    rows.sort_by_key(|(id, _)| *id);
    rows
}
