//! File access around the pure generator.

use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::render::{GeneratedSources, Templates};
use crate::codegen::CodegenError;

/// Template file names looked up in a template directory.
pub const CHANNEL_TEMPLATE: &str = "channel.rs.tmpl";
pub const COLORS_TEMPLATE: &str = "channel_colors.rs.tmpl";

/// Output file names.
pub const CHANNEL_FILE: &str = "channel.rs";
pub const COLORS_FILE: &str = "channel_colors.rs";

/// Read both templates from `dir`.
pub fn load_templates(dir: &Path) -> Result<Templates, CodegenError> {
    Ok(Templates {
        channel: read(dir.join(CHANNEL_TEMPLATE))?,
        colors: read(dir.join(COLORS_TEMPLATE))?,
    })
}

/// Write both generated files into `dir`, creating it if needed.
/// Returns the written paths.
pub fn write_sources(dir: &Path, sources: &GeneratedSources) -> Result<Vec<PathBuf>, CodegenError> {
    fs::create_dir_all(dir).map_err(|source| CodegenError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(2);
    for (name, content) in [(CHANNEL_FILE, &sources.channel), (COLORS_FILE, &sources.colors)] {
        let path = dir.join(name);
        fs::write(&path, content).map_err(|source| CodegenError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = content.len(), "Wrote generated source");
        written.push(path);
    }
    Ok(written)
}

fn read(path: PathBuf) -> Result<String, CodegenError> {
    fs::read_to_string(&path).map_err(|source| CodegenError::Io { path, source })
}
