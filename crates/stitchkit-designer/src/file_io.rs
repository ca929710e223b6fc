//! Reading and writing pattern documents on disk.
//!
//! Writes go to a temporary file next to the destination which is renamed
//! over it only after the whole document has been written, so a failed save
//! never leaves a truncated `.gcode` file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use stitchkit_core::{Result, ScaleConfig};
use tempfile::NamedTempFile;

use crate::gcode::{self, FILE_EXTENSION};
use crate::pattern_store::PatternSet;

/// File name used for a single pattern: `<name>.gcode`.
pub fn pattern_file_name(pattern_name: &str) -> String {
    format!("{}.{}", pattern_name, FILE_EXTENSION)
}

/// Path of a pattern's file inside `dir`.
pub fn pattern_file_path(dir: impl AsRef<Path>, pattern_name: &str) -> PathBuf {
    dir.as_ref().join(pattern_file_name(pattern_name))
}

/// Encode `set` and write it to `path` atomically.
pub fn save_pattern_file(
    path: impl AsRef<Path>,
    set: &PatternSet,
    scale: &ScaleConfig,
) -> Result<()> {
    let path = path.as_ref();
    let text = gcode::encode(set, scale);

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    tracing::info!("G-code saved to {}", path.display());
    Ok(())
}

/// Read and decode the pattern document at `path`.
pub fn load_pattern_file(path: impl AsRef<Path>, scale: &ScaleConfig) -> Result<PatternSet> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let set = gcode::decode(&text, scale)?;

    tracing::info!(
        "G-code loaded from {} ({} pattern(s))",
        path.display(),
        set.len()
    );
    Ok(set)
}
