//! File I/O operations (save, open) for designer state.

use std::path::{Path, PathBuf};

use stitchkit_core::Result;

use super::DesignerState;
use crate::file_io::{load_pattern_file, pattern_file_path, save_pattern_file};
use crate::pattern_store::PatternSet;

impl DesignerState {
    /// Save the active pattern to `<dir>/<pattern>.gcode`.
    pub fn save_active(&mut self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = pattern_file_path(dir, &self.active_pattern);
        let set = PatternSet::from_patterns([self.active_snapshot()])?;
        save_pattern_file(&path, &set, &self.scale)?;

        self.current_file_path = Some(path.clone());
        self.is_modified = false;
        Ok(path)
    }

    /// Save every pattern into one document.
    pub fn save_all(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let set = self.snapshot();
        save_pattern_file(&path, &set, &self.scale)?;

        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Replace all patterns with the contents of a document.
    ///
    /// The active pattern stays selected; it is created empty if the
    /// document does not contain it. On error nothing is changed.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let set = load_pattern_file(&path, &self.scale)?;

        {
            let mut store = self.store.write();
            store.replace(set);
            store.select(&self.active_pattern)?;
        }

        self.clear_cursor();
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }
}
