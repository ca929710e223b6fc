//! Designer state manager for UI integration.
//! Owns the pattern store, the active pattern and the keyboard cursor, and
//! turns operator actions into segments.
//!
//! This module is split into submodules:
//! - `cursor`: Cursor movement and line commits
//! - `file_io`: Save/open operations

mod cursor;
mod file_io;

pub use cursor::Direction;

use stitchkit_core::{thread_safe_rw, Result, ScaleConfig, ThreadSafeRw};

use crate::model::Point;
use crate::pattern_store::{Pattern, PatternSet, PatternStore};
use crate::stitching::stitch_all;

/// Canvas extent and cursor movement settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSettings {
    pub width: f64,
    pub height: f64,
    /// Cursor step per key press, in pixels
    pub cursor_step: f64,
    /// Step multiplier while a direction key is held
    pub fast_step_multiplier: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            cursor_step: 1.0,
            fast_step_multiplier: 5.0,
        }
    }
}

impl CanvasSettings {
    pub fn center(&self) -> Point {
        Point::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    /// Clamp a point into `[0, width] x [0, height]`.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

/// Designer state for UI integration
pub struct DesignerState {
    store: ThreadSafeRw<PatternStore>,
    active_pattern: String,
    pub(crate) cursor: Option<Point>,
    pub(crate) pending_start: Option<Point>,
    pub scale: ScaleConfig,
    pub canvas: CanvasSettings,
    pub current_file_path: Option<std::path::PathBuf>,
    pub is_modified: bool,
}

impl DesignerState {
    /// Creates a new designer state with `Pattern1` active.
    pub fn new() -> Self {
        Self::with_settings(ScaleConfig::default(), CanvasSettings::default())
    }

    pub fn with_settings(scale: ScaleConfig, canvas: CanvasSettings) -> Self {
        let mut store = PatternStore::new();
        let active_pattern = store.select_default(1).name.clone();

        Self {
            store: thread_safe_rw(store),
            active_pattern,
            cursor: None,
            pending_start: None,
            scale,
            canvas,
            current_file_path: None,
            is_modified: false,
        }
    }

    pub fn active_pattern(&self) -> &str {
        &self.active_pattern
    }

    /// Handle to the store for readers on other threads. They must only
    /// take read locks; all mutation goes through `DesignerState`.
    pub fn shared_store(&self) -> ThreadSafeRw<PatternStore> {
        std::sync::Arc::clone(&self.store)
    }

    /// Switch to another pattern. The pattern is created if needed and
    /// cleared, and the cursor and any pending line start are dropped.
    pub fn select_pattern(&mut self, name: &str) -> Result<()> {
        {
            let mut store = self.store.write();
            store.select(name)?;
            store.reset(name)?;
        }
        tracing::info!("Selected pattern {}", name);
        self.active_pattern = name.to_string();
        self.clear_cursor();
        self.is_modified = true;
        Ok(())
    }

    /// Empty the active pattern and drop the cursor.
    pub fn reset(&mut self) -> Result<()> {
        self.store.write().reset(&self.active_pattern)?;
        tracing::info!("Reset pattern {}", self.active_pattern);
        self.clear_cursor();
        self.is_modified = true;
        Ok(())
    }

    /// Copy of every pattern, safe to export or stream while editing goes on.
    pub fn snapshot(&self) -> PatternSet {
        self.store.read().snapshot()
    }

    /// Copy of the active pattern.
    pub fn active_snapshot(&self) -> Pattern {
        self.store
            .read()
            .get(&self.active_pattern)
            .cloned()
            .unwrap_or_else(|| Pattern::new(self.active_pattern.clone()))
    }

    /// Stitch points of every pattern, for drawing the preview dots.
    pub fn stitch_points(&self) -> Vec<Point> {
        let store = self.store.read();
        store
            .all()
            .iter()
            .flat_map(|pattern| stitch_all(&pattern.segments, &self.scale))
            .collect()
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
