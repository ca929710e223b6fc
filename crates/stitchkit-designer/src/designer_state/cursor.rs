//! Keyboard cursor and line commits.

use stitchkit_core::Result;

use super::DesignerState;
use crate::model::{Point, Segment};

/// Arrow key direction. Canvas y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl DesignerState {
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Start of the line being drawn, if one has been committed.
    pub fn pending_start(&self) -> Option<Point> {
        self.pending_start
    }

    pub(crate) fn clear_cursor(&mut self) {
        self.cursor = None;
        self.pending_start = None;
    }

    /// Move the cursor one step. The first move places it at the canvas
    /// centre before stepping; `fast` is set while the key is held down.
    pub fn move_cursor(&mut self, direction: Direction, fast: bool) -> Point {
        let current = self.cursor.unwrap_or_else(|| self.canvas.center());
        let step = if fast {
            self.canvas.cursor_step * self.canvas.fast_step_multiplier
        } else {
            self.canvas.cursor_step
        };

        let (dx, dy) = match direction {
            Direction::Up => (0.0, -step),
            Direction::Down => (0.0, step),
            Direction::Left => (-step, 0.0),
            Direction::Right => (step, 0.0),
        };

        let moved = self
            .canvas
            .clamp(Point::new(current.x + dx, current.y + dy));
        self.cursor = Some(moved);
        moved
    }

    /// Put the cursor at an absolute canvas position (clamped to the canvas).
    pub fn place_cursor(&mut self, point: Point) -> Point {
        let placed = self.canvas.clamp(point);
        self.cursor = Some(placed);
        placed
    }

    /// Commit the cursor position (Enter).
    ///
    /// The first commit marks the start of a line. Each further commit adds
    /// a segment from the previous point to the cursor and continues the
    /// line from there. Returns the segment that was added, if any.
    pub fn commit(&mut self) -> Result<Option<Segment>> {
        let Some(cursor) = self.cursor else {
            return Ok(None);
        };

        match self.pending_start {
            None => {
                self.pending_start = Some(cursor);
                Ok(None)
            }
            Some(start) => {
                let segment = self.append_segment(start, cursor)?;
                self.pending_start = Some(cursor);
                Ok(Some(segment))
            }
        }
    }

    /// Finish the current line (S): adds the segment from the pending start
    /// to the cursor when the cursor has moved, and lets the next commit
    /// start a new line.
    pub fn finish_line(&mut self) -> Result<Option<Segment>> {
        let added = match (self.pending_start, self.cursor) {
            (Some(start), Some(cursor)) if start != cursor => {
                Some(self.append_segment(start, cursor)?)
            }
            _ => None,
        };
        self.pending_start = None;
        Ok(added)
    }

    fn append_segment(&mut self, start: Point, end: Point) -> Result<Segment> {
        let segment = Segment::new(start, end);
        self.store
            .write()
            .append_segment(&self.active_pattern, segment)?;
        self.is_modified = true;
        tracing::debug!(
            "Added line ({:.1}, {:.1}) -> ({:.1}, {:.1}) to {}",
            start.x,
            start.y,
            end.x,
            end.y,
            self.active_pattern
        );
        Ok(segment)
    }
}
