use serde::{Deserialize, Serialize};

use super::Point;

/// A straight sewing line between two committed cursor positions.
///
/// `start == end` is allowed; such a segment simply produces no stitches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl From<((f64, f64), (f64, f64))> for Segment {
    fn from((start, end): ((f64, f64), (f64, f64))) -> Self {
        Self::new(start.into(), end.into())
    }
}
