//! Stitch generation for straight sewing lines.
//!
//! A segment is sewn by placing a stitch every `pitch` units along it,
//! starting one pitch after the start point. The number of stitches is
//! `floor(length / pitch)`; a segment shorter than one pitch gets none and
//! the end point only receives a stitch when the length is an exact multiple
//! of the pitch.
//!
//! Stitch points are never stored. They are recomputed from the segment and
//! the pitch whenever something needs them (preview, simulation, sending).

use std::iter::FusedIterator;

use stitchkit_core::ScaleConfig;

use crate::model::{Point, Segment};

/// Absorbs float error in `length / pitch` so that a segment whose length is
/// an exact multiple of the pitch is not truncated to one stitch short.
const STEP_EPSILON: f64 = 1e-9;

/// Lazily produces the stitch points of one segment.
///
/// Each point is a pure function of its index, so the iterator can be cloned
/// and restarted freely.
#[derive(Debug, Clone)]
pub struct Stitches {
    start: Point,
    unit_x: f64,
    unit_y: f64,
    pitch: f64,
    next_step: usize,
    step_count: usize,
}

impl Stitches {
    fn empty(start: Point) -> Self {
        Self {
            start,
            unit_x: 0.0,
            unit_y: 0.0,
            pitch: 0.0,
            next_step: 1,
            step_count: 0,
        }
    }

    /// Total number of stitches this segment produces.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// The stitch at a 1-based step index, if it exists.
    pub fn nth_stitch(&self, step: usize) -> Option<Point> {
        if step == 0 || step > self.step_count {
            return None;
        }
        let offset = step as f64 * self.pitch;
        Some(Point::new(
            self.start.x + self.unit_x * offset,
            self.start.y + self.unit_y * offset,
        ))
    }
}

impl Iterator for Stitches {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let point = self.nth_stitch(self.next_step)?;
        self.next_step += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.step_count.saturating_sub(self.next_step - 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Stitches {}

impl FusedIterator for Stitches {}

/// Stitch points along `segment` spaced `pitch` apart (same units as the
/// segment). Zero-length segments and non-positive pitches yield nothing.
pub fn stitch(segment: &Segment, pitch: f64) -> Stitches {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance == 0.0 || !distance.is_finite() || !pitch.is_finite() || pitch <= 0.0 {
        return Stitches::empty(segment.start);
    }

    let step_count = (distance / pitch + STEP_EPSILON).floor() as usize;

    Stitches {
        start: segment.start,
        unit_x: dx / distance,
        unit_y: dy / distance,
        pitch,
        next_step: 1,
        step_count,
    }
}

/// Stitch points of a canvas segment using the configured physical pitch.
pub fn stitch_scaled(segment: &Segment, scale: &ScaleConfig) -> Stitches {
    stitch(segment, scale.pitch_px())
}

/// Stitch points of every segment in order, as one flat sequence.
pub fn stitch_all<'a>(
    segments: impl IntoIterator<Item = &'a Segment> + 'a,
    scale: &ScaleConfig,
) -> impl Iterator<Item = Point> + 'a {
    let pitch = scale.pitch_px();
    segments
        .into_iter()
        .flat_map(move |segment| stitch(segment, pitch))
}
