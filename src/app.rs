//! Glue between configuration, the pattern model and the command line.

use std::time::Duration;

use stitchkit_communication::{ConnectionParams, StitchStreamer};
use stitchkit_core::{PatternError, Result};
use stitchkit_designer::gcode::format_move;
use stitchkit_designer::{CanvasSettings, DesignerState, PatternSet, Point, Segment};
use stitchkit_settings::Config;

/// Designer state using the configured scale and canvas.
pub fn designer_state(config: &Config) -> DesignerState {
    let canvas = CanvasSettings {
        width: config.canvas.width_px,
        height: config.canvas.height_px,
        cursor_step: config.canvas.cursor_step_px,
        fast_step_multiplier: config.canvas.fast_step_multiplier,
    };
    DesignerState::with_settings(config.scale(), canvas)
}

pub fn connection_params(config: &Config) -> ConnectionParams {
    ConnectionParams {
        port: config.connection.port.clone(),
        baud_rate: config.connection.baud_rate,
        timeout_ms: config.connection.timeout_ms,
        settle_delay_ms: config.connection.settle_delay_ms,
    }
}

/// Streamer with the configured scale and command pacing.
pub fn streamer(config: &Config, paced: bool) -> StitchStreamer {
    let delay = if paced {
        Duration::from_millis(config.connection.command_delay_ms)
    } else {
        Duration::ZERO
    };
    StitchStreamer::new(config.scale()).with_command_delay(delay)
}

/// Parse an `x,y` canvas position.
pub fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{}' is not a number", v.trim()))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

/// Draw one polyline through `points` into the active pattern: place the
/// cursor on each point and commit it, then finish the line. Returns the
/// number of segments added.
pub fn draw_polyline(state: &mut DesignerState, points: &[Point]) -> Result<usize> {
    let mut added = 0;
    for point in points {
        state.place_cursor(*point);
        if state.commit()?.is_some() {
            added += 1;
        }
    }
    if state.finish_line()?.is_some() {
        added += 1;
    }
    Ok(added)
}

/// Segments of one pattern, or of every pattern in order.
pub fn segments_of(set: &PatternSet, pattern: Option<&str>) -> Result<Vec<Segment>> {
    match pattern {
        Some(name) => set
            .get(name)
            .map(|p| p.segments.clone())
            .ok_or_else(|| {
                PatternError::InvalidPattern {
                    name: name.to_string(),
                    reason: "no such pattern in the document".to_string(),
                }
                .into()
            }),
        None => Ok(set
            .iter()
            .flat_map(|p| p.segments.iter().copied())
            .collect()),
    }
}

/// One `G1` line per stitch, in millimetres.
pub fn stitch_commands(segments: &[Segment], config: &Config) -> Vec<String> {
    let scale = config.scale();
    stitchkit_designer::stitch_all(segments, &scale)
        .map(|p| format_move(scale.to_mm(p.x), scale.to_mm(p.y)))
        .collect()
}

/// Per-pattern overview line for `show`.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternSummary {
    pub name: String,
    pub segments: usize,
    pub length_mm: f64,
    pub stitches: usize,
}

pub fn summarize(set: &PatternSet, config: &Config) -> Vec<PatternSummary> {
    let scale = config.scale();
    set.iter()
        .map(|p| PatternSummary {
            name: p.name.clone(),
            segments: p.segments.len(),
            length_mm: scale.to_mm(p.total_length()),
            stitches: p.stitch_count(&scale),
        })
        .collect()
}
