//! Pattern documents in G-code form.
//!
//! The dialect is deliberately tiny:
//!
//! ```text
//! ; Pattern1
//! G1 X0.00 Y0.00
//! G1 X20.00 Y0.00
//! M30
//! ```
//!
//! A `;` line names a pattern, every two `G1` lines that follow are the
//! start and end of one sewing line (in millimetres, two decimals), and a
//! single `M30` ends the document. Only segment endpoints are written;
//! stitch points are recomputed after loading. Coordinates therefore survive
//! a save/load cycle only to 0.01 mm.

mod decoder;
mod encoder;

pub use decoder::decode;
pub use encoder::encode;

use stitchkit_core::{format_mm, ScaleConfig};

use crate::model::Point;

/// Linear move command
pub const LINEAR_MOVE: &str = "G1";

/// Program end command
pub const PROGRAM_END: &str = "M30";

/// Prefix of a pattern name line
pub const COMMENT_MARKER: char = ';';

/// Default file extension for pattern documents
pub const FILE_EXTENSION: &str = "gcode";

/// Format a linear move to a physical position (mm).
pub fn format_move(x_mm: f64, y_mm: f64) -> String {
    format!("{} X{} Y{}", LINEAR_MOVE, format_mm(x_mm), format_mm(y_mm))
}

/// Format a linear move to a canvas position, converting to mm.
pub fn format_canvas_move(point: &Point, scale: &ScaleConfig) -> String {
    format_move(scale.to_mm(point.x), scale.to_mm(point.y))
}
