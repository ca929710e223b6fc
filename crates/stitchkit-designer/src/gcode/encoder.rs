//! Pattern set to G-code text.

use stitchkit_core::ScaleConfig;

use super::{format_canvas_move, COMMENT_MARKER, PROGRAM_END};
use crate::pattern_store::PatternSet;

/// Serialize every pattern, in set order, followed by one `M30`.
pub fn encode(set: &PatternSet, scale: &ScaleConfig) -> String {
    let mut gcode = String::new();

    for pattern in set.iter() {
        gcode.push_str(&format!("{} {}\n", COMMENT_MARKER, pattern.name));
        for segment in &pattern.segments {
            for point in [&segment.start, &segment.end] {
                gcode.push_str(&format_canvas_move(point, scale));
                gcode.push('\n');
            }
        }
    }

    gcode.push_str(PROGRAM_END);
    gcode.push('\n');

    tracing::debug!(
        "Encoded {} pattern(s) into {} bytes of G-code",
        set.len(),
        gcode.len()
    );
    gcode
}
