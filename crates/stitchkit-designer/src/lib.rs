//! # StitchKit Designer
//!
//! The sewing-path model and everything that turns it into stitches and
//! G-code.
//!
//! ## Core Components
//!
//! - **Model**: canvas points and straight sewing lines (segments)
//! - **Stitching**: evenly spaced stitch points along a segment
//! - **Pattern Store**: named, insertion-ordered patterns of segments
//! - **G-code**: pattern documents (`; name`, `G1` endpoint pairs, `M30`)
//! - **Designer State**: active pattern, keyboard cursor, save/open
//!
//! ## Architecture
//!
//! ```text
//! DesignerState (cursor, active pattern)
//!   └── PatternStore (Pattern1..PatternN, ordered)
//!         ├── stitching (derived stitch points, never stored)
//!         └── gcode (encode/decode, file I/O)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use stitchkit_designer::{DesignerState, Point};
//!
//! let mut state = DesignerState::new();
//! state.place_cursor(Point::new(0.0, 0.0));
//! state.commit().unwrap();
//! state.place_cursor(Point::new(100.0, 0.0));
//! state.finish_line().unwrap();
//!
//! // 20 mm at 2.5 mm per stitch
//! assert_eq!(state.stitch_points().len(), 8);
//! ```

pub mod designer_state;
pub mod file_io;
pub mod gcode;
pub mod model;
pub mod pattern_store;
pub mod stitching;

pub use designer_state::{CanvasSettings, DesignerState, Direction};
pub use model::{Point, Segment};
pub use pattern_store::{Pattern, PatternSet, PatternStore};
pub use stitching::{stitch, stitch_all, stitch_scaled, Stitches};
