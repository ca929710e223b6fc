//! # StitchKit Core
//!
//! Core types, units and error handling shared by every StitchKit crate.
//! Provides the canvas/physical scale model, the error taxonomy used across
//! the stitching engine, codec and transport, and shared-state aliases.

pub mod error;
pub mod types;
pub mod units;

pub use error::{Error, GcodeError, PatternError, Result, TransportError};

pub use types::{thread_safe, thread_safe_rw, ThreadSafe, ThreadSafeRw};

pub use units::{
    format_mm, ScaleConfig, DEFAULT_PIXELS_PER_MM, DEFAULT_STITCH_PITCH_MM, MIN_STITCH_PITCH_MM,
};
