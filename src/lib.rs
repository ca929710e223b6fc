//! # StitchKit
//!
//! Draw straight sewing lines on a canvas, turn them into evenly spaced
//! stitches, save and load them as G-code, and stream them to a stitching
//! controller over a serial link.
//!
//! ## Architecture
//!
//! StitchKit is organized as a workspace with multiple crates:
//!
//! 1. **stitchkit-core** - Error taxonomy, units and scale, shared-state aliases
//! 2. **stitchkit-designer** - Geometry, stitching engine, pattern store, G-code codec
//! 3. **stitchkit-communication** - Stitch sinks (serial, writer, simulation), paced streaming
//! 4. **stitchkit-settings** - Configuration files and validation
//! 5. **stitchkit** - Command line binary that integrates all crates

pub mod app;

pub use stitchkit_communication as communication;
pub use stitchkit_designer as designer;
pub use stitchkit_settings as settings;

pub use stitchkit_core::{Error, GcodeError, PatternError, Result, ScaleConfig, TransportError};

pub use stitchkit_designer::{
    DesignerState, Direction, Pattern, PatternSet, PatternStore, Point, Segment,
};

pub use stitchkit_communication::{
    connect_or_offline, list_ports, ConnectionParams, SerialPortInfo, SimulationSink, StitchSink,
    StitchStreamer, StreamOutcome, StreamReport,
};

pub use stitchkit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Log lines go to stderr so command output on stdout stays clean.
/// `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
