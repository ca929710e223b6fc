//! # StitchKit Communication
//!
//! Delivers stitch coordinates to whatever executes them: a serial-attached
//! stitching controller, any `io::Write` target, or a simulated renderer.
//! The streamer paces commands, honours a cancellation flag between
//! stitches and downgrades transport failures to warnings.

pub mod communication;

pub use communication::{
    serial::{connect_or_offline, list_ports, SerialPortInfo, SerialSink},
    sinks::{SimulatedStitch, SimulationSink, WriterSink},
    streamer::{CancelFlag, StitchStreamer, StreamOutcome, StreamReport},
    ConnectionParams, StitchSink,
};
