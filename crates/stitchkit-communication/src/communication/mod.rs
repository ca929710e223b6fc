//! Stitch sinks and the connection settings they are opened with.

pub mod serial;
pub mod sinks;
pub mod streamer;

use stitchkit_core::TransportError;

/// Receives one coordinate command per stitch, then an end-of-program marker.
///
/// Coordinates are physical positions in millimetres. Implementations do
/// not acknowledge commands; pacing is left to the caller.
pub trait StitchSink: Send {
    /// Identifier used in log messages (port name, file name, ...).
    fn endpoint(&self) -> &str;

    /// Emit a move to one stitch position.
    fn send_coordinate(&mut self, x_mm: f64, y_mm: f64) -> Result<(), TransportError>;

    /// Emit the end-of-program marker.
    fn end_program(&mut self) -> Result<(), TransportError>;
}

impl<S: StitchSink + ?Sized> StitchSink for Box<S> {
    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }

    fn send_coordinate(&mut self, x_mm: f64, y_mm: f64) -> Result<(), TransportError> {
        (**self).send_coordinate(x_mm, y_mm)
    }

    fn end_program(&mut self) -> Result<(), TransportError> {
        (**self).end_program()
    }
}

/// Serial connection parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    /// Port name (e.g. "COM3", "/dev/ttyUSB0")
    pub port: String,
    pub baud_rate: u32,
    /// Read/write timeout on the link
    pub timeout_ms: u64,
    /// Wait after opening while the controller resets
    pub settle_delay_ms: u64,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            port: "COM3".to_string(),
            baud_rate: 115200,
            timeout_ms: 1000,
            settle_delay_ms: 2000,
        }
    }
}

impl ConnectionParams {
    pub fn new(port: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            port: port.into(),
            baud_rate,
            ..Self::default()
        }
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn validate(&self) -> Result<(), TransportError> {
        if self.port.trim().is_empty() {
            return Err(TransportError::InvalidParameters {
                reason: "port name is empty".to_string(),
            });
        }
        if self.baud_rate == 0 {
            return Err(TransportError::InvalidParameters {
                reason: "baud rate must be greater than zero".to_string(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(TransportError::InvalidParameters {
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
