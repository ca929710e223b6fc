//! Error handling for StitchKit
//!
//! Provides error types for all layers of the application:
//! - G-Code errors (document decoding)
//! - Pattern errors (pattern store misuse)
//! - Transport errors (serial/device communication)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Zero-length segments are not an error anywhere: the stitching engine
//! resolves them to zero stitches.

use thiserror::Error;

/// G-Code error type
///
/// Represents structural problems found while decoding a pattern document.
/// Decoding aborts on the first one; no partially populated pattern set is
/// ever returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// The document is structurally invalid
    #[error("Malformed document at line {line_number} ({line:?}): {reason}")]
    MalformedDocument {
        /// 1-based line number of the offending line.
        line_number: usize,
        /// The offending line, without its line terminator.
        line: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl GcodeError {
    /// Build a `MalformedDocument` error for the given line
    pub fn malformed(line_number: usize, line: &str, reason: impl Into<String>) -> Self {
        GcodeError::MalformedDocument {
            line_number,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// Pattern store error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Pattern was never selected, or its name cannot be stored
    #[error("Invalid pattern '{name}': {reason}")]
    InvalidPattern {
        /// The pattern name that was rejected.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Transport error type
///
/// Represents failures of the stitch sink (serial device, file, simulator).
/// Callers downgrade these to warnings so offline work keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Device absent or disconnected
    #[error("Transport unavailable on {endpoint}: {reason}")]
    Unavailable {
        /// Port name or other endpoint identifier.
        endpoint: String,
        /// The reason the transport could not be used.
        reason: String,
    },

    /// A command could not be written to an open transport
    #[error("Failed to write to {endpoint}: {reason}")]
    WriteFailed {
        /// Port name or other endpoint identifier.
        endpoint: String,
        /// The underlying write failure.
        reason: String,
    },

    /// Invalid connection parameters
    #[error("Invalid connection parameters: {reason}")]
    InvalidParameters {
        /// The reason the parameters are invalid.
        reason: String,
    },
}

/// Main error type for StitchKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Pattern store error
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// File save/load failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a malformed document error
    pub fn is_malformed_document(&self) -> bool {
        matches!(self, Error::Gcode(GcodeError::MalformedDocument { .. }))
    }

    /// Check if this is a transport error
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is an I/O error
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this is an invalid pattern error
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Error::Pattern(PatternError::InvalidPattern { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
