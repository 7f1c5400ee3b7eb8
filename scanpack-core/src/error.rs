//! Error types for ScanPack operations.
//!
//! Every failure the codec can report, from a bad stage tag to a corrupt
//! LZSS back-reference, is a variant of [`ScanPackError`]. Decode errors are
//! never recovered locally: a failing stage aborts the whole call and the
//! error is handed back to the caller unchanged.

use crate::header::Stage;
use thiserror::Error;

/// The main error type for ScanPack operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanPackError {
    /// Stage header tag mismatch (stream corrupt or misaligned).
    #[error("Bad magic: expected {expected:02x?}, found {found:02x?}")]
    BadMagic {
        /// Expected magic bytes.
        expected: [u8; 2],
        /// Magic bytes actually found (may be shorter than two bytes).
        found: Vec<u8>,
    },

    /// Algorithm selector that is recognised but not implemented, or unknown.
    #[error("Unsupported {stage} algorithm {code:#04x} ({name})")]
    UnsupportedAlgorithm {
        /// Pipeline stage that carried the selector.
        stage: Stage,
        /// Raw selector byte.
        code: u8,
        /// Human readable algorithm name, `"unknown"` for unassigned codes.
        name: &'static str,
    },

    /// A read would go past the end of the supplied buffer.
    #[error("Out of data: need {needed} more bits at bit position {position}")]
    OutOfData {
        /// Number of bits the read required.
        needed: u64,
        /// Bit position of the cursor when the read was attempted.
        position: u64,
    },

    /// Structurally invalid stage content.
    #[error("Malformed {stage} frame: {message}")]
    MalformedFrame {
        /// Stage whose payload was malformed.
        stage: Stage,
        /// Description of the problem.
        message: String,
    },

    /// Caller-supplied output buffer shorter than the declared content.
    #[error("Buffer too small: need {needed} points, have {available}")]
    BufferTooSmall {
        /// Number of points the frame declares.
        needed: usize,
        /// Number of points the buffer can hold.
        available: usize,
    },

    /// Encode-side misuse, such as a raw buffer that is not whole records.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for ScanPack operations.
pub type Result<T> = std::result::Result<T, ScanPackError>;

impl ScanPackError {
    /// Create a bad magic error.
    pub fn bad_magic(expected: [u8; 2], found: impl Into<Vec<u8>>) -> Self {
        Self::BadMagic {
            expected,
            found: found.into(),
        }
    }

    /// Create an unsupported algorithm error.
    pub fn unsupported(stage: Stage, code: u8, name: &'static str) -> Self {
        Self::UnsupportedAlgorithm { stage, code, name }
    }

    /// Create an out of data error.
    pub fn out_of_data(needed: u64, position: u64) -> Self {
        Self::OutOfData { needed, position }
    }

    /// Create a malformed frame error.
    pub fn malformed(stage: Stage, message: impl Into<String>) -> Self {
        Self::MalformedFrame {
            stage,
            message: message.into(),
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
