//! Stage-1 method definitions.
//!
//! The low byte of the stage-1 flags selects one of six record layouts.
//! The invalid-run modifier lives in the top byte and combines with any of
//! them.

use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;
use serde::{Deserialize, Serialize};

/// Stage-1 flag bits outside the selector byte.
pub mod flags {
    /// Mask of the selector byte.
    pub const SELECTOR_MASK: u32 = 0x0000_00FF;
    /// Runs of invalid records are collapsed into placeholders.
    pub const REMOVE_INVALID: u32 = 0x0100_0000;
}

/// Point record layout used by stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointMethod {
    /// Canonical 20-byte records.
    None,
    /// Per-field minimum plus a bit-packed offset.
    #[default]
    ReduceBits,
    /// Per-field minimum plus a byte-aligned offset.
    ReduceBytes,
    /// Truncated 8-byte records (x, y, z 16 bit, type and segment 8 bit).
    #[serde(rename = "reduce_bytes_222110")]
    ReduceBytes222110,
    /// Truncated 8-byte records stored column by column.
    ReduceBytesResort,
    /// Delta-coded coordinates, run-length coded type and segment.
    DeltaRle,
}

impl PointMethod {
    /// Every method, in selector order.
    pub const ALL: [PointMethod; 6] = [
        Self::None,
        Self::ReduceBits,
        Self::ReduceBytes,
        Self::ReduceBytes222110,
        Self::ReduceBytesResort,
        Self::DeltaRle,
    ];

    /// Methods that reproduce any input exactly.
    pub const LOSSLESS: [PointMethod; 4] = [
        Self::ReduceBits,
        Self::ReduceBytes,
        Self::DeltaRle,
        Self::None,
    ];

    /// Parse a selector byte.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::None),
            1 => Ok(Self::ReduceBits),
            2 => Ok(Self::ReduceBytes),
            3 => Ok(Self::ReduceBytes222110),
            4 => Ok(Self::ReduceBytesResort),
            5 => Ok(Self::DeltaRle),
            _ => Err(ScanPackError::unsupported(Stage::Points, code, "unknown")),
        }
    }

    /// Selector byte.
    pub fn code(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::ReduceBits => 1,
            Self::ReduceBytes => 2,
            Self::ReduceBytes222110 => 3,
            Self::ReduceBytesResort => 4,
            Self::DeltaRle => 5,
        }
    }

    /// Check whether the method truncates field values.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::ReduceBytes222110 | Self::ReduceBytesResort)
    }

    /// Method name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ReduceBits => "reduce_bits",
            Self::ReduceBytes => "reduce_bytes",
            Self::ReduceBytes222110 => "reduce_bytes_222110",
            Self::ReduceBytesResort => "reduce_bytes_resort",
            Self::DeltaRle => "delta_rle",
        }
    }
}

impl std::fmt::Display for PointMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_codes() {
        for method in PointMethod::ALL {
            assert_eq!(PointMethod::from_code(method.code()).unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_selector() {
        let err = PointMethod::from_code(6).unwrap_err();
        assert_eq!(err, ScanPackError::unsupported(Stage::Points, 6, "unknown"));
    }

    #[test]
    fn test_lossy_methods() {
        assert!(PointMethod::ReduceBytesResort.is_lossy());
        assert!(PointMethod::LOSSLESS.iter().all(|m| !m.is_lossy()));
    }
}
