//! Stage-2 method and parameter definitions.

use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;
use scanpack_core::window::{MAX_INDEX_BITS, MIN_INDEX_BITS};
use serde::{Deserialize, Serialize};

/// Stage-2 byte compression method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteMethod {
    /// Bytes are stored unchanged.
    None,
    /// LZSS over a position-addressed window.
    Lzss,
    /// LZW (reserved, not implemented).
    Lzw,
    /// Variable-width LZW (reserved, not implemented).
    Lzwv,
    /// Burrows-Wheeler transform (reserved, not implemented).
    Bwt,
    /// Move-to-front transform.
    Mtf,
    /// Move-to-front followed by LZSS.
    #[default]
    MtfLzss,
    /// Burrows-Wheeler followed by move-to-front (reserved, not implemented).
    BwtMtf,
}

impl ByteMethod {
    /// Methods this crate can encode and decode.
    pub const SUPPORTED: [ByteMethod; 4] = [Self::None, Self::Lzss, Self::Mtf, Self::MtfLzss];

    /// Parse a selector byte.
    ///
    /// Reserved selectors parse successfully; unassigned ones fail.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0x00 => Ok(Self::None),
            0x21 => Ok(Self::Lzss),
            0x22 => Ok(Self::Lzw),
            0x23 => Ok(Self::Lzwv),
            0x24 => Ok(Self::Bwt),
            0x25 => Ok(Self::Mtf),
            0x26 => Ok(Self::MtfLzss),
            0x27 => Ok(Self::BwtMtf),
            _ => Err(ScanPackError::unsupported(Stage::Bytes, code, "unknown")),
        }
    }

    /// Selector byte.
    pub fn code(&self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Lzss => 0x21,
            Self::Lzw => 0x22,
            Self::Lzwv => 0x23,
            Self::Bwt => 0x24,
            Self::Mtf => 0x25,
            Self::MtfLzss => 0x26,
            Self::BwtMtf => 0x27,
        }
    }

    /// Method name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Lzss => "lzss",
            Self::Lzw => "lzw",
            Self::Lzwv => "lzwv",
            Self::Bwt => "bwt",
            Self::Mtf => "mtf",
            Self::MtfLzss => "mtf_lzss",
            Self::BwtMtf => "bwt_mtf",
        }
    }

    /// Check whether the method is implemented.
    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Check whether the method runs LZSS and carries its parameters.
    pub fn uses_lzss(&self) -> bool {
        matches!(self, Self::Lzss | Self::MtfLzss)
    }

    /// Fail with `UnsupportedAlgorithm` for reserved methods.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(ScanPackError::unsupported(Stage::Bytes, self.code(), self.name()))
        }
    }
}

impl std::fmt::Display for ByteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Default window size in index bits.
pub const DEFAULT_INDEX_BITS: u8 = 6;

/// Default length field size in bits.
pub const DEFAULT_LEN_BITS: u8 = 4;

/// Largest length field size in bits.
pub const MAX_LEN_BITS: u8 = 8;

/// LZSS window and length field sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LzssParams {
    /// Bits of a window position (window holds `2^index_bits` bytes).
    pub index_bits: u8,
    /// Bits of a match length field.
    pub len_bits: u8,
}

impl Default for LzssParams {
    fn default() -> Self {
        Self {
            index_bits: DEFAULT_INDEX_BITS,
            len_bits: DEFAULT_LEN_BITS,
        }
    }
}

impl LzssParams {
    /// Create parameters; 0 selects the default for either field.
    pub fn new(index_bits: u8, len_bits: u8) -> Self {
        Self {
            index_bits: if index_bits == 0 {
                DEFAULT_INDEX_BITS
            } else {
                index_bits
            },
            len_bits: if len_bits == 0 {
                DEFAULT_LEN_BITS
            } else {
                len_bits
            },
        }
    }

    /// Read parameters from stage-2 flags (bits 24..31 and 16..23).
    pub fn from_flags(flags: u32) -> Self {
        Self::new((flags >> 24) as u8, (flags >> 16) as u8)
    }

    /// Parameter bits of stage-2 flags.
    pub fn to_flags(&self) -> u32 {
        ((self.index_bits as u32) << 24) | ((self.len_bits as u32) << 16)
    }

    /// Check whether both sizes are in range.
    pub fn is_valid(&self) -> bool {
        (MIN_INDEX_BITS..=MAX_INDEX_BITS).contains(&self.index_bits)
            && (1..=MAX_LEN_BITS).contains(&self.len_bits)
    }

    /// Describe the parameters as out of range.
    pub(crate) fn range_message(&self) -> String {
        format!(
            "LZSS index_bits {} / len_bits {} outside {MIN_INDEX_BITS}..={MAX_INDEX_BITS} / 1..={MAX_LEN_BITS}",
            self.index_bits, self.len_bits
        )
    }

    /// Window size in bytes.
    pub fn window_size(&self) -> usize {
        1 << self.index_bits
    }

    /// Shortest match worth a back-reference, `(1 + index_bits + len_bits) / 9`.
    ///
    /// Stored lengths are offset by this value.
    pub fn cost_benefit(&self) -> usize {
        (1 + self.index_bits as usize + self.len_bits as usize) / 9
    }

    /// Longest match one back-reference can express.
    pub fn max_match(&self) -> usize {
        (1 << self.len_bits) - 1 + self.cost_benefit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_codes() {
        for code in 0x21..=0x27 {
            assert_eq!(ByteMethod::from_code(code).unwrap().code(), code);
        }
        assert_eq!(ByteMethod::from_code(0).unwrap(), ByteMethod::None);
        assert!(ByteMethod::from_code(0x28).is_err());
    }

    #[test]
    fn test_reserved_methods() {
        for method in [ByteMethod::Lzw, ByteMethod::Lzwv, ByteMethod::Bwt, ByteMethod::BwtMtf] {
            let err = method.ensure_supported().unwrap_err();
            assert!(matches!(
                err,
                ScanPackError::UnsupportedAlgorithm {
                    stage: Stage::Bytes,
                    ..
                }
            ));
        }
        assert!(ByteMethod::MtfLzss.ensure_supported().is_ok());
    }

    #[test]
    fn test_params_defaults_and_flags() {
        let params = LzssParams::from_flags(0x0000_0021);
        assert_eq!(params, LzssParams::default());
        assert_eq!(params.window_size(), 64);
        assert_eq!(params.cost_benefit(), 1);
        assert_eq!(params.max_match(), 16);

        let params = LzssParams::from_flags(0x0C05_0026);
        assert_eq!(params, LzssParams::new(12, 5));
        assert_eq!(params.to_flags(), 0x0C05_0000);
        assert_eq!(params.cost_benefit(), 2);
    }

    #[test]
    fn test_params_range() {
        assert!(LzssParams::new(16, 8).is_valid());
        assert!(LzssParams::new(2, 1).is_valid());
        assert!(!LzssParams::new(1, 4).is_valid());
        assert!(!LzssParams::new(17, 4).is_valid());
        assert!(!LzssParams::new(6, 9).is_valid());
    }
}
