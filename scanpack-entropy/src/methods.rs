//! Stage-3 method definitions.

use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;
use serde::{Deserialize, Serialize};

/// Stage-3 entropy coding method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropyMethod {
    /// Bytes are stored unchanged.
    None,
    /// Static Huffman coding with a transmitted count table.
    #[default]
    Huffman,
    /// Adaptive Huffman coding (reserved, not implemented).
    AdaptiveHuffman,
}

impl EntropyMethod {
    /// Methods this crate can encode and decode.
    pub const SUPPORTED: [EntropyMethod; 2] = [Self::None, Self::Huffman];

    /// Parse a selector byte.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0x00 => Ok(Self::None),
            0x31 => Ok(Self::Huffman),
            0x32 => Ok(Self::AdaptiveHuffman),
            _ => Err(ScanPackError::unsupported(Stage::Entropy, code, "unknown")),
        }
    }

    /// Selector byte.
    pub fn code(&self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Huffman => 0x31,
            Self::AdaptiveHuffman => 0x32,
        }
    }

    /// Method name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Huffman => "huffman",
            Self::AdaptiveHuffman => "adaptive_huffman",
        }
    }

    /// Check whether the method is implemented.
    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }

    /// Fail with `UnsupportedAlgorithm` for reserved methods.
    pub fn ensure_supported(&self) -> Result<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(ScanPackError::unsupported(Stage::Entropy, self.code(), self.name()))
        }
    }
}

impl std::fmt::Display for EntropyMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
