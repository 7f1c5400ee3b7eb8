//! Pipeline configuration.

use scanpack_bytes::{ByteMethod, LzssParams};
use scanpack_entropy::EntropyMethod;
use scanpack_points::PointMethod;
use serde::{Deserialize, Serialize};

/// Method selection for all three stages.
///
/// Missing fields take their default values when deserializing, so a JSON
/// file only needs to name the settings it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stage-1 record layout.
    pub points: PointMethod,
    /// Collapse runs of invalid records in stage 1.
    pub remove_invalid: bool,
    /// Stage-2 byte compressor.
    pub bytes: ByteMethod,
    /// LZSS window and length sizes, used by the LZSS methods.
    pub lzss: LzssParams,
    /// Stage-3 entropy coder.
    pub entropy: EntropyMethod,
    /// Pick the smallest lossless stage-1 layout per call, ignoring `points`.
    pub adaptive: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            points: PointMethod::ReduceBits,
            remove_invalid: true,
            bytes: ByteMethod::MtfLzss,
            lzss: LzssParams::default(),
            entropy: EntropyMethod::Huffman,
            adaptive: false,
        }
    }
}

impl PipelineConfig {
    /// No compression in any stage. Frames are the raw records plus headers.
    pub fn store() -> Self {
        Self {
            points: PointMethod::None,
            remove_invalid: false,
            bytes: ByteMethod::None,
            lzss: LzssParams::default(),
            entropy: EntropyMethod::None,
            adaptive: false,
        }
    }

    /// Byte reduction, move-to-front and Huffman, skipping the LZSS search.
    pub fn fast() -> Self {
        Self {
            points: PointMethod::ReduceBytes,
            bytes: ByteMethod::Mtf,
            ..Self::default()
        }
    }

    /// Set the stage-1 layout.
    pub fn with_points(mut self, method: PointMethod) -> Self {
        self.points = method;
        self
    }

    /// Set the stage-2 compressor.
    pub fn with_bytes(mut self, method: ByteMethod) -> Self {
        self.bytes = method;
        self
    }

    /// Set the LZSS parameters.
    pub fn with_lzss(mut self, params: LzssParams) -> Self {
        self.lzss = params;
        self
    }

    /// Set the stage-3 coder.
    pub fn with_entropy(mut self, method: EntropyMethod) -> Self {
        self.entropy = method;
        self
    }

    /// Enable or disable the invalid-run collapse.
    pub fn with_remove_invalid(mut self, enabled: bool) -> Self {
        self.remove_invalid = enabled;
        self
    }

    /// Enable or disable adaptive stage-1 selection.
    pub fn with_adaptive(mut self, enabled: bool) -> Self {
        self.adaptive = enabled;
        self
    }
}
