//! Encode command implementation.

use crate::utils::{format_ratio, load_config};
use log::info;
use scanpack::{ByteMethod, EntropyMethod, LzssParams, PipelineConfig, PointMethod};
use std::fs;
use std::path::Path;

/// Command-line settings that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeOverrides {
    pub points: Option<PointMethod>,
    pub bytes: Option<ByteMethod>,
    pub entropy: Option<EntropyMethod>,
    pub keep_invalid: bool,
    pub index_bits: Option<u8>,
    pub len_bits: Option<u8>,
    pub adaptive: bool,
}

impl EncodeOverrides {
    /// Apply the overrides on top of `config`.
    pub fn apply(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(points) = self.points {
            config.points = points;
        }
        if let Some(bytes) = self.bytes {
            config.bytes = bytes;
        }
        if let Some(entropy) = self.entropy {
            config.entropy = entropy;
        }
        if self.keep_invalid {
            config.remove_invalid = false;
        }
        if self.adaptive {
            config.adaptive = true;
        }
        if self.index_bits.is_some() || self.len_bits.is_some() {
            config.lzss = LzssParams::new(
                self.index_bits.unwrap_or(config.lzss.index_bits),
                self.len_bits.unwrap_or(config.lzss.len_bits),
            );
        }
        config
    }
}

pub fn cmd_encode(
    input: &Path,
    output: &Path,
    config_path: Option<&Path>,
    overrides: &EncodeOverrides,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = match config_path {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    let config = overrides.apply(base);
    info!("Encoding with {config:?}");

    let raw = fs::read(input)?;
    let frame = scanpack::encode_bytes(&raw, &config)?;
    fs::write(output, &frame)?;
    info!("Wrote {}", output.display());

    println!(
        "{} -> {}: {} points, {} -> {} bytes ({})",
        input.display(),
        output.display(),
        raw.len() / scanpack::POINT_SIZE,
        raw.len(),
        frame.len(),
        format_ratio(raw.len(), frame.len())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = EncodeOverrides {
            bytes: Some(ByteMethod::Lzss),
            keep_invalid: true,
            len_bits: Some(7),
            ..EncodeOverrides::default()
        };
        let config = overrides.apply(PipelineConfig::fast());
        assert_eq!(config.points, PointMethod::ReduceBytes);
        assert_eq!(config.bytes, ByteMethod::Lzss);
        assert!(!config.remove_invalid);
        assert_eq!(config.lzss, LzssParams::new(6, 7));
    }

    #[test]
    fn test_no_overrides() {
        let config = PipelineConfig::store();
        assert_eq!(EncodeOverrides::default().apply(config), config);
    }
}
