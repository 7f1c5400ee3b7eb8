//! Utility functions for the CLI.

use log::LevelFilter;
use scanpack::PipelineConfig;
use std::fs;
use std::path::Path;

/// Initialise `env_logger`. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Load a JSON pipeline configuration.
pub fn load_config(path: &Path) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
    let config = serde_json::from_str(&text)
        .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
    Ok(config)
}

/// Space savings of `encoded` against `original`, as a percentage.
pub fn format_ratio(original: usize, encoded: usize) -> String {
    if original == 0 {
        return "-".to_string();
    }
    format!(
        "{:.1}% saved",
        (1.0 - encoded as f64 / original as f64) * 100.0
    )
}
