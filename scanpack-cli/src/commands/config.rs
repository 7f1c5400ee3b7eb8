//! Config command implementation.

use scanpack::PipelineConfig;

pub fn cmd_config(config: PipelineConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
