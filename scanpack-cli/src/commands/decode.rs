//! Decode command implementation.

use log::info;
use std::fs;
use std::path::Path;

pub fn cmd_decode(
    input: &Path,
    output: &Path,
    count: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = fs::read(input)?;

    // Without an explicit count, trust the one recorded in stage 1.
    let count = match count {
        Some(count) => count,
        None => scanpack::inspect(&frame)?.point_count(),
    };

    let raw = scanpack::decode_bytes(&frame, count)?;
    fs::write(output, &raw)?;
    info!("Wrote {}", output.display());

    println!(
        "{} -> {}: {} points, {} -> {} bytes",
        input.display(),
        output.display(),
        count,
        frame.len(),
        raw.len()
    );
    Ok(())
}
