//! Info command implementation.

use crate::utils::format_ratio;
use scanpack::FrameInfo;
use std::fs;
use std::path::Path;

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let frame = fs::read(input)?;
    let info = scanpack::inspect(&frame)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_info(input, &info);
    Ok(())
}

fn print_info(input: &Path, info: &FrameInfo) {
    println!("Frame Information");
    println!("=================");
    println!("File: {}", input.display());
    println!("Size: {} bytes", info.frame_len);
    println!("Points: {}", info.point_count());
    println!(
        "Ratio: {} of {} bytes",
        format_ratio(info.decoded_len(), info.frame_len),
        info.decoded_len()
    );

    println!();
    println!("Stage 3 (MC):");
    println!("  Method: {}", info.entropy.method);
    println!("  Decoded length: {} bytes", info.entropy.decoded_len);
    println!("  Payload length: {} bytes", info.entropy.payload_len);

    println!();
    println!("Stage 2 (M2):");
    println!("  Method: {}", info.bytes.method);
    if let Some(params) = info.bytes.params {
        println!(
            "  LZSS: index_bits {}, len_bits {} (window {} bytes)",
            params.index_bits,
            params.len_bits,
            params.window_size()
        );
    }
    println!("  Decoded length: {} bytes", info.bytes.decoded_len);

    println!();
    println!("Stage 1 (M1):");
    println!("  Method: {}", info.points.method);
    println!("  Invalid runs collapsed: {}", info.points.remove_invalid);
    println!("  Stored records: {}", info.points.stored_count());
    println!("  Decoded records: {}", info.points.point_count());
}
