//! Test command implementation.

use std::fs;
use std::path::Path;

pub fn cmd_test(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let frame = fs::read(input)?;
    println!("Testing {}", input.display());

    let result = scanpack::inspect(&frame)
        .and_then(|info| scanpack::decode(&frame, info.point_count()));

    match result {
        Ok(points) => {
            println!("  OK: {} points", points.len());
            Ok(())
        }
        Err(e) => {
            println!("  FAILED: {}", e);
            std::process::exit(2);
        }
    }
}
