//! # ScanPack Core
//!
//! Core components for the ScanPack point-record codec.
//!
//! This crate provides the building blocks shared by every pipeline stage:
//!
//! - [`bitstream`]: MSB-first bit and byte I/O over in-memory buffers
//! - [`window`]: Position-addressed sliding window for LZSS
//! - [`header`]: The 14-byte stage header and stage identifiers
//! - [`point`]: The fixed 20-byte range-scan point record
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ScanPack is a cascade of three independently tagged stages:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Stage 3: Entropy ("MC")                                 │
//! │     Static Huffman with end-of-stream symbol            │
//! ├─────────────────────────────────────────────────────────┤
//! │ Stage 2: Bytes ("M2")                                   │
//! │     Move-to-front, LZSS, or both                        │
//! ├─────────────────────────────────────────────────────────┤
//! │ Stage 1: Points ("M1")                                  │
//! │     Raw, bit/byte reduction, truncation, delta+RLE      │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     BitReader/BitWriter, Window, StageHeader            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use scanpack_core::bitstream::{BitReader, BitWriter};
//! use scanpack_core::header::{Stage, StageHeader};
//!
//! let mut writer = BitWriter::new();
//! StageHeader::new(Stage::Points, 0x01, 20, 20).write(&mut writer).unwrap();
//! writer.write_bits(0b1011, 4).unwrap();
//! let data = writer.into_bytes();
//!
//! let mut reader = BitReader::new(&data);
//! let header = StageHeader::read(&mut reader, Stage::Points).unwrap();
//! assert_eq!(header.selector(), 0x01);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod header;
pub mod point;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{Result, ScanPackError};
pub use header::{HEADER_LEN, Stage, StageHeader};
pub use point::{Field, POINT_SIZE, PointRecord, point_type, points_from_bytes, points_to_bytes};
pub use window::Window;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{Result, ScanPackError};
    pub use crate::header::{Stage, StageHeader};
    pub use crate::point::{Field, POINT_SIZE, PointRecord};
}
