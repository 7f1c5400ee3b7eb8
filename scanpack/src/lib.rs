//! # ScanPack
//!
//! A three-stage cascading codec for range-scan point records.
//!
//! Each record is 20 bytes: `x`, `y`, `z` and `type` as 32-bit integers,
//! then `segment` and `intensity` as 16-bit integers. A frame nests three
//! tagged stages, outermost first:
//!
//! | Stage | Magic | Methods |
//! |-------|-------|---------|
//! | 3 | `MC` | none, huffman |
//! | 2 | `M2` | none, lzss, mtf, mtf_lzss |
//! | 1 | `M1` | none, reduce_bits, reduce_bytes, reduce_bytes_222110, reduce_bytes_resort, delta_rle |
//!
//! Stage 1 can also collapse runs of invalid records into a single
//! placeholder that carries the run length.
//!
//! ## Example
//!
//! ```rust
//! use scanpack::{PipelineConfig, PointRecord, decode, encode_with};
//!
//! let points: Vec<PointRecord> = (0..256)
//!     .map(|i| PointRecord::new(i, 2 * i, 1000 - i, 1, 0, 40))
//!     .collect();
//!
//! let frame = encode_with(&points, &PipelineConfig::default()).unwrap();
//! assert!(frame.len() < points.len() * 20);
//! assert_eq!(decode(&frame, points.len()).unwrap(), points);
//! ```
//!
//! ## Inspecting Frames
//!
//! Use [`inspect`] to read the method and lengths of every stage without
//! decoding the records.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod inspect;
pub mod pipeline;

// Re-exports
pub use config::PipelineConfig;
pub use inspect::{FrameInfo, inspect};
pub use pipeline::{decode, decode_bytes, decode_into, encode, encode_bytes, encode_with};

pub use scanpack_bytes::{ByteMethod, LzssParams};
pub use scanpack_core::error::{Result, ScanPackError};
pub use scanpack_core::point::{POINT_SIZE, PointRecord};
pub use scanpack_entropy::EntropyMethod;
pub use scanpack_points::PointMethod;
