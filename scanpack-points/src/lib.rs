//! # ScanPack Points
//!
//! Stage 1 of the ScanPack pipeline: turns an array of 20-byte point
//! records into a compact byte layout and back.
//!
//! ## Methods
//!
//! | Selector | Method | Lossless |
//! |---|---|---|
//! | 0 | `none` | yes |
//! | 1 | `reduce_bits` | yes |
//! | 2 | `reduce_bytes` | yes |
//! | 3 | `reduce_bytes_222110` | in range only |
//! | 4 | `reduce_bytes_resort` | in range only |
//! | 5 | `delta_rle` | yes |
//!
//! Any method may be combined with the invalid-run collapse, which replaces
//! runs of all-zero invalid records with a single placeholder.
//!
//! ## Example
//!
//! ```rust
//! use scanpack_core::point::PointRecord;
//! use scanpack_points::{PointMethod, decode_points, encode_points};
//!
//! let points = vec![
//!     PointRecord::new(120, -40, 880, 0x01, 2, 57),
//!     PointRecord::invalid(),
//!     PointRecord::invalid(),
//!     PointRecord::new(124, -41, 879, 0x01, 2, 60),
//! ];
//!
//! let frame = encode_points(&points, PointMethod::ReduceBits, true).unwrap();
//! assert_eq!(decode_points(&frame).unwrap(), points);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

mod delta;
mod reduce;

pub mod decode;
pub mod encode;
pub mod invalid;
pub mod methods;
pub mod table;
pub mod truncate;

// Re-exports
pub use decode::{PointsHeader, decode_points, decode_points_expecting};
pub use encode::{PointEncoder, encode_points, select_point_method};
pub use methods::{PointMethod, flags};
pub use table::{FieldTable, WidthUnit};
pub use truncate::fits_222110;
