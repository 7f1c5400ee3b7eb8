//! # ScanPack Bytes
//!
//! Stage 2 of the ScanPack pipeline: general-purpose byte compression of the
//! stage-1 frame.
//!
//! - **none** (`0x00`): stored
//! - **lzss** (`0x21`): LZSS with absolute window positions
//! - **mtf** (`0x25`): move-to-front transform
//! - **mtf_lzss** (`0x26`): move-to-front, then LZSS
//!
//! The selectors `0x22` (LZW), `0x23` (LZWV), `0x24` (BWT) and `0x27`
//! (BWT+MTF) are reserved. They are recognised in headers and rejected with
//! `UnsupportedAlgorithm` in both directions.
//!
//! LZSS window and length sizes travel in the stage flags: `index_bits` in
//! bits 24..31 and `len_bits` in bits 16..23, 0 meaning the defaults 6 and 4.
//!
//! ## Example
//!
//! ```rust
//! use scanpack_bytes::{ByteMethod, LzssParams, compress, decompress};
//!
//! let data = b"M1 frame bytes, M1 frame bytes, M1 frame bytes";
//! let frame = compress(data, ByteMethod::MtfLzss, LzssParams::default()).unwrap();
//! assert_eq!(decompress(&frame).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod frame;
pub mod lzss;
pub mod methods;
pub mod mtf;

// Re-exports
pub use frame::{ByteEncoder, BytesHeader, compress, decompress};
pub use lzss::{LzssEncoder, LzssToken};
pub use methods::{ByteMethod, LzssParams};
