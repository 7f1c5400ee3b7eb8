//! # ScanPack Entropy
//!
//! Stage 3 of the ScanPack pipeline and its outermost layer: entropy coding
//! of the stage-2 frame.
//!
//! - **none** (`0x00`): stored
//! - **huffman** (`0x31`): static Huffman coding
//! - **adaptive_huffman** (`0x32`): reserved, rejected with
//!   `UnsupportedAlgorithm`
//!
//! The Huffman payload opens with 256 one-byte symbol counts, scaled so the
//! largest fits in a byte. An end-of-stream symbol with count 1 closes the
//! coded bits, which are then zero-padded to a byte boundary.
//!
//! ## Example
//!
//! ```rust
//! use scanpack_entropy::{EntropyMethod, compress, decompress};
//!
//! let data = b"aaaaaaaabbbbccd";
//! let frame = compress(data, EntropyMethod::Huffman).unwrap();
//! assert_eq!(decompress(&frame).unwrap(), data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod frame;
pub mod huffman;
pub mod methods;

// Re-exports
pub use frame::{EntropyHeader, compress, decompress};
pub use huffman::HuffmanTree;
pub use methods::EntropyMethod;
