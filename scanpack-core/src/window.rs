//! Position-addressed sliding window for LZSS.
//!
//! Unlike a distance-addressed history, LZSS back-references name an
//! absolute slot of the circular window. The write cursor starts at slot 1;
//! slot 0 doubles as the end-of-stream marker and is only ever written once
//! the cursor wraps.

use crate::error::{Result, ScanPackError};
use crate::header::Stage;

/// Smallest supported window, in index bits.
pub const MIN_INDEX_BITS: u8 = 2;

/// Largest supported window, in index bits.
pub const MAX_INDEX_BITS: u8 = 16;

/// Circular window of `2^index_bits` bytes.
#[derive(Debug, Clone)]
pub struct Window {
    /// The underlying buffer, zero-filled on creation.
    buffer: Vec<u8>,
    /// Slot the next byte is written to.
    cursor: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
    /// Set once the cursor has wrapped past the last slot.
    wrapped: bool,
}

impl Window {
    /// Create a window addressed by `index_bits`-bit positions.
    pub fn new(index_bits: u8) -> Result<Self> {
        if !(MIN_INDEX_BITS..=MAX_INDEX_BITS).contains(&index_bits) {
            return Err(ScanPackError::malformed(
                Stage::Bytes,
                format!(
                    "window index bits {index_bits} outside {MIN_INDEX_BITS}..={MAX_INDEX_BITS}"
                ),
            ));
        }

        let capacity = 1usize << index_bits;
        Ok(Self {
            buffer: vec![0; capacity],
            cursor: 1,
            mask: capacity - 1,
            wrapped: false,
        })
    }

    /// Window size in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Slot the next byte will be written to.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Write a single byte at the cursor and advance it.
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.cursor] = byte;
        self.cursor = (self.cursor + 1) & self.mask;
        if self.cursor == 0 {
            self.wrapped = true;
        }
    }

    /// Check whether `position` holds a byte that has actually been written.
    pub fn is_written(&self, position: usize) -> bool {
        if position > self.mask {
            return false;
        }
        self.wrapped || (position >= 1 && position < self.cursor)
    }

    /// Copy `length` bytes starting at slot `position`, one at a time.
    ///
    /// Every copied byte is written back at the cursor before the next one is
    /// read, so a source range that runs into the bytes being produced
    /// replicates them. Copied bytes are appended to `output`.
    pub fn copy_match(
        &mut self,
        position: usize,
        length: usize,
        output: &mut Vec<u8>,
    ) -> Result<()> {
        if !self.is_written(position) {
            return Err(ScanPackError::malformed(
                Stage::Bytes,
                format!(
                    "window position {position} not yet written (cursor {})",
                    self.cursor
                ),
            ));
        }

        let mut src = position;
        for _ in 0..length {
            let byte = self.buffer[src];
            self.push(byte);
            output.push(byte);
            src = (src + 1) & self.mask;
        }

        Ok(())
    }
}
