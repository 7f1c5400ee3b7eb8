//! Bit-level I/O over in-memory buffers.
//!
//! This module provides `BitReader` and `BitWriter`, the cursor every stage
//! of the pipeline is built on. Both work on whole in-memory buffers: the
//! reader borrows the caller's bytes, the writer owns a growing `Vec<u8>`.
//!
//! # Bit Ordering
//!
//! All stages use MSB-first (Most Significant Bit first) ordering within
//! bytes, and multi-byte integers are big-endian. The first bit read from a
//! byte is its bit 7.
//!
//! # Example
//!
//! ```
//! use scanpack_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let data = writer.into_bytes();
//! assert_eq!(data, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{Result, ScanPackError};

/// Largest bit count a single `read_bits`/`write_bits` call accepts.
pub const MAX_BITS: u8 = 32;

/// Largest byte count a single `read_bytes`/`write_bytes` call accepts.
pub const MAX_BYTES: u8 = 4;

/// MSB-first bit reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Index of the byte holding the next unread bit.
    byte_pos: usize,
    /// Bits already consumed from `data[byte_pos]` (0-7).
    bit_offset: u8,
}

impl<'a> BitReader<'a> {
    /// Create a new reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_offset: 0,
        }
    }

    /// Current byte index.
    pub fn position(&self) -> usize {
        self.byte_pos
    }

    /// Bits already consumed from the current byte.
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    /// Total bits consumed so far (for error reporting).
    pub fn bits_read(&self) -> u64 {
        self.byte_pos as u64 * 8 + self.bit_offset as u64
    }

    /// Bits left before the end of the buffer.
    pub fn remaining_bits(&self) -> u64 {
        (self.data.len() as u64 * 8).saturating_sub(self.bits_read())
    }

    /// Whole bytes left, counting from the current byte index.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.byte_pos)
    }

    /// Check whether every bit has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0
    }

    /// Read up to 32 bits as an unsigned integer.
    ///
    /// The first bit read ends up in the most significant position of the
    /// result. `count == 0` returns 0 and leaves the cursor untouched.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        if count > MAX_BITS {
            return Err(ScanPackError::invalid_input(format!(
                "cannot read {count} bits at once (max {MAX_BITS})"
            )));
        }
        if count == 0 {
            return Ok(0);
        }
        if count as u64 > self.remaining_bits() {
            return Err(ScanPackError::out_of_data(count as u64, self.bits_read()));
        }

        let mut value = 0u64;
        let mut left = count;
        while left > 0 {
            let byte = self.data[self.byte_pos];
            let avail = 8 - self.bit_offset;
            let take = avail.min(left);
            let bits = (byte >> (avail - take)) & (0xFF >> (8 - take));
            value = (value << take) | bits as u64;

            self.bit_offset += take;
            left -= take;
            if self.bit_offset == 8 {
                self.bit_offset = 0;
                self.byte_pos += 1;
            }
        }

        Ok(value as u32)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read up to 4 whole bytes as a big-endian integer.
    ///
    /// Bytes are taken from the current byte index regardless of the bit
    /// offset; afterwards the cursor sits on the byte boundary following them.
    pub fn read_bytes(&mut self, count: u8) -> Result<u32> {
        if count > MAX_BYTES {
            return Err(ScanPackError::invalid_input(format!(
                "cannot read {count} bytes at once (max {MAX_BYTES})"
            )));
        }
        let end = self.byte_pos + count as usize;
        if end > self.data.len() {
            return Err(ScanPackError::out_of_data(
                (end - self.data.len()) as u64 * 8,
                self.bits_read(),
            ));
        }

        let value = self.data[self.byte_pos..end]
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | b as u32);
        self.byte_pos = end;
        self.bit_offset = 0;
        Ok(value)
    }

    /// Read one whole byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)? as u8)
    }

    /// Borrow the next `len` raw bytes, starting at the current byte index.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.byte_pos + len;
        if end > self.data.len() {
            return Err(ScanPackError::out_of_data(
                (end - self.data.len()) as u64 * 8,
                self.bits_read(),
            ));
        }
        let slice = &self.data[self.byte_pos..end];
        self.byte_pos = end;
        self.bit_offset = 0;
        Ok(slice)
    }

    /// Skip the rest of a partially consumed byte.
    pub fn align(&mut self) {
        if self.bit_offset > 0 {
            self.bit_offset = 0;
            self.byte_pos += 1;
        }
    }
}

/// MSB-first bit writer that owns its output buffer.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Output buffer. When `bit_offset > 0` the last byte is partial.
    output: Vec<u8>,
    /// Bits already used in the last byte (0-7).
    bit_offset: u8,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            bit_offset: 0,
        }
    }

    /// Total bits written so far.
    pub fn bits_written(&self) -> u64 {
        if self.bit_offset == 0 {
            self.output.len() as u64 * 8
        } else {
            (self.output.len() as u64 - 1) * 8 + self.bit_offset as u64
        }
    }

    /// Number of bytes touched so far, including a partial last byte.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Check whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    /// Write the low `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count > MAX_BITS {
            return Err(ScanPackError::invalid_input(format!(
                "cannot write {count} bits at once (max {MAX_BITS})"
            )));
        }

        let value = value as u64;
        let mut left = count;
        while left > 0 {
            if self.bit_offset == 0 {
                self.output.push(0);
            }
            let free = 8 - self.bit_offset;
            let take = free.min(left);
            let chunk = ((value >> (left - take)) & (0xFF >> (8 - take))) as u8;
            let last = self.output.len() - 1;
            self.output[last] |= chunk << (free - take);

            self.bit_offset = (self.bit_offset + take) % 8;
            left -= take;
        }

        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Write the low `count` bytes of `value` big-endian.
    ///
    /// A partially written byte is zero-padded first.
    pub fn write_bytes(&mut self, value: u32, count: u8) -> Result<()> {
        if count > MAX_BYTES {
            return Err(ScanPackError::invalid_input(format!(
                "cannot write {count} bytes at once (max {MAX_BYTES})"
            )));
        }
        self.align();
        for shift in (0..count).rev() {
            self.output.push((value >> (8 * shift as u32)) as u8);
        }
        Ok(())
    }

    /// Write one whole byte.
    pub fn write_u8(&mut self, byte: u8) {
        self.align();
        self.output.push(byte);
    }

    /// Append raw bytes after zero-padding a partial byte.
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.align();
        self.output.extend_from_slice(bytes);
    }

    /// Pad to the next byte boundary with zeros.
    ///
    /// Unused bits of the last byte are already zero, so this only moves
    /// the cursor.
    pub fn align(&mut self) {
        self.bit_offset = 0;
    }

    /// View the bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.output
    }

    /// Consume the writer and return the padded output.
    pub fn into_bytes(self) -> Vec<u8> {
        self.output
    }
}
