//! LZSS over a position-addressed window.
//!
//! The stream is a sequence of units, most significant bit first:
//!
//! ```text
//! 1 <byte:8>                              literal
//! 0 <position:index_bits> <length:len_bits> copy length + cost_benefit bytes
//! 0 <0:index_bits>                        end of stream
//! ```
//!
//! `position` names an absolute slot of the decoder's circular window. Every
//! output byte is written to the window at its cursor, which starts at slot
//! 1, so slot 0 is free to mark the end of the stream.

use crate::methods::LzssParams;
use log::trace;
use scanpack_core::bitstream::{BitReader, BitWriter};
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;
use scanpack_core::window::Window;

/// LZSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssToken {
    /// A literal byte.
    Literal(u8),
    /// A copy from the window.
    Match {
        /// Window slot the copy starts at.
        position: u16,
        /// Number of bytes to copy.
        length: u16,
    },
}

/// Greedy LZSS encoder.
#[derive(Debug, Clone, Copy)]
pub struct LzssEncoder {
    params: LzssParams,
}

impl LzssEncoder {
    /// Create an encoder, checking the parameters.
    pub fn new(params: LzssParams) -> Result<Self> {
        if !params.is_valid() {
            return Err(ScanPackError::invalid_input(params.range_message()));
        }
        Ok(Self { params })
    }

    /// Find the longest match for `data[pos..]`.
    ///
    /// The byte output at index `k` lives in window slot `(k + 1) mod size`
    /// until it is overwritten `size` bytes later. Slot 0 is never
    /// referenced. Ties keep the nearest source.
    fn find_match(&self, data: &[u8], pos: usize) -> Option<(usize, usize)> {
        let size = self.params.window_size();
        let max_len = self.params.max_match().min(data.len() - pos);
        if max_len <= self.params.cost_benefit() {
            return None;
        }

        let mut best_len = 0;
        let mut best_slot = 0;
        for distance in 1..=pos.min(size) {
            let source = pos - distance;
            let slot = (source + 1) % size;
            if slot == 0 {
                continue;
            }

            // Source bytes past `pos` are produced by this same copy.
            let len = (0..max_len)
                .take_while(|&i| data[source + i] == data[pos + i])
                .count();

            if len > best_len {
                best_len = len;
                best_slot = slot;
                if len == max_len {
                    break;
                }
            }
        }

        (best_len > self.params.cost_benefit()).then_some((best_slot, best_len))
    }

    /// Split `data` into tokens.
    pub fn tokenize(&self, data: &[u8]) -> Vec<LzssToken> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < data.len() {
            match self.find_match(data, pos) {
                Some((slot, len)) => {
                    tokens.push(LzssToken::Match {
                        position: slot as u16,
                        length: len as u16,
                    });
                    pos += len;
                }
                None => {
                    tokens.push(LzssToken::Literal(data[pos]));
                    pos += 1;
                }
            }
        }

        tokens
    }

    /// Write tokens followed by the end-of-stream marker.
    pub fn write_tokens(&self, tokens: &[LzssToken], writer: &mut BitWriter) -> Result<()> {
        let cost_benefit = self.params.cost_benefit();
        for token in tokens {
            match *token {
                LzssToken::Literal(byte) => {
                    writer.write_bit(true)?;
                    writer.write_bits(byte as u32, 8)?;
                }
                LzssToken::Match { position, length } => {
                    writer.write_bit(false)?;
                    writer.write_bits(position as u32, self.params.index_bits)?;
                    writer.write_bits(
                        (length as usize - cost_benefit) as u32,
                        self.params.len_bits,
                    )?;
                }
            }
        }

        writer.write_bit(false)?;
        writer.write_bits(0, self.params.index_bits)?;
        writer.align();
        Ok(())
    }

    /// Compress `data` into a padded LZSS bit stream.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let tokens = self.tokenize(data);
        let matches = tokens
            .iter()
            .filter(|t| matches!(t, LzssToken::Match { .. }))
            .count();
        trace!(
            "lzss {}/{}: {} bytes -> {} tokens ({} matches)",
            self.params.index_bits,
            self.params.len_bits,
            data.len(),
            tokens.len(),
            matches
        );

        let mut writer = BitWriter::with_capacity(data.len() / 2 + 2);
        self.write_tokens(&tokens, &mut writer)?;
        Ok(writer.into_bytes())
    }
}

/// Decompress an LZSS bit stream that must produce exactly `expected` bytes.
pub fn decode(data: &[u8], params: LzssParams, expected: usize) -> Result<Vec<u8>> {
    if !params.is_valid() {
        return Err(ScanPackError::malformed(Stage::Bytes, params.range_message()));
    }

    let cost_benefit = params.cost_benefit();
    let mut window = Window::new(params.index_bits)?;
    let mut reader = BitReader::new(data);
    // Every unit costs at least one bit.
    let bound = data.len().saturating_mul(8).saturating_mul(params.max_match());
    let mut output = Vec::with_capacity(expected.min(bound));

    loop {
        if reader.read_bit()? {
            let byte = reader.read_bits(8)? as u8;
            if output.len() >= expected {
                return Err(overrun(expected));
            }
            window.push(byte);
            output.push(byte);
            continue;
        }

        let position = reader.read_bits(params.index_bits)? as usize;
        if position == 0 {
            break;
        }
        let length = reader.read_bits(params.len_bits)? as usize + cost_benefit;
        if output.len() + length > expected {
            return Err(overrun(expected));
        }
        window.copy_match(position, length, &mut output)?;
    }

    if output.len() != expected {
        return Err(ScanPackError::malformed(
            Stage::Bytes,
            format!(
                "LZSS stream ended after {} of {expected} bytes",
                output.len()
            ),
        ));
    }

    Ok(output)
}

fn overrun(expected: usize) -> ScanPackError {
    ScanPackError::malformed(
        Stage::Bytes,
        format!("LZSS stream produces more than {expected} bytes"),
    )
}
