//! Stage-3 framing.
//!
//! ```text
//! "MC" flags:u32 decoded_len:u32 payload_len:u32 payload...
//! ```
//!
//! This is the outermost header of a ScanPack frame. Bytes after the payload
//! are ignored.

use crate::huffman;
use crate::methods::EntropyMethod;
use log::debug;
use scanpack_core::bitstream::BitWriter;
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::{HEADER_LEN, Stage, StageHeader};
use serde::Serialize;

/// Validated stage-3 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntropyHeader {
    /// Entropy coding method.
    pub method: EntropyMethod,
    /// Length of the decoded stage-2 frame.
    pub decoded_len: u32,
    /// Length of the stage-3 payload.
    pub payload_len: u32,
}

impl EntropyHeader {
    /// Validate a raw stage-3 header.
    pub fn from_stage_header(header: &StageHeader) -> Result<Self> {
        let method = EntropyMethod::from_code(header.selector())?;
        if method == EntropyMethod::None && header.len_a != header.len_b {
            return Err(ScanPackError::malformed(
                Stage::Entropy,
                format!(
                    "stored payload of {} bytes declares {} decoded bytes",
                    header.len_b, header.len_a
                ),
            ));
        }
        Ok(Self {
            method,
            decoded_len: header.len_a,
            payload_len: header.len_b,
        })
    }

    /// Parse and validate the header at the front of a stage-3 frame.
    pub fn parse(frame: &[u8]) -> Result<Self> {
        let (header, _) = StageHeader::parse(frame, Stage::Entropy)?;
        Self::from_stage_header(&header)
    }
}

fn frame_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        ScanPackError::invalid_input(format!("{len} bytes exceed the 32-bit frame length"))
    })
}

/// Entropy-code `input` into a complete stage-3 frame.
pub fn compress(input: &[u8], method: EntropyMethod) -> Result<Vec<u8>> {
    let payload = match method {
        EntropyMethod::None => input.to_vec(),
        EntropyMethod::Huffman => huffman::encode(input)?,
        reserved => {
            return Err(ScanPackError::unsupported(
                Stage::Entropy,
                reserved.code(),
                reserved.name(),
            ));
        }
    };

    let header = StageHeader::new(
        Stage::Entropy,
        method.code() as u32,
        frame_len(input.len())?,
        frame_len(payload.len())?,
    );

    let mut writer = BitWriter::with_capacity(HEADER_LEN + payload.len());
    header.write(&mut writer)?;
    writer.write_slice(&payload);

    debug!(
        "stage 3 {method}: {} bytes -> {} bytes",
        input.len(),
        writer.len()
    );
    Ok(writer.into_bytes())
}

/// Decode a stage-3 frame back to the stage-2 frame it wraps.
pub fn decompress(frame: &[u8]) -> Result<Vec<u8>> {
    let (raw, rest) = StageHeader::parse(frame, Stage::Entropy)?;
    let header = EntropyHeader::from_stage_header(&raw)?;

    let payload_len = header.payload_len as usize;
    if rest.len() < payload_len {
        return Err(ScanPackError::out_of_data(
            ((payload_len - rest.len()) * 8) as u64,
            ((HEADER_LEN + rest.len()) * 8) as u64,
        ));
    }
    let payload = &rest[..payload_len];

    let output = match header.method {
        EntropyMethod::None => payload.to_vec(),
        EntropyMethod::Huffman => huffman::decode(payload, header.decoded_len as usize)?,
        reserved => {
            return Err(ScanPackError::unsupported(
                Stage::Entropy,
                reserved.code(),
                reserved.name(),
            ));
        }
    };

    debug!(
        "stage 3 {}: {} bytes -> {} bytes",
        header.method,
        payload_len,
        output.len()
    );
    Ok(output)
}
