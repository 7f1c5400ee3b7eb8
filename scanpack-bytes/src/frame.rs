//! Stage-2 framing.
//!
//! ```text
//! "M2" flags:u32 reserved:u32 decoded_len:u32 payload...
//! ```
//!
//! The payload runs to the end of the frame.

use crate::lzss::{self, LzssEncoder};
use crate::methods::{ByteMethod, LzssParams};
use crate::mtf;
use log::debug;
use scanpack_core::bitstream::BitWriter;
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::{HEADER_LEN, Stage, StageHeader};
use serde::Serialize;

/// Validated stage-2 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BytesHeader {
    /// Compression method.
    pub method: ByteMethod,
    /// LZSS parameters, for methods that use LZSS.
    pub params: Option<LzssParams>,
    /// Length of the decoded stage-1 frame.
    pub decoded_len: u32,
}

impl BytesHeader {
    /// Validate a raw stage-2 header.
    pub fn from_stage_header(header: &StageHeader) -> Result<Self> {
        let method = ByteMethod::from_code(header.selector())?;
        let params = method
            .uses_lzss()
            .then(|| LzssParams::from_flags(header.flags));
        Ok(Self {
            method,
            params,
            decoded_len: header.len_b,
        })
    }

    /// Parse and validate the header at the front of a stage-2 frame.
    pub fn parse(frame: &[u8]) -> Result<Self> {
        let (header, _) = StageHeader::parse(frame, Stage::Bytes)?;
        Self::from_stage_header(&header)
    }
}

/// Stage-2 compressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteEncoder {
    method: ByteMethod,
    params: LzssParams,
}

impl ByteEncoder {
    /// Create an encoder with the default LZSS parameters.
    pub fn new(method: ByteMethod) -> Self {
        Self {
            method,
            params: LzssParams::default(),
        }
    }

    /// Set the LZSS parameters.
    pub fn with_params(mut self, params: LzssParams) -> Self {
        self.params = params;
        self
    }

    /// Compress `input` into a complete stage-2 frame.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let decoded_len = u32::try_from(input.len()).map_err(|_| {
            ScanPackError::invalid_input(format!(
                "{} bytes exceed the 32-bit frame length",
                input.len()
            ))
        })?;

        let payload = match self.method {
            ByteMethod::None => input.to_vec(),
            ByteMethod::Mtf => mtf::transform(input),
            ByteMethod::Lzss => LzssEncoder::new(self.params)?.encode(input)?,
            ByteMethod::MtfLzss => LzssEncoder::new(self.params)?.encode(&mtf::transform(input))?,
            reserved => {
                return Err(ScanPackError::unsupported(
                    Stage::Bytes,
                    reserved.code(),
                    reserved.name(),
                ));
            }
        };

        let mut flags = self.method.code() as u32;
        if self.method.uses_lzss() {
            flags |= self.params.to_flags();
        }

        let mut writer = BitWriter::with_capacity(HEADER_LEN + payload.len());
        StageHeader::new(Stage::Bytes, flags, 0, decoded_len).write(&mut writer)?;
        writer.write_slice(&payload);

        debug!(
            "stage 2 {}: {} bytes -> {} bytes",
            self.method,
            input.len(),
            writer.len()
        );
        Ok(writer.into_bytes())
    }
}

/// Compress `input` into a stage-2 frame.
pub fn compress(input: &[u8], method: ByteMethod, params: LzssParams) -> Result<Vec<u8>> {
    ByteEncoder::new(method).with_params(params).encode(input)
}

/// Decompress a stage-2 frame back to the stage-1 frame it wraps.
pub fn decompress(frame: &[u8]) -> Result<Vec<u8>> {
    let (raw, payload) = StageHeader::parse(frame, Stage::Bytes)?;
    let header = BytesHeader::from_stage_header(&raw)?;
    let expected = header.decoded_len as usize;

    let output = match (header.method, header.params) {
        (ByteMethod::None, _) => payload.to_vec(),
        (ByteMethod::Mtf, _) => mtf::inverse_transform(payload),
        (ByteMethod::Lzss, Some(params)) => lzss::decode(payload, params, expected)?,
        (ByteMethod::MtfLzss, Some(params)) => {
            mtf::inverse_transform(&lzss::decode(payload, params, expected)?)
        }
        (method, _) => {
            return Err(ScanPackError::unsupported(
                Stage::Bytes,
                method.code(),
                method.name(),
            ));
        }
    };

    if output.len() != expected {
        return Err(ScanPackError::malformed(
            Stage::Bytes,
            format!(
                "{} payload decodes to {} bytes, header declares {expected}",
                header.method,
                output.len()
            ),
        ));
    }

    debug!(
        "stage 2 {}: {} bytes -> {} bytes",
        header.method,
        frame.len(),
        output.len()
    );
    Ok(output)
}
