//! Stage-1 decoding.

use crate::invalid;
use crate::methods::{PointMethod, flags};
use crate::reduce;
use crate::table::WidthUnit;
use crate::{delta, truncate};
use log::debug;
use scanpack_core::bitstream::BitReader;
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::{Stage, StageHeader};
use scanpack_core::point::{POINT_SIZE, PointRecord};
use serde::Serialize;

/// Validated stage-1 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PointsHeader {
    /// Record layout.
    pub method: PointMethod,
    /// Whether placeholders must be expanded.
    pub remove_invalid: bool,
    /// Length of the decoded canonical records in bytes.
    pub decoded_len: u32,
    /// Length of the stored records in canonical bytes.
    pub stored_len: u32,
}

impl PointsHeader {
    /// Validate a raw stage-1 header.
    pub fn from_stage_header(header: &StageHeader) -> Result<Self> {
        let method = PointMethod::from_code(header.selector())?;
        let remove_invalid = header.flags & flags::REMOVE_INVALID != 0;

        for (name, len) in [("decoded", header.len_a), ("stored", header.len_b)] {
            if len as usize % POINT_SIZE != 0 {
                return Err(ScanPackError::malformed(
                    Stage::Points,
                    format!("{name} length {len} is not a multiple of {POINT_SIZE}"),
                ));
            }
        }

        let consistent = if remove_invalid {
            header.len_b <= header.len_a
        } else {
            header.len_b == header.len_a
        };
        if !consistent {
            return Err(ScanPackError::malformed(
                Stage::Points,
                format!(
                    "stored length {} does not fit decoded length {}",
                    header.len_b, header.len_a
                ),
            ));
        }

        Ok(Self {
            method,
            remove_invalid,
            decoded_len: header.len_a,
            stored_len: header.len_b,
        })
    }

    /// Parse and validate the header at the front of a stage-1 frame.
    pub fn parse(frame: &[u8]) -> Result<Self> {
        let (header, _) = StageHeader::parse(frame, Stage::Points)?;
        Self::from_stage_header(&header)
    }

    /// Number of records after expansion.
    pub fn point_count(&self) -> usize {
        self.decoded_len as usize / POINT_SIZE
    }

    /// Number of records physically stored.
    pub fn stored_count(&self) -> usize {
        self.stored_len as usize / POINT_SIZE
    }
}

/// Decode a stage-1 frame, trusting the point count in its header.
pub fn decode_points(frame: &[u8]) -> Result<Vec<PointRecord>> {
    decode_frame(frame, None)
}

/// Decode a stage-1 frame that must hold exactly `expected` points.
///
/// The count is checked before any record is decoded, so a corrupt header
/// cannot make the decoder allocate more than the caller asked for.
pub fn decode_points_expecting(frame: &[u8], expected: usize) -> Result<Vec<PointRecord>> {
    decode_frame(frame, Some(expected))
}

fn decode_frame(frame: &[u8], expected: Option<usize>) -> Result<Vec<PointRecord>> {
    let mut reader = BitReader::new(frame);
    let header = PointsHeader::from_stage_header(&StageHeader::read(&mut reader, Stage::Points)?)?;

    if let Some(expected) = expected {
        if header.point_count() != expected {
            return Err(ScanPackError::malformed(
                Stage::Points,
                format!(
                    "frame holds {} points, caller expects {expected}",
                    header.point_count()
                ),
            ));
        }
    }

    let count = header.stored_count();
    let stream = match header.method {
        PointMethod::None => reduce::decode_raw(&mut reader, count)?,
        PointMethod::ReduceBits => reduce::decode_reduced(&mut reader, WidthUnit::Bits, count)?,
        PointMethod::ReduceBytes => reduce::decode_reduced(&mut reader, WidthUnit::Bytes, count)?,
        PointMethod::ReduceBytes222110 => truncate::decode_rows(&mut reader, count)?,
        PointMethod::ReduceBytesResort => truncate::decode_columns(&mut reader, count)?,
        PointMethod::DeltaRle => delta::decode(&mut reader, count)?,
    };

    let points = if header.remove_invalid {
        invalid::expand(&stream, header.point_count())?
    } else {
        stream
    };

    debug!(
        "stage 1 {}: {} bytes -> {} points ({} stored)",
        header.method,
        frame.len(),
        points.len(),
        count
    );
    Ok(points)
}
