//! Stage-1 encoding.

use crate::invalid;
use crate::methods::{PointMethod, flags};
use crate::reduce;
use crate::table::{FieldTable, WidthUnit};
use crate::{delta, truncate};
use log::{debug, trace, warn};
use scanpack_core::bitstream::BitWriter;
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::{HEADER_LEN, Stage, StageHeader};
use scanpack_core::point::{POINT_SIZE, PointRecord};
use std::borrow::Cow;

/// Stage-1 encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointEncoder {
    /// Requested record layout.
    method: PointMethod,
    /// Whether runs of invalid records are collapsed.
    remove_invalid: bool,
}

impl PointEncoder {
    /// Create an encoder for `method` without the invalid-run collapse.
    pub fn new(method: PointMethod) -> Self {
        Self {
            method,
            remove_invalid: false,
        }
    }

    /// Enable or disable the invalid-run collapse.
    pub fn remove_invalid(mut self, enabled: bool) -> Self {
        self.remove_invalid = enabled;
        self
    }

    /// Requested method.
    pub fn method(&self) -> PointMethod {
        self.method
    }

    /// Encode `points` into a complete stage-1 frame.
    pub fn encode(&self, points: &[PointRecord]) -> Result<Vec<u8>> {
        let len_out = frame_len(points.len())?;

        // The collapse must see the records the way they will be stored.
        let source: Cow<'_, [PointRecord]> = if self.method.is_lossy() {
            Cow::Owned(points.iter().map(truncate::truncated).collect())
        } else {
            Cow::Borrowed(points)
        };

        let mut stage_flags = 0u32;
        let stream: Cow<'_, [PointRecord]> = if self.remove_invalid {
            match invalid::collapse(&source) {
                Some(collapsed) => {
                    stage_flags |= flags::REMOVE_INVALID;
                    Cow::Owned(collapsed)
                }
                None => {
                    debug!("stage 1: placeholder-shaped record present, collapse skipped");
                    source
                }
            }
        } else {
            source
        };

        let method = self.effective_method(&stream);
        if method.is_lossy() && !truncate::fits_222110(points) {
            warn!("stage 1: {method} truncates values outside its 16/8-bit fields");
        }
        stage_flags |= method.code() as u32;

        let len_in = frame_len(stream.len())?;
        let mut writer = BitWriter::with_capacity(HEADER_LEN + stream.len() * POINT_SIZE);
        StageHeader::new(Stage::Points, stage_flags, len_out, len_in).write(&mut writer)?;

        match method {
            PointMethod::None => reduce::encode_raw(&stream, &mut writer)?,
            PointMethod::ReduceBits => {
                reduce::encode_reduced(&stream, WidthUnit::Bits, &mut writer)?
            }
            PointMethod::ReduceBytes => {
                reduce::encode_reduced(&stream, WidthUnit::Bytes, &mut writer)?
            }
            PointMethod::ReduceBytes222110 => truncate::encode_rows(&stream, &mut writer)?,
            PointMethod::ReduceBytesResort => truncate::encode_columns(&stream, &mut writer)?,
            PointMethod::DeltaRle => delta::encode(&stream, &mut writer)?,
        }

        let frame = writer.into_bytes();
        debug!(
            "stage 1 {method}: {} points ({} stored) -> {} bytes",
            points.len(),
            stream.len(),
            frame.len()
        );
        Ok(frame)
    }

    /// Method actually written for `stream`.
    ///
    /// `REDUCE_BITS` falls back to `REDUCE_BYTES` when a field's range is
    /// too wide for its preamble width field.
    fn effective_method(&self, stream: &[PointRecord]) -> PointMethod {
        if self.method == PointMethod::ReduceBits
            && !FieldTable::measure(stream, WidthUnit::Bits).fits_preamble()
        {
            warn!("stage 1: field range too wide for reduce_bits, using reduce_bytes");
            return PointMethod::ReduceBytes;
        }
        self.method
    }
}

impl Default for PointEncoder {
    fn default() -> Self {
        Self::new(PointMethod::default()).remove_invalid(true)
    }
}

/// Encode `points` into a stage-1 frame.
pub fn encode_points(
    points: &[PointRecord],
    method: PointMethod,
    remove_invalid: bool,
) -> Result<Vec<u8>> {
    PointEncoder::new(method)
        .remove_invalid(remove_invalid)
        .encode(points)
}

/// Pick the lossless method giving the smallest stage-1 frame for `points`.
///
/// Ties go to the earlier entry of [`PointMethod::LOSSLESS`].
pub fn select_point_method(points: &[PointRecord], remove_invalid: bool) -> PointMethod {
    PointMethod::LOSSLESS
        .into_iter()
        .filter_map(|method| {
            let size = encode_points(points, method, remove_invalid).ok()?.len();
            trace!("stage 1 candidate {method}: {size} bytes");
            Some((method, size))
        })
        .min_by_key(|&(_, size)| size)
        .map(|(method, _)| method)
        .unwrap_or_default()
}

fn frame_len(count: usize) -> Result<u32> {
    count
        .checked_mul(POINT_SIZE)
        .and_then(|len| u32::try_from(len).ok())
        .ok_or_else(|| {
            ScanPackError::invalid_input(format!(
                "{count} points exceed the 32-bit frame length"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_fields() {
        let points = vec![
            PointRecord::new(1, 2, 3, 0, 0, 0),
            PointRecord::invalid(),
            PointRecord::invalid(),
            PointRecord::invalid(),
        ];
        let frame = encode_points(&points, PointMethod::None, true).unwrap();
        let (header, payload) = StageHeader::parse(&frame, Stage::Points).unwrap();

        assert_eq!(header.flags, flags::REMOVE_INVALID);
        assert_eq!(header.len_a, 80);
        assert_eq!(header.len_b, 40);
        assert_eq!(payload.len(), 40);
    }

    #[test]
    fn test_reduce_bits_fallback() {
        let points = [
            PointRecord::new(i32::MIN, 0, 0, 0, 0, 0),
            PointRecord::new(i32::MAX, 0, 0, 0, 0, 0),
        ];
        let frame = encode_points(&points, PointMethod::ReduceBits, false).unwrap();
        let (header, _) = StageHeader::parse(&frame, Stage::Points).unwrap();
        assert_eq!(header.selector(), PointMethod::ReduceBytes.code());
    }

    #[test]
    fn test_lookalike_disables_collapse() {
        let points = [PointRecord::new(0, 0, 3, 0x10, 0, 0), PointRecord::invalid()];
        let frame = encode_points(&points, PointMethod::None, true).unwrap();
        let (header, _) = StageHeader::parse(&frame, Stage::Points).unwrap();
        assert_eq!(header.flags & flags::REMOVE_INVALID, 0);
        assert_eq!(header.len_a, header.len_b);
    }

    #[test]
    fn test_select_prefers_compact_layout() {
        let smooth: Vec<PointRecord> = (0..500)
            .map(|i| PointRecord::new(i * 2, i * 2, i * 2, 1, 0, 0))
            .collect();
        assert_ne!(select_point_method(&smooth, false), PointMethod::None);

        let empty: [PointRecord; 0] = [];
        assert_eq!(select_point_method(&empty, false), PointMethod::None);
    }
}
