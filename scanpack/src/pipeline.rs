//! The three-stage encode and decode chains.
//!
//! Encoding runs points -> bytes -> entropy; decoding peels the stages off in
//! the opposite order. Each stage checks its own magic tag, so a frame that
//! is cut or misaligned fails at the first header that does not match.

use crate::config::PipelineConfig;
use log::debug;
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::point::{POINT_SIZE, PointRecord, points_from_bytes, points_to_bytes};
use scanpack_points::{PointsHeader, decode_points_expecting, encode_points, select_point_method};

/// Encode `points` with the default configuration.
pub fn encode(points: &[PointRecord]) -> Result<Vec<u8>> {
    encode_with(points, &PipelineConfig::default())
}

/// Encode `points` through all three stages.
pub fn encode_with(points: &[PointRecord], config: &PipelineConfig) -> Result<Vec<u8>> {
    let method = if config.adaptive {
        select_point_method(points, config.remove_invalid)
    } else {
        config.points
    };

    let stage1 = encode_points(points, method, config.remove_invalid)?;
    let stage2 = scanpack_bytes::compress(&stage1, config.bytes, config.lzss)?;
    let stage3 = scanpack_entropy::compress(&stage2, config.entropy)?;

    debug!(
        "encoded {} points ({} bytes) -> {} bytes via {method}/{}/{}",
        points.len(),
        points.len() * POINT_SIZE,
        stage3.len(),
        config.bytes,
        config.entropy
    );
    Ok(stage3)
}

/// Decode a frame that must hold exactly `point_count` records.
pub fn decode(input: &[u8], point_count: usize) -> Result<Vec<PointRecord>> {
    let stage1 = unwrap_outer(input)?;
    decode_points_expecting(&stage1, point_count)
}

/// Decode a frame into `out`, returning the number of records written.
///
/// Fails with `BufferTooSmall` before decoding any record when the frame
/// declares more records than `out` holds.
pub fn decode_into(input: &[u8], out: &mut [PointRecord]) -> Result<usize> {
    let stage1 = unwrap_outer(input)?;
    let count = PointsHeader::parse(&stage1)?.point_count();
    if count > out.len() {
        return Err(ScanPackError::buffer_too_small(count, out.len()));
    }

    let points = decode_points_expecting(&stage1, count)?;
    out[..count].copy_from_slice(&points);
    Ok(count)
}

/// Encode canonical 20-byte records.
pub fn encode_bytes(raw: &[u8], config: &PipelineConfig) -> Result<Vec<u8>> {
    encode_with(&points_from_bytes(raw)?, config)
}

/// Decode a frame to canonical 20-byte records.
pub fn decode_bytes(input: &[u8], point_count: usize) -> Result<Vec<u8>> {
    Ok(points_to_bytes(&decode(input, point_count)?))
}

/// Strip stages 3 and 2, returning the stage-1 frame.
pub(crate) fn unwrap_outer(input: &[u8]) -> Result<Vec<u8>> {
    let stage2 = scanpack_entropy::decompress(input)?;
    scanpack_bytes::decompress(&stage2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanpack_core::header::{Stage, StageHeader};
    use scanpack_points::PointMethod;

    fn scan() -> Vec<PointRecord> {
        (0..64)
            .map(|i| PointRecord::new(i * 3, 100 - i, 7, 1, (i / 8) as i16, 50))
            .collect()
    }

    #[test]
    fn test_outer_magic_order() {
        let frame = encode(&scan()).unwrap();
        assert_eq!(&frame[0..2], b"MC");

        let stage1 = unwrap_outer(&frame).unwrap();
        let (header, _) = StageHeader::parse(&stage1, Stage::Points).unwrap();
        assert_eq!(header.len_a, 64 * 20);
    }

    #[test]
    fn test_adaptive_overrides_points() {
        let points = scan();
        let config = PipelineConfig::default()
            .with_points(PointMethod::ReduceBytes222110)
            .with_adaptive(true);
        let frame = encode_with(&points, &config).unwrap();
        let header = PointsHeader::parse(&unwrap_outer(&frame).unwrap()).unwrap();
        assert!(!header.method.is_lossy());
        assert_eq!(decode(&frame, points.len()).unwrap(), points);
    }

    #[test]
    fn test_decode_into_larger_buffer() {
        let points = scan();
        let frame = encode(&points).unwrap();
        let mut out = vec![PointRecord::default(); 100];
        assert_eq!(decode_into(&frame, &mut out).unwrap(), 64);
        assert_eq!(&out[..64], points.as_slice());
        assert_eq!(out[64], PointRecord::default());
    }
}
