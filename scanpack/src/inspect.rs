//! Frame inspection.
//!
//! Reading the inner headers requires decoding the outer stages, so
//! [`inspect`] costs about as much as a decode without the stage-1 records.

use scanpack_bytes::BytesHeader;
use scanpack_core::error::Result;
use scanpack_core::point::POINT_SIZE;
use scanpack_entropy::EntropyHeader;
use scanpack_points::PointsHeader;
use serde::Serialize;

/// Headers of all three stages of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameInfo {
    /// Size of the inspected frame in bytes.
    pub frame_len: usize,
    /// Stage-3 header.
    pub entropy: EntropyHeader,
    /// Stage-2 header.
    pub bytes: BytesHeader,
    /// Stage-1 header.
    pub points: PointsHeader,
}

impl FrameInfo {
    /// Number of records the frame decodes to.
    pub fn point_count(&self) -> usize {
        self.points.point_count()
    }

    /// Size of the decoded records in canonical form.
    pub fn decoded_len(&self) -> usize {
        self.point_count() * POINT_SIZE
    }

    /// Frame size divided by the canonical record size (0 for empty frames).
    pub fn ratio(&self) -> f64 {
        match self.decoded_len() {
            0 => 0.0,
            decoded => self.frame_len as f64 / decoded as f64,
        }
    }

    /// Space saved against the canonical records, in percent.
    pub fn space_savings(&self) -> f64 {
        match self.decoded_len() {
            0 => 0.0,
            _ => (1.0 - self.ratio()) * 100.0,
        }
    }
}

/// Read the headers of every stage of `input`.
pub fn inspect(input: &[u8]) -> Result<FrameInfo> {
    let entropy = EntropyHeader::parse(input)?;
    let stage2 = scanpack_entropy::decompress(input)?;
    let bytes = BytesHeader::parse(&stage2)?;
    let stage1 = scanpack_bytes::decompress(&stage2)?;
    let points = PointsHeader::parse(&stage1)?;

    Ok(FrameInfo {
        frame_len: input.len(),
        entropy,
        bytes,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::pipeline::encode_with;
    use scanpack_core::point::PointRecord;

    #[test]
    fn test_inspect_store() {
        let points = vec![PointRecord::new(1, 2, 3, 0, 0, 0); 10];
        let frame = encode_with(&points, &PipelineConfig::store()).unwrap();
        let info = inspect(&frame).unwrap();

        assert_eq!(info.point_count(), 10);
        assert_eq!(info.points.stored_len, 200);
        assert_eq!(info.bytes.decoded_len as usize, 14 + 200);
        assert_eq!(info.entropy.decoded_len as usize, 14 + 14 + 200);
        // Three headers over the raw records.
        assert_eq!(frame.len(), 200 + 3 * 14);
        assert!(info.ratio() > 1.0);
    }

    #[test]
    fn test_inspect_json() {
        let points = vec![PointRecord::invalid(); 30];
        let frame = encode_with(&points, &PipelineConfig::default()).unwrap();
        let json = serde_json::to_value(inspect(&frame).unwrap()).unwrap();
        assert_eq!(json["entropy"]["method"], "huffman");
        assert_eq!(json["bytes"]["method"], "mtf_lzss");
        assert_eq!(json["points"]["remove_invalid"], true);
        assert_eq!(json["points"]["decoded_len"], 600);
    }
}
