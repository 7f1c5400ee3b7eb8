//! Truncating 8-byte layouts.
//!
//! Each record keeps the low 16 bits of x, y and z, the low byte of type and
//! the low byte of segment. Intensity is dropped. The layout is lossy: only
//! records for which [`fits_222110`] holds come back unchanged.

use scanpack_core::bitstream::{BitReader, BitWriter};
use scanpack_core::error::Result;
use scanpack_core::point::PointRecord;

/// Size of a truncated record.
pub const TRUNCATED_SIZE: usize = 8;

/// Check whether every record survives the truncating layouts unchanged.
pub fn fits_222110(points: &[PointRecord]) -> bool {
    let short = |v: i32| i16::try_from(v).is_ok();
    points.iter().all(|p| {
        short(p.x)
            && short(p.y)
            && short(p.z)
            && p.point_type <= 0xFF
            && (0..=0xFF).contains(&p.segment)
            && p.intensity == 0
    })
}

fn pack(point: &PointRecord) -> [u8; TRUNCATED_SIZE] {
    let [x0, x1] = (point.x as u16).to_be_bytes();
    let [y0, y1] = (point.y as u16).to_be_bytes();
    let [z0, z1] = (point.z as u16).to_be_bytes();
    [x0, x1, y0, y1, z0, z1, point.point_type as u8, point.segment as u8]
}

fn widen(hi: u8, lo: u8) -> i32 {
    let raw = u16::from_be_bytes([hi, lo]) as u32;
    let raw = if raw >= 0x8000 { raw + 0xFFFF_0000 } else { raw };
    raw as i32
}

fn unpack(row: &[u8]) -> PointRecord {
    PointRecord::new(
        widen(row[0], row[1]),
        widen(row[2], row[3]),
        widen(row[4], row[5]),
        row[6] as u32,
        row[7] as i16,
        0,
    )
}

/// The record as the truncating layouts store and decode it.
pub fn truncated(point: &PointRecord) -> PointRecord {
    unpack(&pack(point))
}

/// Write records row by row.
pub(crate) fn encode_rows(points: &[PointRecord], writer: &mut BitWriter) -> Result<()> {
    for point in points {
        writer.write_slice(&pack(point));
    }
    Ok(())
}

/// Read `count` row-ordered records.
pub(crate) fn decode_rows(reader: &mut BitReader<'_>, count: usize) -> Result<Vec<PointRecord>> {
    let rows = reader.read_slice(count * TRUNCATED_SIZE)?;
    Ok(rows.chunks_exact(TRUNCATED_SIZE).map(unpack).collect())
}

/// Write records transposed: byte `j` of record `i` goes to `i + j * count`.
pub(crate) fn encode_columns(points: &[PointRecord], writer: &mut BitWriter) -> Result<()> {
    let count = points.len();
    let mut columns = vec![0u8; count * TRUNCATED_SIZE];
    for (i, point) in points.iter().enumerate() {
        for (j, byte) in pack(point).into_iter().enumerate() {
            columns[i + j * count] = byte;
        }
    }
    writer.write_slice(&columns);
    Ok(())
}

/// Read `count` column-ordered records.
pub(crate) fn decode_columns(
    reader: &mut BitReader<'_>,
    count: usize,
) -> Result<Vec<PointRecord>> {
    let columns = reader.read_slice(count * TRUNCATED_SIZE)?;
    let mut rows = vec![0u8; columns.len()];
    for i in 0..count {
        for j in 0..TRUNCATED_SIZE {
            rows[i * TRUNCATED_SIZE + j] = columns[i + j * count];
        }
    }
    Ok(rows.chunks_exact(TRUNCATED_SIZE).map(unpack).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanpack_core::error::ScanPackError;

    fn in_range() -> Vec<PointRecord> {
        vec![
            PointRecord::new(-32768, 32767, -1, 0x91, 0, 0),
            PointRecord::new(12, -12, 4000, 0x02, 255, 0),
            PointRecord::new(0, 0, 0, 0x10, 17, 0),
        ]
    }

    #[test]
    fn test_rows_roundtrip() {
        let points = in_range();
        assert!(fits_222110(&points));

        let mut writer = BitWriter::new();
        encode_rows(&points, &mut writer).unwrap();
        let data = writer.into_bytes();
        assert_eq!(data.len(), 24);
        assert_eq!(&data[0..8], &[0x80, 0x00, 0x7F, 0xFF, 0xFF, 0xFF, 0x91, 0x00]);

        let mut reader = BitReader::new(&data);
        assert_eq!(decode_rows(&mut reader, 3).unwrap(), points);
    }

    #[test]
    fn test_columns_layout() {
        let points = in_range();
        let mut writer = BitWriter::new();
        encode_columns(&points, &mut writer).unwrap();
        let data = writer.into_bytes();

        // Column 6 holds the type bytes, column 7 the segments.
        assert_eq!(&data[18..21], &[0x91, 0x02, 0x10]);
        assert_eq!(&data[21..24], &[0, 255, 17]);

        let mut reader = BitReader::new(&data);
        assert_eq!(decode_columns(&mut reader, 3).unwrap(), points);
    }

    #[test]
    fn test_truncation() {
        let points = [PointRecord::new(70_000, -40_000, 5, 0x1_0110, 300, 99)];
        assert!(!fits_222110(&points));

        let mut writer = BitWriter::new();
        encode_rows(&points, &mut writer).unwrap();
        let data = writer.into_bytes();
        let mut reader = BitReader::new(&data);
        let decoded = decode_rows(&mut reader, 1).unwrap();

        assert_eq!(decoded[0].x, 70_000 - 65_536);
        assert_eq!(decoded[0].y, -40_000 + 65_536);
        assert_eq!(decoded[0].z, 5);
        assert_eq!(decoded[0].point_type, 0x10);
        assert_eq!(decoded[0].segment, 300 - 256);
        assert_eq!(decoded[0].intensity, 0);
    }

    #[test]
    fn test_negative_segment_does_not_fit() {
        assert!(!fits_222110(&[PointRecord::new(0, 0, 0, 0, -1, 0)]));
    }

    #[test]
    fn test_short_column_block() {
        let data = [0u8; 15];
        let mut reader = BitReader::new(&data);
        assert!(matches!(
            decode_columns(&mut reader, 2),
            Err(ScanPackError::OutOfData { .. })
        ));
    }
}
