//! Canonical and minimum-offset record layouts.
//!
//! - `NONE`: every record in its canonical 20-byte form
//! - `REDUCE_BITS`: bit preamble, then each field as a bit-packed offset
//! - `REDUCE_BYTES`: byte preamble, then each field as a whole-byte offset

use crate::table::{FieldTable, WidthUnit};
use scanpack_core::bitstream::{BitReader, BitWriter};
use scanpack_core::error::Result;
use scanpack_core::point::{Field, POINT_SIZE, PointRecord};

/// Write canonical records.
pub(crate) fn encode_raw(points: &[PointRecord], writer: &mut BitWriter) -> Result<()> {
    for point in points {
        writer.write_slice(&point.to_bytes());
    }
    Ok(())
}

/// Read `count` canonical records.
pub(crate) fn decode_raw(reader: &mut BitReader<'_>, count: usize) -> Result<Vec<PointRecord>> {
    let mut points = Vec::with_capacity(count.min(reader.remaining_bytes() / POINT_SIZE));
    for _ in 0..count {
        let mut point = PointRecord::default();
        for field in Field::ALL {
            point.set(field, field.from_raw(reader.read_bytes(field.byte_size())?));
        }
        points.push(point);
    }
    Ok(points)
}

/// Write a minimum-offset layout with the widths measured in `unit`.
///
/// The caller checks [`FieldTable::fits_preamble`] first; a table that does
/// not fit fails with `InvalidInput`.
pub(crate) fn encode_reduced(
    points: &[PointRecord],
    unit: WidthUnit,
    writer: &mut BitWriter,
) -> Result<()> {
    let table = FieldTable::measure(points, unit);
    table.write(writer)?;

    for point in points {
        for field in Field::ALL {
            let stored = table.offset(field, point.get(field));
            match unit {
                WidthUnit::Bits => writer.write_bits(stored, table.width(field))?,
                WidthUnit::Bytes => writer.write_bytes(stored, table.width(field))?,
            }
        }
    }

    writer.align();
    Ok(())
}

/// Read `count` records of a minimum-offset layout.
pub(crate) fn decode_reduced(
    reader: &mut BitReader<'_>,
    unit: WidthUnit,
    count: usize,
) -> Result<Vec<PointRecord>> {
    let table = FieldTable::read(reader, unit)?;

    // Zero-width tables store nothing per record, so only a nonzero record
    // size bounds the count by the input.
    let record_bits: u64 = Field::ALL
        .iter()
        .map(|&field| match unit {
            WidthUnit::Bits => table.width(field) as u64,
            WidthUnit::Bytes => table.width(field) as u64 * 8,
        })
        .sum();
    let capacity = match record_bits {
        0 => count,
        bits => count.min((reader.remaining_bits() / bits) as usize),
    };
    let mut points = Vec::with_capacity(capacity);
    for _ in 0..count {
        let mut point = PointRecord::default();
        for field in Field::ALL {
            let stored = match unit {
                WidthUnit::Bits => reader.read_bits(table.width(field))?,
                WidthUnit::Bytes => reader.read_bytes(table.width(field))?,
            };
            point.set(field, table.restore(field, stored));
        }
        points.push(point);
    }

    reader.align();
    Ok(points)
}
