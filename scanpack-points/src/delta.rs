//! Delta plus run-length layout.
//!
//! After a byte-width preamble the fields are stored one column at a time:
//!
//! - x, y, z: a full-width first value, then one byte per record. A byte `b`
//!   below 255 means `previous + (b - 128)`; 255 escapes a full-width value.
//! - type, segment: `(value, run)` pairs, run in `1..=255`.
//! - intensity: one full-width value per record.
//!
//! Full-width values are offsets from the field minimum. A field of width 0
//! stores nothing and every record takes the minimum.

use crate::table::{FieldTable, WidthUnit};
use scanpack_core::bitstream::{BitReader, BitWriter};
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;
use scanpack_core::point::{Field, PointRecord};

/// Delta byte that announces a full-width value.
const ESCAPE: u8 = 255;

/// Bias added to a delta before it is stored.
const DELTA_BIAS: i64 = 128;

/// Longest run a single pair can cover.
const MAX_RUN: usize = 255;

const DELTA_FIELDS: [Field; 3] = [Field::X, Field::Y, Field::Z];
const RUN_FIELDS: [Field; 2] = [Field::Type, Field::Segment];

pub(crate) fn encode(points: &[PointRecord], writer: &mut BitWriter) -> Result<()> {
    let table = FieldTable::measure(points, WidthUnit::Bytes);
    table.write(writer)?;

    for field in DELTA_FIELDS {
        encode_deltas(points, field, &table, writer)?;
    }
    for field in RUN_FIELDS {
        encode_runs(points, field, &table, writer)?;
    }

    let width = table.width(Field::Intensity);
    if width > 0 {
        for point in points {
            let stored = table.offset(Field::Intensity, point.get(Field::Intensity));
            writer.write_bytes(stored, width)?;
        }
    }

    Ok(())
}

pub(crate) fn decode(reader: &mut BitReader<'_>, count: usize) -> Result<Vec<PointRecord>> {
    let table = FieldTable::read(reader, WidthUnit::Bytes)?;

    // A delta or intensity column with a nonzero width costs at least one
    // byte per record.
    let per_record = DELTA_FIELDS
        .iter()
        .chain(&[Field::Intensity])
        .any(|&field| table.width(field) > 0);
    if per_record && count > reader.remaining_bytes() {
        return Err(ScanPackError::out_of_data(
            ((count - reader.remaining_bytes()) * 8) as u64,
            reader.bits_read(),
        ));
    }
    let mut points = vec![PointRecord::default(); count];

    for field in DELTA_FIELDS {
        decode_deltas(reader, &mut points, field, &table)?;
    }
    for field in RUN_FIELDS {
        decode_runs(reader, &mut points, field, &table)?;
    }

    let width = table.width(Field::Intensity);
    for point in points.iter_mut() {
        let stored = reader.read_bytes(width)?;
        point.set(Field::Intensity, table.restore(Field::Intensity, stored));
    }

    Ok(points)
}

fn encode_deltas(
    points: &[PointRecord],
    field: Field,
    table: &FieldTable,
    writer: &mut BitWriter,
) -> Result<()> {
    let width = table.width(field);
    if width == 0 {
        return Ok(());
    }

    let mut previous: Option<i64> = None;
    for point in points {
        let value = point.get(field);
        let delta = previous.map(|p| value - p);
        match delta {
            Some(d) if (-DELTA_BIAS..ESCAPE as i64 - DELTA_BIAS).contains(&d) => {
                writer.write_u8((d + DELTA_BIAS) as u8);
            }
            Some(_) => {
                writer.write_u8(ESCAPE);
                writer.write_bytes(table.offset(field, value), width)?;
            }
            None => writer.write_bytes(table.offset(field, value), width)?,
        }
        previous = Some(value);
    }

    Ok(())
}

fn decode_deltas(
    reader: &mut BitReader<'_>,
    points: &mut [PointRecord],
    field: Field,
    table: &FieldTable,
) -> Result<()> {
    let width = table.width(field);
    let mut previous: Option<i64> = None;

    for point in points.iter_mut() {
        let value = match previous {
            _ if width == 0 => table.min(field),
            None => table.restore(field, reader.read_bytes(width)?),
            Some(p) => match reader.read_u8()? {
                ESCAPE => table.restore(field, reader.read_bytes(width)?),
                b => p + b as i64 - DELTA_BIAS,
            },
        };
        point.set(field, value);
        previous = Some(point.get(field));
    }

    Ok(())
}

fn encode_runs(
    points: &[PointRecord],
    field: Field,
    table: &FieldTable,
    writer: &mut BitWriter,
) -> Result<()> {
    let width = table.width(field);
    if width == 0 {
        return Ok(());
    }

    let mut start = 0;
    while start < points.len() {
        let value = points[start].get(field);
        let run = points[start..]
            .iter()
            .take(MAX_RUN)
            .take_while(|p| p.get(field) == value)
            .count();

        writer.write_bytes(table.offset(field, value), width)?;
        writer.write_u8(run as u8);
        start += run;
    }

    Ok(())
}

fn decode_runs(
    reader: &mut BitReader<'_>,
    points: &mut [PointRecord],
    field: Field,
    table: &FieldTable,
) -> Result<()> {
    let width = table.width(field);
    if width == 0 {
        for point in points.iter_mut() {
            point.set(field, table.min(field));
        }
        return Ok(());
    }

    let mut covered = 0;
    while covered < points.len() {
        let value = table.restore(field, reader.read_bytes(width)?);
        let run = reader.read_u8()? as usize;
        if run == 0 {
            return Err(ScanPackError::malformed(
                Stage::Points,
                format!("zero-length {} run at record {covered}", field.name()),
            ));
        }
        if covered + run > points.len() {
            return Err(ScanPackError::malformed(
                Stage::Points,
                format!(
                    "{} run of {run} at record {covered} overshoots {} records",
                    field.name(),
                    points.len()
                ),
            ));
        }

        for point in &mut points[covered..covered + run] {
            point.set(field, value);
        }
        covered += run;
    }

    Ok(())
}
