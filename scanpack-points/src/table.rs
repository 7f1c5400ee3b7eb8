//! Per-field minimum and width tables.
//!
//! The reducing layouts store each field as an unsigned offset from the
//! field's minimum over the whole array. The table travels in a preamble:
//!
//! ```text
//! minima:  x:4 y:4 z:4 type:4 segment:2 intensity:2   (bytes, raw bits)
//! widths:  5,5,5,5,4,4 bits + 4 pad   (bit widths)
//!          3,3,3,3,2,2 bits           (byte widths)
//! ```

use scanpack_core::bitstream::{BitReader, BitWriter};
use scanpack_core::error::{Result, ScanPackError};
use scanpack_core::header::Stage;
use scanpack_core::point::{Field, PointRecord};

/// Unit the widths of a [`FieldTable`] are measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthUnit {
    /// Offsets are packed to the bit.
    Bits,
    /// Offsets occupy whole big-endian bytes.
    Bytes,
}

impl WidthUnit {
    /// Size of the preamble field that stores the width of `field`.
    fn width_field_bits(&self, field: Field) -> u8 {
        match (self, field.byte_size()) {
            (Self::Bits, 4) => 5,
            (Self::Bits, _) => 4,
            (Self::Bytes, 4) => 3,
            (Self::Bytes, _) => 2,
        }
    }

    /// Largest width `field` may legally declare.
    fn max_width(&self, field: Field) -> u8 {
        let storable = (1u8 << self.width_field_bits(field)) - 1;
        let natural = match self {
            Self::Bits => field.byte_size() * 8,
            Self::Bytes => field.byte_size(),
        };
        storable.min(natural)
    }
}

/// Minimum and offset width of each field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    /// Field minima, widened.
    pub minima: [i64; 6],
    /// Offset widths in [`FieldTable::unit`] units.
    pub widths: [u8; 6],
    /// Unit of `widths`.
    pub unit: WidthUnit,
}

impl FieldTable {
    /// Measure the minimum and the width needed for every field of `points`.
    ///
    /// An empty array gives zero minima and zero widths.
    pub fn measure(points: &[PointRecord], unit: WidthUnit) -> Self {
        let mut minima = [0i64; 6];
        let mut widths = [0u8; 6];

        for field in Field::ALL {
            let mut values = points.iter().map(|p| p.get(field));
            let Some(first) = values.next() else {
                continue;
            };
            let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

            let bits = (64 - ((max - min) as u64).leading_zeros()) as u8;
            minima[field.index()] = min;
            widths[field.index()] = match unit {
                WidthUnit::Bits => bits,
                WidthUnit::Bytes => bits.div_ceil(8),
            };
        }

        Self {
            minima,
            widths,
            unit,
        }
    }

    /// Check whether every width can be stored in its preamble field.
    pub fn fits_preamble(&self) -> bool {
        Field::ALL
            .iter()
            .all(|&f| self.widths[f.index()] <= self.unit.max_width(f))
    }

    /// Width of `field`.
    pub fn width(&self, field: Field) -> u8 {
        self.widths[field.index()]
    }

    /// Minimum of `field`.
    pub fn min(&self, field: Field) -> i64 {
        self.minima[field.index()]
    }

    /// Offset of `value` from the field minimum.
    pub fn offset(&self, field: Field, value: i64) -> u32 {
        value.wrapping_sub(self.min(field)) as u32
    }

    /// Field value for a stored offset.
    pub fn restore(&self, field: Field, stored: u32) -> i64 {
        self.min(field).wrapping_add(stored as i64)
    }

    /// Write the preamble, leaving the writer byte-aligned.
    pub fn write(&self, writer: &mut BitWriter) -> Result<()> {
        if !self.fits_preamble() {
            return Err(ScanPackError::invalid_input(
                "field range too wide for the preamble width fields",
            ));
        }

        for field in Field::ALL {
            writer.write_bytes(field.to_raw(self.min(field)), field.byte_size())?;
        }
        for field in Field::ALL {
            writer.write_bits(self.width(field) as u32, self.unit.width_field_bits(field))?;
        }
        writer.align();
        Ok(())
    }

    /// Read a preamble written with `unit` widths.
    pub fn read(reader: &mut BitReader<'_>, unit: WidthUnit) -> Result<Self> {
        let mut minima = [0i64; 6];
        let mut widths = [0u8; 6];

        for field in Field::ALL {
            minima[field.index()] = field.from_raw(reader.read_bytes(field.byte_size())?);
        }
        for field in Field::ALL {
            let width = reader.read_bits(unit.width_field_bits(field))? as u8;
            if width > unit.max_width(field) {
                return Err(ScanPackError::malformed(
                    Stage::Points,
                    format!("{} width {width} exceeds the field size", field.name()),
                ));
            }
            widths[field.index()] = width;
        }
        reader.align();

        Ok(Self {
            minima,
            widths,
            unit,
        })
    }
}
