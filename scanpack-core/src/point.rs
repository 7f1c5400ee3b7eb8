//! Range-scan point records.
//!
//! A [`PointRecord`] is the fixed 20-byte sample produced by the sensing
//! modules. Its canonical wire form is six big-endian fields:
//!
//! ```text
//! x:i32 y:i32 z:i32 type:u32 segment:i16 intensity:i16
//! ```

use crate::error::{Result, ScanPackError};

/// Canonical size of one point record in bytes.
pub const POINT_SIZE: usize = 20;

/// Bit flags carried in [`PointRecord::point_type`].
pub mod point_type {
    /// Mask of the semantic class bits.
    pub const CLASS_MASK: u32 = 0x03;
    /// The sample carries no valid measurement.
    pub const INVALID: u32 = 0x10;
    /// The beam reached maximum range without a return.
    pub const MAX_RANGE: u32 = 0x20;
    /// The return came from a reflector.
    pub const REFLECTOR: u32 = 0x80;
}

/// The six fields of a point record, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// X coordinate (millimetres).
    X,
    /// Y coordinate (millimetres).
    Y,
    /// Z coordinate (millimetres).
    Z,
    /// Type flags.
    Type,
    /// Segment id.
    Segment,
    /// Return intensity.
    Intensity,
}

impl Field {
    /// All fields in wire order.
    pub const ALL: [Field; 6] = [
        Field::X,
        Field::Y,
        Field::Z,
        Field::Type,
        Field::Segment,
        Field::Intensity,
    ];

    /// Width of the field in the canonical record, in bytes.
    pub fn byte_size(&self) -> u8 {
        match self {
            Self::X | Self::Y | Self::Z | Self::Type => 4,
            Self::Segment | Self::Intensity => 2,
        }
    }

    /// Position of the field in [`Field::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Field name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
            Self::Type => "type",
            Self::Segment => "segment",
            Self::Intensity => "intensity",
        }
    }

    /// Reinterpret the low `byte_size` bytes of `raw` as this field's value.
    ///
    /// Signed fields are sign-extended, `Type` is unsigned.
    pub fn from_raw(&self, raw: u32) -> i64 {
        match self {
            Self::X | Self::Y | Self::Z => raw as i32 as i64,
            Self::Type => raw as i64,
            Self::Segment | Self::Intensity => raw as u16 as i16 as i64,
        }
    }

    /// Two's complement bits of `value`, truncated to `byte_size` bytes.
    pub fn to_raw(&self, value: i64) -> u32 {
        match self {
            Self::Segment | Self::Intensity => value as u16 as u32,
            _ => value as u32,
        }
    }
}

/// A single range-scan sample.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointRecord {
    /// X coordinate in millimetres.
    pub x: i32,
    /// Y coordinate in millimetres.
    pub y: i32,
    /// Z coordinate in millimetres.
    pub z: i32,
    /// Type flags, see [`point_type`].
    pub point_type: u32,
    /// Segment id, 0 when unsegmented.
    pub segment: i16,
    /// Return intensity.
    pub intensity: i16,
}

impl PointRecord {
    /// Create a point record.
    pub const fn new(x: i32, y: i32, z: i32, point_type: u32, segment: i16, intensity: i16) -> Self {
        Self {
            x,
            y,
            z,
            point_type,
            segment,
            intensity,
        }
    }

    /// The all-zero invalid sample.
    pub const fn invalid() -> Self {
        Self::new(0, 0, 0, point_type::INVALID, 0, 0)
    }

    /// Placeholder standing for `run` consecutive invalid samples.
    pub const fn invalid_run(run: i32) -> Self {
        Self::new(0, 0, run, point_type::INVALID, 0, 0)
    }

    /// Check the INVALID flag.
    pub fn is_invalid(&self) -> bool {
        self.point_type & point_type::INVALID != 0
    }

    /// Check the MAX_RANGE flag.
    pub fn is_max_range(&self) -> bool {
        self.point_type & point_type::MAX_RANGE != 0
    }

    /// Check the REFLECTOR flag.
    pub fn is_reflector(&self) -> bool {
        self.point_type & point_type::REFLECTOR != 0
    }

    /// Semantic class (low two type bits).
    pub fn class(&self) -> u8 {
        (self.point_type & point_type::CLASS_MASK) as u8
    }

    /// Check whether this record has the shape of an invalid-run placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.x == 0 && self.y == 0 && self.point_type == point_type::INVALID
    }

    /// Value of `field`, widened without loss.
    pub fn get(&self, field: Field) -> i64 {
        match field {
            Field::X => self.x as i64,
            Field::Y => self.y as i64,
            Field::Z => self.z as i64,
            Field::Type => self.point_type as i64,
            Field::Segment => self.segment as i64,
            Field::Intensity => self.intensity as i64,
        }
    }

    /// Set `field`, truncating `value` to the field's width.
    pub fn set(&mut self, field: Field, value: i64) {
        match field {
            Field::X => self.x = value as i32,
            Field::Y => self.y = value as i32,
            Field::Z => self.z = value as i32,
            Field::Type => self.point_type = value as u32,
            Field::Segment => self.segment = value as i16,
            Field::Intensity => self.intensity = value as i16,
        }
    }

    /// Serialize to the canonical 20-byte form.
    pub fn to_bytes(&self) -> [u8; POINT_SIZE] {
        let mut out = [0u8; POINT_SIZE];
        out[0..4].copy_from_slice(&self.x.to_be_bytes());
        out[4..8].copy_from_slice(&self.y.to_be_bytes());
        out[8..12].copy_from_slice(&self.z.to_be_bytes());
        out[12..16].copy_from_slice(&self.point_type.to_be_bytes());
        out[16..18].copy_from_slice(&self.segment.to_be_bytes());
        out[18..20].copy_from_slice(&self.intensity.to_be_bytes());
        out
    }

    /// Parse the canonical 20-byte form.
    pub fn from_bytes(bytes: &[u8; POINT_SIZE]) -> Self {
        let word = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        Self {
            x: i32::from_be_bytes(word(0)),
            y: i32::from_be_bytes(word(4)),
            z: i32::from_be_bytes(word(8)),
            point_type: u32::from_be_bytes(word(12)),
            segment: i16::from_be_bytes([bytes[16], bytes[17]]),
            intensity: i16::from_be_bytes([bytes[18], bytes[19]]),
        }
    }
}

/// Serialize records to their canonical concatenated form.
pub fn points_to_bytes(points: &[PointRecord]) -> Vec<u8> {
    let mut out = Vec::with_capacity(points.len() * POINT_SIZE);
    for point in points {
        out.extend_from_slice(&point.to_bytes());
    }
    out
}

/// Parse concatenated canonical records.
///
/// Fails with `InvalidInput` when `data` is not a whole number of records.
pub fn points_from_bytes(data: &[u8]) -> Result<Vec<PointRecord>> {
    if data.len() % POINT_SIZE != 0 {
        return Err(ScanPackError::invalid_input(format!(
            "{} bytes is not a multiple of the {POINT_SIZE}-byte record size",
            data.len()
        )));
    }

    Ok(data
        .chunks_exact(POINT_SIZE)
        .map(|chunk| {
            let mut record = [0u8; POINT_SIZE];
            record.copy_from_slice(chunk);
            PointRecord::from_bytes(&record)
        })
        .collect())
}
