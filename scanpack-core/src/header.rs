//! Stage header parsing and writing.
//!
//! Every stage payload is preceded by a fixed 14-byte header:
//!
//! ```text
//! +-------+-------+-------+-------+
//! | magic | flags | len_a | len_b |
//! |  2 B  |  u32  |  u32  |  u32  |
//! +-------+-------+-------+-------+
//! ```
//!
//! All integers are big-endian. The low byte of `flags` selects the stage's
//! algorithm; what `len_a` and `len_b` count depends on the stage.

use crate::bitstream::{BitReader, BitWriter};
use crate::error::{Result, ScanPackError};
use std::fmt;

/// Size of a stage header in bytes.
pub const HEADER_LEN: usize = 14;

/// Stage magic tags.
pub mod magic {
    /// Stage 1, point transform ("M1").
    pub const POINTS: [u8; 2] = *b"M1";
    /// Stage 2, byte compressor ("M2").
    pub const BYTES: [u8; 2] = *b"M2";
    /// Stage 3, entropy coder ("MC"), the outermost header.
    pub const ENTROPY: [u8; 2] = *b"MC";
}

/// Pipeline stage identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Stage 1: point record transform.
    Points,
    /// Stage 2: MTF / LZSS byte compression.
    Bytes,
    /// Stage 3: entropy coding.
    Entropy,
}

impl Stage {
    /// Magic tag that introduces this stage's header.
    pub fn magic(&self) -> [u8; 2] {
        match self {
            Self::Points => magic::POINTS,
            Self::Bytes => magic::BYTES,
            Self::Entropy => magic::ENTROPY,
        }
    }

    /// Stage number as used in documentation (1 is innermost).
    pub fn number(&self) -> u8 {
        match self {
            Self::Points => 1,
            Self::Bytes => 2,
            Self::Entropy => 3,
        }
    }

    /// Short stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Bytes => "bytes",
            Self::Entropy => "entropy",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {} ({})", self.number(), self.name())
    }
}

/// A parsed stage header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageHeader {
    /// Stage this header belongs to.
    pub stage: Stage,
    /// Algorithm selector and parameters.
    pub flags: u32,
    /// First length field (stage specific).
    pub len_a: u32,
    /// Second length field (stage specific).
    pub len_b: u32,
}

impl StageHeader {
    /// Create a header for `stage`.
    pub fn new(stage: Stage, flags: u32, len_a: u32, len_b: u32) -> Self {
        Self {
            stage,
            flags,
            len_a,
            len_b,
        }
    }

    /// Algorithm selector (low byte of `flags`).
    pub fn selector(&self) -> u8 {
        (self.flags & 0xFF) as u8
    }

    /// Write the header to a bit writer.
    pub fn write(&self, writer: &mut BitWriter) -> Result<()> {
        let [m0, m1] = self.stage.magic();
        writer.write_u8(m0);
        writer.write_u8(m1);
        writer.write_bytes(self.flags, 4)?;
        writer.write_bytes(self.len_a, 4)?;
        writer.write_bytes(self.len_b, 4)?;
        Ok(())
    }

    /// Serialize the header into its 14-byte wire form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..2].copy_from_slice(&self.stage.magic());
        out[2..6].copy_from_slice(&self.flags.to_be_bytes());
        out[6..10].copy_from_slice(&self.len_a.to_be_bytes());
        out[10..14].copy_from_slice(&self.len_b.to_be_bytes());
        out
    }

    /// Read a header for `stage`, checking its magic tag.
    pub fn read(reader: &mut BitReader<'_>, stage: Stage) -> Result<Self> {
        let expected = stage.magic();
        let available = reader.remaining_bytes().min(2);
        let found = reader.read_slice(available)?;
        if found != expected.as_slice() {
            return Err(ScanPackError::bad_magic(expected, found));
        }

        let flags = reader.read_bytes(4)?;
        let len_a = reader.read_bytes(4)?;
        let len_b = reader.read_bytes(4)?;
        Ok(Self::new(stage, flags, len_a, len_b))
    }

    /// Parse a header from the front of `data`, returning it and the bytes
    /// that follow.
    pub fn parse(data: &[u8], stage: Stage) -> Result<(Self, &[u8])> {
        let mut reader = BitReader::new(data);
        let header = Self::read(&mut reader, stage)?;
        Ok((header, &data[reader.position()..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = StageHeader::new(Stage::Bytes, 0x0604_0021, 0, 0x1234);
        let bytes = header.to_bytes();
        assert_eq!(
            bytes,
            [
                b'M', b'2', 0x06, 0x04, 0x00, 0x21, 0, 0, 0, 0, 0x00, 0x00, 0x12, 0x34
            ]
        );

        let mut writer = BitWriter::new();
        header.write(&mut writer).unwrap();
        assert_eq!(writer.as_slice(), &bytes);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = StageHeader::new(Stage::Points, 0x0100_0001, 140, 60);
        let mut data = header.to_bytes().to_vec();
        data.extend_from_slice(b"payload");

        let (parsed, rest) = StageHeader::parse(&data, Stage::Points).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.selector(), 0x01);
        assert_eq!(rest, b"payload");
    }

    #[test]
    fn test_header_bad_magic() {
        let header = StageHeader::new(Stage::Bytes, 0, 0, 0);
        let err = StageHeader::parse(&header.to_bytes(), Stage::Entropy).unwrap_err();
        assert_eq!(err, ScanPackError::bad_magic(*b"MC", b"M2".to_vec()));
    }

    #[test]
    fn test_header_short_input() {
        assert!(matches!(
            StageHeader::parse(b"M", Stage::Points),
            Err(ScanPackError::BadMagic { .. })
        ));
        assert!(matches!(
            StageHeader::parse(b"M1\x00\x00", Stage::Points),
            Err(ScanPackError::OutOfData { .. })
        ));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Points.to_string(), "stage 1 (points)");
        assert_eq!(Stage::Entropy.magic(), *b"MC");
    }
}
