use std::io::{self, Read, Write};

use glam::Vec2;

/// Side of one glyph cell in texels (cells are square).
pub const GLYPH_CELL_SIZE: u32 = 64;

/// Texels between the cell's left/bottom edge and the pen origin, baked in by
/// the offline generator's translate step.
pub const GLYPH_CELL_PADDING: f32 = 10.0;

/// RGBA8 pixel block size per glyph.
pub const GLYPH_PIXEL_BYTES: usize = (GLYPH_CELL_SIZE * GLYPH_CELL_SIZE * 4) as usize;

/// Header: u16 code + five f32 metrics.
pub const GLYPH_HEADER_BYTES: usize = 2 + 5 * 4;

/// Total size of one glyph file.
pub const GLYPH_FILE_BYTES: usize = GLYPH_HEADER_BYTES + GLYPH_PIXEL_BYTES;

/// Metrics of one loaded glyph.
///
/// `slot` is the layer of the glyph atlas holding the glyph's bitmap.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    pub slot: u32,
    /// Horizontal pen advance in texels at scale 1.
    pub advance: f32,
    /// Offset from the pen position to the glyph box.
    pub bearing: Vec2,
    /// Glyph box size.
    pub size: Vec2,
}

/// One decoded glyph file.
///
/// Layout (little-endian, 16406 bytes, no version tag):
///
/// ```text
/// offset  size   field
/// 0       2      character code (UTF-16 code unit)
/// 2       4      advance (f32)
/// 6       4      bearing.x (f32)
/// 10      4      bearing.y (f32)
/// 14      4      box width (f32)
/// 18      4      box height (f32)
/// 22      16384  RGBA8 pixels, 64x64, row-major
/// ```
#[derive(Clone, PartialEq)]
pub struct GlyphRecord {
    pub code: u16,
    pub advance: f32,
    pub bearing: Vec2,
    pub size: Vec2,
    /// Exactly `GLYPH_PIXEL_BYTES` bytes.
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for GlyphRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRecord")
            .field("code", &self.code)
            .field("advance", &self.advance)
            .field("bearing", &self.bearing)
            .field("size", &self.size)
            .field("pixels", &format_args!("[{} bytes]", self.pixels.len()))
            .finish()
    }
}

impl GlyphRecord {
    /// Reads one record. A short read surfaces as `UnexpectedEof`.
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut header = [0u8; GLYPH_HEADER_BYTES];
        reader.read_exact(&mut header)?;

        let code = u16::from_le_bytes([header[0], header[1]]);
        let f = |at: usize| {
            f32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };

        let mut pixels = vec![0u8; GLYPH_PIXEL_BYTES];
        reader.read_exact(&mut pixels)?;

        Ok(Self {
            code,
            advance: f(2),
            bearing: Vec2::new(f(6), f(10)),
            size: Vec2::new(f(14), f(18)),
            pixels,
        })
    }

    /// Decodes a whole file. Anything other than exactly `GLYPH_FILE_BYTES` is
    /// rejected with `InvalidData`.
    pub fn parse(bytes: &[u8]) -> io::Result<Self> {
        if bytes.len() != GLYPH_FILE_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("glyph file is {} bytes, expected {GLYPH_FILE_BYTES}", bytes.len()),
            ));
        }
        Self::read_from(&mut &bytes[..])
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        if self.pixels.len() != GLYPH_PIXEL_BYTES {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("glyph pixels are {} bytes, expected {GLYPH_PIXEL_BYTES}", self.pixels.len()),
            ));
        }

        writer.write_all(&self.code.to_le_bytes())?;
        for v in [self.advance, self.bearing.x, self.bearing.y, self.size.x, self.size.y] {
            writer.write_all(&v.to_le_bytes())?;
        }
        writer.write_all(&self.pixels)
    }

    /// Encodes the record into a fresh buffer.
    pub fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let mut out = Vec::with_capacity(GLYPH_FILE_BYTES);
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Metrics for this record once assigned to atlas layer `slot`.
    #[inline]
    pub fn glyph(&self, slot: u32) -> Glyph {
        Glyph {
            slot,
            advance: self.advance,
            bearing: self.bearing,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: u16) -> GlyphRecord {
        GlyphRecord {
            code,
            advance: 31.5,
            bearing: Vec2::new(2.0, 40.0),
            size: Vec2::new(28.0, 44.0),
            pixels: (0..GLYPH_PIXEL_BYTES).map(|i| (i % 251) as u8).collect(),
        }
    }

    #[test]
    fn file_size_matches_format() {
        assert_eq!(GLYPH_FILE_BYTES, 16406);
        assert_eq!(record(65).to_bytes().unwrap().len(), GLYPH_FILE_BYTES);
    }

    #[test]
    fn header_fields_sit_at_documented_offsets() {
        let bytes = record(0x41).to_bytes().unwrap();
        assert_eq!(&bytes[0..2], &[0x41, 0x00]);
        assert_eq!(&bytes[2..6], &31.5f32.to_le_bytes());
        assert_eq!(&bytes[10..14], &40.0f32.to_le_bytes());
        assert_eq!(&bytes[18..22], &44.0f32.to_le_bytes());
        assert_eq!(bytes[22], 0);
        assert_eq!(bytes[23], 1);
    }

    #[test]
    fn parse_decodes_written_record() {
        let written = record(0x67);
        let parsed = GlyphRecord::parse(&written.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, written);
    }

    #[test]
    fn parse_rejects_truncated_file() {
        let bytes = record(65).to_bytes().unwrap();
        let err = GlyphRecord::parse(&bytes[..GLYPH_FILE_BYTES - 1]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn parse_rejects_trailing_bytes() {
        let mut bytes = record(65).to_bytes().unwrap();
        bytes.push(0);
        assert!(GlyphRecord::parse(&bytes).is_err());
    }

    #[test]
    fn read_from_reports_eof_on_short_stream() {
        let bytes = record(65).to_bytes().unwrap();
        let err = GlyphRecord::read_from(&mut &bytes[..100]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn write_rejects_wrong_pixel_block() {
        let mut r = record(65);
        r.pixels.truncate(10);
        assert!(r.to_bytes().is_err());
    }
}
