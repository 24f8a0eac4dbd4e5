use std::path::{Path, PathBuf};

use super::{
    GlyphError, GlyphRecord, GlyphTable, GLYPH_CELL_SIZE, GLYPH_FILE_BYTES, GLYPH_PIXEL_BYTES,
    GLYPH_TABLE_SIZE,
};

/// Error returned by [`load_glyph_dir`] and [`LoadedFont::from_records`].
#[derive(Debug, thiserror::Error)]
pub enum GlyphLoadError {
    #[error("failed to list glyph directory '{path}'")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read glyph file '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glyph file '{path}' is {len} bytes, expected {GLYPH_FILE_BYTES}")]
    BadSize { path: PathBuf, len: usize },

    #[error("glyph code U+{0:04X} does not fit the {GLYPH_TABLE_SIZE}-entry table")]
    OutOfRange(u16),

    #[error("glyph code U+{0:04X} appears more than once")]
    Duplicate(u16),

    #[error("glyph U+{code:04X} has {len} pixel bytes, expected {GLYPH_PIXEL_BYTES}")]
    BadPixels { code: u16, len: usize },
}

/// Pixel data for the glyph texture array: one `64×64` RGBA8 layer per glyph,
/// stored back to back in slot order.
#[derive(Clone, Default, PartialEq)]
pub struct GlyphAtlas {
    pixels: Vec<u8>,
}

impl std::fmt::Debug for GlyphAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphAtlas").field("layers", &self.layer_count()).finish()
    }
}

impl GlyphAtlas {
    /// Side of one layer in texels.
    pub const LAYER_SIZE: u32 = GLYPH_CELL_SIZE;

    #[inline]
    pub fn layer_count(&self) -> u32 {
        (self.pixels.len() / GLYPH_PIXEL_BYTES) as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixels of layer `slot`, if present.
    pub fn layer(&self, slot: u32) -> Option<&[u8]> {
        let start = slot as usize * GLYPH_PIXEL_BYTES;
        self.pixels.get(start..start + GLYPH_PIXEL_BYTES)
    }

    /// All layers, contiguous, ready for a single texture upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn push_layer(&mut self, pixels: &[u8]) {
        debug_assert_eq!(pixels.len(), GLYPH_PIXEL_BYTES);
        self.pixels.extend_from_slice(pixels);
    }
}

/// Glyph table plus its atlas pixels.
#[derive(Debug, Clone, Default)]
pub struct LoadedFont {
    pub table: GlyphTable,
    pub atlas: GlyphAtlas,
}

impl LoadedFont {
    /// A font with no glyphs. Strings containing anything but spaces and
    /// newlines fail to draw with it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the table and atlas from decoded records.
    ///
    /// Records are sorted by character code before slots are handed out, so
    /// the code→slot mapping does not depend on input order: slot `i` holds the
    /// `i`-th smallest code.
    pub fn from_records(
        records: impl IntoIterator<Item = GlyphRecord>,
    ) -> Result<Self, GlyphLoadError> {
        let mut records: Vec<GlyphRecord> = records.into_iter().collect();
        records.sort_by_key(|r| r.code);

        if let Some(pair) = records.windows(2).find(|w| w[0].code == w[1].code) {
            return Err(GlyphLoadError::Duplicate(pair[0].code));
        }

        let mut font = LoadedFont::empty();
        for record in &records {
            if record.pixels.len() != GLYPH_PIXEL_BYTES {
                return Err(GlyphLoadError::BadPixels {
                    code: record.code,
                    len: record.pixels.len(),
                });
            }

            let slot = font.atlas.layer_count();
            font.table
                .insert(record.code as u32, record.glyph(slot))
                .map_err(|_: GlyphError| GlyphLoadError::OutOfRange(record.code))?;
            font.atlas.push_layer(&record.pixels);
        }

        Ok(font)
    }
}

/// Loads every regular file in `dir` as a glyph record.
///
/// Fail-fast: the first unreadable or malformed file aborts the load. Entries
/// that are not regular files (subdirectories, sockets) are skipped.
pub fn load_glyph_dir(dir: impl AsRef<Path>) -> Result<LoadedFont, GlyphLoadError> {
    let dir = dir.as_ref();

    let entries = std::fs::read_dir(dir).map_err(|source| GlyphLoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| GlyphLoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        let is_file = entry
            .file_type()
            .map_err(|source| GlyphLoadError::Read { path: path.clone(), source })?
            .is_file();
        if !is_file {
            log::debug!("skipping non-file glyph dir entry {}", path.display());
            continue;
        }

        let bytes =
            std::fs::read(&path).map_err(|source| GlyphLoadError::Read { path: path.clone(), source })?;
        if bytes.len() != GLYPH_FILE_BYTES {
            return Err(GlyphLoadError::BadSize { path, len: bytes.len() });
        }

        let record = GlyphRecord::parse(&bytes)
            .map_err(|source| GlyphLoadError::Read { path: path.clone(), source })?;
        records.push(record);
    }

    let font = LoadedFont::from_records(records)?;
    log::debug!(
        "loaded {} glyphs from {} (tallest box {})",
        font.table.len(),
        dir.display(),
        font.table.tallest()
    );
    Ok(font)
}
