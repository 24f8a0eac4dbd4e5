use super::Glyph;

/// Number of character codes the table can hold (`0..=255`).
pub const GLYPH_TABLE_SIZE: usize = 256;

/// Gap added below the tallest glyph box to form one text row, in texels.
pub const ROW_PADDING: f32 = 5.0;

/// Failed glyph lookup.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GlyphError {
    /// The code is outside the table or was never loaded.
    #[error("unsupported glyph U+{0:04X}")]
    Unsupported(u32),
}

/// Fixed 256-entry glyph lookup indexed by character code.
///
/// Built once by the loader and read-only afterwards.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    entries: Box<[Option<Glyph>; GLYPH_TABLE_SIZE]>,
    len: usize,
    tallest: f32,
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphTable {
    pub fn new() -> Self {
        Self {
            entries: Box::new([None; GLYPH_TABLE_SIZE]),
            len: 0,
            tallest: 0.0,
        }
    }

    /// Inserts or replaces the glyph for `code`.
    ///
    /// Returns the previous entry. Codes `>= 256` are rejected.
    pub(crate) fn insert(&mut self, code: u32, glyph: Glyph) -> Result<Option<Glyph>, GlyphError> {
        let slot = self
            .entries
            .get_mut(code as usize)
            .ok_or(GlyphError::Unsupported(code))?;

        let previous = slot.replace(glyph);
        if previous.is_none() {
            self.len += 1;
        }
        self.tallest = self.iter().map(|(_, g)| g.size.y).fold(0.0, f32::max);
        Ok(previous)
    }

    /// Looks up a character.
    #[inline]
    pub fn get(&self, ch: char) -> Result<Glyph, GlyphError> {
        self.get_code(ch as u32)
    }

    /// Looks up a raw character code.
    #[inline]
    pub fn get_code(&self, code: u32) -> Result<Glyph, GlyphError> {
        self.entries
            .get(code as usize)
            .copied()
            .flatten()
            .ok_or(GlyphError::Unsupported(code))
    }

    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        self.get(ch).is_ok()
    }

    /// Number of populated entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates populated entries as `(code, glyph)` in code order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Glyph)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(code, g)| g.map(|g| (code as u32, g)))
    }

    /// Height of the tallest glyph box.
    #[inline]
    pub fn tallest(&self) -> f32 {
        self.tallest
    }

    /// Distance between two baselines at `scale`.
    #[inline]
    pub fn row_height(&self, scale: f32) -> f32 {
        (self.tallest + ROW_PADDING) * scale
    }
}
