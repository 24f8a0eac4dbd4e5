//! Pre-baked distance-field glyphs: file format, lookup table, directory loader
//! and string layout.
//!
//! Glyphs are baked offline into one fixed-size file per character (see
//! [`GlyphRecord`]). At startup the renderer loads a directory of them into a
//! [`GlyphTable`] plus a [`GlyphAtlas`] (one 64×64 RGBA layer per glyph).

mod glyph;
mod layout;
mod loader;
mod table;

pub use glyph::{
    Glyph, GlyphRecord, GLYPH_CELL_PADDING, GLYPH_CELL_SIZE, GLYPH_FILE_BYTES, GLYPH_HEADER_BYTES,
    GLYPH_PIXEL_BYTES,
};
pub use layout::{layout_text, GlyphCell, TextLayout, YAxis, DEFAULT_SPACE_ADVANCE};
pub use loader::{load_glyph_dir, GlyphAtlas, GlyphLoadError, LoadedFont};
pub use table::{GlyphError, GlyphTable, GLYPH_TABLE_SIZE, ROW_PADDING};
