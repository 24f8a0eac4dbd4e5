use glam::Vec2;

use super::{GlyphError, GlyphTable, GLYPH_CELL_PADDING, GLYPH_CELL_SIZE};

/// Pen advance for a space when the font has no space glyph, in texels.
pub const DEFAULT_SPACE_ADVANCE: f32 = 10.0;

/// Direction of world +Y as seen by the camera the text is drawn with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum YAxis {
    /// +Y points up the screen; new lines move the pen towards -Y.
    #[default]
    Up,
    /// +Y points down the screen (top-left origin cameras). The text block
    /// hangs below the anchor and new lines move the pen towards +Y.
    Down,
}

/// One glyph cell to draw as a corner-anchored quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlyphCell {
    /// Corner the quad grows from (towards +X and +Y).
    pub origin: Vec2,
    /// Side of the square cell in world units.
    pub side: f32,
    /// Atlas layer.
    pub slot: u32,
}

/// Laid-out string: cells in submission order plus the measured block size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub cells: Vec<GlyphCell>,
    /// `(widest line advance, row height * line count)`.
    pub size: Vec2,
}

/// Lays out `text` with its first baseline starting at `origin`.
///
/// - `\n` returns the pen to `origin.x` and moves it one row along the reading
///   direction.
/// - Spaces advance the pen and emit nothing.
/// - Every other character must be in `table`; the first that is not fails the
///   whole layout, so callers never draw half a string.
///
/// Each cell is a `GLYPH_CELL_SIZE`² square whose `-Y` corner sits
/// `GLYPH_CELL_PADDING` before the pen on both axes, moved by the amount a
/// glyph's box is shorter than its bearing. With [`YAxis::Up`] the baked pen
/// origin lands on the pen; with [`YAxis::Down`] the same anchor puts the first
/// baseline roughly one row below `origin`, inside the measured height.
pub fn layout_text(
    table: &GlyphTable,
    text: &str,
    origin: Vec2,
    scale: f32,
    y_axis: YAxis,
) -> Result<TextLayout, GlyphError> {
    let row = table.row_height(scale);
    let side = GLYPH_CELL_SIZE as f32 * scale;
    let pad = GLYPH_CELL_PADDING * scale;

    let mut cells = Vec::with_capacity(text.len());
    let mut pen = origin;
    let mut line_width = 0.0f32;
    let mut width = 0.0f32;
    let mut lines = 1u32;

    for ch in text.chars() {
        match ch {
            '\n' => {
                width = width.max(line_width);
                line_width = 0.0;
                lines += 1;
                pen.x = origin.x;
                pen.y += match y_axis {
                    YAxis::Up => -row,
                    YAxis::Down => row,
                };
            }
            ' ' => {
                let advance = table
                    .get(' ')
                    .map_or(DEFAULT_SPACE_ADVANCE, |g| g.advance)
                    * scale;
                pen.x += advance;
                line_width += advance;
            }
            _ => {
                let glyph = table.get(ch)?;

                // Negative when the box is shorter than its bearing, zero otherwise.
                let descent = (glyph.size.y - glyph.bearing.y).min(0.0) * scale;

                cells.push(GlyphCell {
                    origin: Vec2::new(pen.x - pad, pen.y - pad - descent),
                    side,
                    slot: glyph.slot,
                });

                let advance = glyph.advance * scale;
                pen.x += advance;
                line_width += advance;
            }
        }
    }

    width = width.max(line_width);

    Ok(TextLayout {
        cells,
        size: Vec2::new(width, row * lines as f32),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Glyph;

    fn table() -> GlyphTable {
        let mut t = GlyphTable::new();
        let g = |slot: u32, advance: f32, by: f32, h: f32| Glyph {
            slot,
            advance,
            bearing: Vec2::new(1.0, by),
            size: Vec2::new(advance - 2.0, h),
        };
        t.insert('A' as u32, g(0, 30.0, 40.0, 40.0)).unwrap();
        t.insert('B' as u32, g(1, 28.0, 40.0, 40.0)).unwrap();
        // Descender: box taller than its bearing.
        t.insert('g' as u32, g(2, 24.0, 28.0, 36.0)).unwrap();
        t
    }

    // ── measurement ──────────────────────────────────────────────────────

    #[test]
    fn single_glyph_measures_advance_by_row() {
        let t = table();
        let l = layout_text(&t, "A", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        assert_eq!(l.size, Vec2::new(30.0, t.row_height(1.0)));
        assert_eq!(l.cells.len(), 1);
    }

    #[test]
    fn measurement_scales() {
        let t = table();
        let l = layout_text(&t, "A", Vec2::ZERO, 2.5, YAxis::Up).unwrap();
        assert_eq!(l.size, Vec2::new(75.0, t.row_height(2.5)));
    }

    #[test]
    fn empty_string_is_one_empty_row() {
        let t = table();
        let l = layout_text(&t, "", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        assert_eq!(l.size, Vec2::new(0.0, t.row_height(1.0)));
        assert!(l.cells.is_empty());
    }

    #[test]
    fn width_is_widest_line() {
        let t = table();
        let l = layout_text(&t, "AB\nA", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        assert_eq!(l.size.x, 58.0);
        assert_eq!(l.size.y, 2.0 * t.row_height(1.0));
    }

    #[test]
    fn spaces_advance_without_cells() {
        let t = table();
        let l = layout_text(&t, "A A", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        assert_eq!(l.cells.len(), 2);
        assert_eq!(l.size.x, 60.0 + DEFAULT_SPACE_ADVANCE);
        assert_eq!(l.cells[1].origin.x - l.cells[0].origin.x, 30.0 + DEFAULT_SPACE_ADVANCE);
    }

    #[test]
    fn space_glyph_advance_wins_over_default() {
        let mut t = table();
        t.insert(' ' as u32, Glyph { slot: 3, advance: 16.0, bearing: Vec2::ZERO, size: Vec2::ZERO })
            .unwrap();
        let l = layout_text(&t, " ", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        assert_eq!(l.size.x, 16.0);
        assert!(l.cells.is_empty());
    }

    // ── placement ────────────────────────────────────────────────────────

    #[test]
    fn cells_are_offset_by_padding() {
        let t = table();
        let l = layout_text(&t, "A", Vec2::new(100.0, 200.0), 1.0, YAxis::Up).unwrap();
        let c = l.cells[0];
        assert_eq!(c.origin, Vec2::new(100.0 - GLYPH_CELL_PADDING, 200.0 - GLYPH_CELL_PADDING));
        assert_eq!(c.side, GLYPH_CELL_SIZE as f32);
        assert_eq!(c.slot, 0);
    }

    #[test]
    fn boxes_shorter_than_bearing_raise_the_cell() {
        let t = table();
        let l = layout_text(&t, "Ag", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        // 'g' has size.y - bearing.y = 8, so its cell is not shifted down.
        assert_eq!(l.cells[0].origin.y, l.cells[1].origin.y);

        let mut t2 = table();
        t2.insert('q' as u32, Glyph { slot: 4, advance: 20.0, bearing: Vec2::new(0.0, 40.0), size: Vec2::new(18.0, 30.0) })
            .unwrap();
        let l2 = layout_text(&t2, "q", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        // size.y - bearing.y = -10 raises the cell by 10.
        assert_eq!(l2.cells[0].origin.y, -GLYPH_CELL_PADDING + 10.0);
    }

    #[test]
    fn newline_moves_down_the_screen_for_both_axes() {
        let t = table();
        let row = t.row_height(1.0);

        let up = layout_text(&t, "A\nA", Vec2::ZERO, 1.0, YAxis::Up).unwrap();
        assert_eq!(up.cells[1].origin.y - up.cells[0].origin.y, -row);
        assert_eq!(up.cells[1].origin.x, up.cells[0].origin.x);

        let down = layout_text(&t, "A\nA", Vec2::ZERO, 1.0, YAxis::Down).unwrap();
        assert_eq!(down.cells[1].origin.y - down.cells[0].origin.y, row);
    }

    #[test]
    fn y_down_cells_share_the_y_up_anchor() {
        let t = table();
        let up = layout_text(&t, "Ag", Vec2::new(5.0, 100.0), 1.0, YAxis::Up).unwrap();
        let down = layout_text(&t, "Ag", Vec2::new(5.0, 100.0), 1.0, YAxis::Down).unwrap();
        assert_eq!(up.cells, down.cells);
    }

    #[test]
    fn y_down_block_hangs_below_the_anchor() {
        let t = table();
        let row = t.row_height(1.0);
        let l = layout_text(&t, "A\nA", Vec2::ZERO, 1.0, YAxis::Down).unwrap();

        let ys: Vec<f32> = l.cells.iter().map(|c| c.origin.y).collect();
        assert_eq!(ys, vec![-GLYPH_CELL_PADDING, row - GLYPH_CELL_PADDING]);

        // Every baked baseline (padding above the cell's +Y edge) lies in the
        // measured block.
        for c in &l.cells {
            let baseline = c.origin.y + c.side - GLYPH_CELL_PADDING;
            assert!(baseline > 0.0 && baseline <= l.size.y, "baseline {baseline} outside 0..={}", l.size.y);
        }
    }

    // ── failures ─────────────────────────────────────────────────────────

    #[test]
    fn unknown_glyph_fails_whole_layout() {
        let t = table();
        assert_eq!(
            layout_text(&t, "AZ", Vec2::ZERO, 1.0, YAxis::Up),
            Err(GlyphError::Unsupported('Z' as u32))
        );
    }

    #[test]
    fn codes_beyond_256_are_unsupported() {
        let t = table();
        assert_eq!(
            layout_text(&t, "A→", Vec2::ZERO, 1.0, YAxis::Up),
            Err(GlyphError::Unsupported(0x2192))
        );
    }
}
