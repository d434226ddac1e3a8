//! Text cursor, glyph rendering and raw bitmap blits.

use crate::{
    font::Font,
    framebuffer::FrameBuffer,
    protocol::{HEIGHT, WIDTH},
};

/// Top-left position of the next glyph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TextCursor {
    /// Column, `0..=128`; 128 means the row is full.
    pub x: i32,
    /// Row of the glyph's top edge, `0..32`.
    pub y: i32,
}

impl TextCursor {
    /// Cursor at `x`, `y` as given.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cursor at `x`, `y` wrapped into the panel, column modulo 128 and row
    /// modulo 32.
    pub const fn wrapped(x: i32, y: i32) -> Self {
        Self {
            x: x.rem_euclid(WIDTH as i32),
            y: y.rem_euclid(HEIGHT as i32),
        }
    }

    /// Whether a glyph drawn here starts on the panel.
    pub fn is_on_panel(&self) -> bool {
        (0..WIDTH as i32).contains(&self.x) && (0..HEIGHT as i32).contains(&self.y)
    }

    /// Moves to column 0 of the next text line.
    ///
    /// Wraps to row 0 when the new row leaves no room below it for another
    /// line of `line_height` pixels, or when it is off the panel.
    pub fn new_line(&mut self, line_height: usize) {
        let line_height = i32::try_from(line_height).unwrap_or(i32::MAX);

        self.x = 0;
        self.y = self.y.saturating_add(line_height);
        if self.y < 0 || self.y >= (HEIGHT as i32).saturating_sub(line_height) {
            self.y = 0;
        }
    }
}

/// Caller-owned 1bpp bitmap, rows packed MSB first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bitmap<'a> {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Bytes per row.
    pub stride: usize,
    /// Packed rows, `stride` bytes each.
    pub data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Wraps caller-owned pixel data.
    pub const fn new(width: usize, height: usize, stride: usize, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Returns whether the pixel at `col`, `row` is set; bytes missing from
    /// `data` read as unset.
    pub fn bit(&self, col: usize, row: usize) -> bool {
        let index = self.stride * row + (col >> 3);
        self.data
            .get(index)
            .is_some_and(|bits| bits & (0x80 >> (col & 7)) != 0)
    }
}

impl FrameBuffer {
    /// Renders `c` at the cursor and advances it by the glyph's own width.
    ///
    /// If the cell would cross the right edge, or the cursor is off the panel,
    /// the cursor moves to the next line first. Returns `false`, leaving cursor
    /// and buffer alone, when the font has no glyph for `c`.
    pub fn draw_glyph(&mut self, cursor: &mut TextCursor, font: &Font<'_>, c: char) -> bool {
        let Some(glyph) = font.glyph(c) else {
            return false;
        };

        let width = glyph.width() as i32;
        if !cursor.is_on_panel() || cursor.x + width > WIDTH as i32 {
            cursor.new_line(glyph.height());
        }

        for row in 0..glyph.height() {
            for col in 0..glyph.width() {
                self.set_pixel(
                    cursor.x + col as i32,
                    cursor.y + row as i32,
                    glyph.bit(col, row),
                );
            }
        }

        cursor.x += glyph.advance() as i32;
        true
    }

    /// Copies `bitmap` with its top-left corner at `x`, `y`.
    ///
    /// Rows and columns reaching the right or bottom panel edge are cut off.
    pub fn blit(&mut self, bitmap: &Bitmap<'_>, x: i32, y: i32) {
        for row in 0..bitmap.height {
            let py = y.saturating_add(row as i32);
            if py >= HEIGHT as i32 {
                break;
            }

            for col in 0..bitmap.width {
                let px = x.saturating_add(col as i32);
                if px >= WIDTH as i32 {
                    break;
                }

                self.set_pixel(px, py, bitmap.bit(col, row));
            }
        }
    }
}
