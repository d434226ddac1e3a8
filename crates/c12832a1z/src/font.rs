//! Borrowed views over bitmap font tables.
//!
//! A table starts with `[bytes_per_glyph, glyph_width, glyph_height,
//! bytes_per_line]` and continues with one record per character code from 32
//! upwards. Each record is `[advance, column bytes...]`; column `c` of a glyph
//! starts at record offset `1 + c * bytes_per_line` and bit `row % 8` of byte
//! `row / 8` holds the pixel.

/// Header length in bytes.
pub const HEADER_LEN: usize = 4;
/// First character code with a record.
pub const FIRST_CODE: u32 = 32;
/// One past the last character code that may have a record.
pub const END_CODE: u32 = 128;

/// Font table view. The table is borrowed, never copied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Font<'a> {
    table: &'a [u8],
}

impl<'a> Font<'a> {
    /// Wraps a font table.
    ///
    /// Returns `None` when the header is missing, has a zero field, or
    /// describes records too small for their columns.
    pub const fn new(table: &'a [u8]) -> Option<Self> {
        if table.len() < HEADER_LEN {
            return None;
        }

        let (per_glyph, width, height, per_line) = (
            table[0] as usize,
            table[1] as usize,
            table[2] as usize,
            table[3] as usize,
        );
        if per_glyph == 0 || width == 0 || height == 0 || per_line == 0 {
            return None;
        }
        if per_line * 8 < height || per_glyph < 1 + width * per_line {
            return None;
        }

        Some(Self { table })
    }

    /// Raw table bytes.
    pub fn table(&self) -> &'a [u8] {
        self.table
    }

    /// Stride between glyph records, advance byte included.
    pub fn bytes_per_glyph(&self) -> usize {
        self.table[0] as usize
    }

    /// Nominal cell width in pixels.
    pub fn glyph_width(&self) -> usize {
        self.table[1] as usize
    }

    /// Cell height in pixels; also the line advance.
    pub fn glyph_height(&self) -> usize {
        self.table[2] as usize
    }

    /// Bytes per glyph column.
    pub fn bytes_per_line(&self) -> usize {
        self.table[3] as usize
    }

    /// Looks up the record for `c`.
    ///
    /// Codes outside `32..128` and codes past the end of a short table have no
    /// glyph.
    pub fn glyph(&self, c: char) -> Option<Glyph<'a>> {
        let code = c as u32;
        if !(FIRST_CODE..END_CODE).contains(&code) {
            return None;
        }

        let per_glyph = self.bytes_per_glyph();
        let start = (code - FIRST_CODE) as usize * per_glyph + HEADER_LEN;
        let record = self.table.get(start..start + per_glyph)?;

        Some(Glyph {
            record,
            width: self.glyph_width(),
            height: self.glyph_height(),
            bytes_per_line: self.bytes_per_line(),
        })
    }
}

impl Default for Font<'static> {
    fn default() -> Self {
        SMALL_6X8
    }
}

/// One glyph record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Glyph<'a> {
    record: &'a [u8],
    width: usize,
    height: usize,
    bytes_per_line: usize,
}

impl Glyph<'_> {
    /// Horizontal cursor advance, which may be narrower than the cell.
    pub fn advance(&self) -> usize {
        self.record[0] as usize
    }

    /// Cell width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Cell height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the pixel at `col`, `row` of the cell is set.
    pub fn bit(&self, col: usize, row: usize) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }

        let index = self.bytes_per_line * col + (row >> 3) + 1;
        self.record
            .get(index)
            .is_some_and(|bits| bits & (1 << (row & 7)) != 0)
    }
}

/// Built-in font used until another one is selected.
pub const SMALL_6X8: Font<'static> = match Font::new(&SMALL_6X8_TABLE) {
    Some(font) => font,
    None => panic!("malformed built-in font"),
};

/// Default 6x8 proportional ASCII font, codes 32..=127.
///
/// Header `[7, 6, 8, 1]`: seven bytes per record, six columns, eight rows,
/// one byte per column.
pub const SMALL_6X8_TABLE: [u8; 4 + 96 * 7] = [
    7, 6, 8, 1,
    3, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // space
    4, 0x00, 0x00, 0x5F, 0x00, 0x00, 0x00, // '!'
    5, 0x00, 0x07, 0x00, 0x07, 0x00, 0x00, // '"'
    6, 0x14, 0x7F, 0x14, 0x7F, 0x14, 0x00, // '#'
    6, 0x24, 0x2A, 0x7F, 0x2A, 0x12, 0x00, // '$'
    6, 0x23, 0x13, 0x08, 0x64, 0x62, 0x00, // '%'
    6, 0x36, 0x49, 0x55, 0x22, 0x50, 0x00, // '&'
    4, 0x00, 0x05, 0x03, 0x00, 0x00, 0x00, // "'"
    5, 0x00, 0x1C, 0x22, 0x41, 0x00, 0x00, // '('
    5, 0x00, 0x41, 0x22, 0x1C, 0x00, 0x00, // ')'
    6, 0x08, 0x2A, 0x1C, 0x2A, 0x08, 0x00, // '*'
    6, 0x08, 0x08, 0x3E, 0x08, 0x08, 0x00, // '+'
    4, 0x00, 0x50, 0x30, 0x00, 0x00, 0x00, // ','
    6, 0x08, 0x08, 0x08, 0x08, 0x08, 0x00, // '-'
    4, 0x00, 0x60, 0x60, 0x00, 0x00, 0x00, // '.'
    6, 0x20, 0x10, 0x08, 0x04, 0x02, 0x00, // '/'
    6, 0x3E, 0x51, 0x49, 0x45, 0x3E, 0x00, // '0'
    5, 0x00, 0x42, 0x7F, 0x40, 0x00, 0x00, // '1'
    6, 0x42, 0x61, 0x51, 0x49, 0x46, 0x00, // '2'
    6, 0x21, 0x41, 0x45, 0x4B, 0x31, 0x00, // '3'
    6, 0x18, 0x14, 0x12, 0x7F, 0x10, 0x00, // '4'
    6, 0x27, 0x45, 0x45, 0x45, 0x39, 0x00, // '5'
    6, 0x3C, 0x4A, 0x49, 0x49, 0x30, 0x00, // '6'
    6, 0x01, 0x71, 0x09, 0x05, 0x03, 0x00, // '7'
    6, 0x36, 0x49, 0x49, 0x49, 0x36, 0x00, // '8'
    6, 0x06, 0x49, 0x49, 0x29, 0x1E, 0x00, // '9'
    4, 0x00, 0x36, 0x36, 0x00, 0x00, 0x00, // ':'
    4, 0x00, 0x56, 0x36, 0x00, 0x00, 0x00, // ';'
    5, 0x08, 0x14, 0x22, 0x41, 0x00, 0x00, // '<'
    6, 0x14, 0x14, 0x14, 0x14, 0x14, 0x00, // '='
    6, 0x00, 0x41, 0x22, 0x14, 0x08, 0x00, // '>'
    6, 0x02, 0x01, 0x51, 0x09, 0x06, 0x00, // '?'
    6, 0x32, 0x49, 0x79, 0x41, 0x3E, 0x00, // '@'
    6, 0x7E, 0x11, 0x11, 0x11, 0x7E, 0x00, // 'A'
    6, 0x7F, 0x49, 0x49, 0x49, 0x36, 0x00, // 'B'
    6, 0x3E, 0x41, 0x41, 0x41, 0x22, 0x00, // 'C'
    6, 0x7F, 0x41, 0x41, 0x22, 0x1C, 0x00, // 'D'
    6, 0x7F, 0x49, 0x49, 0x49, 0x41, 0x00, // 'E'
    6, 0x7F, 0x09, 0x09, 0x09, 0x01, 0x00, // 'F'
    6, 0x3E, 0x41, 0x49, 0x49, 0x7A, 0x00, // 'G'
    6, 0x7F, 0x08, 0x08, 0x08, 0x7F, 0x00, // 'H'
    5, 0x00, 0x41, 0x7F, 0x41, 0x00, 0x00, // 'I'
    6, 0x20, 0x40, 0x41, 0x3F, 0x01, 0x00, // 'J'
    6, 0x7F, 0x08, 0x14, 0x22, 0x41, 0x00, // 'K'
    6, 0x7F, 0x40, 0x40, 0x40, 0x40, 0x00, // 'L'
    6, 0x7F, 0x02, 0x0C, 0x02, 0x7F, 0x00, // 'M'
    6, 0x7F, 0x04, 0x08, 0x10, 0x7F, 0x00, // 'N'
    6, 0x3E, 0x41, 0x41, 0x41, 0x3E, 0x00, // 'O'
    6, 0x7F, 0x09, 0x09, 0x09, 0x06, 0x00, // 'P'
    6, 0x3E, 0x41, 0x51, 0x21, 0x5E, 0x00, // 'Q'
    6, 0x7F, 0x09, 0x19, 0x29, 0x46, 0x00, // 'R'
    6, 0x46, 0x49, 0x49, 0x49, 0x31, 0x00, // 'S'
    6, 0x01, 0x01, 0x7F, 0x01, 0x01, 0x00, // 'T'
    6, 0x3F, 0x40, 0x40, 0x40, 0x3F, 0x00, // 'U'
    6, 0x1F, 0x20, 0x40, 0x20, 0x1F, 0x00, // 'V'
    6, 0x7F, 0x20, 0x18, 0x20, 0x7F, 0x00, // 'W'
    6, 0x63, 0x14, 0x08, 0x14, 0x63, 0x00, // 'X'
    6, 0x03, 0x04, 0x78, 0x04, 0x03, 0x00, // 'Y'
    6, 0x61, 0x51, 0x49, 0x45, 0x43, 0x00, // 'Z'
    5, 0x00, 0x7F, 0x41, 0x41, 0x00, 0x00, // '['
    6, 0x02, 0x04, 0x08, 0x10, 0x20, 0x00, // '\\'
    5, 0x00, 0x41, 0x41, 0x7F, 0x00, 0x00, // ']'
    6, 0x04, 0x02, 0x01, 0x02, 0x04, 0x00, // '^'
    6, 0x40, 0x40, 0x40, 0x40, 0x40, 0x00, // '_'
    5, 0x00, 0x01, 0x02, 0x04, 0x00, 0x00, // '`'
    6, 0x20, 0x54, 0x54, 0x54, 0x78, 0x00, // 'a'
    6, 0x7F, 0x48, 0x44, 0x44, 0x38, 0x00, // 'b'
    6, 0x38, 0x44, 0x44, 0x44, 0x20, 0x00, // 'c'
    6, 0x38, 0x44, 0x44, 0x48, 0x7F, 0x00, // 'd'
    6, 0x38, 0x54, 0x54, 0x54, 0x18, 0x00, // 'e'
    6, 0x08, 0x7E, 0x09, 0x01, 0x02, 0x00, // 'f'
    6, 0x08, 0x14, 0x54, 0x54, 0x3C, 0x00, // 'g'
    6, 0x7F, 0x08, 0x04, 0x04, 0x78, 0x00, // 'h'
    5, 0x00, 0x44, 0x7D, 0x40, 0x00, 0x00, // 'i'
    5, 0x20, 0x40, 0x44, 0x3D, 0x00, 0x00, // 'j'
    5, 0x7F, 0x10, 0x28, 0x44, 0x00, 0x00, // 'k'
    5, 0x00, 0x41, 0x7F, 0x40, 0x00, 0x00, // 'l'
    6, 0x7C, 0x04, 0x18, 0x04, 0x78, 0x00, // 'm'
    6, 0x7C, 0x08, 0x04, 0x04, 0x78, 0x00, // 'n'
    6, 0x38, 0x44, 0x44, 0x44, 0x38, 0x00, // 'o'
    6, 0x7C, 0x14, 0x14, 0x14, 0x08, 0x00, // 'p'
    6, 0x08, 0x14, 0x14, 0x18, 0x7C, 0x00, // 'q'
    6, 0x7C, 0x08, 0x04, 0x04, 0x08, 0x00, // 'r'
    6, 0x48, 0x54, 0x54, 0x54, 0x20, 0x00, // 's'
    6, 0x04, 0x3F, 0x44, 0x40, 0x20, 0x00, // 't'
    6, 0x3C, 0x40, 0x40, 0x20, 0x7C, 0x00, // 'u'
    6, 0x1C, 0x20, 0x40, 0x20, 0x1C, 0x00, // 'v'
    6, 0x3C, 0x40, 0x30, 0x40, 0x3C, 0x00, // 'w'
    6, 0x44, 0x28, 0x10, 0x28, 0x44, 0x00, // 'x'
    6, 0x0C, 0x50, 0x50, 0x50, 0x3C, 0x00, // 'y'
    6, 0x44, 0x64, 0x54, 0x4C, 0x44, 0x00, // 'z'
    5, 0x00, 0x08, 0x36, 0x41, 0x00, 0x00, // '{'
    4, 0x00, 0x00, 0x7F, 0x00, 0x00, 0x00, // '|'
    5, 0x00, 0x41, 0x36, 0x08, 0x00, 0x00, // '}'
    6, 0x08, 0x04, 0x08, 0x10, 0x08, 0x00, // '~'
    6, 0x00, 0x06, 0x09, 0x09, 0x06, 0x00, // del
];
