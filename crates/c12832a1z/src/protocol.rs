//! Wire-level protocol helpers for the ST7565R controller on the C12832A1Z.

use core::ops::Range;

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 32;
/// Rows packed into one framebuffer byte.
pub const PAGE_HEIGHT: usize = 8;
/// Number of 8-row pages.
pub const PAGES: usize = HEIGHT / PAGE_HEIGHT;
/// Bytes in one page, one per column.
pub const PAGE_BYTES: usize = WIDTH;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = PAGE_BYTES * PAGES;

/// Column RAM width of the controller; the panel only wires up 128 of them.
pub const CONTROLLER_COLUMNS: usize = 132;
/// Page-window shift used when the panel is rotated by 180°.
///
/// With ADC reversed the visible columns start at controller column 4, so each
/// page is streamed from four bytes earlier.
pub const ORIENTATION_SKEW: usize = CONTROLLER_COLUMNS - WIDTH;

pub const CMD_DISPLAY_ON: u8 = 0xAF;
pub const CMD_DISPLAY_OFF: u8 = 0xAE;
pub const CMD_SLEEP: u8 = 0xAC;
pub const CMD_INVERT: u8 = 0xA7;
pub const CMD_NORMAL: u8 = 0xA6;
pub const CMD_ADC_NORMAL: u8 = 0xA0;
pub const CMD_ADC_REVERSE: u8 = 0xA1;
pub const CMD_COM_REVERSE: u8 = 0xC8;
pub const CMD_COM_NORMAL: u8 = 0xC0;
pub const CMD_SET_CONTRAST: u8 = 0x81;
pub const CMD_BIAS: u8 = 0xA2;
pub const CMD_RESISTOR_RATIO: u8 = 0x22;
pub const CMD_POWER_CONTROL: u8 = 0x2F;
pub const CMD_START_LINE: u8 = 0x40;
pub const CMD_PAGE_ADDRESS: u8 = 0xB0;
pub const CMD_COLUMN_LOW: u8 = 0x00;
pub const CMD_COLUMN_HIGH: u8 = 0x10;

/// Contrast programmed at bring-up and by `DisplayMode::Contrast`.
pub const DEFAULT_CONTRAST: u8 = 0x17;
/// Largest accepted contrast value (6 significant bits).
pub const MAX_CONTRAST: u8 = 0x3F;

/// Length of the bring-up command sequence.
pub const INIT_SEQUENCE_LEN: usize = 11;

/// Logical panel orientation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Orientation {
    /// Normal viewing direction.
    #[default]
    Top,
    /// Rotated by 180°; page windows are skewed by [`ORIENTATION_SKEW`].
    Bottom,
}

/// Display-level controller settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DisplayMode {
    /// Switch the display on, also wakes it from sleep.
    On,
    /// Switch the display off.
    Off,
    /// Display off followed by the sleep command.
    Sleep,
    /// Non-inverted pixels.
    Normal,
    /// Inverted pixels.
    Invert,
    /// Normal orientation.
    Top,
    /// 180° orientation.
    Bottom,
    /// Contrast; without a value this restores [`DEFAULT_CONTRAST`].
    Contrast,
}

impl DisplayMode {
    /// Orientation selected by this mode, if it is an orientation mode.
    pub const fn orientation(self) -> Option<Orientation> {
        match self {
            Self::Top => Some(Orientation::Top),
            Self::Bottom => Some(Orientation::Bottom),
            _ => None,
        }
    }
}

/// Returns the ADC/COM direction pair for an orientation.
#[inline]
pub const fn orientation_commands(orientation: Orientation) -> [u8; 2] {
    match orientation {
        Orientation::Top => [CMD_ADC_NORMAL, CMD_COM_REVERSE],
        Orientation::Bottom => [CMD_ADC_REVERSE, CMD_COM_NORMAL],
    }
}

/// Returns the command bytes for a display mode.
pub const fn mode_commands(mode: DisplayMode) -> &'static [u8] {
    match mode {
        DisplayMode::On => &[CMD_DISPLAY_ON],
        DisplayMode::Off => &[CMD_DISPLAY_OFF],
        DisplayMode::Sleep => &[CMD_DISPLAY_OFF, CMD_SLEEP],
        DisplayMode::Normal => &[CMD_NORMAL],
        DisplayMode::Invert => &[CMD_INVERT],
        DisplayMode::Top => &[CMD_ADC_NORMAL, CMD_COM_REVERSE],
        DisplayMode::Bottom => &[CMD_ADC_REVERSE, CMD_COM_NORMAL],
        DisplayMode::Contrast => &[CMD_SET_CONTRAST, DEFAULT_CONTRAST],
    }
}

/// Builds the set-contrast command pair.
///
/// Returns `None` for values above [`MAX_CONTRAST`].
#[inline]
pub fn contrast_commands(value: u8) -> Option<[u8; 2]> {
    if value > MAX_CONTRAST {
        return None;
    }

    Some([CMD_SET_CONTRAST, value & MAX_CONTRAST])
}

/// Builds the column-low, column-high and page-address commands for a page.
///
/// Returns `None` for pages outside `0..PAGES`.
#[inline]
pub fn page_address_commands(page: usize) -> Option<[u8; 3]> {
    if page >= PAGES {
        return None;
    }

    Some([CMD_COLUMN_LOW, CMD_COLUMN_HIGH, CMD_PAGE_ADDRESS | page as u8])
}

/// Returns the framebuffer index range streamed for `page`.
///
/// The bottom orientation starts [`ORIENTATION_SKEW`] bytes earlier, so the
/// range for page 0 begins at a negative index.
pub fn page_window(page: usize, orientation: Orientation) -> Option<Range<isize>> {
    if page >= PAGES {
        return None;
    }

    let end = ((page + 1) * PAGE_BYTES) as isize;
    let start = match orientation {
        Orientation::Top => (page * PAGE_BYTES) as isize,
        Orientation::Bottom => (page * PAGE_BYTES) as isize - ORIENTATION_SKEW as isize,
    };

    Some(start..end)
}

/// Builds the one-time bring-up sequence.
pub fn init_sequence(contrast: u8, orientation: Orientation) -> [u8; INIT_SEQUENCE_LEN] {
    let [adc, com] = orientation_commands(orientation);

    [
        CMD_DISPLAY_OFF,
        CMD_BIAS,
        adc,
        com,
        CMD_RESISTOR_RATIO,
        CMD_POWER_CONTROL,
        CMD_START_LINE,
        CMD_DISPLAY_ON,
        CMD_SET_CONTRAST,
        contrast & MAX_CONTRAST,
        CMD_NORMAL,
    ]
}
