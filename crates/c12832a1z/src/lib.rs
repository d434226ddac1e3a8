#![cfg_attr(not(test), no_std)]

//! C12832A1Z (128x32 ST7565R dot-matrix LCD) driver and drawing engine.
//!
//! [`FrameBuffer`] holds the page-packed pixels and rasterizes lines,
//! rectangles, rounded rectangles, circles, glyphs and bitmaps into them.
//! [`ControllerLink`] moves bytes to the controller over an `embedded-hal`
//! SPI device with a separate A0 (command/data) line. [`C12832`] ties both
//! together and pushes the whole buffer after every drawing call while in
//! [`UpdateMode::Auto`].

mod display;
pub mod font;
mod framebuffer;
mod link;
pub mod protocol;
mod raster;
pub mod text;

#[cfg(feature = "embedded-graphics")]
mod graphics;

#[cfg(test)]
mod test_support;

pub use display::{C12832, DrawState};
pub use font::{Font, Glyph, SMALL_6X8};
pub use framebuffer::FrameBuffer;
pub use link::ControllerLink;
pub use protocol::{DisplayMode, Orientation};
pub use text::{Bitmap, TextCursor};

use embedded_hal::spi::{MODE_3, Mode};

/// SPI mode expected by the controller (CPOL=1, CPHA=1, 8-bit words).
pub const SPI_MODE: Mode = MODE_3;

/// When drawing calls reach the panel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UpdateMode {
    /// Only on an explicit push.
    Manual,
    /// After every drawing call.
    #[default]
    Auto,
}

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Expected SPI clock in Hz (documented for board glue).
    pub spi_hz: u32,
    /// Contrast programmed at bring-up, `0..=63`.
    pub contrast: u8,
    /// Orientation programmed at bring-up.
    pub orientation: Orientation,
    /// Update mode after bring-up.
    pub update_mode: UpdateMode,
    /// Reset line low time.
    pub reset_pulse_us: u32,
    /// Settle time after releasing reset.
    pub reset_recovery_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_hz: 20_000_000,
            contrast: protocol::DEFAULT_CONTRAST,
            orientation: Orientation::Top,
            update_mode: UpdateMode::Auto,
            reset_pulse_us: 50,
            reset_recovery_ms: 5,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, A0Err, RstErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// A0 pin operation failed.
    A0(A0Err),
    /// Reset pin operation failed.
    Reset(RstErr),
    /// Input parameters are outside supported bounds.
    InvalidInput,
}

pub type DriverResult<SpiErr, A0Err, RstErr> = Result<(), Error<SpiErr, A0Err, RstErr>>;
