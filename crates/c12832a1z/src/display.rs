//! Drawing engine: framebuffer, text state and controller link in one place.

use core::fmt;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
use log::{debug, warn};

use crate::{
    Config, DriverResult, Error, UpdateMode,
    font::{Font, SMALL_6X8},
    framebuffer::FrameBuffer,
    link::ControllerLink,
    protocol::{self, DisplayMode, Orientation},
    text::{Bitmap, TextCursor},
};

/// Mutable drawing state owned by one engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrawState<'a> {
    /// Where the next glyph goes.
    pub cursor: TextCursor,
    /// Font used by text calls.
    pub font: Font<'a>,
    /// When drawing calls push.
    pub update_mode: UpdateMode,
    /// Page window layout used by pushes.
    pub orientation: Orientation,
}

impl DrawState<'_> {
    /// Cursor at the origin, built-in font, mode and orientation from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            cursor: TextCursor::default(),
            font: SMALL_6X8,
            update_mode: config.update_mode,
            orientation: config.orientation,
        }
    }
}

/// C12832A1Z display engine.
///
/// Drawing calls land in the framebuffer; in [`UpdateMode::Auto`] each call
/// then pushes the full buffer, in [`UpdateMode::Manual`] nothing reaches the
/// panel until [`C12832::push`]. Pixels outside the panel are ignored.
#[derive(Debug)]
pub struct C12832<'a, SPI, A0, RST> {
    link: ControllerLink<SPI, A0, RST>,
    frame: FrameBuffer,
    state: DrawState<'a>,
    config: Config,
}

impl<'a, SPI, A0, RST> C12832<'a, SPI, A0, RST>
where
    SPI: SpiDevice<u8>,
    A0: OutputPin,
    RST: OutputPin,
{
    /// Creates a new engine instance. Nothing is sent until
    /// [`C12832::initialize`].
    pub fn new(spi: SPI, a0: A0, rst: RST, config: Config) -> Self {
        Self {
            link: ControllerLink::new(spi, a0, rst),
            frame: FrameBuffer::new(),
            state: DrawState::new(&config),
            config,
        }
    }

    /// Resets and configures the controller, then clears the panel.
    pub fn initialize<D>(
        &mut self,
        delay: &mut D,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error>
    where
        D: DelayNs,
    {
        self.link.initialize(delay, &self.config)?;
        self.state = DrawState::new(&self.config);
        self.clear()
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Returns cursor, font, update mode and orientation.
    pub fn state(&self) -> &DrawState<'a> {
        &self.state
    }

    /// Returns the framebuffer as last drawn.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Direct buffer access; changes show up with the next push.
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Gives access to the raw controller link.
    pub fn link_mut(&mut self) -> &mut ControllerLink<SPI, A0, RST> {
        &mut self.link
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, A0, RST) {
        self.link.release()
    }

    /// Sends the whole framebuffer to the controller.
    pub fn push(&mut self) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.link.push(&self.frame, self.state.orientation)
    }

    fn flush_if_auto(&mut self) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        match self.state.update_mode {
            UpdateMode::Auto => self.push(),
            UpdateMode::Manual => Ok(()),
        }
    }

    /// Returns the active update mode.
    pub fn update_mode(&self) -> UpdateMode {
        self.state.update_mode
    }

    /// Switches between pushing after every call and pushing on request.
    pub fn set_update_mode(&mut self, mode: UpdateMode) {
        if self.state.update_mode != mode {
            debug!("c12832: update mode {:?}", mode);
        }
        self.state.update_mode = mode;
    }

    /// Returns the orientation used by pushes.
    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    /// Blanks the buffer and pushes it, regardless of the update mode.
    pub fn clear(&mut self) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.clear();
        self.push()
    }

    /// Writes one pixel into the buffer without pushing.
    pub fn pixel(&mut self, x: i32, y: i32, on: bool) {
        self.frame.set_pixel(x, y, on);
    }

    /// Sets or clears one pixel.
    pub fn point(
        &mut self,
        x: i32,
        y: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.set_pixel(x, y, on);
        self.flush_if_auto()
    }

    /// Draws a Bresenham line, endpoints included.
    pub fn line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.line(x0, y0, x1, y1, on);
        self.flush_if_auto()
    }

    /// Rectangle outline, pushed once after all four edges.
    pub fn rectangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.rectangle(x0, y0, x1, y1, on);
        self.flush_if_auto()
    }

    /// Fills the closed rectangle spanned by two corners.
    pub fn fill_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.fill_rect(x0, y0, x1, y1, on);
        self.flush_if_auto()
    }

    /// Rectangle outline with rounded corners.
    pub fn round_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        radius: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.round_rect(x0, y0, x1, y1, radius, on);
        self.flush_if_auto()
    }

    /// Filled rectangle with rounded corners.
    pub fn fill_round_rect(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        radius: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.fill_round_rect(x0, y0, x1, y1, radius, on);
        self.flush_if_auto()
    }

    /// Circle outline around `x`, `y`.
    pub fn circle(
        &mut self,
        x: i32,
        y: i32,
        radius: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.circle(x, y, radius, on);
        self.flush_if_auto()
    }

    /// Filled circle around `x`, `y`, drawn as chords.
    pub fn fill_circle(
        &mut self,
        x: i32,
        y: i32,
        radius: i32,
        on: bool,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.fill_circle(x, y, radius, on);
        self.flush_if_auto()
    }

    /// Copies a caller-owned bitmap into the buffer, cut at the panel edges.
    pub fn blit_bitmap(
        &mut self,
        bitmap: &Bitmap<'_>,
        x: i32,
        y: i32,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.frame.blit(bitmap, x, y);
        self.flush_if_auto()
    }

    /// Moves the text cursor without drawing.
    ///
    /// Coordinates wrap into the panel: column modulo 128, row modulo 32.
    pub fn locate(&mut self, x: i32, y: i32) {
        self.state.cursor = TextCursor::wrapped(x, y);
    }

    /// Returns the text cursor.
    pub fn cursor(&self) -> TextCursor {
        self.state.cursor
    }

    /// Selects the font for subsequent text; existing pixels are kept.
    pub fn set_font(&mut self, font: Font<'a>) {
        debug!("c12832: font {}x{}", font.glyph_width(), font.glyph_height());
        self.state.font = font;
    }

    /// Returns the active font.
    pub fn font(&self) -> Font<'a> {
        self.state.font
    }

    /// Advances the cursor for `c` and draws it; returns `false` for a
    /// newline, which only moves the cursor.
    fn draw_char(&mut self, c: char) -> bool {
        if c == '\n' {
            self.state.cursor.new_line(self.state.font.glyph_height());
            return false;
        }

        self.frame.draw_glyph(&mut self.state.cursor, &self.state.font, c);
        true
    }

    /// Writes one character at the cursor.
    ///
    /// `'\n'` starts a new line without pushing. Any other character pushes
    /// in auto mode, including one the font has no glyph for, which draws
    /// nothing. Returns the character written.
    pub fn put_char(
        &mut self,
        c: char,
    ) -> Result<char, Error<SPI::Error, A0::Error, RST::Error>> {
        if self.draw_char(c) {
            self.flush_if_auto()?;
        }

        Ok(c)
    }

    /// Moves the cursor to `x`, `y` and draws `c` there.
    ///
    /// Pushes in auto mode only when the font has a glyph for `c`.
    pub fn render_glyph(
        &mut self,
        x: i32,
        y: i32,
        c: char,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.locate(x, y);
        if self.frame.draw_glyph(&mut self.state.cursor, &self.state.font, c) {
            self.flush_if_auto()?;
        }

        Ok(())
    }

    /// Writes a string at the cursor, pushing once at the end.
    pub fn print(&mut self, text: &str) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        for c in text.chars() {
            self.draw_char(c);
        }

        self.flush_if_auto()
    }

    /// Sends a display-mode command.
    ///
    /// Orientation changes also push the buffer, since every page window moves.
    pub fn set_display_mode(
        &mut self,
        mode: DisplayMode,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.link.write_commands(protocol::mode_commands(mode))?;

        if let Some(orientation) = mode.orientation() {
            debug!("c12832: orientation {:?}", orientation);
            self.state.orientation = orientation;
            self.push()?;
        }

        Ok(())
    }

    /// Sends a display-mode command that takes a value.
    ///
    /// Only [`DisplayMode::Contrast`] takes one; contrast values above 63 and
    /// every other mode are ignored.
    pub fn set_display_mode_value(
        &mut self,
        mode: DisplayMode,
        value: u8,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        if mode != DisplayMode::Contrast {
            return Ok(());
        }

        if !self.link.set_contrast(value)? {
            warn!("c12832: contrast {} out of range, ignored", value);
        }

        Ok(())
    }
}

impl<SPI, A0, RST> fmt::Write for C12832<'_, SPI, A0, RST>
where
    SPI: SpiDevice<u8>,
    A0: OutputPin,
    RST: OutputPin,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.print(s).map_err(|err| {
            warn!("c12832: text push failed: {:?}", err);
            fmt::Error
        })
    }

    /// Formats into the buffer first so a `write!` pushes only once.
    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        let mode = self.state.update_mode;
        self.state.update_mode = UpdateMode::Manual;
        let written = fmt::write(self, args);
        self.state.update_mode = mode;
        written?;

        self.flush_if_auto().map_err(|err| {
            warn!("c12832: text push failed: {:?}", err);
            fmt::Error
        })
    }
}
