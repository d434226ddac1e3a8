//! Byte-level link to the ST7565R: A0-multiplexed SPI writes and page pushes.

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    spi::{Operation, SpiDevice},
};
use log::{debug, trace};

use crate::{
    Config, DriverResult, Error,
    framebuffer::FrameBuffer,
    protocol::{self, Orientation, PAGES},
};

/// Owns the SPI device plus the A0 (command/data) and reset lines.
///
/// Chip select framing is left to the [`SpiDevice`]: every write is one
/// select/transmit/deselect cycle.
#[derive(Debug)]
pub struct ControllerLink<SPI, A0, RST> {
    spi: SPI,
    a0: A0,
    rst: RST,
}

impl<SPI, A0, RST> ControllerLink<SPI, A0, RST>
where
    SPI: SpiDevice<u8>,
    A0: OutputPin,
    RST: OutputPin,
{
    /// Takes ownership of the bus and pins; nothing is sent.
    pub fn new(spi: SPI, a0: A0, rst: RST) -> Self {
        Self { spi, a0, rst }
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, A0, RST) {
        (self.spi, self.a0, self.rst)
    }

    /// Sends one command byte (A0 low).
    pub fn write_command(
        &mut self,
        command: u8,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.a0.set_low().map_err(Error::A0)?;
        self.spi.write(&[command]).map_err(Error::Spi)
    }

    /// Sends each command byte in its own transfer.
    pub fn write_commands(
        &mut self,
        commands: &[u8],
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        for command in commands {
            self.write_command(*command)?;
        }

        Ok(())
    }

    /// Sends one display data byte (A0 high).
    pub fn write_data(&mut self, data: u8) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.a0.set_high().map_err(Error::A0)?;
        self.spi.write(&[data]).map_err(Error::Spi)
    }

    /// Pulses the reset line: low for `pulse_us`, then high and `recovery_ms`
    /// of settle time.
    pub fn hardware_reset<D>(
        &mut self,
        delay: &mut D,
        pulse_us: u32,
        recovery_ms: u32,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error>
    where
        D: DelayNs,
    {
        self.a0.set_low().map_err(Error::A0)?;
        self.rst.set_low().map_err(Error::Reset)?;
        delay.delay_us(pulse_us);
        self.rst.set_high().map_err(Error::Reset)?;
        delay.delay_ms(recovery_ms);

        debug!("c12832: reset pulse {}us, settle {}ms", pulse_us, recovery_ms);
        Ok(())
    }

    /// Resets the controller and sends the bring-up sequence.
    ///
    /// Leaves the display on, in normal (non-inverted) mode, with the
    /// configured contrast and orientation.
    pub fn initialize<D>(
        &mut self,
        delay: &mut D,
        config: &Config,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error>
    where
        D: DelayNs,
    {
        self.hardware_reset(delay, config.reset_pulse_us, config.reset_recovery_ms)?;

        let contrast = config.contrast.min(protocol::MAX_CONTRAST);
        self.write_commands(&protocol::init_sequence(contrast, config.orientation))?;

        debug!(
            "c12832: controller up, contrast={} orientation={:?}",
            contrast, config.orientation
        );
        Ok(())
    }

    /// Streams the whole framebuffer, one page at a time.
    ///
    /// Each page is addressed with column 0 and its page number, then sent as a
    /// single data transfer of its window: 128 bytes for [`Orientation::Top`],
    /// 132 bytes starting four bytes early for [`Orientation::Bottom`].
    pub fn push(
        &mut self,
        frame: &FrameBuffer,
        orientation: Orientation,
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        for page in 0..PAGES {
            let commands = protocol::page_address_commands(page).ok_or(Error::InvalidInput)?;
            self.write_commands(&commands)?;

            let (lead, body) = frame.page_window(page, orientation).ok_or(Error::InvalidInput)?;

            self.a0.set_high().map_err(Error::A0)?;
            if lead.is_empty() {
                self.spi.write(body).map_err(Error::Spi)?;
            } else {
                let mut ops = [Operation::Write(lead), Operation::Write(body)];
                self.spi.transaction(&mut ops).map_err(Error::Spi)?;
            }
        }

        trace!("c12832: pushed {} pages ({:?})", PAGES, orientation);
        Ok(())
    }

    /// Programs a contrast value.
    ///
    /// Returns `Ok(false)` without touching the controller when `value` does not
    /// fit in six bits.
    pub fn set_contrast(
        &mut self,
        value: u8,
    ) -> Result<bool, Error<SPI::Error, A0::Error, RST::Error>> {
        let Some(commands) = protocol::contrast_commands(value) else {
            return Ok(false);
        };

        self.write_commands(&commands)?;
        Ok(true)
    }
}
