//! Recording `embedded-hal` doubles shared by the unit tests.

use core::convert::Infallible;
use std::{cell::RefCell, mem, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
    spi::{self, ErrorKind, Operation, SpiDevice},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Event {
    Command(u8),
    Data(u8),
    Reset(bool),
    DelayUs(u32),
    DelayMs(u32),
}

/// Wire state seen by every double of one link.
#[derive(Debug, Default)]
pub(crate) struct Bus {
    pub(crate) a0_high: bool,
    pub(crate) events: Vec<Event>,
    /// Completed chip-select frames.
    pub(crate) frames: usize,
}

impl Bus {
    pub(crate) fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Command(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn data(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Data(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }

    /// Groups the byte stream into `(commands, data)` runs, one per page.
    pub(crate) fn pages(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        let mut pages = Vec::new();
        let mut commands = Vec::new();
        let mut data = Vec::new();

        for event in &self.events {
            match *event {
                Event::Command(byte) => {
                    if !data.is_empty() {
                        pages.push((mem::take(&mut commands), mem::take(&mut data)));
                    }
                    commands.push(byte);
                }
                Event::Data(byte) => data.push(byte),
                _ => {}
            }
        }
        if !data.is_empty() {
            pages.push((commands, data));
        }

        pages
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
        self.frames = 0;
    }
}

pub(crate) type SharedBus = Rc<RefCell<Bus>>;

pub(crate) struct RecordingSpi(SharedBus);

impl spi::ErrorType for RecordingSpi {
    type Error = Infallible;
}

impl SpiDevice<u8> for RecordingSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut guard = self.0.borrow_mut();
        let bus = &mut *guard;

        for op in operations.iter_mut() {
            let written: &[u8] = match op {
                Operation::Write(words) => *words,
                Operation::Transfer(read, words) => {
                    read.fill(0);
                    *words
                }
                Operation::TransferInPlace(words) => &**words,
                Operation::Read(read) => {
                    read.fill(0);
                    &[]
                }
                Operation::DelayNs(_) => &[],
            };

            for byte in written {
                bus.events.push(if bus.a0_high {
                    Event::Data(*byte)
                } else {
                    Event::Command(*byte)
                });
            }
        }

        bus.frames += 1;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PinRole {
    A0,
    Reset,
}

pub(crate) struct RecordingPin {
    bus: SharedBus,
    role: PinRole,
}

impl RecordingPin {
    fn drive(&mut self, high: bool) {
        let mut bus = self.bus.borrow_mut();
        match self.role {
            PinRole::A0 => bus.a0_high = high,
            PinRole::Reset => bus.events.push(Event::Reset(high)),
        }
    }
}

impl digital::ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

pub(crate) struct RecordingDelay(SharedBus);

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().events.push(Event::DelayUs(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().events.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().events.push(Event::DelayMs(ms));
    }
}

/// Builds a bus plus SPI, A0, reset and delay doubles wired to it.
pub(crate) fn recording_link() -> (
    SharedBus,
    RecordingSpi,
    RecordingPin,
    RecordingPin,
    RecordingDelay,
) {
    let bus = SharedBus::default();

    (
        bus.clone(),
        RecordingSpi(bus.clone()),
        RecordingPin {
            bus: bus.clone(),
            role: PinRole::A0,
        },
        RecordingPin {
            bus: bus.clone(),
            role: PinRole::Reset,
        },
        RecordingDelay(bus),
    )
}

/// SPI device whose every transfer fails.
pub(crate) struct FailingSpi;

impl spi::ErrorType for FailingSpi {
    type Error = ErrorKind;
}

impl SpiDevice<u8> for FailingSpi {
    fn transaction(&mut self, _operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }
}
