//! Transport writer: pushes the encoded strip out over the bus.

use core::fmt::Debug;

use embedded_hal::spi::{MODE_0, Mode, SpiBus};
use log::warn;

use crate::error::ConfigError;
use crate::profile::ChipProfile;

/// Sink for encoded strip frames.
///
/// Implementations must send `symbols` as one contiguous transfer and block
/// until it is complete. Splitting it up can leave the data line low long
/// enough for the controller to latch a partial frame.
pub trait Transport {
    type Error: Debug;

    /// Write the whole frame. Errors are returned as-is, never retried.
    fn write(&mut self, symbols: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, symbols: &[u8]) -> Result<(), Self::Error> {
        (**self).write(symbols)
    }
}

/// How the collaborator brought up the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Bus clock in Hz
    pub frequency_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl BusConfig {
    /// Bus setup required by `profile`: SPI mode 0 at the profile's frequency.
    pub const fn for_profile(profile: &ChipProfile) -> Self {
        Self {
            frequency_hz: profile.bus_frequency,
            mode: MODE_0,
        }
    }

    /// Check that this setup produces the waveform `profile` relies on.
    pub fn check(&self, profile: &ChipProfile) -> Result<(), ConfigError> {
        if self.frequency_hz != profile.bus_frequency {
            return Err(ConfigError::FrequencyMismatch {
                configured: self.frequency_hz,
                required: profile.bus_frequency,
            });
        }
        if self.mode != MODE_0 {
            return Err(ConfigError::UnsupportedMode);
        }
        Ok(())
    }
}

/// [`Transport`] over an `embedded-hal` SPI bus.
///
/// Only MOSI is used. The bus is borrowed for the length of one write and
/// flushed before returning.
#[derive(Debug)]
pub struct SpiTransport<SPI> {
    spi: SPI,
}

impl<SPI: SpiBus<u8>> SpiTransport<SPI> {
    /// Wrap a bus that was configured as described by `bus`.
    pub fn new(spi: SPI, bus: &BusConfig, profile: &ChipProfile) -> Result<Self, ConfigError> {
        bus.check(profile)
            .inspect_err(|err| warn!("{}: rejecting bus setup: {}", profile.name, err))?;
        Ok(Self { spi })
    }

    /// Release the bus
    pub fn into_inner(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> Transport for SpiTransport<SPI> {
    type Error = SPI::Error;

    fn write(&mut self, symbols: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(symbols)?;
        self.spi.flush()
    }
}
