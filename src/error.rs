//! Error types for every layer of the driver.
//!
//! Each layer reports its own precise error; [`Error`] aggregates them at the
//! update boundary together with the transport's own error type.

use core::fmt;

use derive_more::derive::{Display, Error};

use crate::profile::ChannelRole;

/// Requested LED index is past the end of the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("LED index {index} is out of range for a strip of {len} LEDs")]
pub struct OutOfRange {
    /// Index that was requested
    pub index: usize,
    /// Number of LEDs on the strip
    pub len: usize,
}

/// Storage that is reserved at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    /// Per-LED channel values
    #[display("LED state slots")]
    LedState,
    /// Encoded strip symbols
    #[display("symbol buffer bytes")]
    SymbolBuffer,
}

/// The strip does not fit into the reserved storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("strip needs {requested} {resource}, only {capacity} reserved")]
pub struct CapacityError {
    pub resource: Resource,
    pub requested: usize,
    pub capacity: usize,
}

/// Invalid chip profile or bus setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    #[display("profile encodes {found} symbols per channel, expected 8")]
    BitsPerChannel { found: usize },

    #[display("profile has {found} channels per LED, expected 3 or 4")]
    ChannelCount { found: usize },

    #[display("channel {role:?} appears more than once in the channel order")]
    DuplicateChannel { role: ChannelRole },

    #[display("bus frequency {bus_frequency} Hz is not 8x the {bit_rate} Hz bit rate")]
    BusFrequency { bit_rate: u32, bus_frequency: u32 },

    #[display("symbols {zero:#010b} and {one:#010b} do not encode distinct bits")]
    IndistinctSymbols { zero: u8, one: u8 },

    #[display("symbol {symbol:#010b} does not start with a high bus bit")]
    SymbolStartsLow { symbol: u8 },

    #[display("bus runs at {configured} Hz, profile requires {required} Hz")]
    FrequencyMismatch { configured: u32, required: u32 },

    #[display("bus must be configured in SPI mode 0")]
    UnsupportedMode,

    #[display("strip has no LEDs")]
    EmptyStrip,
}

/// Unified error of the update path.
///
/// `E` is the transport's error, passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Error<E> {
    #[display("{_0}")]
    OutOfRange(OutOfRange),
    #[display("{_0}")]
    AllocationFailure(CapacityError),
    #[display("{_0}")]
    Configuration(ConfigError),
    #[display("transport error: {_0:?}")]
    Transport(E),
}

impl<E: fmt::Debug> core::error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::OutOfRange(err) => Some(err),
            Self::AllocationFailure(err) => Some(err),
            Self::Configuration(err) => Some(err),
            Self::Transport(_) => None,
        }
    }
}

impl<E> From<OutOfRange> for Error<E> {
    fn from(err: OutOfRange) -> Self {
        Self::OutOfRange(err)
    }
}

impl<E> From<CapacityError> for Error<E> {
    fn from(err: CapacityError) -> Self {
        Self::AllocationFailure(err)
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err)
    }
}
