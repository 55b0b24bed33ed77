//! Controller variants and their bus encoding parameters.
//!
//! The bus runs at 8x the controller's bit rate, so each transmitted byte
//! spans exactly one protocol bit-period. The high bits at the front of a
//! symbol form the high phase of the waveform, the trailing zeros the low one.

use embassy_time::Duration;

use crate::error::ConfigError;

/// Bus symbols emitted per 8-bit channel value, one per source bit.
pub const SYMBOLS_PER_CHANNEL: usize = 8;

/// Largest supported number of channels per LED (RGBW).
pub const MAX_CHANNELS: usize = 4;

/// Largest pixel symbol block over all supported profiles.
pub const MAX_PIXEL_SYMBOLS: usize = SYMBOLS_PER_CHANNEL * MAX_CHANNELS;

/// Bus clock periods spent on one protocol bit.
pub const BUS_BITS_PER_SYMBOL: u32 = 8;

/// Color component carried by one channel of an LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    Red,
    Green,
    Blue,
    White,
}

/// Static description of one controller variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipProfile {
    /// Human readable chip name
    pub name: &'static str,
    /// Bus byte decoded by the controller as logical 0
    pub zero_symbol: u8,
    /// Bus byte decoded by the controller as logical 1
    pub one_symbol: u8,
    /// Native protocol bit rate in Hz
    pub bit_rate: u32,
    /// Required bus clock in Hz
    pub bus_frequency: u32,
    /// Bus symbols per channel value
    pub bits_per_channel: usize,
    /// Wire order of the channels of one LED
    pub channel_order: &'static [ChannelRole],
}

/// WS2812B: 800 kHz, green-red-blue.
///
/// A 0 is high for 0.4us and low for 0.85us, a 1 is high for 0.8us and low
/// for 0.45us. At 6.4 MHz one bus bit lasts 156.25ns, so `11000000` reads as
/// a 0 and `11111100` as a 1.
pub const WS2812B: ChipProfile = ChipProfile {
    name: "ws2812b",
    zero_symbol: 0b1100_0000,
    one_symbol: 0b1111_1100,
    bit_rate: 800_000,
    bus_frequency: 6_400_000,
    bits_per_channel: SYMBOLS_PER_CHANNEL,
    channel_order: &[ChannelRole::Green, ChannelRole::Red, ChannelRole::Blue],
};

/// WS2811 in its 400 kHz mode, red-green-blue.
pub const WS2811: ChipProfile = ChipProfile {
    name: "ws2811",
    zero_symbol: 0b1100_0000,
    one_symbol: 0b1111_0000,
    bit_rate: 400_000,
    bus_frequency: 3_200_000,
    bits_per_channel: SYMBOLS_PER_CHANNEL,
    channel_order: &[ChannelRole::Red, ChannelRole::Green, ChannelRole::Blue],
};

/// SK6812 with a dedicated white die, green-red-blue-white.
pub const SK6812_RGBW: ChipProfile = ChipProfile {
    name: "sk6812-rgbw",
    zero_symbol: 0b1100_0000,
    one_symbol: 0b1111_0000,
    bit_rate: 800_000,
    bus_frequency: 6_400_000,
    bits_per_channel: SYMBOLS_PER_CHANNEL,
    channel_order: &[
        ChannelRole::Green,
        ChannelRole::Red,
        ChannelRole::Blue,
        ChannelRole::White,
    ],
};

impl ChipProfile {
    /// Number of color channels per LED
    pub const fn channels_per_led(&self) -> usize {
        self.channel_order.len()
    }

    /// Size of one encoded LED in bus bytes
    pub const fn pixel_symbol_size(&self) -> usize {
        self.bits_per_channel * self.channels_per_led()
    }

    /// Returns true if the chip has a channel with the given role
    pub fn has_channel(&self, role: ChannelRole) -> bool {
        self.channel_order.contains(&role)
    }

    /// Check that the profile describes an encoding the driver can produce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bits_per_channel != SYMBOLS_PER_CHANNEL {
            return Err(ConfigError::BitsPerChannel {
                found: self.bits_per_channel,
            });
        }

        let channels = self.channels_per_led();
        if !(3..=MAX_CHANNELS).contains(&channels) {
            return Err(ConfigError::ChannelCount { found: channels });
        }
        for (position, role) in self.channel_order.iter().enumerate() {
            if self.channel_order[..position].contains(role) {
                return Err(ConfigError::DuplicateChannel { role: *role });
            }
        }

        if self.bit_rate.checked_mul(BUS_BITS_PER_SYMBOL) != Some(self.bus_frequency) {
            return Err(ConfigError::BusFrequency {
                bit_rate: self.bit_rate,
                bus_frequency: self.bus_frequency,
            });
        }

        for symbol in [self.zero_symbol, self.one_symbol] {
            if symbol & 0x80 == 0 {
                return Err(ConfigError::SymbolStartsLow { symbol });
            }
        }
        // A 1 must hold the line high longer than a 0
        if self.one_symbol.leading_ones() <= self.zero_symbol.leading_ones() {
            return Err(ConfigError::IndistinctSymbols {
                zero: self.zero_symbol,
                one: self.one_symbol,
            });
        }

        Ok(())
    }

    /// Time the bus needs to clock out `symbols` bytes, rounded up to whole
    /// microseconds.
    pub fn transfer_duration(&self, symbols: usize) -> Duration {
        if self.bus_frequency == 0 {
            return Duration::MAX;
        }
        let bits = symbols as u64 * u64::from(BUS_BITS_PER_SYMBOL);
        Duration::from_micros((bits * 1_000_000).div_ceil(u64::from(self.bus_frequency)))
    }
}

/// Symbol buffer size needed for `max_leds` LEDs of the given chip.
///
/// Intended for the `BUF_SIZE` parameter of [`crate::StripBuffer`] and
/// [`crate::Ws281xArray`].
pub const fn buffer_size(max_leds: usize, profile: &ChipProfile) -> usize {
    max_leds * profile.pixel_symbol_size()
}
