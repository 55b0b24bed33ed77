//! Full-strip symbol buffer.
//!
//! One contiguous arena holds the encoded symbols of every LED; LED `i` owns
//! the byte range `i * pixel_symbol_size..(i + 1) * pixel_symbol_size`.
//! Updating an LED re-encodes only its own region, and the buffer always
//! equals the encoding of the last values set on every LED.

use core::ops::Range;

use heapless::Vec;

use crate::error::{CapacityError, OutOfRange, Resource};
use crate::pixel::{ChannelValues, format_pixel_into};
use crate::profile::ChipProfile;

/// Encoded state of a whole strip.
///
/// `MAX_LEDS` bounds the LED count and `BUF_SIZE` the symbol bytes, see
/// [`crate::buffer_size`].
#[derive(Debug, Clone)]
pub struct StripBuffer<const MAX_LEDS: usize, const BUF_SIZE: usize> {
    profile: &'static ChipProfile,
    leds: Vec<ChannelValues, MAX_LEDS>,
    symbols: Vec<u8, BUF_SIZE>,
}

impl<const MAX_LEDS: usize, const BUF_SIZE: usize> StripBuffer<MAX_LEDS, BUF_SIZE> {
    /// Reserve a strip of `num_leds` LEDs, all of them off.
    pub fn new(profile: &'static ChipProfile, num_leds: usize) -> Result<Self, CapacityError> {
        let mut leds = Vec::new();
        leds.resize(num_leds, ChannelValues::OFF)
            .map_err(|()| CapacityError {
                resource: Resource::LedState,
                requested: num_leds,
                capacity: MAX_LEDS,
            })?;

        let needed = num_leds.saturating_mul(profile.pixel_symbol_size());
        // An LED that is off encodes to nothing but zero symbols
        let mut symbols = Vec::new();
        symbols
            .resize(needed, profile.zero_symbol)
            .map_err(|()| CapacityError {
                resource: Resource::SymbolBuffer,
                requested: needed,
                capacity: BUF_SIZE,
            })?;

        Ok(Self {
            profile,
            leds,
            symbols,
        })
    }

    /// Number of LEDs on the strip
    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn profile(&self) -> &'static ChipProfile {
        self.profile
    }

    /// Byte range of the buffer owned by the LED at `index`
    pub fn region(&self, index: usize) -> Range<usize> {
        let size = self.profile.pixel_symbol_size();
        let start = index * size;
        start..start + size
    }

    /// Last values set on the LED at `index`
    pub fn led(&self, index: usize) -> Option<ChannelValues> {
        self.leds.get(index).copied()
    }

    /// Set the LED at `index` and re-encode its region of the buffer.
    ///
    /// Fails before touching anything if `index` is past the end of the strip.
    /// Channels the chip does not have are stored as zero.
    pub fn set_led(&mut self, index: usize, values: ChannelValues) -> Result<(), OutOfRange> {
        let len = self.len();
        let values = values.masked(self.profile);
        let Some(led) = self.leds.get_mut(index) else {
            return Err(OutOfRange { index, len });
        };
        *led = values;

        let region = self.region(index);
        if let Some(block) = self.symbols.get_mut(region) {
            format_pixel_into(self.profile, values, block);
        }
        Ok(())
    }

    /// Encoded symbols of the whole strip, ready for transmission
    pub fn snapshot(&self) -> &[u8] {
        &self.symbols
    }
}
