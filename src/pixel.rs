//! Pixel formatting: channel values of one LED into its symbol block.

use heapless::Vec;
use smart_leds::RGB8;

use crate::encoder::encode_subpixel_into;
use crate::profile::{ChannelRole, ChipProfile, MAX_PIXEL_SYMBOLS, SYMBOLS_PER_CHANNEL};

/// Encoded symbols of a single LED.
pub type PixelSymbols = Vec<u8, MAX_PIXEL_SYMBOLS>;

/// Resolved 0-255 values of every channel of one LED.
///
/// Stored by role, not by wire order. Chips without a white channel never
/// send the white value, see [`ChannelValues::masked`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelValues {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
}

impl ChannelValues {
    /// All channels off
    pub const OFF: Self = Self::rgbw(0, 0, 0, 0);
    /// All channels at full scale
    pub const FULL: Self = Self::rgbw(u8::MAX, u8::MAX, u8::MAX, u8::MAX);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgbw(red, green, blue, 0)
    }

    pub const fn rgbw(red: u8, green: u8, blue: u8, white: u8) -> Self {
        Self {
            red,
            green,
            blue,
            white,
        }
    }

    /// Value of the channel with the given role
    pub const fn get(self, role: ChannelRole) -> u8 {
        match role {
            ChannelRole::Red => self.red,
            ChannelRole::Green => self.green,
            ChannelRole::Blue => self.blue,
            ChannelRole::White => self.white,
        }
    }

    /// Set the channel with the given role
    pub fn set(&mut self, role: ChannelRole, value: u8) {
        match role {
            ChannelRole::Red => self.red = value,
            ChannelRole::Green => self.green = value,
            ChannelRole::Blue => self.blue = value,
            ChannelRole::White => self.white = value,
        }
    }

    /// Keep only the channels `profile` has, zeroing the rest
    pub fn masked(self, profile: &ChipProfile) -> Self {
        let mut masked = Self::OFF;
        for &role in profile.channel_order {
            masked.set(role, self.get(role));
        }
        masked
    }

    /// Scale every channel by `brightness / max_brightness`.
    ///
    /// Treats `self` as per-channel intensities, the way a multicolor LED
    /// resolves its components from one overall brightness.
    pub fn scale(self, brightness: u8, max_brightness: u8) -> Self {
        if max_brightness == 0 {
            return Self::OFF;
        }
        let brightness = brightness.min(max_brightness);
        let component = |intensity| scale_component(intensity, brightness, max_brightness);

        Self::rgbw(
            component(self.red),
            component(self.green),
            component(self.blue),
            component(self.white),
        )
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn scale_component(intensity: u8, brightness: u8, max_brightness: u8) -> u8 {
    (brightness as u16 * intensity as u16 / max_brightness as u16) as u8
}

impl From<RGB8> for ChannelValues {
    fn from(color: RGB8) -> Self {
        Self::rgb(color.r, color.g, color.b)
    }
}

impl From<(u8, u8, u8)> for ChannelValues {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::rgb(red, green, blue)
    }
}

/// Format one LED into a freshly allocated symbol block.
///
/// Channels are emitted in the profile's wire order. Channels past
/// [`crate::profile::MAX_CHANNELS`] are dropped.
pub fn format_pixel(profile: &ChipProfile, values: ChannelValues) -> PixelSymbols {
    let mut block = PixelSymbols::new();
    for &role in profile.channel_order {
        let start = block.len();
        if block
            .resize(start + SYMBOLS_PER_CHANNEL, profile.zero_symbol)
            .is_err()
        {
            break;
        }
        encode_subpixel_into(profile, values.get(role), &mut block[start..]);
    }
    block
}

/// Format one LED in place into `out`.
///
/// `out` is expected to be exactly [`ChipProfile::pixel_symbol_size`] long.
pub fn format_pixel_into(profile: &ChipProfile, values: ChannelValues, out: &mut [u8]) {
    for (&role, chunk) in profile
        .channel_order
        .iter()
        .zip(out.chunks_exact_mut(SYMBOLS_PER_CHANNEL))
    {
        encode_subpixel_into(profile, values.get(role), chunk);
    }
}
