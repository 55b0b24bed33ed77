//! Per-LED brightness endpoints.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::array::Ws281xArray;
use crate::error::Error;
use crate::pixel::ChannelValues;
use crate::transport::Transport;

/// Anything whose brightness can be set from a single 0..=max value.
///
/// This is the hook a generic LED layer calls into.
pub trait BrightnessSettable {
    type Error;

    /// Upper bound of the brightness scale
    fn max_brightness(&self) -> u8 {
        u8::MAX
    }

    /// Apply `brightness`, blocking until the hardware has been updated
    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error>;
}

/// One LED of a [`Ws281xArray`] seen as a multicolor LED.
///
/// The array keeps a per-channel intensity for every LED; setting a
/// brightness resolves every channel to
/// `brightness * intensity / max_brightness` and updates the strip. The
/// handle itself holds no state.
pub struct MulticolorLed<'a, T, const MAX_LEDS: usize, const BUF_SIZE: usize, M> {
    array: &'a Ws281xArray<T, MAX_LEDS, BUF_SIZE, M>,
    index: usize,
}

impl<'a, T, const MAX_LEDS: usize, const BUF_SIZE: usize, M> MulticolorLed<'a, T, MAX_LEDS, BUF_SIZE, M>
where
    T: Transport,
    M: RawMutex,
{
    /// `index` must be on the strip
    pub(crate) fn new(array: &'a Ws281xArray<T, MAX_LEDS, BUF_SIZE, M>, index: usize) -> Self {
        Self { array, index }
    }

    /// Position of the LED on the strip
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn intensity(&self) -> ChannelValues {
        self.array
            .settings(self.index)
            .map_or(ChannelValues::OFF, |settings| settings.intensity)
    }

    /// Change the color mix. Takes effect on the next brightness update.
    ///
    /// Channels the chip does not have are stored as zero.
    pub fn set_intensity(&mut self, intensity: impl Into<ChannelValues>) {
        self.array.set_intensity(self.index, intensity.into());
    }

    /// Brightness of the last update
    pub fn brightness(&self) -> u8 {
        self.array
            .settings(self.index)
            .map_or(0, |settings| settings.brightness)
    }

    /// Channel values the LED would get at `brightness`
    pub fn components(&self, brightness: u8) -> ChannelValues {
        self.intensity().scale(brightness, self.max_brightness())
    }
}

impl<T, const MAX_LEDS: usize, const BUF_SIZE: usize, M> BrightnessSettable
    for MulticolorLed<'_, T, MAX_LEDS, BUF_SIZE, M>
where
    T: Transport,
    M: RawMutex,
{
    type Error = Error<T::Error>;

    fn set_brightness(&mut self, brightness: u8) -> Result<(), Self::Error> {
        self.array
            .apply_brightness(self.index, brightness, self.max_brightness())
    }
}
