//! Update coordinator for one LED strip.
//!
//! Every change goes through the strip's own lock: the buffer is updated and
//! the whole strip is written out before the lock is released, so a frame on
//! the wire never mixes two updates. Each accepted request produces its own
//! full-strip write, even when the previous one carried the same data.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;
use heapless::Vec;
use log::{debug, error, trace};
use smart_leds::{RGB8, SmartLedsWrite};

use crate::error::{CapacityError, ConfigError, Error, OutOfRange, Resource};
use crate::led::MulticolorLed;
use crate::lock::SpinRawMutex;
use crate::pixel::ChannelValues;
use crate::profile::ChipProfile;
use crate::strip::StripBuffer;
use crate::transport::Transport;

/// Color mix and overall brightness of one LED endpoint
#[derive(Debug, Clone, Copy)]
pub(crate) struct LedSettings {
    pub(crate) intensity: ChannelValues,
    pub(crate) brightness: u8,
}

struct Inner<T, const MAX_LEDS: usize, const BUF_SIZE: usize> {
    strip: StripBuffer<MAX_LEDS, BUF_SIZE>,
    settings: Vec<LedSettings, MAX_LEDS>,
    transport: T,
}

impl<T: Transport, const MAX_LEDS: usize, const BUF_SIZE: usize> Inner<T, MAX_LEDS, BUF_SIZE> {
    /// Write the full buffer out
    fn flush(&mut self) -> Result<(), Error<T::Error>> {
        let Self {
            strip, transport, ..
        } = self;
        let symbols = strip.snapshot();
        trace!("{}: writing {} bytes", strip.profile().name, symbols.len());

        transport.write(symbols).map_err(|err| {
            error!("{}: transfer error: {:?}", strip.profile().name, err);
            Error::Transport(err)
        })
    }
}

/// An LED strip driven over transport `T`.
///
/// `M` selects the lock that serializes updates. The default is owned by the
/// array, so separate strips never wait on each other. Pick
/// `CriticalSectionRawMutex` when updates also come from interrupts.
pub struct Ws281xArray<T, const MAX_LEDS: usize, const BUF_SIZE: usize, M = SpinRawMutex>
{
    profile: &'static ChipProfile,
    num_leds: usize,
    inner: Mutex<M, RefCell<Inner<T, MAX_LEDS, BUF_SIZE>>>,
}

impl<T, const MAX_LEDS: usize, const BUF_SIZE: usize, M> Ws281xArray<T, MAX_LEDS, BUF_SIZE, M>
where
    T: Transport,
    M: RawMutex,
{
    /// Bring up a strip of `num_leds` LEDs, all off.
    ///
    /// Nothing is written to the transport until the first update.
    pub fn new(
        profile: &'static ChipProfile,
        transport: T,
        num_leds: usize,
    ) -> Result<Self, Error<T::Error>> {
        profile.validate()?;
        if num_leds == 0 {
            return Err(ConfigError::EmptyStrip.into());
        }
        let strip = StripBuffer::new(profile, num_leds)?;
        let mut settings = Vec::new();
        settings
            .resize(
                num_leds,
                LedSettings {
                    intensity: ChannelValues::FULL.masked(profile),
                    brightness: 0,
                },
            )
            .map_err(|()| CapacityError {
                resource: Resource::LedState,
                requested: num_leds,
                capacity: MAX_LEDS,
            })?;
        debug!(
            "{}: {} LEDs, {} symbol bytes per frame",
            profile.name,
            num_leds,
            strip.snapshot().len()
        );

        Ok(Self {
            profile,
            num_leds,
            inner: Mutex::new(RefCell::new(Inner {
                strip,
                settings,
                transport,
            })),
        })
    }

    pub fn profile(&self) -> &'static ChipProfile {
        self.profile
    }

    /// Number of LEDs on the strip
    pub fn num_leds(&self) -> usize {
        self.num_leds
    }

    /// Time one full-strip write keeps the bus busy
    pub fn frame_duration(&self) -> Duration {
        self.profile
            .transfer_duration(self.num_leds * self.profile.pixel_symbol_size())
    }

    /// Set the LED at `index` and write the whole strip out.
    ///
    /// An out of range index is rejected before anything is touched. A
    /// transport error is returned untouched; the physical strip is then in
    /// an unknown state until the next successful write.
    pub fn set_brightness(
        &self,
        index: usize,
        values: impl Into<ChannelValues>,
    ) -> Result<(), Error<T::Error>> {
        let values = values.into();
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            inner.strip.set_led(index, values)?;
            inner.flush()
        })
    }

    /// Update LEDs from the start of the strip and write the strip out once.
    ///
    /// LEDs past the end of `frame` keep their values. A frame longer than
    /// the strip is rejected without any change.
    pub fn write_frame<I>(&self, frame: I) -> Result<(), Error<T::Error>>
    where
        I: IntoIterator<Item = ChannelValues>,
    {
        let mut staged: Vec<ChannelValues, MAX_LEDS> = Vec::new();
        for (index, values) in frame.into_iter().enumerate() {
            if index >= self.num_leds || staged.push(values).is_err() {
                return Err(OutOfRange {
                    index,
                    len: self.num_leds,
                }
                .into());
            }
        }

        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            for (index, values) in staged.iter().enumerate() {
                inner.strip.set_led(index, *values)?;
            }
            inner.flush()
        })
    }

    /// Write the current state again without changing it.
    ///
    /// Useful to resynchronize the strip after a failed write.
    pub fn refresh(&self) -> Result<(), Error<T::Error>> {
        self.inner.lock(|cell| cell.borrow_mut().flush())
    }

    /// Last values set on the LED at `index`
    pub fn channel_values(&self, index: usize) -> Option<ChannelValues> {
        self.inner.lock(|cell| cell.borrow().strip.led(index))
    }

    /// Run `f` on the encoded strip while holding the update lock.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        self.inner.lock(|cell| f(cell.borrow().strip.snapshot()))
    }

    /// Brightness endpoint for the LED at `index`.
    ///
    /// The color mix and brightness live in the array, so every endpoint for
    /// the same index sees the same settings.
    pub fn led(&self, index: usize) -> Result<MulticolorLed<'_, T, MAX_LEDS, BUF_SIZE, M>, OutOfRange> {
        if index >= self.num_leds {
            return Err(OutOfRange {
                index,
                len: self.num_leds,
            });
        }
        Ok(MulticolorLed::new(self, index))
    }

    /// Endpoint settings of the LED at `index`
    pub(crate) fn settings(&self, index: usize) -> Option<LedSettings> {
        self.inner
            .lock(|cell| cell.borrow().settings.get(index).copied())
    }

    /// Change the color mix of the LED at `index` without touching the strip
    pub(crate) fn set_intensity(&self, index: usize, intensity: ChannelValues) {
        let intensity = intensity.masked(self.profile);
        self.inner.lock(|cell| {
            if let Some(settings) = cell.borrow_mut().settings.get_mut(index) {
                settings.intensity = intensity;
            }
        });
    }

    /// Resolve the LED at `index` from its color mix at `brightness` and
    /// write the whole strip out.
    ///
    /// The brightness is recorded together with the buffer, also when the
    /// write then fails.
    pub(crate) fn apply_brightness(
        &self,
        index: usize,
        brightness: u8,
        max_brightness: u8,
    ) -> Result<(), Error<T::Error>> {
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let inner = &mut *guard;
            let Some(settings) = inner.settings.get_mut(index) else {
                return Err(OutOfRange {
                    index,
                    len: self.num_leds,
                }
                .into());
            };
            let values = settings.intensity.scale(brightness, max_brightness);
            inner.strip.set_led(index, values)?;
            settings.brightness = brightness;
            inner.flush()
        })
    }

    /// Tear the strip down and hand the transport back
    pub fn into_transport(self) -> T {
        self.inner.into_inner().into_inner().transport
    }
}

impl<T, const MAX_LEDS: usize, const BUF_SIZE: usize, M> SmartLedsWrite
    for Ws281xArray<T, MAX_LEDS, BUF_SIZE, M>
where
    T: Transport,
    M: RawMutex,
{
    type Error = Error<T::Error>;
    type Color = RGB8;

    fn write<It, C>(&mut self, iterator: It) -> Result<(), Self::Error>
    where
        It: IntoIterator<Item = C>,
        C: Into<Self::Color>,
    {
        self.write_frame(
            iterator
                .into_iter()
                .map(|color| ChannelValues::from(color.into())),
        )
    }
}
