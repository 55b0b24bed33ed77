//! WS281x LED strips driven over a generic SPI bus.
//!
//! Every protocol bit is sent as one SPI byte at 8x the controller's bit
//! rate, with a bit pattern whose high and low phases reproduce the timing
//! the controller expects. The whole strip is kept encoded in one buffer and
//! re-sent on every change.
#![no_std]

pub mod array;
pub mod encoder;
pub mod error;
pub mod led;
pub mod lock;
pub mod pixel;
pub mod profile;
pub mod strip;
pub mod transport;

pub use array::Ws281xArray;
pub use encoder::{decode_subpixel, encode_subpixel, encode_subpixel_into};
pub use error::{CapacityError, ConfigError, Error, OutOfRange, Resource};
pub use led::{BrightnessSettable, MulticolorLed};
pub use lock::SpinRawMutex;
pub use pixel::{ChannelValues, PixelSymbols, format_pixel, format_pixel_into};
pub use profile::{ChannelRole, ChipProfile, SK6812_RGBW, WS2811, WS2812B, buffer_size};
pub use strip::StripBuffer;
pub use transport::{BusConfig, SpiTransport, Transport};

pub use smart_leds::RGB8;
