#![allow(dead_code)]

use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
use ws281x_spi::{BusConfig, ChipProfile, SpiTransport};

/// SPI bus that records every write and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingSpi {
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
    pub fail_next: Option<ErrorKind>,
}

impl ErrorType for RecordingSpi {
    type Error = ErrorKind;
}

impl SpiBus<u8> for RecordingSpi {
    fn read(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), ErrorKind> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        self.writes.push(words.to_vec());
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ErrorKind> {
        read.fill(0);
        SpiBus::write(self, write)
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
        SpiBus::write(self, words)
    }

    fn flush(&mut self) -> Result<(), ErrorKind> {
        self.flushes += 1;
        Ok(())
    }
}

pub fn spi_transport(profile: &ChipProfile) -> SpiTransport<RecordingSpi> {
    SpiTransport::new(
        RecordingSpi::default(),
        &BusConfig::for_profile(profile),
        profile,
    )
    .expect("bus setup matches the profile")
}

/// Encoded symbols of one channel value, built bit by bit.
pub fn expected_channel(profile: &ChipProfile, value: u8) -> Vec<u8> {
    (0..8)
        .rev()
        .map(|bit| {
            if (value >> bit) & 1 == 1 {
                profile.one_symbol
            } else {
                profile.zero_symbol
            }
        })
        .collect()
}
