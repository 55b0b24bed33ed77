//! Subpixel encoding: one 8-bit channel value into bus symbols.

use crate::profile::{ChipProfile, SYMBOLS_PER_CHANNEL};

/// Encode one channel value, most significant bit first.
pub fn encode_subpixel(profile: &ChipProfile, value: u8) -> [u8; SYMBOLS_PER_CHANNEL] {
    let mut symbols = [profile.zero_symbol; SYMBOLS_PER_CHANNEL];
    encode_subpixel_into(profile, value, &mut symbols);
    symbols
}

/// Encode one channel value into the front of `out`.
///
/// Writes `min(out.len(), 8)` symbols.
#[inline]
pub fn encode_subpixel_into(profile: &ChipProfile, mut value: u8, out: &mut [u8]) {
    for symbol in out.iter_mut().take(SYMBOLS_PER_CHANNEL) {
        *symbol = if value & 0x80 == 0 {
            profile.zero_symbol
        } else {
            profile.one_symbol
        };
        value <<= 1;
    }
}

/// Decode a channel back from its symbols.
///
/// Returns `None` unless `symbols` holds exactly one channel worth of valid
/// zero or one symbols.
pub fn decode_subpixel(profile: &ChipProfile, symbols: &[u8]) -> Option<u8> {
    if symbols.len() != SYMBOLS_PER_CHANNEL {
        return None;
    }
    symbols.iter().try_fold(0u8, |value, &symbol| {
        let bit = match symbol {
            s if s == profile.one_symbol => 1,
            s if s == profile.zero_symbol => 0,
            _ => return None,
        };
        Some((value << 1) | bit)
    })
}
