mod tests {
    use embassy_time::Duration;
    use ws281x_spi::{
        ChannelRole, ChipProfile, ConfigError, SK6812_RGBW, WS2811, WS2812B, buffer_size,
    };

    const BROKEN: ChipProfile = ChipProfile {
        name: "broken",
        ..WS2812B
    };

    #[test]
    fn test_builtin_profiles_are_valid() {
        for profile in [WS2812B, WS2811, SK6812_RGBW] {
            assert_eq!(profile.validate(), Ok(()), "{}", profile.name);
        }
    }

    #[test]
    fn test_ws2812b_calibration() {
        assert_eq!(WS2812B.zero_symbol, 0xC0);
        assert_eq!(WS2812B.one_symbol, 0xFC);
        assert_eq!(WS2812B.bus_frequency, 6_400_000);
        assert_eq!(WS2812B.channels_per_led(), 3);
        assert_eq!(WS2812B.pixel_symbol_size(), 24);
        assert_eq!(
            WS2812B.channel_order,
            &[ChannelRole::Green, ChannelRole::Red, ChannelRole::Blue]
        );
        assert!(!WS2812B.has_channel(ChannelRole::White));
        assert!(SK6812_RGBW.has_channel(ChannelRole::White));
    }

    #[test]
    fn test_buffer_size() {
        assert_eq!(buffer_size(3, &WS2812B), 72);
        assert_eq!(buffer_size(10, &SK6812_RGBW), 320);
        assert_eq!(buffer_size(0, &WS2811), 0);
    }

    #[test]
    fn test_transfer_duration() {
        // 72 bytes * 8 bits at 6.4 MHz
        assert_eq!(WS2812B.transfer_duration(72), Duration::from_micros(90));
        // 24 bytes * 8 bits at 3.2 MHz
        assert_eq!(WS2811.transfer_duration(24), Duration::from_micros(60));
        // 1 byte at 6.4 MHz rounds up
        assert_eq!(WS2812B.transfer_duration(1), Duration::from_micros(2));
    }

    #[test]
    fn test_rejects_wrong_bus_frequency() {
        let profile = ChipProfile {
            bus_frequency: 6_000_000,
            ..BROKEN
        };
        assert_eq!(
            profile.validate(),
            Err(ConfigError::BusFrequency {
                bit_rate: 800_000,
                bus_frequency: 6_000_000
            })
        );
    }

    #[test]
    fn test_rejects_bad_channel_layout() {
        let two = ChipProfile {
            channel_order: &[ChannelRole::Red, ChannelRole::Green],
            ..BROKEN
        };
        assert_eq!(two.validate(), Err(ConfigError::ChannelCount { found: 2 }));

        let duplicated = ChipProfile {
            channel_order: &[ChannelRole::Red, ChannelRole::Green, ChannelRole::Red],
            ..BROKEN
        };
        assert_eq!(
            duplicated.validate(),
            Err(ConfigError::DuplicateChannel {
                role: ChannelRole::Red
            })
        );

        let wide = ChipProfile {
            bits_per_channel: 16,
            ..BROKEN
        };
        assert_eq!(
            wide.validate(),
            Err(ConfigError::BitsPerChannel { found: 16 })
        );
    }

    #[test]
    fn test_rejects_bad_symbols() {
        let same = ChipProfile {
            one_symbol: 0xC0,
            ..BROKEN
        };
        assert_eq!(
            same.validate(),
            Err(ConfigError::IndistinctSymbols {
                zero: 0xC0,
                one: 0xC0
            })
        );

        let swapped = ChipProfile {
            zero_symbol: 0xFC,
            one_symbol: 0xC0,
            ..BROKEN
        };
        assert!(matches!(
            swapped.validate(),
            Err(ConfigError::IndistinctSymbols { .. })
        ));

        let low = ChipProfile {
            zero_symbol: 0x03,
            ..BROKEN
        };
        assert_eq!(
            low.validate(),
            Err(ConfigError::SymbolStartsLow { symbol: 0x03 })
        );
    }
}
