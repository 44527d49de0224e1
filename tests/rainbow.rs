mod tests {
    use std::f32::consts::PI;

    use glow_composer::{
        ColorTriple, ConfigurationError, Conversion, Effect, EffectConfig, EffectFactory,
        OptionValue, OptionValues, RainbowSingle, RainbowTravelling, Waveform, convert,
        effect::Travelling,
    };

    fn hue_color(hue: f32) -> ColorTriple {
        convert(ColorTriple::hsv(hue, 1.0, 1.0), &[Conversion::ToRgb])
    }

    fn assert_color(actual: ColorTriple, expected: ColorTriple) {
        assert!(actual.approx_eq(expected, 1e-5), "{actual:?} != {expected:?}");
    }

    fn single(led_count: usize, args: &[&str]) -> RainbowSingle {
        let values = RainbowSingle::parser_spec().parse(args.iter().copied()).unwrap();
        RainbowSingle::from_config(EffectConfig::new(led_count, values)).unwrap()
    }

    #[test]
    fn test_single_starts_at_hue_zero() {
        let effect = single(3, &[]);
        assert_eq!(effect.hue(), 0.0);
        assert_eq!(effect.led_count(), 3);
        assert_eq!(effect.settings().stepsize, PI / 1024.0);
        assert_eq!(effect.settings().waveform, Waveform::Linear);
    }

    #[test]
    fn test_single_hue_sequence() {
        let step = 0.01f32;
        let mut effect = single(4, &["--stepsize", "0.01"]);

        for n in 1..=20u32 {
            let frame = effect.advance();
            assert_eq!(effect.frames(), u64::from(n));
            assert_eq!(effect.hue(), f64::from(n) * f64::from(step));
            assert_eq!(frame.len(), 4);
            assert!(frame.is_uniform());
            assert_color(frame[0], hue_color(n as f32 * step));
        }
    }

    #[test]
    fn test_frame_length_is_fixed() {
        let mut effect = single(7, &[]);
        for _ in 0..10 {
            assert_eq!(effect.advance().len(), 7);
        }
    }

    #[test]
    fn test_single_with_sine_waveform() {
        let mut effect = single(2, &["-s", "0.5", "-w", "sin"]);
        let frame = effect.advance();
        assert!(frame.is_uniform());
        assert_color(frame[0], hue_color(Waveform::Sine.sample(0.5)));
    }

    #[test]
    fn test_single_value_and_saturation() {
        let mut effect = single(2, &["--value", "0.5", "--saturation", "0"]);
        let frame = effect.advance();
        assert_eq!(frame[0], ColorTriple::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_travelling_offsets_hue_per_led() {
        let values = RainbowTravelling::parser_spec().defaults();
        let mut effect = RainbowTravelling::from_config(EffectConfig::new(4, values)).unwrap();
        assert_eq!(*effect.layout(), Travelling::new(0.25));

        let step = PI / 1024.0;
        let frame = effect.advance();
        assert!(!frame.is_uniform());
        for (i, color) in frame.iter().enumerate() {
            assert_color(*color, hue_color(step + i as f32 * 0.25));
        }
    }

    #[test]
    fn test_hue_keeps_advancing_on_long_runs() {
        // Every frame still moves the phase by one step this far into a run
        let stepsize = f64::from(PI / 1024.0);
        for mut effect in [single(1, &[]), single(1, &["-w", "sin"])] {
            effect.skip(1 << 24);
            let mut previous = effect.advance();
            for n in 1..=64u64 {
                let frame = effect.advance();
                let expected = ((1u64 << 24) + 1 + n) as f64 * stepsize;
                assert!((effect.hue() - expected).abs() < 1e-9);
                assert_ne!(frame, previous, "frame {n} repeated");
                previous = frame;
            }
        }
    }

    #[test]
    fn test_skip_matches_advance() {
        let mut stepped = single(3, &["-s", "0.37", "-w", "sin2"]);
        let mut skipped = single(3, &["-s", "0.37", "-w", "sin2"]);
        for _ in 0..100 {
            stepped.advance();
        }
        skipped.skip(100);
        assert_eq!(skipped.hue(), stepped.hue());
        assert_eq!(skipped.advance(), stepped.advance());
    }

    #[test]
    fn test_travelling_spread() {
        let values = RainbowTravelling::parser_spec()
            .parse(["--spread", "2"])
            .unwrap();
        let effect = RainbowTravelling::from_config(EffectConfig::new(8, values)).unwrap();
        assert_eq!(effect.layout().offset(), 0.25);
    }

    #[test]
    fn test_missing_stepsize_is_rejected() {
        let result = RainbowSingle::from_config(EffectConfig::new(3, OptionValues::new()));
        assert_eq!(
            result.unwrap_err(),
            ConfigurationError::MissingOption("stepsize")
        );
    }

    #[test]
    fn test_only_stepsize_is_required() {
        let mut values = OptionValues::new();
        values.set("stepsize", OptionValue::Float(0.1)).unwrap();
        let effect = RainbowSingle::from_config(EffectConfig::new(3, values)).unwrap();
        assert_eq!(effect.settings().waveform, Waveform::Linear);
        assert_eq!(effect.settings().saturation, 1.0);
        assert_eq!(effect.settings().value, 1.0);
    }

    #[test]
    fn test_non_positive_stepsize_is_rejected() {
        for stepsize in [0.0, -0.5] {
            let mut values = OptionValues::new();
            values.set("stepsize", OptionValue::Float(stepsize)).unwrap();
            let result = RainbowSingle::from_config(EffectConfig::new(3, values));
            assert!(matches!(
                result,
                Err(ConfigurationError::OutOfRange {
                    option: "stepsize",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_zero_leds_is_rejected() {
        let config = EffectConfig::with_defaults(0, &RainbowSingle::parser_spec());
        assert_eq!(
            RainbowSingle::from_config(config).unwrap_err(),
            ConfigurationError::NoLeds
        );

        let config = EffectConfig::with_defaults(0, &RainbowTravelling::parser_spec());
        assert_eq!(
            RainbowTravelling::from_config(config).unwrap_err(),
            ConfigurationError::NoLeds
        );
    }

    #[test]
    fn test_wrong_option_kind_is_rejected() {
        let mut values = OptionValues::new();
        values.set("stepsize", OptionValue::Float(0.1)).unwrap();
        values.set("waveform", OptionValue::Float(1.0)).unwrap();
        assert_eq!(
            RainbowSingle::from_config(EffectConfig::new(3, values)).unwrap_err(),
            ConfigurationError::TypeMismatch("waveform")
        );
    }

    #[test]
    fn test_unknown_waveform_is_rejected() {
        let mut values = OptionValues::new();
        values.set("stepsize", OptionValue::Float(0.1)).unwrap();
        values.set("waveform", OptionValue::Choice("square")).unwrap();
        assert!(matches!(
            RainbowSingle::from_config(EffectConfig::new(3, values)),
            Err(ConfigurationError::InvalidChoice {
                option: "waveform",
                ..
            })
        ));
    }
}
