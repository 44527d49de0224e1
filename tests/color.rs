mod tests {
    use glow_composer::color::{
        ColorTriple, Conversion, Rgb, convert, gamma_correct, hsv_to_rgb, rgb_to_hsv,
    };

    const EPSILON: f32 = 1e-5;

    const RED: ColorTriple = ColorTriple::rgb(1.0, 0.0, 0.0);
    const GREEN: ColorTriple = ColorTriple::rgb(0.0, 1.0, 0.0);
    const BLUE: ColorTriple = ColorTriple::rgb(0.0, 0.0, 1.0);

    fn assert_close(actual: ColorTriple, expected: ColorTriple) {
        assert!(
            actual.approx_eq(expected, EPSILON),
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_hsv_primary_colors() {
        assert_close(hsv_to_rgb(ColorTriple::hsv(0.0, 1.0, 1.0)), RED);
        assert_close(hsv_to_rgb(ColorTriple::hsv(1.0 / 3.0, 1.0, 1.0)), GREEN);
        assert_close(hsv_to_rgb(ColorTriple::hsv(2.0 / 3.0, 1.0, 1.0)), BLUE);
        assert_close(
            hsv_to_rgb(ColorTriple::hsv(0.5, 1.0, 1.0)),
            ColorTriple::rgb(0.0, 1.0, 1.0),
        );
    }

    #[test]
    fn test_hsv_saturation_and_value() {
        assert_close(
            hsv_to_rgb(ColorTriple::hsv(0.3, 0.0, 0.5)),
            ColorTriple::rgb(0.5, 0.5, 0.5),
        );
        assert_close(
            hsv_to_rgb(ColorTriple::hsv(0.0, 1.0, 0.5)),
            ColorTriple::rgb(0.5, 0.0, 0.0),
        );
        assert_close(hsv_to_rgb(ColorTriple::hsv(0.7, 1.0, 0.0)), ColorTriple::BLACK);
    }

    #[test]
    fn test_hue_wraps_with_period_one() {
        let base = hsv_to_rgb(ColorTriple::hsv(0.25, 1.0, 1.0));
        assert_close(base, ColorTriple::rgb(0.5, 1.0, 0.0));
        assert_close(hsv_to_rgb(ColorTriple::hsv(1.25, 1.0, 1.0)), base);
        assert_close(hsv_to_rgb(ColorTriple::hsv(-0.75, 1.0, 1.0)), base);
        assert_close(hsv_to_rgb(ColorTriple::hsv(7.25, 1.0, 1.0)), base);
        assert_close(hsv_to_rgb(ColorTriple::hsv(1.0, 1.0, 1.0)), RED);
    }

    #[test]
    fn test_saturation_and_value_are_clamped() {
        assert_close(hsv_to_rgb(ColorTriple::hsv(0.0, 2.0, 1.5)), RED);
        assert_close(
            hsv_to_rgb(ColorTriple::hsv(0.0, -1.0, 0.5)),
            ColorTriple::rgb(0.5, 0.5, 0.5),
        );
        assert_close(hsv_to_rgb(ColorTriple::hsv(0.0, 1.0, -3.0)), ColorTriple::BLACK);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let input = ColorTriple::hsv(123.456, 0.8, 0.9);
        assert_eq!(hsv_to_rgb(input), hsv_to_rgb(input));
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            ColorTriple::hsv(0.1, 0.5, 0.8),
            ColorTriple::hsv(0.55, 1.0, 0.3),
            ColorTriple::hsv(0.9, 0.25, 1.0),
            ColorTriple::hsv(0.4, 0.75, 0.6),
        ];
        for hsv in samples {
            let back = convert(hsv, &[Conversion::ToRgb, Conversion::ToHsv]);
            assert!(back.approx_eq(hsv, 1e-4), "{back:?} != {hsv:?}");
        }
    }

    #[test]
    fn test_rgb_to_hsv_achromatic() {
        assert_close(
            rgb_to_hsv(ColorTriple::rgb(0.4, 0.4, 0.4)),
            ColorTriple::hsv(0.0, 0.0, 0.4),
        );
        assert_close(rgb_to_hsv(ColorTriple::BLACK), ColorTriple::BLACK);
    }

    #[test]
    fn test_identity_pipeline() {
        let input = ColorTriple::new(4.0, -2.0, 0.5);
        assert_eq!(convert(input, &[]), input);
    }

    #[test]
    fn test_pipeline_applies_left_to_right() {
        let input = ColorTriple::hsv(0.0, 1.0, 0.5);
        let expected = gamma_correct(hsv_to_rgb(input));
        assert_eq!(convert(input, &[Conversion::ToRgb, Conversion::Gamma]), expected);
        assert!((expected.0[0] - 0.5f32.powf(2.2)).abs() < EPSILON);
    }

    #[test]
    fn test_to_rgb8() {
        assert_eq!(
            ColorTriple::rgb(1.0, 0.5, 0.0).to_rgb8(),
            Rgb {
                r: 255,
                g: 128,
                b: 0
            }
        );
        assert_eq!(
            ColorTriple::rgb(1.7, -0.2, 0.2).to_rgb8(),
            Rgb {
                r: 255,
                g: 0,
                b: 51
            }
        );
    }
}
