//! Color space conversion steps
//!
//! Every step is a pure `ColorTriple -> ColorTriple` function. Steps never
//! fail: hue is wrapped onto the `[0, 1)` wheel and every other component is
//! clamped to `[0, 1]` before use, so any finite input converts to exactly
//! one output.

use super::ColorTriple;

const CONVERSION_NAME_TO_RGB: &str = "to_rgb";
const CONVERSION_NAME_TO_HSV: &str = "to_hsv";
const CONVERSION_NAME_GAMMA: &str = "gamma";

/// Exponent used by the gamma step
pub const GAMMA: f32 = 2.2;

/// Named conversion step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// Hue/saturation/value to red/green/blue
    ToRgb,
    /// Red/green/blue to hue/saturation/value
    ToHsv,
    /// Perceptual correction of red/green/blue channels
    Gamma,
}

impl Conversion {
    /// Apply this step to a triple
    pub fn apply(self, triple: ColorTriple) -> ColorTriple {
        match self {
            Self::ToRgb => hsv_to_rgb(triple),
            Self::ToHsv => rgb_to_hsv(triple),
            Self::Gamma => gamma_correct(triple),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToRgb => CONVERSION_NAME_TO_RGB,
            Self::ToHsv => CONVERSION_NAME_TO_HSV,
            Self::Gamma => CONVERSION_NAME_GAMMA,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            CONVERSION_NAME_TO_RGB => Some(Self::ToRgb),
            CONVERSION_NAME_TO_HSV => Some(Self::ToHsv),
            CONVERSION_NAME_GAMMA => Some(Self::Gamma),
            _ => None,
        }
    }
}

/// Run `triple` through `pipeline`, left to right.
///
/// An empty pipeline returns the input unchanged.
pub fn convert(triple: ColorTriple, pipeline: &[Conversion]) -> ColorTriple {
    pipeline.iter().fold(triple, |acc, step| step.apply(acc))
}

/// Clamp a component to `[0, 1]`
#[inline]
pub(super) fn unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Wrap a hue onto the `[0, 1)` wheel
#[inline]
pub(super) fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue - libm::floorf(hue);
    // Tiny negative inputs round up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

/// Convert hue/saturation/value to red/green/blue.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hsv_to_rgb(hsv: ColorTriple) -> ColorTriple {
    let [hue, saturation, value] = hsv.0;
    let hue = wrap_hue(hue);
    let saturation = unit(saturation);
    let value = unit(value);

    if saturation == 0.0 {
        return ColorTriple::rgb(value, value, value);
    }

    // Hues just below 1.0 can round up to a full turn
    let h6 = hue * 6.0;
    let h6 = if h6 >= 6.0 { 0.0 } else { h6 };
    let sector = libm::floorf(h6);
    let frac = h6 - sector;

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * frac);
    let t = value * (1.0 - saturation * (1.0 - frac));

    let (r, g, b) = match sector as u8 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    ColorTriple::rgb(r, g, b)
}

/// Convert red/green/blue to hue/saturation/value.
///
/// Achromatic colors (all channels equal) report hue 0.
pub fn rgb_to_hsv(rgb: ColorTriple) -> ColorTriple {
    let [r, g, b] = rgb.0.map(unit);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let value = max;
    if max == min {
        return ColorTriple::hsv(0.0, 0.0, value);
    }

    let delta = max - min;
    let saturation = delta / max;

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;

    let sector = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ColorTriple::hsv(wrap_hue(sector / 6.0), saturation, value)
}

/// Raise every channel to [`GAMMA`].
pub fn gamma_correct(rgb: ColorTriple) -> ColorTriple {
    ColorTriple(rgb.0.map(|c| libm::powf(unit(c), GAMMA)))
}
