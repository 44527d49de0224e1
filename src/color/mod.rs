mod conversion;

use smart_leds::RGB8;

pub use conversion::{Conversion, GAMMA, convert, gamma_correct, hsv_to_rgb, rgb_to_hsv};

/// Hardware color as written to the strip
pub type Rgb = RGB8;

/// Ordered triple of color components.
///
/// The same type carries both the abstract (hue, saturation, value) and the
/// hardware (red, green, blue) representation; which one it holds is decided
/// by the conversion steps applied to it. Components are nominally in
/// `[0, 1]`, hue is cyclic with period 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorTriple(pub [f32; 3]);

impl ColorTriple {
    /// Black, or hue 0 with no saturation and value
    pub const BLACK: Self = Self([0.0, 0.0, 0.0]);

    pub const fn new(first: f32, second: f32, third: f32) -> Self {
        Self([first, second, third])
    }

    /// Abstract hue/saturation/value triple
    pub const fn hsv(hue: f32, saturation: f32, value: f32) -> Self {
        Self::new(hue, saturation, value)
    }

    /// Hardware red/green/blue triple
    pub const fn rgb(red: f32, green: f32, blue: f32) -> Self {
        Self::new(red, green, blue)
    }

    pub const fn components(self) -> [f32; 3] {
        self.0
    }

    /// Quantize a hardware triple to 8-bit channels.
    ///
    /// Channels are clamped to `[0, 1]` and rounded to the nearest step.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> Rgb {
        let [r, g, b] = self.0;
        let quantize = |c: f32| libm::roundf(conversion::unit(c) * 255.0) as u8;
        Rgb {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
        }
    }

    /// Component-wise comparison with an absolute tolerance
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| libm::fabsf(a - b) <= epsilon)
    }
}

impl From<[f32; 3]> for ColorTriple {
    fn from(components: [f32; 3]) -> Self {
        Self(components)
    }
}
