//! Stateless waveform generators
//!
//! Each generator maps `(phase, step, count)` to `count` values where the
//! `i`-th value is the waveform sampled at `phase + i * step`. Generators are
//! lazy iterators; calling one twice with the same arguments yields the same
//! values.

const WAVEFORM_NAME_LINEAR: &str = "lin";
const WAVEFORM_NAME_SINE: &str = "sin";
const WAVEFORM_NAME_SINE_SQUARED: &str = "sin2";

/// Names accepted by [`Waveform::parse_from_str`], in declaration order
pub const WAVEFORM_NAMES: &[&str] = &[
    WAVEFORM_NAME_LINEAR,
    WAVEFORM_NAME_SINE,
    WAVEFORM_NAME_SINE_SQUARED,
];

/// Waveform selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// `x`, unbounded
    #[default]
    Linear,
    /// `0.5 * sin(x) + 1`, ranges over `[0.5, 1.5]`
    Sine,
    /// `sin(x)^2`, ranges over `[0, 1]`
    SineSquared,
}

impl Waveform {
    /// Sample the waveform at `x`
    #[inline]
    pub fn sample(self, x: f32) -> f32 {
        match self {
            Self::Linear => x,
            // The offset is +1, not +0.5: the result does not stay within [0, 1]
            Self::Sine => 0.5 * libm::sinf(x) + 1.0,
            Self::SineSquared => {
                let s = libm::sinf(x);
                s * s
            }
        }
    }

    /// Sample the waveform at `x` in double precision, for phases too large
    /// to step accurately as `f32`
    #[inline]
    pub fn sample_f64(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Sine => 0.5 * libm::sin(x) + 1.0,
            Self::SineSquared => {
                let s = libm::sin(x);
                s * s
            }
        }
    }

    /// Generate `count` values starting at `phase`, `step` apart
    #[allow(clippy::cast_precision_loss)]
    pub fn values(
        self,
        phase: f32,
        step: f32,
        count: usize,
    ) -> impl ExactSizeIterator<Item = f32> + Clone {
        (0..count).map(move |i| self.sample(phase + i as f32 * step))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => WAVEFORM_NAME_LINEAR,
            Self::Sine => WAVEFORM_NAME_SINE,
            Self::SineSquared => WAVEFORM_NAME_SINE_SQUARED,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            WAVEFORM_NAME_LINEAR => Some(Self::Linear),
            WAVEFORM_NAME_SINE => Some(Self::Sine),
            WAVEFORM_NAME_SINE_SQUARED => Some(Self::SineSquared),
            _ => None,
        }
    }
}

/// Linear ramp: `phase + i * step`
pub fn linear(phase: f32, step: f32, count: usize) -> impl ExactSizeIterator<Item = f32> + Clone {
    Waveform::Linear.values(phase, step, count)
}

/// Sine: `0.5 * sin(phase + i * step) + 1`
///
/// Note the range is `[0.5, 1.5]`. Callers feeding a saturation or value
/// channel get the excess clamped by the color conversion.
pub fn sine(phase: f32, step: f32, count: usize) -> impl ExactSizeIterator<Item = f32> + Clone {
    Waveform::Sine.values(phase, step, count)
}

/// Sine squared: `sin(phase + i * step)^2`, within `[0, 1]`
pub fn sine_squared(
    phase: f32,
    step: f32,
    count: usize,
) -> impl ExactSizeIterator<Item = f32> + Clone {
    Waveform::SineSquared.values(phase, step, count)
}
