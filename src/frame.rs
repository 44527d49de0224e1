//! One complete set of per-LED colors

use alloc::vec::Vec;
use core::ops::Index;

use crate::color::{ColorTriple, Rgb};

/// Ordered per-LED colors for a single animation tick.
///
/// The length is set on creation and cannot change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    leds: Vec<ColorTriple>,
}

impl Frame {
    /// Build a frame of `len` LEDs, computing each color from its index
    pub fn from_fn(len: usize, color_at: impl FnMut(usize) -> ColorTriple) -> Self {
        Self {
            leds: (0..len).map(color_at).collect(),
        }
    }

    /// Build a frame with every LED set to `color`
    pub fn filled(len: usize, color: ColorTriple) -> Self {
        Self {
            leds: alloc::vec![color; len],
        }
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    pub fn as_slice(&self) -> &[ColorTriple] {
        &self.leds
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ColorTriple> {
        self.leds.iter()
    }

    /// Check if every LED holds the same color
    pub fn is_uniform(&self) -> bool {
        self.leds.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// Quantize the frame into an 8-bit output buffer.
    ///
    /// Writes `min(self.len(), out.len())` LEDs and returns that count.
    pub fn write_rgb8(&self, out: &mut [Rgb]) -> usize {
        let mut written = 0;
        for (slot, color) in out.iter_mut().zip(self.leds.iter()) {
            *slot = color.to_rgb8();
            written += 1;
        }
        written
    }
}

impl Index<usize> for Frame {
    type Output = ColorTriple;

    fn index(&self, index: usize) -> &Self::Output {
        &self.leds[index]
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a ColorTriple;
    type IntoIter = core::slice::Iter<'a, ColorTriple>;

    fn into_iter(self) -> Self::IntoIter {
        self.leds.iter()
    }
}
