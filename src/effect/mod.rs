//! Effect system
//!
//! An effect is a stateful frame generator. Each call to [`Effect::advance`]
//! moves its phase forward by one step and renders the whole strip.
//! Effects that can be built from options also implement [`EffectFactory`],
//! which is what the registry loads.

mod rainbow;

use alloc::boxed::Box;

pub use rainbow::{
    HueLayout, Rainbow, RainbowSettings, RainbowSingle, RainbowTravelling, Single, Travelling,
};

use crate::{
    config::{EffectConfig, ParserSpec},
    error::ConfigurationError,
    frame::Frame,
};

pub const EFFECT_NAME_RAINBOW: &str = "Rainbow";
pub const EFFECT_NAME_RAINBOW_SINGLE: &str = "RainbowSingle";

pub trait Effect {
    /// Step the phase once and render the resulting frame
    fn advance(&mut self) -> Frame;

    /// Number of LEDs in every frame this effect renders
    fn led_count(&self) -> usize;
}

/// Effects that declare their options and can be built from them
pub trait EffectFactory: Effect + Sized {
    /// Options this effect understands
    fn parser_spec() -> ParserSpec;

    /// Build a ready-to-advance instance
    fn from_config(config: EffectConfig) -> Result<Self, ConfigurationError>;
}

/// Heap-allocated effect handed out by the registry
pub type BoxedEffect = Box<dyn Effect + Send>;

impl<E: Effect + ?Sized> Effect for Box<E> {
    fn advance(&mut self) -> Frame {
        (**self).advance()
    }

    fn led_count(&self) -> usize {
        (**self).led_count()
    }
}
