#![no_std]

extern crate alloc;

pub mod color;
pub mod config;
pub mod effect;
pub mod error;
pub mod frame;
pub mod frame_scheduler;
pub mod registry;
pub mod shared;
pub mod waveform;

pub use color::{ColorTriple, Conversion, Rgb, convert};
pub use config::{Check, EffectConfig, OptionKind, OptionSpec, OptionValue, OptionValues, ParserSpec};
pub use effect::{BoxedEffect, Effect, EffectFactory, Rainbow, RainbowSingle, RainbowTravelling};
pub use error::{ConfigurationError, Error, LoadError, LoadErrorKind, RegistryError, Result};
pub use frame::Frame;
pub use frame_scheduler::FrameScheduler;
pub use registry::{EffectModule, EffectModuleHandle, EffectRegistry, Plugin};
pub use shared::SharedEffect;
pub use waveform::Waveform;

pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
