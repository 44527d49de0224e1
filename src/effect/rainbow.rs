//! Rainbow cycling effects
//!
//! Both variants share one skeleton: every frame the base hue moves forward
//! by the configured step size, then each LED's hue is derived from the base
//! hue by a [`HueLayout`], shaped by the selected waveform and converted to
//! RGB.
//! - `RainbowSingle`: the whole strip shows one color cycling through the wheel
//! - `RainbowTravelling`: the wheel is spread along the strip and travels

use core::f32::consts::PI;

use super::{Effect, EffectFactory};
use crate::{
    color::{ColorTriple, Conversion, convert},
    config::{Check, EffectConfig, OptionSpec, ParserSpec},
    error::ConfigurationError,
    frame::Frame,
    waveform::{WAVEFORM_NAMES, Waveform},
};

const DEFAULT_STEPSIZE: f32 = PI / 1024.0;
const DEFAULT_SPREAD: f32 = 1.0;
const UNIT_RANGE: Check = Check::Range { min: 0.0, max: 1.0 };

const PARSER_DESCRIPTION: &str = "Effect options:";
const HUE_TO_RGB: &[Conversion] = &[Conversion::ToRgb];

const STEPSIZE: OptionSpec = OptionSpec::float(
    "stepsize",
    "rainbow color stepsize",
    DEFAULT_STEPSIZE,
    Check::Positive,
)
.with_short('s');
const WAVEFORM: OptionSpec = OptionSpec::choice(
    "waveform",
    "waveform shaping the hue",
    Waveform::Linear.as_str(),
    WAVEFORM_NAMES,
)
.with_short('w');
const SATURATION: OptionSpec = OptionSpec::float("saturation", "color saturation", 1.0, UNIT_RANGE);
const VALUE: OptionSpec = OptionSpec::float("value", "color brightness", 1.0, UNIT_RANGE);
const SPREAD: OptionSpec = OptionSpec::float(
    "spread",
    "fraction of the color wheel shown along the strip",
    DEFAULT_SPREAD,
    Check::Positive,
);

const SINGLE_OPTIONS: &[OptionSpec] = &[STEPSIZE, WAVEFORM, SATURATION, VALUE];
const TRAVELLING_OPTIONS: &[OptionSpec] = &[STEPSIZE, WAVEFORM, SATURATION, VALUE, SPREAD];

/// Treat a missing option as its default, keep every other error
fn or_default<T>(
    result: Result<T, ConfigurationError>,
    default: T,
) -> Result<T, ConfigurationError> {
    match result {
        Err(ConfigurationError::MissingOption(_)) => Ok(default),
        other => other,
    }
}

/// Settings shared by every rainbow variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowSettings {
    /// Number of LEDs
    pub led_count: usize,
    /// Hue advance per frame
    pub stepsize: f32,
    /// Waveform applied to each LED's hue
    pub waveform: Waveform,
    /// Saturation (0.0-1.0)
    pub saturation: f32,
    /// Brightness value (0.0-1.0)
    pub value: f32,
}

impl RainbowSettings {
    /// Extract and validate settings.
    ///
    /// `stepsize` is required; waveform, saturation and value fall back to
    /// their defaults when absent.
    pub fn from_config(config: &EffectConfig) -> Result<Self, ConfigurationError> {
        if config.led_count() == 0 {
            return Err(ConfigurationError::NoLeds);
        }

        let stepsize = config.checked_float(STEPSIZE.name, Check::Positive)?;
        let waveform_name = or_default(config.choice(WAVEFORM.name), Waveform::Linear.as_str())?;
        let waveform = Waveform::parse_from_str(waveform_name).ok_or_else(|| {
            ConfigurationError::InvalidChoice {
                option: WAVEFORM.name,
                value: waveform_name.into(),
            }
        })?;
        let saturation = or_default(config.checked_float(SATURATION.name, UNIT_RANGE), 1.0)?;
        let value = or_default(config.checked_float(VALUE.name, UNIT_RANGE), 1.0)?;

        Ok(Self {
            led_count: config.led_count(),
            stepsize,
            waveform,
            saturation,
            value,
        })
    }
}

/// Derives each LED's hue from the frame's base hue
pub trait HueLayout: Sized + Send {
    /// Options understood by a rainbow using this layout
    const OPTIONS: &'static [OptionSpec];

    /// Build the layout from the effect config and the already validated
    /// shared settings
    fn from_config(
        config: &EffectConfig,
        settings: &RainbowSettings,
    ) -> Result<Self, ConfigurationError>;

    /// Hue of the LED at `index` given the current base hue
    fn hue_for_index(&self, base_hue: f64, index: usize) -> f64;
}

/// Every LED shows the base hue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Single;

impl HueLayout for Single {
    const OPTIONS: &'static [OptionSpec] = SINGLE_OPTIONS;

    fn from_config(
        _config: &EffectConfig,
        _settings: &RainbowSettings,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self)
    }

    #[inline]
    fn hue_for_index(&self, base_hue: f64, _index: usize) -> f64 {
        base_hue
    }
}

/// Hue grows by a fixed offset per LED
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Travelling {
    /// Hue offset between neighbouring LEDs
    offset: f32,
}

impl Travelling {
    pub const fn new(offset: f32) -> Self {
        Self { offset }
    }

    pub const fn offset(&self) -> f32 {
        self.offset
    }
}

impl HueLayout for Travelling {
    const OPTIONS: &'static [OptionSpec] = TRAVELLING_OPTIONS;

    #[allow(clippy::cast_precision_loss)]
    fn from_config(
        config: &EffectConfig,
        settings: &RainbowSettings,
    ) -> Result<Self, ConfigurationError> {
        let spread = or_default(config.checked_float(SPREAD.name, Check::Positive), DEFAULT_SPREAD)?;
        // led_count is non-zero once settings exist
        Ok(Self::new(spread / settings.led_count as f32))
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn hue_for_index(&self, base_hue: f64, index: usize) -> f64 {
        base_hue + index as f64 * f64::from(self.offset)
    }
}

/// Rainbow effect skeleton
///
/// Holds the shared settings and the number of frames rendered so far; the
/// base hue is `frames * stepsize`, computed in `f64` so it keeps advancing
/// on long runs. The layout decides how the hue varies along the strip.
#[derive(Debug, Clone)]
pub struct Rainbow<L> {
    settings: RainbowSettings,
    layout: L,
    frames: u64,
}

/// One color for the whole strip
pub type RainbowSingle = Rainbow<Single>;

/// Color wheel laid along the strip
pub type RainbowTravelling = Rainbow<Travelling>;

impl<L: HueLayout> Rainbow<L> {
    pub const fn new(settings: RainbowSettings, layout: L) -> Self {
        Self {
            settings,
            layout,
            frames: 0,
        }
    }

    /// Current base hue, starts at 0 and grows without bound
    #[allow(clippy::cast_precision_loss)]
    pub fn hue(&self) -> f64 {
        self.frames as f64 * f64::from(self.settings.stepsize)
    }

    /// Number of steps taken so far
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Move the phase forward by `frames` steps without rendering
    pub fn skip(&mut self, frames: u64) {
        self.frames = self.frames.wrapping_add(frames);
    }

    pub const fn settings(&self) -> &RainbowSettings {
        &self.settings
    }

    pub const fn layout(&self) -> &L {
        &self.layout
    }

    #[allow(clippy::cast_possible_truncation)]
    fn color_at(&self, base_hue: f64, index: usize) -> ColorTriple {
        let hue = self
            .settings
            .waveform
            .sample_f64(self.layout.hue_for_index(base_hue, index));
        // Narrow only after dropping whole turns of the wheel
        let hue = (hue - libm::floor(hue)) as f32;
        convert(
            ColorTriple::hsv(hue, self.settings.saturation, self.settings.value),
            HUE_TO_RGB,
        )
    }
}

impl<L: HueLayout> Effect for Rainbow<L> {
    fn advance(&mut self) -> Frame {
        self.skip(1);
        let base_hue = self.hue();
        Frame::from_fn(self.settings.led_count, |index| {
            self.color_at(base_hue, index)
        })
    }

    fn led_count(&self) -> usize {
        self.settings.led_count
    }
}

impl<L: HueLayout> EffectFactory for Rainbow<L> {
    fn parser_spec() -> ParserSpec {
        ParserSpec::new(PARSER_DESCRIPTION, L::OPTIONS)
    }

    fn from_config(config: EffectConfig) -> Result<Self, ConfigurationError> {
        let settings = RainbowSettings::from_config(&config)?;
        let layout = L::from_config(&config, &settings)?;
        log::debug!(
            "rainbow: {} leds, stepsize {}, waveform {}",
            settings.led_count,
            settings.stepsize,
            settings.waveform.as_str()
        );
        Ok(Self::new(settings, layout))
    }
}
