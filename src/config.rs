//! Declarative effect options and the values parsed from them
//!
//! Each effect describes its options with a static [`ParserSpec`]. The
//! driver renders it, populates [`OptionValues`] from its command line or
//! config (or takes the defaults), and hands them to the effect inside an
//! [`EffectConfig`].

use core::fmt;

use heapless::LinearMap;

use crate::error::{ConfigurationError, LoadErrorKind};

/// Maximum number of options a single effect may declare
pub const MAX_OPTIONS: usize = 8;

/// Validation predicate for numeric options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Any finite number
    Any,
    /// Strictly greater than zero
    Positive,
    /// Within `[min, max]`, bounds included
    Range { min: f32, max: f32 },
}

impl Check {
    /// Check if `value` passes. Non-finite values never do.
    pub fn accepts(self, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Self::Any => true,
            Self::Positive => value > 0.0,
            Self::Range { min, max } => (min..=max).contains(&value),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "must be finite"),
            Self::Positive => write!(f, "must be positive"),
            Self::Range { min, max } => write!(f, "must be within [{min}, {max}]"),
        }
    }
}

/// Value kind, default and constraints of an option
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionKind {
    Float {
        default: f32,
        check: Check,
    },
    Choice {
        default: &'static str,
        choices: &'static [&'static str],
    },
}

/// A single named option
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    /// Long name, used as `--name` and as the value key
    pub name: &'static str,
    /// Optional single-character flag, used as `-c`
    pub short: Option<char>,
    pub help: &'static str,
    pub kind: OptionKind,
}

impl OptionSpec {
    pub const fn float(name: &'static str, help: &'static str, default: f32, check: Check) -> Self {
        Self {
            name,
            short: None,
            help,
            kind: OptionKind::Float { default, check },
        }
    }

    pub const fn choice(
        name: &'static str,
        help: &'static str,
        default: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            short: None,
            help,
            kind: OptionKind::Choice { default, choices },
        }
    }

    /// Set the short flag
    #[must_use]
    pub const fn with_short(mut self, flag: char) -> Self {
        self.short = Some(flag);
        self
    }

    pub const fn default_value(&self) -> OptionValue {
        match self.kind {
            OptionKind::Float { default, .. } => OptionValue::Float(default),
            OptionKind::Choice { default, .. } => OptionValue::Choice(default),
        }
    }

    /// Parse a raw argument into a checked value
    pub fn parse_value(&self, raw: &str) -> Result<OptionValue, ConfigurationError> {
        match self.kind {
            OptionKind::Float { check, .. } => {
                let value = raw
                    .trim()
                    .parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ConfigurationError::InvalidNumber {
                        option: self.name,
                        value: raw.into(),
                    })?;
                if !check.accepts(value) {
                    return Err(ConfigurationError::OutOfRange {
                        option: self.name,
                        value,
                        check,
                    });
                }
                Ok(OptionValue::Float(value))
            }
            OptionKind::Choice { choices, .. } => choices
                .iter()
                .find(|choice| **choice == raw)
                .copied()
                .map(OptionValue::Choice)
                .ok_or_else(|| ConfigurationError::InvalidChoice {
                    option: self.name,
                    value: raw.into(),
                }),
        }
    }
}

/// A parsed option value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionValue {
    Float(f32),
    Choice(&'static str),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Choice(choice) => write!(f, "{choice}"),
        }
    }
}

/// Option values keyed by long name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionValues {
    values: LinearMap<&'static str, OptionValue, MAX_OPTIONS>,
}

impl OptionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option value, replacing any previous one.
    ///
    /// Returns the value back if all `MAX_OPTIONS` slots are taken by other
    /// options.
    pub fn set(&mut self, name: &'static str, value: OptionValue) -> Result<(), OptionValue> {
        self.values
            .insert(name, value)
            .map(|_| ())
            .map_err(|(_, value)| value)
    }

    pub fn get(&self, name: &str) -> Option<OptionValue> {
        self.values.get(name).copied()
    }

    /// Get a numeric option
    pub fn float(&self, name: &'static str) -> Result<f32, ConfigurationError> {
        match self.get(name) {
            Some(OptionValue::Float(value)) => Ok(value),
            Some(OptionValue::Choice(_)) => Err(ConfigurationError::TypeMismatch(name)),
            None => Err(ConfigurationError::MissingOption(name)),
        }
    }

    /// Get a choice option
    pub fn choice(&self, name: &'static str) -> Result<&'static str, ConfigurationError> {
        match self.get(name) {
            Some(OptionValue::Choice(choice)) => Ok(choice),
            Some(OptionValue::Float(_)) => Err(ConfigurationError::TypeMismatch(name)),
            None => Err(ConfigurationError::MissingOption(name)),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Declarative description of an effect's options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserSpec {
    description: &'static str,
    options: &'static [OptionSpec],
}

impl ParserSpec {
    pub const fn new(description: &'static str, options: &'static [OptionSpec]) -> Self {
        Self {
            description,
            options,
        }
    }

    pub const fn description(&self) -> &'static str {
        self.description
    }

    pub const fn options(&self) -> &'static [OptionSpec] {
        self.options
    }

    /// Find an option by long name
    pub fn find(&self, name: &str) -> Option<&'static OptionSpec> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Find an option by short flag
    pub fn find_short(&self, flag: char) -> Option<&'static OptionSpec> {
        self.options.iter().find(|option| option.short == Some(flag))
    }

    /// Values of every option at its default.
    ///
    /// Options past [`MAX_OPTIONS`] are dropped; the registry refuses to load
    /// effects declaring that many.
    pub fn defaults(&self) -> OptionValues {
        let mut values = OptionValues::new();
        for option in self.options {
            if values.set(option.name, option.default_value()).is_err() {
                log::warn!("option '{}' dropped, too many options", option.name);
            }
        }
        values
    }

    /// Parse command-line style arguments on top of the defaults.
    ///
    /// Accepts `--name value`, `--name=value`, `-c value` and `-cvalue`.
    pub fn parse<'a, I>(&self, args: I) -> Result<OptionValues, ConfigurationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = self.defaults();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let (option, inline) = if let Some(long) = arg.strip_prefix("--") {
                let (name, inline) = match long.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (long, None),
                };
                (self.find(name), inline)
            } else if let Some(short) = arg.strip_prefix('-') {
                let mut chars = short.chars();
                let option = chars.next().and_then(|flag| self.find_short(flag));
                let rest = chars.as_str();
                let inline = if rest.is_empty() {
                    None
                } else {
                    Some(rest.strip_prefix('=').unwrap_or(rest))
                };
                (option, inline)
            } else {
                return Err(ConfigurationError::UnexpectedArgument(arg.into()));
            };

            let option = option.ok_or_else(|| ConfigurationError::UnknownOption(arg.into()))?;
            let raw = match inline {
                Some(raw) => raw,
                None => args
                    .next()
                    .ok_or(ConfigurationError::MissingValue(option.name))?,
            };
            let value = option.parse_value(raw)?;
            values
                .set(option.name, value)
                .map_err(|_| ConfigurationError::TooManyOptions(option.name))?;
        }

        Ok(values)
    }

    /// Check that the spec is internally consistent
    pub(crate) fn validate(&self) -> Result<(), LoadErrorKind> {
        if self.options.len() > MAX_OPTIONS {
            return Err(LoadErrorKind::TooManyOptions(self.options.len()));
        }

        for (i, option) in self.options.iter().enumerate() {
            let earlier = &self.options[..i];
            if earlier.iter().any(|other| other.name == option.name) {
                return Err(LoadErrorKind::DuplicateOption(option.name));
            }
            if let Some(flag) = option.short {
                if earlier.iter().any(|other| other.short == Some(flag)) {
                    return Err(LoadErrorKind::DuplicateShortFlag(flag));
                }
            }
            match option.kind {
                OptionKind::Float { default, check } => {
                    if !check.accepts(default) {
                        return Err(LoadErrorKind::InvalidDefault(option.name));
                    }
                }
                OptionKind::Choice { default, choices } => {
                    if !choices.contains(&default) {
                        return Err(LoadErrorKind::UnknownChoiceDefault(option.name));
                    }
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for ParserSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description)?;
        for option in self.options {
            match option.short {
                Some(flag) => write!(f, "  -{flag}, --{}", option.name)?,
                None => write!(f, "      --{}", option.name)?,
            }
            match option.kind {
                OptionKind::Float { .. } => write!(f, " <float>")?,
                OptionKind::Choice { choices, .. } => {
                    write!(f, " {{")?;
                    for (i, choice) in choices.iter().enumerate() {
                        if i > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{choice}")?;
                    }
                    write!(f, "}}")?;
                }
            }
            writeln!(f, "  {} (default: {})", option.help, option.default_value())?;
        }
        Ok(())
    }
}

/// Parameters an effect instance is built from
///
/// Owned by the effect constructed from it.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectConfig {
    led_count: usize,
    values: OptionValues,
}

impl EffectConfig {
    pub fn new(led_count: usize, values: OptionValues) -> Self {
        Self { led_count, values }
    }

    /// Config with every option of `spec` at its default
    pub fn with_defaults(led_count: usize, spec: &ParserSpec) -> Self {
        Self::new(led_count, spec.defaults())
    }

    /// Number of LEDs in the strip
    pub const fn led_count(&self) -> usize {
        self.led_count
    }

    pub const fn values(&self) -> &OptionValues {
        &self.values
    }

    /// Get a numeric option and run `check` on it
    pub fn checked_float(&self, name: &'static str, check: Check) -> Result<f32, ConfigurationError> {
        let value = self.values.float(name)?;
        if check.accepts(value) {
            Ok(value)
        } else {
            Err(ConfigurationError::OutOfRange {
                option: name,
                value,
                check,
            })
        }
    }

    /// Get a choice option
    pub fn choice(&self, name: &'static str) -> Result<&'static str, ConfigurationError> {
        self.values.choice(name)
    }
}
