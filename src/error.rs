//! Error types for the effect engine.
//!
//! [`ConfigurationError`] covers invalid or missing effect parameters,
//! [`RegistryError`] covers effect lookup and loading. Both convert into the
//! crate-level [`Error`] so `?` propagates across module boundaries.

use alloc::string::String;
use core::fmt;

use crate::config::{Check, MAX_OPTIONS};

/// Invalid or missing effect parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Strip length is zero
    NoLeds,
    /// A required option has no value
    MissingOption(&'static str),
    /// An option holds a value of the wrong kind
    TypeMismatch(&'static str),
    /// An argument names an option the parser does not know
    UnknownOption(String),
    /// A positional argument was given where none are accepted
    UnexpectedArgument(String),
    /// An option was given without its value
    MissingValue(&'static str),
    /// A numeric option could not be parsed as a finite number
    InvalidNumber { option: &'static str, value: String },
    /// A choice option was given a value outside its choices
    InvalidChoice { option: &'static str, value: String },
    /// A numeric option failed its validation check
    OutOfRange {
        option: &'static str,
        value: f32,
        check: Check,
    },
    /// No slot left to store the option's value
    TooManyOptions(&'static str),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLeds => write!(f, "strip must have at least one LED"),
            Self::MissingOption(option) => write!(f, "missing option '{option}'"),
            Self::TypeMismatch(option) => {
                write!(f, "option '{option}' holds a value of the wrong kind")
            }
            Self::UnknownOption(arg) => write!(f, "unknown option '{arg}'"),
            Self::UnexpectedArgument(arg) => write!(f, "unexpected argument '{arg}'"),
            Self::MissingValue(option) => write!(f, "option '{option}' expects a value"),
            Self::InvalidNumber { option, value } => {
                write!(f, "invalid {option}: '{value}' is not a finite number")
            }
            Self::InvalidChoice { option, value } => {
                write!(f, "invalid {option}: '{value}' is not one of the choices")
            }
            Self::OutOfRange {
                option,
                value,
                check,
            } => write!(f, "invalid {option}: {value} {check}"),
            Self::TooManyOptions(option) => write!(
                f,
                "option '{option}' does not fit, at most {MAX_OPTIONS} options are supported"
            ),
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// Why a registered effect module failed to initialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// Two options share a long name
    DuplicateOption(&'static str),
    /// Two options share a short flag
    DuplicateShortFlag(char),
    /// A float option's default fails its own check
    InvalidDefault(&'static str),
    /// A choice option's default is not among its choices
    UnknownChoiceDefault(&'static str),
    /// The parser declares more options than a config can hold
    TooManyOptions(usize),
}

/// Effect module found but malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadError {
    pub effect: &'static str,
    pub kind: LoadErrorKind,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "effect '{}' failed to load: ", self.effect)?;
        match self.kind {
            LoadErrorKind::DuplicateOption(name) => write!(f, "option '{name}' declared twice"),
            LoadErrorKind::DuplicateShortFlag(flag) => write!(f, "flag '-{flag}' declared twice"),
            LoadErrorKind::InvalidDefault(name) => {
                write!(f, "default of option '{name}' fails its check")
            }
            LoadErrorKind::UnknownChoiceDefault(name) => {
                write!(f, "default of option '{name}' is not one of its choices")
            }
            LoadErrorKind::TooManyOptions(count) => write!(f, "too many options ({count})"),
        }
    }
}

impl core::error::Error for LoadError {}

/// Effect lookup and registration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No registered effect matches the name
    NotFound(String),
    /// The effect exists but failed to initialize
    Load(LoadError),
    /// An entry with the same identifier is already registered
    Duplicate(&'static str),
    /// The registration table has no free slots
    Full(&'static str),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "unknown effect '{name}'"),
            Self::Load(e) => write!(f, "{e}"),
            Self::Duplicate(identifier) => write!(f, "'{identifier}' is already registered"),
            Self::Full(identifier) => {
                write!(f, "no room left to register '{identifier}'")
            }
        }
    }
}

impl core::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Load(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LoadError> for RegistryError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

/// Unified error type for engine operations
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Configuration(ConfigurationError),
    Registry(RegistryError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "{e}"),
            Self::Registry(e) => write!(f, "{e}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Registry(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for Error {
    fn from(e: ConfigurationError) -> Self {
        Self::Configuration(e)
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<LoadError> for Error {
    fn from(e: LoadError) -> Self {
        Self::Registry(RegistryError::Load(e))
    }
}

/// Crate-level Result alias using [`Error`]
pub type Result<T> = core::result::Result<T, Error>;
