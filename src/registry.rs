//! Effect registry
//!
//! Effects are looked up by name in an explicit registration table that the
//! driver builds at startup. Entries are registered under identifiers of the
//! form `Effect_<Name>` (an extension suffix such as `.rs` is tolerated);
//! the bare `<Name>` is what [`EffectRegistry::list_available`] reports and
//! what [`EffectRegistry::load`] accepts.
//!
//! Nothing outside this module deals with [`EffectModule`] trait objects
//! directly: [`EffectModuleHandle`] is the only way to reach a loaded effect.

use alloc::boxed::Box;
use core::{fmt, marker::PhantomData};

use heapless::Vec;

use crate::{
    config::{EffectConfig, ParserSpec},
    effect::{BoxedEffect, EffectFactory, RainbowSingle, RainbowTravelling},
    error::{ConfigurationError, LoadError, RegistryError},
};

/// Prefix every effect identifier carries
pub const EFFECT_PREFIX: &str = "Effect_";

/// Table size of [`EffectRegistry::builtin`]
pub const DEFAULT_CAPACITY: usize = 16;

const IDENTIFIER_RAINBOW: &str = "Effect_Rainbow";
const IDENTIFIER_RAINBOW_SINGLE: &str = "Effect_RainbowSingle";

static RAINBOW: Plugin<RainbowTravelling> = Plugin::new();
static RAINBOW_SINGLE: Plugin<RainbowSingle> = Plugin::new();

/// A loadable effect implementation
pub trait EffectModule: Sync {
    /// Describe the options accepted by [`EffectModule::instance`]
    fn create_parser(&self) -> ParserSpec;

    /// Build an effect instance
    fn instance(&self, config: EffectConfig) -> Result<BoxedEffect, ConfigurationError>;
}

/// Adapter exposing an [`EffectFactory`] type as an [`EffectModule`]
pub struct Plugin<E>(PhantomData<fn() -> E>);

impl<E> Plugin<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for Plugin<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EffectFactory + Send + 'static> EffectModule for Plugin<E> {
    fn create_parser(&self) -> ParserSpec {
        E::parser_spec()
    }

    fn instance(&self, config: EffectConfig) -> Result<BoxedEffect, ConfigurationError> {
        Ok(Box::new(E::from_config(config)?))
    }
}

/// Extract the bare effect name from an identifier.
///
/// `Effect_RainbowSingle` and `Effect_RainbowSingle.rs` both give
/// `RainbowSingle`. Returns `None` when the identifier does not follow the
/// convention.
pub fn descriptor_from_identifier(identifier: &'static str) -> Option<&'static str> {
    let name = identifier.strip_prefix(EFFECT_PREFIX)?;
    let name = match name.rsplit_once('.') {
        Some((stem, _extension)) => stem,
        None => name,
    };
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some(name)
}

#[derive(Clone, Copy)]
struct RegistryEntry {
    identifier: &'static str,
    module: &'static dyn EffectModule,
}

impl RegistryEntry {
    fn descriptor(&self) -> Option<&'static str> {
        descriptor_from_identifier(self.identifier)
    }
}

/// Name to implementation lookup table
///
/// `N` is the maximum number of entries.
pub struct EffectRegistry<const N: usize = DEFAULT_CAPACITY> {
    entries: Vec<RegistryEntry, N>,
}

impl EffectRegistry<DEFAULT_CAPACITY> {
    /// Registry holding every effect shipped with this crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let builtin: [(&'static str, &'static dyn EffectModule); 2] = [
            (IDENTIFIER_RAINBOW, &RAINBOW),
            (IDENTIFIER_RAINBOW_SINGLE, &RAINBOW_SINGLE),
        ];
        for (identifier, module) in builtin {
            if let Err(e) = registry.register(identifier, module) {
                log::warn!("builtin effect not registered: {e}");
            }
        }
        registry
    }
}

impl<const N: usize> EffectRegistry<N> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add an implementation under `identifier`.
    ///
    /// Identifiers that do not follow the `Effect_<Name>` convention are
    /// stored but never listed or loaded.
    pub fn register(
        &mut self,
        identifier: &'static str,
        module: &'static dyn EffectModule,
    ) -> Result<(), RegistryError> {
        let entry = RegistryEntry { identifier, module };
        let descriptor = entry.descriptor();
        let duplicate = self.entries.iter().any(|other| {
            other.identifier == identifier
                || (descriptor.is_some() && other.descriptor() == descriptor)
        });
        if duplicate {
            return Err(RegistryError::Duplicate(identifier));
        }

        self.entries
            .push(entry)
            .map_err(|_| RegistryError::Full(identifier))?;

        match descriptor {
            Some(name) => log::debug!("registered effect '{name}' as '{identifier}'"),
            None => log::warn!("'{identifier}' does not match {EFFECT_PREFIX}<Name>, ignoring"),
        }
        Ok(())
    }

    /// Names of every loadable effect, in registration order
    pub fn list_available(&self) -> Vec<&'static str, N> {
        let mut names = Vec::new();
        for name in self.entries.iter().filter_map(RegistryEntry::descriptor) {
            // Never more names than entries
            let _ = names.push(name);
        }
        names
    }

    /// Check if an effect with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Load the effect registered under `name`.
    ///
    /// The module's parser spec is checked before the handle is returned, so
    /// a malformed module fails here rather than on first use. Loading the
    /// same name again returns an equivalent handle.
    pub fn load(&self, name: &str) -> Result<EffectModuleHandle, RegistryError> {
        let (descriptor, module) = self
            .resolve(name)
            .ok_or_else(|| RegistryError::NotFound(name.into()))?;

        module.create_parser().validate().map_err(|kind| LoadError {
            effect: descriptor,
            kind,
        })?;

        log::info!("loaded effect '{descriptor}'");
        Ok(EffectModuleHandle {
            name: descriptor,
            module,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, name: &str) -> Option<(&'static str, &'static dyn EffectModule)> {
        self.entries.iter().find_map(|entry| {
            entry
                .descriptor()
                .filter(|descriptor| *descriptor == name)
                .map(|descriptor| (descriptor, entry.module))
        })
    }
}

impl<const N: usize> Default for EffectRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for EffectRegistry<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| entry.identifier))
            .finish()
    }
}

/// A loaded effect
#[derive(Clone, Copy)]
pub struct EffectModuleHandle {
    name: &'static str,
    module: &'static dyn EffectModule,
}

impl EffectModuleHandle {
    /// Bare effect name
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Describe the options accepted by [`EffectModuleHandle::instance`]
    pub fn create_parser(&self) -> ParserSpec {
        self.module.create_parser()
    }

    /// Build a ready-to-advance effect instance
    pub fn instance(&self, config: EffectConfig) -> Result<BoxedEffect, ConfigurationError> {
        log::debug!("creating '{}' for {} leds", self.name, config.led_count());
        self.module.instance(config)
    }
}

impl PartialEq for EffectModuleHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && core::ptr::addr_eq(self.module, other.module)
    }
}

impl Eq for EffectModuleHandle {}

impl fmt::Debug for EffectModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectModuleHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
