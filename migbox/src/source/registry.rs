use super::SourceDriver;
use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor, URL_SCHEME_SEPARATOR};
use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use std::collections::HashMap;
use std::sync::Arc;

/// Builds a source from the location part of a source URL.
pub type SourceFactory = Arc<dyn Fn(&str) -> MigboxResult<SourceDriver> + Send + Sync>;

/// Explicit table of named source drivers.
///
/// # Purpose
/// The host application creates a registry at startup, registers the drivers
/// it wants, and hands the registry to its migration runner. The runner then
/// opens sources from URLs of the form `name://location` without knowing the
/// concrete driver types.
///
/// # Usage
/// ```rust,ignore
/// let registry = DriverRegistry::new();
/// BoxSource::register(&registry, catalog)?;
/// let source = registry.open("box://db/migrations")?;
/// let first = source.first()?;
/// ```
#[derive(Clone, Default)]
pub struct DriverRegistry {
    factories: Atomic<HashMap<String, SourceFactory>>,
}

impl DriverRegistry {
    pub fn new() -> DriverRegistry {
        DriverRegistry {
            factories: atomic(HashMap::new()),
        }
    }

    /// Registers a driver factory under `name`.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(MigboxError)` with `ErrorKind::InvalidInput` if `name` is empty
    ///   or contains the scheme separator
    /// * `Err(MigboxError)` with `ErrorKind::DriverAlreadyRegistered` if a
    ///   driver already uses `name`
    pub fn register<F>(&self, name: &str, factory: F) -> MigboxResult<()>
    where
        F: Fn(&str) -> MigboxResult<SourceDriver> + Send + Sync + 'static,
    {
        if name.is_empty() || name.contains(URL_SCHEME_SEPARATOR) {
            return Err(MigboxError::new(
                &format!("Invalid driver name '{}'", name),
                ErrorKind::InvalidInput,
            ));
        }

        self.factories.write_with(|factories| {
            if factories.contains_key(name) {
                return Err(MigboxError::new(
                    &format!("Driver {} is already registered", name),
                    ErrorKind::DriverAlreadyRegistered,
                ));
            }
            factories.insert(name.to_string(), Arc::new(factory));
            log::debug!("Registered source driver {}", name);
            Ok(())
        })
    }

    /// Returns `true` if a driver is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.read_with(|factories| factories.contains_key(name))
    }

    /// Lists registered driver names, sorted.
    pub fn drivers(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.factories.read_with(|factories| factories.keys().cloned().collect());
        names.sort();
        names
    }

    /// Opens a source from a URL of the form `name://location`.
    ///
    /// The factory registered under `name` receives `location` only.
    ///
    /// # Returns
    /// * `Ok(SourceDriver)` built by the factory
    /// * `Err(MigboxError)` with `ErrorKind::InvalidInput` if the URL has no scheme
    /// * `Err(MigboxError)` with `ErrorKind::UnsupportedDriver` if no driver
    ///   is registered for the scheme
    /// * any error the factory returns
    pub fn open(&self, url: &str) -> MigboxResult<SourceDriver> {
        let (name, location) = url.split_once(URL_SCHEME_SEPARATOR).ok_or_else(|| {
            MigboxError::new(
                &format!("Invalid URL '{}': missing driver scheme", url),
                ErrorKind::InvalidInput,
            )
        })?;

        let factory = self
            .factories
            .read_with(|factories| factories.get(name).cloned())
            .ok_or_else(|| {
                MigboxError::new(
                    &format!("Unknown driver {} (forgotten registration?)", name),
                    ErrorKind::UnsupportedDriver,
                )
            })?;

        factory(location)
    }
}
