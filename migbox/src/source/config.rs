use super::BoxSource;
use crate::errors::MigboxResult;
use crate::filebox::{BoxCatalog, FileBox};
use crate::migration::{DefaultParser, MigrationParser};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Configuration for a [`BoxSource`].
///
/// # Fields
/// - `catalog`: where `open(location)` looks up boxes; an empty catalog
///   resolves every location from disk
/// - `parser`: decides which box files are migrations; [`DefaultParser`]
///   unless overridden
#[derive(Clone)]
pub struct BoxSourceConfig {
    catalog: BoxCatalog,
    parser: Arc<dyn MigrationParser>,
}

impl BoxSourceConfig {
    pub fn new() -> BoxSourceConfig {
        BoxSourceConfig {
            catalog: BoxCatalog::new(),
            parser: Arc::new(DefaultParser),
        }
    }

    pub fn catalog(&self) -> &BoxCatalog {
        &self.catalog
    }

    pub fn parser(&self) -> &dyn MigrationParser {
        self.parser.as_ref()
    }
}

impl Default for BoxSourceConfig {
    fn default() -> Self {
        BoxSourceConfig::new()
    }
}

impl Debug for BoxSourceConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxSourceConfig")
            .field("catalog", &self.catalog.locations())
            .finish_non_exhaustive()
    }
}

/// Builder for a [`BoxSource`].
///
/// # Usage
/// ```rust,ignore
/// let source = BoxSource::with_config()
///     .catalog(catalog)
///     .open("db/migrations")?;
/// ```
#[derive(Default)]
pub struct BoxSourceBuilder {
    config: BoxSourceConfig,
}

impl BoxSourceBuilder {
    pub fn new() -> BoxSourceBuilder {
        BoxSourceBuilder {
            config: BoxSourceConfig::new(),
        }
    }

    /// Uses `catalog` to resolve locations passed to [`BoxSourceBuilder::open`].
    pub fn catalog(mut self, catalog: BoxCatalog) -> Self {
        self.config.catalog = catalog;
        self
    }

    /// Replaces the file name parser.
    pub fn parser<P: MigrationParser + 'static>(mut self, parser: P) -> Self {
        self.config.parser = Arc::new(parser);
        self
    }

    pub fn config(&self) -> &BoxSourceConfig {
        &self.config
    }

    /// Builds a source over an already resolved box.
    pub fn with_instance(self, file_box: FileBox) -> MigboxResult<BoxSource> {
        BoxSource::prepare(file_box, self.config.parser())
    }

    /// Resolves the box at `location` through the catalog and builds a source over it.
    pub fn open(self, location: &str) -> MigboxResult<BoxSource> {
        BoxSource::resolve(location, &self.config)
    }
}
