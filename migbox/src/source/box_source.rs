use super::{BoxSourceBuilder, BoxSourceConfig, DriverRegistry, SourceDriver, SourceDriverProvider};
use crate::common::BOX_DRIVER_NAME;
use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use crate::filebox::{BoxCatalog, BoxFile, FileBox};
use crate::migration::{DefaultParser, Direction, MigrationParser, Migrations};
use itertools::Itertools;

/// A migration source reading from a file box.
///
/// # Purpose
/// Presents the migration files of a [`FileBox`] as an ordered sequence of
/// versions. On construction every file name is run through the parser:
/// names that do not parse are ignored, and two files claiming the same
/// version and direction make construction fail. After that the source never
/// changes; navigation is answered from the parsed registry and reads go
/// straight to the box.
///
/// # Usage
/// ```rust,ignore
/// let file_box = InMemoryBox::with_config()
///     .add_static("1_init.up.sql", include_bytes!("migrations/1_init.up.sql"))
///     .add_static("1_init.down.sql", include_bytes!("migrations/1_init.down.sql"))
///     .build();
/// let source = BoxSource::with_instance(FileBox::new(file_box))?;
///
/// let version = source.first()?;
/// let (body, identifier) = source.read_up(version)?;
/// ```
pub struct BoxSource {
    file_box: FileBox,
    migrations: Migrations,
}

impl BoxSource {
    /// Creates a builder to customise the catalog or parser.
    pub fn with_config() -> BoxSourceBuilder {
        BoxSourceBuilder::new()
    }

    /// Builds a source over an already resolved box using the default parser.
    ///
    /// # Returns
    /// * `Ok(BoxSource)` once every file has been parsed
    /// * `Err(MigboxError)` with `ErrorKind::DuplicateMigration` if two files
    ///   share a version and direction
    /// * any error the box returns while listing
    pub fn with_instance(file_box: FileBox) -> MigboxResult<BoxSource> {
        BoxSource::prepare(file_box, &DefaultParser)
    }

    /// Builds a source over the box at `location`.
    ///
    /// With the default configuration no boxes are registered, so `location`
    /// is resolved as a directory on disk. Use [`BoxSource::with_config`] to
    /// supply a [`BoxCatalog`] of in-memory boxes.
    ///
    /// # Returns
    /// * `Err(MigboxError)` with `ErrorKind::InvalidInput` if `location` is empty
    /// * any resolution or preparation error
    pub fn open(location: &str) -> MigboxResult<BoxSource> {
        BoxSource::resolve(location, &BoxSourceConfig::new())
    }

    /// Registers the box source in `registry` under the name `box`.
    ///
    /// Sources opened through the registry resolve their location in `catalog`.
    pub fn register(registry: &DriverRegistry, catalog: BoxCatalog) -> MigboxResult<()> {
        registry.register(BOX_DRIVER_NAME, move |location: &str| {
            let source = BoxSource::with_config()
                .catalog(catalog.clone())
                .open(location)?;
            Ok(SourceDriver::new(source))
        })
    }

    /// The box this source reads from.
    pub fn file_box(&self) -> &FileBox {
        &self.file_box
    }

    /// The parsed migrations.
    pub fn migrations(&self) -> &Migrations {
        &self.migrations
    }

    pub(crate) fn resolve(location: &str, config: &BoxSourceConfig) -> MigboxResult<BoxSource> {
        if location.is_empty() {
            return Err(MigboxError::new(
                &format!("Invalid URL '{}'", location),
                ErrorKind::InvalidInput,
            ));
        }

        let file_box = config.catalog().resolve(location)?;
        BoxSource::prepare(file_box, config.parser())
    }

    pub(crate) fn prepare(file_box: FileBox, parser: &dyn MigrationParser) -> MigboxResult<BoxSource> {
        let mut migrations = Migrations::new();

        for file in file_box.list()?.into_iter().sorted() {
            let migration = match parser.parse(&file) {
                Ok(migration) => migration,
                Err(e) => {
                    log::debug!("Ignoring {} in box {}: {}", file, file_box.location(), e);
                    continue;
                }
            };

            log::trace!("Registering migration {}", migration);
            if !migrations.append(migration) {
                return Err(MigboxError::new(
                    &format!(
                        "Unable to parse migration: {} duplicates an existing version and direction",
                        file
                    ),
                    ErrorKind::DuplicateMigration,
                ));
            }
        }

        log::debug!(
            "Prepared {} migration versions from box {}",
            migrations.len(),
            file_box.location()
        );
        Ok(BoxSource {
            file_box,
            migrations,
        })
    }

    fn read(&self, version: u64, direction: Direction) -> MigboxResult<(BoxFile, String)> {
        let migration = self.migrations.get(version, direction).ok_or_else(|| {
            MigboxError::new(
                &format!("No {} migration for version {}", direction, version),
                ErrorKind::NotExist,
            )
        })?;

        match self.file_box.open(&migration.raw) {
            Ok(file) => Ok((file, migration.identifier.clone())),
            Err(e) => Err(MigboxError::new_with_cause(
                &format!(
                    "Migration {} is listed but cannot be opened from box {}",
                    migration.raw,
                    self.file_box.location()
                ),
                ErrorKind::OpenConflict,
                e,
            )),
        }
    }
}

impl SourceDriverProvider for BoxSource {
    fn close(&self) -> MigboxResult<()> {
        // boxes hold no resources of their own
        log::debug!("Closed box source over {}", self.file_box.location());
        Ok(())
    }

    fn first(&self) -> MigboxResult<u64> {
        self.migrations.first().ok_or_else(|| {
            MigboxError::new(
                &format!("No migrations in box {}", self.file_box.location()),
                ErrorKind::NotExist,
            )
        })
    }

    fn prev(&self, version: u64) -> MigboxResult<u64> {
        self.migrations.prev(version).ok_or_else(|| {
            MigboxError::new(
                &format!("No migration before version {}", version),
                ErrorKind::NotExist,
            )
        })
    }

    fn next(&self, version: u64) -> MigboxResult<u64> {
        self.migrations.next(version).ok_or_else(|| {
            MigboxError::new(
                &format!("No migration after version {}", version),
                ErrorKind::NotExist,
            )
        })
    }

    fn read_up(&self, version: u64) -> MigboxResult<(BoxFile, String)> {
        self.read(version, Direction::Up)
    }

    fn read_down(&self, version: u64) -> MigboxResult<(BoxFile, String)> {
        self.read(version, Direction::Down)
    }
}
