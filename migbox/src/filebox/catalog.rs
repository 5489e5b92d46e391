use super::{DirectoryBox, FileBox, InMemoryBox};
use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use std::collections::HashMap;

/// Explicit table of boxes known by location.
///
/// # Purpose
/// Lets the host application decide, at startup, which locations are served
/// from memory. Resolving a location returns the registered box if there is
/// one, and otherwise falls back to a [`DirectoryBox`] rooted at that path.
/// Nothing is registered implicitly.
///
/// # Characteristics
/// - **Cloneable**: clones share the same table
/// - **Thread-Safe**: registration and lookup are guarded by a read-write lock
///
/// # Usage
/// ```rust,ignore
/// let catalog = BoxCatalog::new();
/// catalog.register("db/migrations", embedded_box)?;
/// let file_box = catalog.resolve("db/migrations")?;
/// ```
#[derive(Clone, Default)]
pub struct BoxCatalog {
    boxes: Atomic<HashMap<String, FileBox>>,
}

impl BoxCatalog {
    pub fn new() -> BoxCatalog {
        BoxCatalog {
            boxes: atomic(HashMap::new()),
        }
    }

    /// Registers an in-memory box under `location`.
    ///
    /// A box already registered at the same location is replaced.
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(MigboxError)` with `ErrorKind::InvalidInput` if `location` is empty
    pub fn register(&self, location: &str, file_box: InMemoryBox) -> MigboxResult<()> {
        self.register_box(location, FileBox::new(file_box))
    }

    /// Registers any box handle under `location`.
    pub fn register_box(&self, location: &str, file_box: FileBox) -> MigboxResult<()> {
        if location.is_empty() {
            return Err(MigboxError::new(
                "Box location cannot be empty",
                ErrorKind::InvalidInput,
            ));
        }

        let replaced = self
            .boxes
            .write_with(|boxes| boxes.insert(location.to_string(), file_box));
        if replaced.is_some() {
            log::debug!("Replaced box registered at {}", location);
        }
        Ok(())
    }

    /// Removes the box registered at `location`, returning whether one existed.
    pub fn deregister(&self, location: &str) -> bool {
        self.boxes.write_with(|boxes| boxes.remove(location).is_some())
    }

    pub fn contains(&self, location: &str) -> bool {
        self.boxes.read_with(|boxes| boxes.contains_key(location))
    }

    /// Lists registered locations, sorted.
    pub fn locations(&self) -> Vec<String> {
        let mut locations: Vec<String> = self.boxes.read_with(|boxes| boxes.keys().cloned().collect());
        locations.sort();
        locations
    }

    /// Resolves a box for `location`.
    ///
    /// # Returns
    /// * the registered box, if any
    /// * otherwise a [`DirectoryBox`] rooted at `location`
    /// * `Err(MigboxError)` if neither is available
    pub fn resolve(&self, location: &str) -> MigboxResult<FileBox> {
        if location.is_empty() {
            return Err(MigboxError::new(
                "Box location cannot be empty",
                ErrorKind::InvalidInput,
            ));
        }

        if let Some(file_box) = self.boxes.read_with(|boxes| boxes.get(location).cloned()) {
            log::trace!("Resolved registered box at {}", location);
            return Ok(file_box);
        }

        log::trace!("No registered box at {}, resolving from disk", location);
        Ok(FileBox::new(DirectoryBox::open(location)?))
    }
}
