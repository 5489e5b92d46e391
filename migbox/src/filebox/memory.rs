use super::{BoxFile, FileBoxProvider};
use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Clone)]
struct SharedBytes(Arc<Cow<'static, [u8]>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        let bytes: &[u8] = &self.0;
        bytes
    }
}

/// A box whose files live in memory.
///
/// # Purpose
/// Holds migration files compiled into the binary (via `include_bytes!` or
/// `include_str!`) or assembled at runtime. The content is immutable once
/// built, so opening a file hands out a cursor over shared bytes without
/// copying.
///
/// # Usage
/// ```rust,ignore
/// let file_box = InMemoryBox::with_config()
///     .location("db/migrations")
///     .add_static("1_init.up.sql", include_bytes!("../migrations/1_init.up.sql"))
///     .add_file("1_init.down.sql", "DROP TABLE users;")
///     .build();
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBox {
    location: String,
    files: Arc<BTreeMap<String, SharedBytes>>,
}

impl InMemoryBox {
    /// Creates an empty box.
    pub fn new(location: &str) -> InMemoryBox {
        InMemoryBox {
            location: location.to_string(),
            files: Arc::new(BTreeMap::new()),
        }
    }

    pub fn with_config() -> InMemoryBoxBuilder {
        InMemoryBoxBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileBoxProvider for InMemoryBox {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn list(&self) -> MigboxResult<Vec<String>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn open(&self, name: &str) -> MigboxResult<BoxFile> {
        match self.files.get(name) {
            Some(content) => Ok(BoxFile::new(name, Cursor::new(content.clone()))),
            None => Err(MigboxError::new(
                &format!("File {} not found in box {}", name, self.location),
                ErrorKind::FileNotFound,
            )),
        }
    }

    fn has(&self, name: &str) -> MigboxResult<bool> {
        Ok(self.files.contains_key(name))
    }
}

/// Builder for an [`InMemoryBox`].
///
/// Adding a file under a name that is already present replaces its content.
#[derive(Default)]
pub struct InMemoryBoxBuilder {
    location: String,
    files: BTreeMap<String, SharedBytes>,
}

impl InMemoryBoxBuilder {
    pub fn new() -> InMemoryBoxBuilder {
        InMemoryBoxBuilder {
            location: String::new(),
            files: BTreeMap::new(),
        }
    }

    pub fn location(mut self, location: &str) -> Self {
        self.location = location.to_string();
        self
    }

    /// Adds a file with owned content.
    pub fn add_file(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        let bytes = SharedBytes(Arc::new(Cow::Owned(content.into())));
        self.files.insert(name.to_string(), bytes);
        self
    }

    /// Adds a file backed by static bytes, such as the output of `include_bytes!`.
    pub fn add_static(mut self, name: &str, content: &'static [u8]) -> Self {
        let bytes = SharedBytes(Arc::new(Cow::Borrowed(content)));
        self.files.insert(name.to_string(), bytes);
        self
    }

    pub fn build(self) -> InMemoryBox {
        InMemoryBox {
            location: self.location,
            files: Arc::new(self.files),
        }
    }
}
