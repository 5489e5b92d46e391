use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use std::fmt::{Debug, Formatter};
use std::io::Read;
use std::ops::Deref;
use std::sync::Arc;

/// Contract for a named collection of files a migration source reads from.
///
/// # Purpose
/// A box maps file names to byte content. It may be compiled into the binary
/// (`InMemoryBox`) or backed by a directory on disk (`DirectoryBox`). The
/// migration source only ever lists names and opens files; it never writes.
///
/// # Thread Safety
/// Implementers must be `Send + Sync` so a box handle can be shared.
pub trait FileBoxProvider: Send + Sync {
    /// Returns the location this box was resolved from.
    ///
    /// In-memory boxes return the name they were registered or built with;
    /// directory boxes return their root path.
    fn location(&self) -> String;

    /// Lists every file name in the box.
    ///
    /// Names use `/` as separator regardless of platform. No order is
    /// guaranteed.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` with all file names
    /// * `Err(MigboxError)` if the underlying storage cannot be enumerated
    fn list(&self) -> MigboxResult<Vec<String>>;

    /// Opens a file for reading, positioned at its first byte.
    ///
    /// # Arguments
    /// * `name` - A name as returned by `list()`
    ///
    /// # Returns
    /// * `Ok(BoxFile)` owned by the caller
    /// * `Err(MigboxError)` with `ErrorKind::FileNotFound` if the name is absent
    fn open(&self, name: &str) -> MigboxResult<BoxFile>;

    /// Checks whether a file with the given name is in the box.
    fn has(&self, name: &str) -> MigboxResult<bool> {
        Ok(self.list()?.iter().any(|it| it == name))
    }
}

/// Shared handle to a [`FileBoxProvider`].
///
/// Cloning is cheap; all clones refer to the same box.
#[derive(Clone)]
pub struct FileBox {
    inner: Arc<dyn FileBoxProvider>,
}

impl FileBox {
    pub fn new<T: FileBoxProvider + 'static>(inner: T) -> Self {
        FileBox {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for FileBox {
    type Target = Arc<dyn FileBoxProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Debug for FileBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileBox")
            .field("location", &self.inner.location())
            .finish()
    }
}

/// An open file from a box.
///
/// Reads yield the file's bytes unmodified from the start. The box performs no
/// buffering or caching on the caller's behalf; dropping the `BoxFile`
/// releases whatever it holds.
pub struct BoxFile {
    name: String,
    reader: Box<dyn Read + Send>,
}

impl BoxFile {
    pub fn new<R: Read + Send + 'static>(name: &str, reader: R) -> Self {
        BoxFile {
            name: name.to_string(),
            reader: Box::new(reader),
        }
    }

    /// The box file name this stream was opened from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the remaining content into memory.
    pub fn read_all(mut self) -> MigboxResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Reads the remaining content as UTF-8 text.
    pub fn read_all_string(self) -> MigboxResult<String> {
        let name = self.name.clone();
        let bytes = self.read_all()?;
        String::from_utf8(bytes).map_err(|e| {
            MigboxError::new(
                &format!("{} is not valid UTF-8: {}", name, e),
                ErrorKind::IOError,
            )
        })
    }
}

impl Read for BoxFile {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Debug for BoxFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxFile").field("name", &self.name).finish()
    }
}
