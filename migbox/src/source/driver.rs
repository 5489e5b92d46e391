use crate::errors::MigboxResult;
use crate::filebox::BoxFile;
use std::ops::Deref;
use std::sync::Arc;

/// Contract a migration runner uses to walk and read migrations.
///
/// # Purpose
/// A source exposes versioned migrations in order without saying where they
/// come from. The runner asks for the first version, steps with `next` and
/// `prev`, and reads the up or down body of a version when it applies or
/// rolls it back.
///
/// # Errors
/// Navigation and read misses return `ErrorKind::NotExist`. Implementations
/// that can find a migration but fail to read it return a different kind so
/// the runner can tell the two apart.
///
/// # Thread Safety
/// Implementers must be `Send + Sync`. Runners are expected to drive a source
/// from a single logical sequence of calls.
pub trait SourceDriverProvider: Send + Sync {
    /// Releases the source. Sources with nothing to release return `Ok(())`.
    fn close(&self) -> MigboxResult<()>;

    /// Returns the lowest available version.
    ///
    /// # Returns
    /// * `Ok(version)` if any migration is available
    /// * `Err(MigboxError)` with `ErrorKind::NotExist` if the source is empty
    fn first(&self) -> MigboxResult<u64>;

    /// Returns the greatest available version strictly below `version`.
    ///
    /// # Returns
    /// * `Ok(version)` of the previous migration
    /// * `Err(MigboxError)` with `ErrorKind::NotExist` if there is none
    fn prev(&self, version: u64) -> MigboxResult<u64>;

    /// Returns the smallest available version strictly above `version`.
    ///
    /// # Returns
    /// * `Ok(version)` of the next migration
    /// * `Err(MigboxError)` with `ErrorKind::NotExist` if there is none
    fn next(&self, version: u64) -> MigboxResult<u64>;

    /// Opens the up migration body of `version`.
    ///
    /// # Returns
    /// * `Ok((BoxFile, identifier))` where the caller owns the stream
    /// * `Err(MigboxError)` with `ErrorKind::NotExist` if there is no up migration
    fn read_up(&self, version: u64) -> MigboxResult<(BoxFile, String)>;

    /// Opens the down migration body of `version`.
    ///
    /// # Returns
    /// * `Ok((BoxFile, identifier))` where the caller owns the stream
    /// * `Err(MigboxError)` with `ErrorKind::NotExist` if there is no down migration
    fn read_down(&self, version: u64) -> MigboxResult<(BoxFile, String)>;
}

/// Shared handle to a [`SourceDriverProvider`].
///
/// This is what driver factories return and what runners hold on to.
#[derive(Clone)]
pub struct SourceDriver {
    inner: Arc<dyn SourceDriverProvider>,
}

impl SourceDriver {
    pub fn new<T: SourceDriverProvider + 'static>(inner: T) -> Self {
        SourceDriver {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for SourceDriver {
    type Target = Arc<dyn SourceDriverProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
