use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for migbox operations
///
/// Each kind names one category of failure so callers can tell, for example,
/// a migration that never existed (`NotExist`) apart from one that is
/// registered but whose file could not be opened (`OpenConflict`).
///
/// # Examples
///
/// ```rust,ignore
/// use migbox::errors::{MigboxError, ErrorKind, MigboxResult};
///
/// fn example() -> MigboxResult<u64> {
///     Err(MigboxError::new("no migrations found", ErrorKind::NotExist))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Input Errors
    /// An argument is empty, malformed or otherwise unusable
    InvalidInput,

    // Migration Errors
    /// A file name does not follow the migration naming convention
    ParseError,
    /// Two files resolve to the same version and direction
    DuplicateMigration,
    /// The requested version, direction or navigation target is absent
    NotExist,
    /// A registered migration file could not be opened from its box
    OpenConflict,

    // IO Errors
    /// Generic IO error
    IOError,
    /// The file was not found
    FileNotFound,
    /// Permission denied for file operation
    PermissionDenied,

    // Driver Errors
    /// No driver is registered under the requested name
    UnsupportedDriver,
    /// A driver is already registered under the requested name
    DriverAlreadyRegistered,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidInput => write!(f, "Invalid input"),
            ErrorKind::ParseError => write!(f, "Parse error"),
            ErrorKind::DuplicateMigration => write!(f, "Duplicate migration"),
            ErrorKind::NotExist => write!(f, "Does not exist"),
            ErrorKind::OpenConflict => write!(f, "Open conflict"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::UnsupportedDriver => write!(f, "Unsupported driver"),
            ErrorKind::DriverAlreadyRegistered => write!(f, "Driver already registered"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom migbox error type.
///
/// `MigboxError` carries a message, a kind and an optional cause. It supports
/// error chaining and records a backtrace at construction for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use migbox::errors::{MigboxError, ErrorKind};
///
/// // Create a simple error
/// let err = MigboxError::new("no up migration for version 3", ErrorKind::NotExist);
///
/// // Create an error with a cause
/// let cause = MigboxError::new("IO failed", ErrorKind::IOError);
/// let err = MigboxError::new_with_cause("cannot open 3_x.up.sql", ErrorKind::OpenConflict, cause);
/// ```
#[derive(Clone)]
pub struct MigboxError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<MigboxError>>,
    backtrace: Atomic<Backtrace>,
}

impl MigboxError {
    /// Creates a new `MigboxError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        MigboxError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `MigboxError` with a cause error.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: MigboxError) -> Self {
        MigboxError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&MigboxError> {
        self.cause.as_deref()
    }

    /// Returns `true` if this error reports an absent migration or version.
    pub fn is_not_exist(&self) -> bool {
        self.error_kind == ErrorKind::NotExist
    }
}

impl Display for MigboxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for MigboxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for MigboxError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for migbox operations.
///
/// `MigboxResult<T>` is shorthand for `Result<T, MigboxError>`.
pub type MigboxResult<T> = Result<T, MigboxError>;

impl From<std::io::Error> for MigboxError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IOError,
        };
        MigboxError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<std::num::ParseIntError> for MigboxError {
    fn from(err: std::num::ParseIntError) -> Self {
        MigboxError::new(
            &format!("Integer parsing error: {}", err),
            ErrorKind::ParseError,
        )
    }
}

impl From<String> for MigboxError {
    fn from(msg: String) -> Self {
        MigboxError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for MigboxError {
    fn from(msg: &str) -> Self {
        MigboxError::new(msg, ErrorKind::InternalError)
    }
}
