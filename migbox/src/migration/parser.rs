use super::migration::{Direction, Migration};
use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use regex::Regex;
use std::sync::LazyLock;

static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)_(.*)\.(down|up)\.(.*)$").expect("default migration pattern is valid")
});

/// Turns a box file name into a [`Migration`].
///
/// A parser decides which files in a box are migrations at all: any name it
/// rejects is skipped by the source rather than treated as a failure.
pub trait MigrationParser: Send + Sync {
    /// Parses a raw file name.
    ///
    /// # Arguments
    /// * `raw` - The file name exactly as the box lists it
    ///
    /// # Returns
    /// * `Ok(Migration)` if the name follows the parser's convention
    /// * `Err(MigboxError)` with `ErrorKind::ParseError` otherwise
    fn parse(&self, raw: &str) -> MigboxResult<Migration>;
}

/// Parses names of the form `{version}_{description}.{up|down}.{extension}`.
///
/// The version must fit in a `u64`. The identifier keeps the version prefix,
/// so `1_init.up.sql` yields identifier `1_init`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultParser;

impl MigrationParser for DefaultParser {
    fn parse(&self, raw: &str) -> MigboxResult<Migration> {
        let captures = DEFAULT_PATTERN.captures(raw).ok_or_else(|| {
            MigboxError::new(
                &format!("'{}' is not a migration file name", raw),
                ErrorKind::ParseError,
            )
        })?;

        let version: u64 = captures[1].parse()?;
        let direction: Direction = captures[3].parse()?;
        let identifier = format!("{}_{}", &captures[1], &captures[2]);

        Ok(Migration {
            version,
            identifier,
            direction,
            raw: raw.to_string(),
        })
    }
}

impl<F> MigrationParser for F
where
    F: Fn(&str) -> MigboxResult<Migration> + Send + Sync,
{
    fn parse(&self, raw: &str) -> MigboxResult<Migration> {
        self(raw)
    }
}
