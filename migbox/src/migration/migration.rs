use crate::common::{DOWN_KEYWORD, UP_KEYWORD};
use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The direction a migration file is applied in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Applied when moving to a newer version.
    Up,
    /// Applied when rolling a version back.
    Down,
}

impl Direction {
    /// Returns the keyword used for this direction in migration file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => UP_KEYWORD,
            Direction::Down => DOWN_KEYWORD,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = MigboxError;

    fn from_str(s: &str) -> MigboxResult<Self> {
        match s {
            UP_KEYWORD => Ok(Direction::Up),
            DOWN_KEYWORD => Ok(Direction::Down),
            other => Err(MigboxError::new(
                &format!("Unknown migration direction '{}'", other),
                ErrorKind::ParseError,
            )),
        }
    }
}

/// A single parsed migration file.
///
/// # Purpose
/// Ties a file in a box to its position in the migration sequence. The
/// `raw` name is what gets handed back to the box when the body is read; the
/// `identifier` is the human-readable part a runner shows in its logs.
///
/// # Fields
/// - `version`: ordering key, compared numerically
/// - `identifier`: `{version}_{description}` portion of the file name
/// - `direction`: whether this file upgrades or rolls back `version`
/// - `raw`: the full file name as listed by the box
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Migration {
    pub version: u64,
    pub identifier: String,
    pub direction: Direction,
    pub raw: String,
}

impl Migration {
    pub fn new(version: u64, identifier: &str, direction: Direction, raw: &str) -> Self {
        Migration {
            version,
            identifier: identifier.to_string(),
            direction,
            raw: raw.to_string(),
        }
    }
}

impl Display for Migration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} {}", self.version, self.direction, self.identifier)
    }
}
