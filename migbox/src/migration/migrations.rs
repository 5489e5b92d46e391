use super::migration::{Direction, Migration};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

#[derive(Debug, Default, Clone)]
struct VersionEntry {
    up: Option<Migration>,
    down: Option<Migration>,
}

impl VersionEntry {
    fn slot(&mut self, direction: Direction) -> &mut Option<Migration> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }
}

/// Ordered registry of parsed migrations.
///
/// # Purpose
/// Holds at most one migration per (version, direction) pair and answers the
/// ordering queries a migration source needs. Versions are ordered by their
/// numeric value; a version is present as soon as either direction is.
///
/// # Usage
/// ```rust,ignore
/// let mut migrations = Migrations::new();
/// assert!(migrations.append(DefaultParser.parse("1_init.up.sql")?));
/// assert_eq!(migrations.first(), Some(1));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Migrations {
    entries: BTreeMap<u64, VersionEntry>,
}

impl Migrations {
    pub fn new() -> Self {
        Migrations {
            entries: BTreeMap::new(),
        }
    }

    /// Adds a migration to the registry.
    ///
    /// # Returns
    /// * `true` if the migration was added
    /// * `false` if a migration with the same version and direction is
    ///   already registered; the registry is left unchanged
    pub fn append(&mut self, migration: Migration) -> bool {
        let entry = self.entries.entry(migration.version).or_default();
        let slot = entry.slot(migration.direction);
        if slot.is_some() {
            return false;
        }
        *slot = Some(migration);
        true
    }

    /// Returns the lowest registered version.
    pub fn first(&self) -> Option<u64> {
        self.entries.keys().next().copied()
    }

    /// Returns the greatest registered version strictly below `version`.
    pub fn prev(&self, version: u64) -> Option<u64> {
        self.entries.range(..version).next_back().map(|(v, _)| *v)
    }

    /// Returns the smallest registered version strictly above `version`.
    pub fn next(&self, version: u64) -> Option<u64> {
        self.entries
            .range((Excluded(version), Unbounded))
            .next()
            .map(|(v, _)| *v)
    }

    /// Returns the up migration registered for `version`.
    pub fn up(&self, version: u64) -> Option<&Migration> {
        self.entries.get(&version).and_then(|e| e.up.as_ref())
    }

    /// Returns the down migration registered for `version`.
    pub fn down(&self, version: u64) -> Option<&Migration> {
        self.entries.get(&version).and_then(|e| e.down.as_ref())
    }

    pub fn get(&self, version: u64, direction: Direction) -> Option<&Migration> {
        match direction {
            Direction::Up => self.up(version),
            Direction::Down => self.down(version),
        }
    }

    /// Returns all registered versions in ascending order.
    pub fn versions(&self) -> Vec<u64> {
        self.entries.keys().copied().collect()
    }

    /// Number of distinct versions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
