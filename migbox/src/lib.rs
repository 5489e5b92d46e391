//! # migbox - Migration Sources over File Boxes
//!
//! migbox exposes a collection of migration files, compiled into the binary
//! or read from a directory, as an ordered sequence of versioned migrations
//! that a migration runner can walk and apply.
//!
//! ## Key Features
//!
//! - **Embedded**: serve migrations from `include_bytes!` without touching disk
//! - **Ordered**: versions are sorted numerically, with `first`/`next`/`prev` navigation
//! - **Directional**: separate up and down bodies per version
//! - **Strict**: duplicate version and direction pairs are rejected up front
//! - **Explicit Registration**: boxes and drivers are registered by the host, never at load time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use migbox::filebox::{FileBox, InMemoryBox};
//! use migbox::source::{BoxSource, SourceDriverProvider};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file_box = InMemoryBox::with_config()
//!     .add_file("1_init.up.sql", "CREATE TABLE users (id INT);")
//!     .add_file("1_init.down.sql", "DROP TABLE users;")
//!     .add_file("2_add_email.up.sql", "ALTER TABLE users ADD email TEXT;")
//!     .build();
//!
//! let source = BoxSource::with_instance(FileBox::new(file_box))?;
//!
//! let mut version = source.first()?;
//! loop {
//!     let (body, identifier) = source.read_up(version)?;
//!     println!("applying {}: {}", identifier, body.read_all_string()?);
//!     match source.next(version) {
//!         Ok(next) => version = next,
//!         Err(e) if e.is_not_exist() => break,
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Shared constants and lock helpers
//! - [`errors`] - Error types and result definitions
//! - [`filebox`] - File boxes and the box catalog
//! - [`migration`] - Migration records, parsing and ordering
//! - [`source`] - The migration source contract, the box source and the driver registry

pub mod common;
pub mod errors;
pub mod filebox;
pub mod migration;
pub mod source;

pub use errors::{ErrorKind, MigboxError, MigboxResult};
pub use filebox::{BoxCatalog, BoxFile, DirectoryBox, FileBox, FileBoxProvider, InMemoryBox};
pub use migration::{DefaultParser, Direction, Migration, MigrationParser, Migrations};
pub use source::{BoxSource, DriverRegistry, SourceDriver, SourceDriverProvider};
