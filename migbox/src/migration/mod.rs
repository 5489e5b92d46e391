//! Migration records, file name parsing and the ordered registry.
//!
//! A migration is one file in a box whose name carries a version and a
//! direction:
//!
//! ```text
//! 1_init.up.sql        version 1, up,   identifier "1_init"
//! 1_init.down.sql      version 1, down, identifier "1_init"
//! 2_add_users.up.sql   version 2, up,   identifier "2_add_users"
//! ```
//!
//! [`DefaultParser`] recognises this convention and [`Migrations`] keeps the
//! parsed records ordered by version, at most one per (version, direction).

mod migration;
mod migrations;
mod parser;

pub use migration::{Direction, Migration};
pub use migrations::Migrations;
pub use parser::{DefaultParser, MigrationParser};
