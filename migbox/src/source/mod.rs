//! Migration sources and the driver registry.
//!
//! A migration runner talks to a [`SourceDriver`]: it asks for the first
//! version, walks forward or backward with `next`/`prev`, and reads the up or
//! down body of a version. [`BoxSource`] implements this contract over a
//! file box.
//!
//! # Opening Sources
//!
//! Sources can be built directly:
//!
//! ```rust,ignore
//! let source = BoxSource::with_instance(FileBox::new(embedded_box))?;
//! ```
//!
//! or through an explicit [`DriverRegistry`] that the host fills at startup
//! and passes to its runner:
//!
//! ```rust,ignore
//! let registry = DriverRegistry::new();
//! BoxSource::register(&registry, catalog)?;
//! let source = registry.open("box://db/migrations")?;
//! ```

mod box_source;
mod config;
mod driver;
mod registry;

pub use box_source::*;
pub use config::*;
pub use driver::*;
pub use registry::*;
