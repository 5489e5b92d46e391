//! File boxes: named collections of files a migration source reads from.
//!
//! A box only needs to list its file names and open a file by name. Two
//! implementations are provided:
//! - **In-Memory**: [`InMemoryBox`], for files compiled into the binary
//! - **Directory**: [`DirectoryBox`], for files read from disk at runtime
//!
//! Custom boxes implement [`FileBoxProvider`] and are wrapped in a
//! [`FileBox`] handle. The [`BoxCatalog`] maps locations to boxes so a source
//! can be opened from a location string alone.

mod catalog;
mod directory;
mod file_box;
mod memory;

pub use catalog::*;
pub use directory::*;
pub use file_box::*;
pub use memory::*;
