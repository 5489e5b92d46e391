use super::{BoxFile, FileBoxProvider};
use crate::common::BOX_PATH_SEPARATOR;
use crate::errors::{ErrorKind, MigboxError, MigboxResult};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

/// A box backed by a directory on disk.
///
/// # Purpose
/// Serves migration files straight from the file system, which is what a box
/// resolves to when no in-memory box is registered for a location. Listing
/// walks the directory recursively; nested files are named with `/`
/// separated relative paths (`tenant/1_init.up.sql`).
///
/// # Characteristics
/// - **Live**: files are read at open time, so edits on disk are visible
/// - **Confined**: names that are absolute or contain `..` are refused
#[derive(Debug, Clone)]
pub struct DirectoryBox {
    root: PathBuf,
}

impl DirectoryBox {
    /// Resolves a directory box rooted at `path`.
    ///
    /// # Returns
    /// * `Ok(DirectoryBox)` if `path` is an existing directory
    /// * `Err(MigboxError)` with `ErrorKind::FileNotFound` if it does not exist,
    ///   or `ErrorKind::InvalidInput` if it is not a directory
    pub fn open<P: AsRef<Path>>(path: P) -> MigboxResult<DirectoryBox> {
        let root = path.as_ref().to_path_buf();
        let metadata = fs::metadata(&root).map_err(|e| {
            MigboxError::new_with_cause(
                &format!("Cannot resolve box at {}", root.display()),
                ErrorKind::FileNotFound,
                e.into(),
            )
        })?;

        if !metadata.is_dir() {
            return Err(MigboxError::new(
                &format!("Box location {} is not a directory", root.display()),
                ErrorKind::InvalidInput,
            ));
        }
        Ok(DirectoryBox { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> MigboxResult<PathBuf> {
        let relative = Path::new(name);
        let confined = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined {
            return Err(MigboxError::new(
                &format!("File {} not found in box {}", name, self.root.display()),
                ErrorKind::FileNotFound,
            ));
        }
        Ok(self.root.join(relative))
    }

    fn walk(&self, dir: &Path, prefix: &str, names: &mut Vec<String>) -> MigboxResult<()> {
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let file_name = entry.file_name();
            let file_name = match file_name.to_str() {
                Some(name) => name,
                None => {
                    log::warn!(
                        "Skipping non UTF-8 file name {:?} in {}",
                        file_name,
                        dir.display()
                    );
                    continue;
                }
            };

            let name = if prefix.is_empty() {
                file_name.to_string()
            } else {
                format!("{}{}{}", prefix, BOX_PATH_SEPARATOR, file_name)
            };

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                self.walk(&entry.path(), &name, names)?;
            } else if entry.path().is_file() {
                names.push(name);
            }
        }
        Ok(())
    }
}

impl FileBoxProvider for DirectoryBox {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn list(&self) -> MigboxResult<Vec<String>> {
        let mut names = Vec::new();
        self.walk(&self.root, "", &mut names)?;
        Ok(names)
    }

    fn open(&self, name: &str) -> MigboxResult<BoxFile> {
        let path = self.resolve(name)?;
        log::trace!("Opening {} from {}", name, self.root.display());
        let file = File::open(&path)?;
        if !file.metadata()?.is_file() {
            return Err(MigboxError::new(
                &format!("{} in box {} is not a file", name, self.root.display()),
                ErrorKind::FileNotFound,
            ));
        }
        Ok(BoxFile::new(name, BufReader::new(file)))
    }

    fn has(&self, name: &str) -> MigboxResult<bool> {
        match self.resolve(name) {
            Ok(path) => Ok(path.is_file()),
            Err(_) => Ok(false),
        }
    }
}
