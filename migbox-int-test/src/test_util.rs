use migbox::errors::{ErrorKind, MigboxError, MigboxResult};
use migbox::filebox::{BoxCatalog, InMemoryBox};
use migbox::source::BoxSource;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::{Duration, Instant};
use std::{env, fs, thread};

/// A migration set exercising both directions, a gap and a non-migration file.
pub const SAMPLE_MIGRATIONS: &[(&str, &str)] = &[
    ("1_init.up.sql", "CREATE TABLE users (id INT PRIMARY KEY);"),
    ("1_init.down.sql", "DROP TABLE users;"),
    ("2_add_email.up.sql", "ALTER TABLE users ADD COLUMN email TEXT;"),
    ("2_add_email.down.sql", "ALTER TABLE users DROP COLUMN email;"),
    ("5_add_index.up.sql", "CREATE INDEX users_email ON users (email);"),
    ("README.md", "Migrations for the users schema."),
];

/// Runs a test between a setup and a teardown step.
///
/// The teardown runs even when the test fails or panics, so scratch
/// directories do not pile up in the temp dir.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> MigboxResult<()>,
    B: Fn() -> MigboxResult<TestContext>,
    A: Fn(TestContext) -> MigboxResult<()>,
{
    let start_time = Instant::now();
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| test(ctx.clone())));
    let after_result = after(ctx);

    match result {
        Ok(Ok(())) => {
            if let Err(e) = after_result {
                panic!("After run failed: {:?}", e);
            }
            log::debug!("Test finished in {:?}", start_time.elapsed());
        }
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic_err) => panic::resume_unwind(panic_err),
    }
}

#[derive(Clone)]
pub struct TestContext {
    path: String,
    catalog: BoxCatalog,
}

impl TestContext {
    pub fn new(path: String, catalog: BoxCatalog) -> Self {
        Self { path, catalog }
    }

    /// Scratch directory holding the on-disk migration files.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Catalog with the same files registered in memory under [`EMBEDDED_LOCATION`].
    pub fn catalog(&self) -> &BoxCatalog {
        &self.catalog
    }

    pub fn directory_source(&self) -> MigboxResult<BoxSource> {
        BoxSource::open(&self.path)
    }

    pub fn embedded_source(&self) -> MigboxResult<BoxSource> {
        BoxSource::with_config()
            .catalog(self.catalog.clone())
            .open(EMBEDDED_LOCATION)
    }
}

/// Location the in-memory copy of a test context's files is registered under.
pub const EMBEDDED_LOCATION: &str = "embedded/migrations";

pub fn random_path() -> String {
    let id = uuid::Uuid::new_v4();
    env::temp_dir()
        .join(format!("migbox-test-{}", id))
        .to_string_lossy()
        .to_string()
}

/// Writes `files` below `root`, creating parent directories for nested names.
pub fn write_files(root: &str, files: &[(&str, &str)]) -> MigboxResult<()> {
    fs::create_dir_all(root)?;
    for (name, content) in files {
        let path = Path::new(root).join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    }
    Ok(())
}

pub fn embedded_box(files: &[(&str, &str)]) -> InMemoryBox {
    let mut builder = InMemoryBox::with_config().location(EMBEDDED_LOCATION);
    for (name, content) in files {
        builder = builder.add_file(name, *content);
    }
    builder.build()
}

/// Creates a context with `files` both on disk and registered in memory.
pub fn create_context_with(files: &[(&str, &str)]) -> MigboxResult<TestContext> {
    let path = random_path();
    write_files(&path, files)?;

    let catalog = BoxCatalog::new();
    catalog.register(EMBEDDED_LOCATION, embedded_box(files))?;
    Ok(TestContext::new(path, catalog))
}

pub fn create_test_context() -> MigboxResult<TestContext> {
    create_context_with(SAMPLE_MIGRATIONS)
}

pub fn cleanup(ctx: TestContext) -> MigboxResult<()> {
    let path = ctx.path().to_string();
    let max_retries = 5;

    for retry in 0..max_retries {
        if !Path::new(&path).exists() {
            return Ok(());
        }

        match fs::remove_dir_all(&path) {
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(_) if retry < max_retries - 1 => {
                thread::sleep(Duration::from_millis(50 * (retry as u64 + 1)));
            }
            Err(e) => {
                return Err(MigboxError::new_with_cause(
                    &format!("Failed to remove test directory {}", path),
                    ErrorKind::IOError,
                    e.into(),
                ));
            }
        }
    }
    Ok(())
}

pub fn is_sorted<T: Ord>(iterable: impl IntoIterator<Item = T>, ascending: bool) -> bool {
    let mut iter = iterable.into_iter();
    if let Some(mut prev) = iter.next() {
        for current in iter {
            if ascending {
                if prev > current {
                    return false;
                }
            } else if prev < current {
                return false;
            }
            prev = current;
        }
    }
    true
}
