use migbox::errors::{ErrorKind, MigboxResult};
use migbox::filebox::{FileBox, InMemoryBox};
use migbox::source::{BoxSource, SourceDriverProvider};
use migbox_int_test::test_util::{
    cleanup, create_context_with, create_test_context, is_sorted, run_test, TestContext,
};

/// Walks a source from its first version to its last.
fn walk_forward(source: &dyn SourceDriverProvider) -> MigboxResult<Vec<u64>> {
    let mut versions = Vec::new();
    let mut version = match source.first() {
        Ok(version) => version,
        Err(e) if e.is_not_exist() => return Ok(versions),
        Err(e) => return Err(e),
    };

    loop {
        versions.push(version);
        match source.next(version) {
            Ok(next) => version = next,
            Err(e) if e.is_not_exist() => return Ok(versions),
            Err(e) => return Err(e),
        }
    }
}

fn walk_backward(source: &dyn SourceDriverProvider, from: u64) -> MigboxResult<Vec<u64>> {
    let mut versions = vec![from];
    let mut version = from;
    loop {
        match source.prev(version) {
            Ok(prev) => {
                versions.push(prev);
                version = prev;
            }
            Err(e) if e.is_not_exist() => return Ok(versions),
            Err(e) => return Err(e),
        }
    }
}

#[test]
fn test_directory_source_walks_in_order() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let source = ctx.directory_source()?;
            let versions = walk_forward(&source)?;
            assert_eq!(versions, vec![1, 2, 5]);
            assert!(is_sorted(versions.iter(), true));

            let backward = walk_backward(&source, 5)?;
            assert_eq!(backward, vec![5, 2, 1]);
            assert!(is_sorted(backward.iter(), false));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_embedded_and_directory_sources_agree() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let on_disk = ctx.directory_source()?;
            let embedded = ctx.embedded_source()?;
            assert_eq!(walk_forward(&on_disk)?, walk_forward(&embedded)?);

            for version in walk_forward(&on_disk)? {
                let disk_up = on_disk.read_up(version)?;
                let mem_up = embedded.read_up(version)?;
                assert_eq!(disk_up.1, mem_up.1);
                assert_eq!(disk_up.0.read_all()?, mem_up.0.read_all()?);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_read_bodies_unmodified() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let source = ctx.directory_source()?;

            let (body, identifier) = source.read_up(1)?;
            assert_eq!(identifier, "1_init");
            assert_eq!(body.read_all_string()?, "CREATE TABLE users (id INT PRIMARY KEY);");

            let (body, identifier) = source.read_down(2)?;
            assert_eq!(identifier, "2_add_email");
            assert_eq!(body.read_all_string()?, "ALTER TABLE users DROP COLUMN email;");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_missing_direction_is_not_exist() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let source = ctx.embedded_source()?;
            assert!(source.read_up(5).is_ok());
            let err = source.read_down(5).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotExist);

            let err = source.read_up(3).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NotExist);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_duplicate_migration_fails_construction() {
    run_test(
        || {
            create_context_with(&[
                ("1_init.up.sql", "CREATE TABLE a (id INT);"),
                ("1_init_again.up.sql", "CREATE TABLE a (id INT);"),
            ])
        },
        |ctx: TestContext| {
            let err = ctx.directory_source().err().unwrap();
            assert_eq!(err.kind(), &ErrorKind::DuplicateMigration);
            assert!(err.message().contains("1_init_again.up.sql"));

            let err = ctx.embedded_source().err().unwrap();
            assert_eq!(err.kind(), &ErrorKind::DuplicateMigration);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_non_migration_files_are_ignored() {
    run_test(
        || create_context_with(&[("bogus.txt", "hello"), ("3_x.up.sql", "SELECT 3;")]),
        |ctx: TestContext| {
            let source = ctx.directory_source()?;
            assert_eq!(source.first()?, 3);
            assert_eq!(walk_forward(&source)?, vec![3]);
            assert!(source.prev(3).unwrap_err().is_not_exist());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_empty_directory() {
    run_test(
        || create_context_with(&[]),
        |ctx: TestContext| {
            let source = ctx.directory_source()?;
            assert_eq!(source.first().unwrap_err().kind(), &ErrorKind::NotExist);
            assert!(walk_forward(&source)?.is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_nested_files_parse_with_their_path() {
    run_test(
        || create_context_with(&[("1_init.up.sql", ""), ("archive/7_old.up.sql", "")]),
        |ctx: TestContext| {
            // the path prefix keeps the nested file from matching the convention
            let source = ctx.directory_source()?;
            assert_eq!(walk_forward(&source)?, vec![1]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_file_removed_after_construction_is_open_conflict() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let source = ctx.directory_source()?;
            std::fs::remove_file(std::path::Path::new(ctx.path()).join("2_add_email.up.sql"))?;

            let err = source.read_up(2).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::OpenConflict);
            assert!(err.message().contains("2_add_email.up.sql"));

            // navigation still answers from the parsed registry
            assert_eq!(source.next(1)?, 2);
            assert!(source.read_down(2).is_ok());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_open_missing_location() {
    let err = BoxSource::open("/definitely/not/a/migration/dir").err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::FileNotFound);

    let err = BoxSource::open("").err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::InvalidInput);
}

#[test]
fn test_static_content_source() {
    static INIT_UP: &[u8] = b"CREATE TABLE t (id INT);";
    let file_box = InMemoryBox::with_config()
        .location("static")
        .add_static("1_init.up.sql", INIT_UP)
        .build();

    let source = BoxSource::with_instance(FileBox::new(file_box)).unwrap();
    let (body, identifier) = source.read_up(1).unwrap();
    assert_eq!(identifier, "1_init");
    assert_eq!(body.read_all().unwrap(), INIT_UP);
    assert!(source.close().is_ok());
}
