use migbox::errors::ErrorKind;
use migbox::filebox::{DirectoryBox, FileBoxProvider};
use migbox_int_test::test_util::{
    cleanup, create_context_with, create_test_context, run_test, TestContext, SAMPLE_MIGRATIONS,
};
use std::io::Read;

#[test]
fn test_lists_every_file() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let file_box = DirectoryBox::open(ctx.path())?;
            let mut names = file_box.list()?;
            names.sort();

            let mut expected: Vec<&str> = SAMPLE_MIGRATIONS.iter().map(|(name, _)| *name).collect();
            expected.sort();
            assert_eq!(names, expected);
            assert_eq!(file_box.location(), ctx.path());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_open_streams_content() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let file_box = DirectoryBox::open(ctx.path())?;
            let mut file = file_box.open("1_init.down.sql")?;
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            assert_eq!(content, "DROP TABLE users;");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_nested_names_use_forward_slashes() {
    run_test(
        || create_context_with(&[("a/b/1_x.up.sql", "x"), ("top.sql", "t")]),
        |ctx: TestContext| {
            let file_box = DirectoryBox::open(ctx.path())?;
            let mut names = file_box.list()?;
            names.sort();
            assert_eq!(names, vec!["a/b/1_x.up.sql", "top.sql"]);
            assert!(file_box.has("a/b/1_x.up.sql")?);
            assert_eq!(file_box.open("a/b/1_x.up.sql")?.read_all_string()?, "x");
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_escaping_the_root_is_refused() {
    run_test(
        || create_context_with(&[("inner/1_x.up.sql", "x")]),
        |ctx: TestContext| {
            let inner = std::path::Path::new(ctx.path()).join("inner");
            let file_box = DirectoryBox::open(&inner)?;
            assert_eq!(file_box.list()?, vec!["1_x.up.sql"]);

            let err = file_box.open("../inner/1_x.up.sql").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::FileNotFound);
            Ok(())
        },
        cleanup,
    )
}
