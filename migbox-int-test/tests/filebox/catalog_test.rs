use migbox::errors::ErrorKind;
use migbox::filebox::{BoxCatalog, FileBox, InMemoryBox};
use migbox_int_test::test_util::{
    cleanup, create_test_context, embedded_box, run_test, TestContext, EMBEDDED_LOCATION,
};

#[test]
fn test_registered_box_shadows_directory() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let catalog = BoxCatalog::new();
            catalog.register(ctx.path(), embedded_box(&[("42_only.up.sql", "")]))?;

            let file_box = catalog.resolve(ctx.path())?;
            assert_eq!(file_box.list()?, vec!["42_only.up.sql"]);

            assert!(catalog.deregister(ctx.path()));
            let file_box = catalog.resolve(ctx.path())?;
            assert!(file_box.list()?.len() > 1);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_context_catalog_serves_sample_files() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            assert_eq!(ctx.catalog().locations(), vec![EMBEDDED_LOCATION]);
            let file_box = ctx.catalog().resolve(EMBEDDED_LOCATION)?;
            assert!(file_box.has("5_add_index.up.sql")?);
            assert!(!file_box.has("6_missing.up.sql")?);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_custom_boxes_can_be_registered() {
    let catalog = BoxCatalog::new();
    let custom = FileBox::new(InMemoryBox::with_config().location("custom").build());
    catalog.register_box("custom", custom).unwrap();
    assert_eq!(catalog.resolve("custom").unwrap().location(), "custom");

    let err = catalog.register_box("", FileBox::new(InMemoryBox::new(""))).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::InvalidInput);
}
