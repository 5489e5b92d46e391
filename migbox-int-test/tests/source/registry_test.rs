use migbox::common::BOX_DRIVER_NAME;
use migbox::errors::ErrorKind;
use migbox::filebox::BoxCatalog;
use migbox::source::{BoxSource, DriverRegistry, SourceDriver};
use migbox_int_test::test_util::{
    cleanup, create_test_context, embedded_box, run_test, TestContext, EMBEDDED_LOCATION,
};

#[test]
fn test_open_registered_box_through_url() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let registry = DriverRegistry::new();
            BoxSource::register(&registry, ctx.catalog().clone())?;
            assert_eq!(registry.drivers(), vec![BOX_DRIVER_NAME]);

            let source = registry.open(&format!("box://{}", EMBEDDED_LOCATION))?;
            assert_eq!(source.first()?, 1);
            assert_eq!(source.next(2)?, 5);
            let (_, identifier) = source.read_up(5)?;
            assert_eq!(identifier, "5_add_index");
            source.close()?;
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_unregistered_location_falls_back_to_disk() {
    run_test(
        create_test_context,
        |ctx: TestContext| {
            let registry = DriverRegistry::new();
            BoxSource::register(&registry, BoxCatalog::new())?;

            let source = registry.open(&format!("box://{}", ctx.path()))?;
            assert_eq!(source.first()?, 1);
            assert_eq!(source.prev(5)?, 2);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_catalog_changes_are_seen_by_later_opens() {
    let catalog = BoxCatalog::new();
    let registry = DriverRegistry::new();
    BoxSource::register(&registry, catalog.clone()).unwrap();

    let url = "box://late/registration";
    assert!(registry.open(url).is_err());

    catalog
        .register(
            "late/registration",
            embedded_box(&[("9_late.up.sql", "SELECT 9;")]),
        )
        .unwrap();
    let source = registry.open(url).unwrap();
    assert_eq!(source.first().unwrap(), 9);
}

#[test]
fn test_sources_from_different_drivers() {
    let registry = DriverRegistry::new();
    BoxSource::register(&registry, BoxCatalog::new()).unwrap();
    registry
        .register("fixture", |_location: &str| {
            let source = BoxSource::with_config()
                .catalog(fixture_catalog())
                .open("fixture")?;
            Ok(SourceDriver::new(source))
        })
        .unwrap();

    assert_eq!(registry.drivers(), vec!["box", "fixture"]);
    let source = registry.open("fixture://ignored").unwrap();
    assert_eq!(source.first().unwrap(), 10);

    let err = registry.open("git://example.com/repo").err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::UnsupportedDriver);

    let err = registry.open("box://").err().unwrap();
    assert_eq!(err.kind(), &ErrorKind::InvalidInput);
}

fn fixture_catalog() -> BoxCatalog {
    let catalog = BoxCatalog::new();
    catalog
        .register("fixture", embedded_box(&[("10_fixture.up.sql", "SELECT 10;")]))
        .expect("fixture location is not empty");
    catalog
}
