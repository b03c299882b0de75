use std::fs;

use filescout_locator::{FileLocator, LocatorError, DEFAULT_SEARCH_DEPTH};
use tempfile::tempdir;

#[test]
fn end_to_end_group_registration_and_lookup() {
    let views = tempdir().expect("temp dir");
    let assets = tempdir().expect("temp dir");

    // views/
    //   layouts/main.tpl
    //   partials/header/banner.tpl
    // assets/
    //   logo.svg
    let layouts = views.path().join("layouts");
    let header = views.path().join("partials").join("header");
    fs::create_dir_all(&layouts).unwrap();
    fs::create_dir_all(&header).unwrap();
    fs::write(layouts.join("main.tpl"), "layout").unwrap();
    fs::write(header.join("banner.tpl"), "banner").unwrap();
    fs::write(assets.path().join("logo.svg"), "<svg/>").unwrap();

    let views_root = views.path().to_string_lossy().into_owned();
    let assets_root = assets.path().to_string_lossy().into_owned();

    let mut locator = FileLocator::new();
    locator.add(&views_root, Some("views"), None).unwrap();
    locator.add(&assets_root, Some("assets"), Some(1)).unwrap();

    assert_eq!(
        locator.registry().entries("views").unwrap()[0].max_depth,
        DEFAULT_SEARCH_DEPTH
    );

    // Lookups are scoped to their group.
    let banner = locator.locate("banner", Some("views")).unwrap().unwrap();
    assert!(banner.ends_with("partials/header/banner.tpl"));
    assert_eq!(locator.locate("banner", Some("assets")).unwrap(), None);

    let logo = locator.locate("logo", Some("assets")).unwrap().unwrap();
    assert!(logo.ends_with("logo.svg"));

    // The working group stands in for an omitted group argument.
    locator.set_working_group("views");
    let main = locator.locate("main.tpl", None).unwrap().unwrap();
    assert!(main.ends_with("layouts/main.tpl"));
    locator.reset_working_group();
    assert_eq!(
        locator.locate("main.tpl", None).unwrap_err(),
        LocatorError::MissingGroup
    );

    // Located files survive filesystem changes until the caches are cleared.
    fs::remove_file(&banner).unwrap();
    assert_eq!(
        locator.locate("banner", Some("views")).unwrap().as_deref(),
        Some(banner.as_str())
    );
    locator.clear_caches();
    assert_eq!(locator.locate("banner", Some("views")).unwrap(), None);

    // A deep scan flattens the group's trees; the cached copy ignores new
    // files until forced.
    let scanned = locator.scan(Some("views"), false).unwrap();
    assert!(scanned.iter().any(|p| p.ends_with("layouts/main.tpl")));

    fs::write(views.path().join("extra.tpl"), "late").unwrap();
    let cached = locator.scan(Some("views"), false).unwrap();
    assert_eq!(cached, scanned);
    let forced = locator.scan(Some("views"), true).unwrap();
    assert!(forced.iter().any(|p| p.ends_with("extra.tpl")));
}

#[test]
fn lookup_against_an_unregistered_group_fails() {
    let mut locator = FileLocator::new();
    assert_eq!(
        locator.locate("whatever", Some("no-such-group")).unwrap_err(),
        LocatorError::UnknownGroup("no-such-group".to_string())
    );
}
