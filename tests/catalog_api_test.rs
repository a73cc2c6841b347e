//! Integration tests for the catalog against an HTTP index.

use std::collections::BTreeMap;
use std::time::Duration;

use httpmock::prelude::*;
use superpip::catalog::{Catalog, CatalogView, HttpIndex};

#[test]
fn json_index_merges_under_curated_entries() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/simple/");
        then.status(200)
            .header("content-type", "application/vnd.pypi.simple.v1+json")
            .body(r#"{"meta":{"api-version":"1.1"},"projects":[{"name":"Zephyr.Client"},{"name":"sklearn"}]}"#);
    });

    let index = HttpIndex::with_timeout(server.url("/simple/"), Duration::from_secs(5));
    let catalog = Catalog::build(&index, &BTreeMap::new());

    mock.assert();
    assert_eq!(catalog.fetched_count(), 2);
    assert_eq!(catalog.resolve("zephyr"), "Zephyr.Client");
    assert_eq!(catalog.resolve("sklearn"), "scikit-learn");
    assert_eq!(
        catalog.search(CatalogView::Full, "ZEPH").unwrap(),
        vec!["zephyr".to_string()]
    );
}

#[test]
fn server_error_falls_back_to_curated() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/simple/");
        then.status(503);
    });

    let index = HttpIndex::new(server.url("/simple/"));
    let catalog = Catalog::build(&index, &BTreeMap::new());

    assert_eq!(catalog.fetched_count(), 0);
    assert_eq!(catalog.resolve("bs4"), "beautifulsoup4");
    assert!(catalog.list_all(CatalogView::Full).len() >= catalog.fetched_count());
}
