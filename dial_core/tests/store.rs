use std::fs;

use dial_config::CalibrationFile;
use dial_core::mocks::MemoryBackend;
use dial_core::{AnchorTable, CalibrationMap, CalibrationStore, Dial, DialError, JsonFileBackend};
use proptest::prelude::*;
use rstest::rstest;
use tempfile::tempdir;

fn sample() -> CalibrationMap {
    CalibrationMap::from_tables(
        [(0, 1000), (30, 2000), (60, 3000)].into(),
        [(0, 900), (60, 5100)].into(),
        [(0, 400), (6, 3200), (12, 6400)].into(),
    )
}

fn dial_error(err: &eyre::Report) -> &DialError {
    err.downcast_ref::<DialError>()
        .unwrap_or_else(|| panic!("not a DialError: {err:?}"))
}

#[rstest]
fn missing_file_is_none_then_required_fails() {
    let dir = tempdir().unwrap();
    let store = CalibrationStore::new(JsonFileBackend::new(dir.path().join("cal.json")));
    assert!(store.load().unwrap().is_none());
    assert!(store.load_or_empty().unwrap().table(Dial::Hours).is_empty());

    let err = store.load_required().expect_err("missing");
    match dial_error(&err) {
        DialError::ConfigurationMissing(loc) => assert!(loc.ends_with("cal.json")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[rstest]
fn save_then_load_through_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cal.json");
    let mut store = CalibrationStore::new(JsonFileBackend::new(&path));
    store.save(&sample()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"seconds\""));
    assert!(text.contains("\"30\": 2000"));
    assert_eq!(store.load_required().unwrap(), sample());
}

#[rstest]
fn save_overwrites_instead_of_merging() {
    let mut store = CalibrationStore::new(MemoryBackend::default());
    store.save(&sample()).unwrap();

    let mut smaller = CalibrationMap::empty();
    smaller.table_mut(Dial::Seconds).insert(10, 1234);
    store.save(&smaller).unwrap();

    let loaded = store.load_required().unwrap();
    assert_eq!(loaded, smaller);
    assert_eq!(store.backend().writes, 2);
}

#[rstest]
#[case::garbage("not json at all")]
#[case::missing_dial(r#"{"seconds": {}, "minutes": {}}"#)]
#[case::out_of_range(r#"{"seconds": {"0": 70000}, "minutes": {}, "hours": {}}"#)]
fn malformed_file_is_reported(#[case] body: &str) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cal.json");
    fs::write(&path, body).unwrap();
    let store = CalibrationStore::new(JsonFileBackend::new(&path));

    let err = store.load().expect_err("malformed");
    assert!(matches!(
        dial_error(&err),
        DialError::ConfigurationMalformed(_)
    ));
    // calibration mode does not paper over a broken file either
    assert!(store.load_or_empty().is_err());
}

#[rstest]
fn preloaded_memory_backend_is_converted() {
    let mut file = CalibrationFile::default();
    file.hours.insert(12, 6400);
    let store = CalibrationStore::new(MemoryBackend::with(file));
    let map = store.load_required().unwrap();
    assert_eq!(map.table(Dial::Hours).get(12), Some(6400));
    assert!(map.table(Dial::Seconds).is_empty());
}

prop_compose! {
    fn table()(anchors in prop::collection::btree_map(0u32..=60, any::<u16>(), 0..8)) -> AnchorTable {
        anchors.into_iter().collect()
    }
}

proptest! {
    #[test]
    fn json_store_reproduces_saved_map(s in table(), m in table(), h in table()) {
        let dir = tempdir().unwrap();
        let mut store = CalibrationStore::new(JsonFileBackend::new(dir.path().join("c.json")));
        let map = CalibrationMap::from_tables(s, m, h);
        store.save(&map).unwrap();
        prop_assert_eq!(store.load_required().unwrap(), map);
    }
}
