use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tick::io::storage::FileStorage;
use tick::model::config::Config;
use tick::ops::store::Store;

fn read_fixture(fixture_name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture_name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", fixture_name, e))
}

/// Helper: place a fixture in a slot, load it, write it back with the same
/// content, and assert byte-for-byte equality
fn assert_slot_round_trip(fixture_name: &str) {
    let source = read_fixture(fixture_name);
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("todos.json"), &source).unwrap();

    let mut store = Store::open(FileStorage::new(tmp.path()), &Config::default());
    assert!(
        !store.snapshot().is_empty(),
        "fixture {} loaded empty",
        fixture_name
    );

    // Two toggles force two writes and leave the content as loaded
    let id = store.snapshot()[0].id;
    store.toggle(id).unwrap();
    store.toggle(id).unwrap();

    let output = fs::read_to_string(tmp.path().join("todos.json")).unwrap();
    assert_eq!(
        output,
        source.trim_end(),
        "Round-trip failed for fixture: {}",
        fixture_name
    );
}

#[test]
fn round_trip_todos() {
    assert_slot_round_trip("todos.json");
}

#[test]
fn round_trip_unicode() {
    assert_slot_round_trip("unicode.json");
}

#[test]
fn reopen_after_mutations_matches_last_snapshot() {
    let tmp = TempDir::new().unwrap();
    let config = Config::default();

    let mut store = Store::open(FileStorage::new(tmp.path()), &config);
    store.add("Buy milk").unwrap();
    let walk = store.add("Walk dog").unwrap();
    let call = store.add("Call mom").unwrap();
    store.toggle(walk.id).unwrap();
    store.edit(call.id, "Call mom tonight").unwrap();
    let gone = store.add("Temporary").unwrap();
    store.remove(gone.id).unwrap();
    let expected = store.snapshot().to_vec();

    let reopened = Store::open(FileStorage::new(tmp.path()), &config);
    assert_eq!(reopened.snapshot(), expected.as_slice());
    assert_eq!(
        reopened
            .snapshot()
            .iter()
            .map(|i| i.text.as_str())
            .collect::<Vec<_>>(),
        ["Call mom tonight", "Walk dog", "Buy milk"]
    );
}

#[test]
fn ids_stay_unique_across_sessions() {
    let tmp = TempDir::new().unwrap();
    let config = Config::default();

    let mut first = Store::open(FileStorage::new(tmp.path()), &config);
    let a = first.add("a").unwrap();
    first.remove(a.id).unwrap();
    let b = first.add("b").unwrap();
    drop(first);

    let mut second = Store::open(FileStorage::new(tmp.path()), &config);
    let c = second.add("c").unwrap();
    assert!(b.id > a.id);
    assert!(c.id > b.id);
}
