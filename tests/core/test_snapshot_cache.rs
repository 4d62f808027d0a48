// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Snapshot cache atomicity and read-path guarantees

use posgrados_node::cache::{CatalogSnapshot, SnapshotCache};
use posgrados_node::catalog::{ContentFragment, PageKind};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

fn fragment(id: &str, text: &str) -> ContentFragment {
    ContentFragment {
        id: id.to_string(),
        program: "mae_der_penal".to_string(),
        kind: PageKind::Overview,
        url: format!("https://example.com/{}.php", id),
        title: "Maestría en Derecho Penal".to_string(),
        text: text.to_string(),
        extracted_at: Instant::now(),
    }
}

#[test]
fn test_cold_start() {
    let cache = SnapshotCache::new();
    let snapshot = cache.current();
    assert!(snapshot.cold);
    assert_eq!(snapshot.len(), 0);
}

#[test]
fn test_current_is_idempotent() {
    let cache = SnapshotCache::new();
    cache.replace(CatalogSnapshot::new(vec![
        fragment("a", "uno"),
        fragment("b", "dos"),
    ]));

    let first = cache.current();
    let second = cache.current();

    // Same pointer, same data
    assert!(Arc::ptr_eq(&first, &second));
    let ids_a: Vec<_> = first.fragments.iter().map(|f| f.id.clone()).collect();
    let ids_b: Vec<_> = second.fragments.iter().map(|f| f.id.clone()).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn test_replace_is_visible_to_subsequent_reads() {
    let cache = SnapshotCache::new();
    cache.replace(CatalogSnapshot::new(vec![fragment("a", "uno")]));
    assert_eq!(cache.current().len(), 1);

    cache.replace(CatalogSnapshot::new(vec![
        fragment("b", "dos"),
        fragment("c", "tres"),
    ]));
    let snapshot = cache.current();
    assert_eq!(snapshot.len(), 2);
    assert!(snapshot.fragments.iter().all(|f| f.id != "a"));
}

#[test]
fn test_readers_never_observe_mixed_snapshots() {
    let cache = Arc::new(SnapshotCache::new());
    // Every fragment in batch N carries the same text marker, so a torn
    // read would show up as a snapshot with mixed markers.
    cache.replace(CatalogSnapshot::new(vec![
        fragment("a", "batch-0"),
        fragment("b", "batch-0"),
        fragment("c", "batch-0"),
    ]));

    let writer_cache = cache.clone();
    let writer = thread::spawn(move || {
        for n in 1..200 {
            let marker = format!("batch-{}", n);
            writer_cache.replace(CatalogSnapshot::new(vec![
                fragment("a", &marker),
                fragment("b", &marker),
                fragment("c", &marker),
            ]));
        }
    });

    let reader_cache = cache.clone();
    let reader = thread::spawn(move || {
        for _ in 0..2000 {
            let snapshot = reader_cache.current();
            let first = &snapshot.fragments[0].text;
            assert!(
                snapshot.fragments.iter().all(|f| &f.text == first),
                "observed a torn snapshot"
            );
        }
    });

    writer.join().unwrap();
    reader.join().unwrap();
}

#[test]
fn test_held_snapshot_survives_replacement() {
    let cache = SnapshotCache::new();
    cache.replace(CatalogSnapshot::new(vec![fragment("a", "uno")]));

    let held = cache.current();
    cache.replace(CatalogSnapshot::new(vec![fragment("b", "dos")]));

    assert_eq!(held.fragments[0].id, "a");
    assert_eq!(cache.current().fragments[0].id, "b");
}
