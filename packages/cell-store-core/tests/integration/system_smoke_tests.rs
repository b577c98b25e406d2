//! Multi-threaded smoke tests
//!
//! Many threads sharing one registry and its tables.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::thread;

use cell_store_core::cell::order;
use cell_store_core::Cell;
use ntest::timeout;

use super::helpers::temp_registry;

#[timeout(10000)]
#[test]
fn test_parallel_writers_share_table() {
    let (registry, _dir) = temp_registry();
    registry.create_table("events").unwrap();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                // Every thread opens its own handle to the same table
                let events = registry.open_table("events").unwrap();
                for i in 0..200 {
                    let row = format!("user-{:02}", i % 20);
                    let column = format!("t{t}-{i:03}");
                    events.insert(Cell::new(row, column, format!("{t}:{i}")));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let events = registry.open_table("events").unwrap();
    assert_eq!(events.len(), 4 * 200);
    for user in 0..20 {
        let row = events.get_row(format!("user-{user:02}").as_bytes());
        assert_eq!(row.len(), 40);
    }
}

/// Row scans during concurrent writes still see ordered single-row runs.
#[timeout(10000)]
#[test]
fn test_scans_stay_ordered_under_writes() {
    let (registry, _dir) = temp_registry();
    registry.create_table("t").unwrap();
    let table = registry.open_table("t").unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let table = Arc::clone(&table);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..2000 {
                let row = if i % 2 == 0 { "hot" } else { "hot2" };
                table.insert(Cell::new(row, format!("c{:04}", i % 300), "v"));
                if i % 3 == 0 {
                    table.delete(row.as_bytes(), format!("c{:04}", (i + 7) % 300).as_bytes());
                }
            }
            done.store(true, AtomicOrdering::Release);
        })
    };

    while !done.load(AtomicOrdering::Acquire) {
        let cells = table.get_row(b"hot");
        assert!(cells.iter().all(|cell| cell.row() == b"hot"));
        for pair in cells.windows(2) {
            assert_eq!(order::compare_cells(&pair[0], &pair[1]), Ordering::Less);
        }
    }
    writer.join().unwrap();
}

#[timeout(10000)]
#[test]
fn test_delete_row_with_concurrent_inserts_elsewhere() {
    let (registry, _dir) = temp_registry();
    registry.create_table("t").unwrap();
    let table = registry.open_table("t").unwrap();
    for i in 0..1000 {
        table.insert(Cell::new("doomed", format!("c{i:04}"), "x"));
    }

    let writers: Vec<_> = ["alpha", "omega"]
        .into_iter()
        .map(|row| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for i in 0..500 {
                    assert!(table.insert_if_absent(Cell::new(row, format!("c{i:04}"), "y")));
                }
            })
        })
        .collect();

    assert_eq!(table.delete_row(b"doomed"), 1000);
    for writer in writers {
        writer.join().unwrap();
    }

    assert!(table.get_row(b"doomed").is_empty());
    assert_eq!(table.get_row(b"alpha").len(), 500);
    assert_eq!(table.get_row(b"omega").len(), 500);
}

#[timeout(10000)]
#[test]
fn test_parallel_registry_lifecycle() {
    let (registry, dir) = temp_registry();
    let registry = Arc::new(registry);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..10 {
                    let name = format!("table-{t}-{i}");
                    registry.create_table(&name).unwrap();
                    registry
                        .open_table(&name)
                        .unwrap()
                        .insert(Cell::new("r", "c", "v"));
                }
                registry.delete_table(&format!("table-{t}-0")).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let names = registry.list_tables();
    assert_eq!(names.len(), 4 * 9);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    for name in &names {
        assert!(dir.path().join(name).is_dir());
    }
    assert!(!dir.path().join("table-0-0").exists());
}
