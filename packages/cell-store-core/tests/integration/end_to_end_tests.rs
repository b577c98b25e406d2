//! End-to-end workflow tests
//!
//! Drive tables through the registry the way an embedding application would.

use cell_store_core::{Cell, DbError};

use super::helpers::{column_names, temp_registry};

/// Create a table, write a cell, read it back by exact key.
#[test]
fn test_point_write_and_read() {
    let (registry, _dir) = temp_registry();
    registry.create_table("users").unwrap();

    let users = registry.open_table("users").unwrap();
    let cell = Cell::new("u1", "name", "Alice");
    assert!(!users.insert(cell.clone()));

    assert_eq!(users.get(b"u1", b"name"), Some(cell));
}

/// Full row lifecycle: two columns, scan, single delete, row delete.
#[test]
fn test_row_lifecycle() {
    let (registry, _dir) = temp_registry();
    registry.create_table("users").unwrap();
    let users = registry.open_table("users").unwrap();

    users.insert(Cell::new("u1", "name", "Alice"));
    users.insert(Cell::new("u1", "age", "30"));

    // Columns come back in byte order
    let row = users.get_row(b"u1");
    assert_eq!(column_names(&row), vec!["age", "name"]);
    assert_eq!(row[0].payload(), b"30");
    assert_eq!(row[1].payload(), b"Alice");

    // Single-cell delete
    assert!(users.delete(b"u1", b"age"));
    assert!(users.get(b"u1", b"age").is_none());
    assert!(users.get(b"u1", b"age").is_none());
    assert!(!users.delete(b"u1", b"age"));

    // Row-wide delete removes what is left
    assert_eq!(users.delete_row(b"u1"), 1);
    assert!(users.get_row(b"u1").is_empty());
    assert!(users.is_empty());
}

/// Table names can be reused once deleted.
#[test]
fn test_name_reuse_after_delete() {
    let (registry, dir) = temp_registry();

    registry.create_table("t").unwrap();
    assert!(dir.path().join("t").is_dir());

    registry.delete_table("t").unwrap();
    assert!(!dir.path().join("t").exists());

    registry.create_table("t").unwrap();
    assert!(dir.path().join("t").is_dir());
    assert_eq!(registry.list_tables(), vec!["t"]);
}

#[test]
fn test_lifecycle_errors() {
    let (registry, _dir) = temp_registry();

    assert!(matches!(
        registry.open_table("missing"),
        Err(DbError::TableNotFound { .. })
    ));
    assert!(matches!(
        registry.delete_table("missing"),
        Err(DbError::TableNotFound { .. })
    ));

    registry.create_table("t").unwrap();
    assert_eq!(
        registry.create_table("t"),
        Err(DbError::TableAlreadyExists("t".to_string()))
    );
}

/// Tables are independent of each other.
#[test]
fn test_tables_are_isolated() {
    let (registry, _dir) = temp_registry();
    registry.create_table("a").unwrap();
    registry.create_table("b").unwrap();

    let a = registry.open_table("a").unwrap();
    let b = registry.open_table("b").unwrap();
    a.insert(Cell::new("r", "c", "from a"));

    assert!(b.get(b"r", b"c").is_none());
    assert_eq!(b.delete_row(b"r"), 0);
    assert_eq!(a.len(), 1);
}

#[test]
fn test_close_registry() {
    let (registry, dir) = temp_registry();
    registry.create_table("a").unwrap();
    registry.create_table("b").unwrap();
    registry
        .open_table("a")
        .unwrap()
        .insert(Cell::new("r", "c", "v"));

    let report = registry.close();
    assert!(report.is_clean());
    assert_eq!(report.closed, 2);
    assert!(dir.path().join("a").is_dir());
    assert!(dir.path().join("b").is_dir());
}
