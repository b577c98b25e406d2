//! Table registry managing table lifecycle and existence markers.

use std::sync::Arc;

use dashmap::{DashMap, DashSet};

use crate::config::DbConfig;
use crate::error::DbError;
use crate::persistence::{DirMarkerStore, MarkerStore};
use crate::table::Table;

/// Registry holding every live table, keyed by name.
///
/// Table lookups hand out shared [`Arc<Table>`] handles; reads and writes go
/// straight to the table. The registry is only involved in create, delete,
/// open, list and close.
///
/// Create and delete claim the table name for the duration of the marker
/// I/O, so two lifecycle operations on one name never overlap. The table map
/// itself is only locked for the final insert or remove, which keeps
/// operations on other names from waiting on marker I/O.
#[derive(Debug)]
pub struct TableRegistry {
    /// Map of table name to table instance
    tables: DashMap<String, Arc<Table>>,
    /// Names with a create or delete in progress
    pending: DashSet<String>,
    /// Durable record of which tables exist
    markers: Arc<dyn MarkerStore>,
}

/// Outcome of [`TableRegistry::close`].
#[derive(Debug, Default)]
pub struct CloseReport {
    /// Number of tables closed without error
    pub closed: usize,
    /// Tables whose close hook failed, with the error
    pub failures: Vec<(String, DbError)>,
}

impl CloseReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl TableRegistry {
    /// Opens a registry whose markers are directories under `config.data_dir`.
    ///
    /// The data directory is created if missing. Every existing
    /// sub-directory becomes an empty table.
    pub fn open(config: &DbConfig) -> Result<Self, DbError> {
        let store = DirMarkerStore::open(&config.data_dir)?;
        Self::with_store(Arc::new(store))
    }

    /// Opens a registry over an arbitrary marker store.
    ///
    /// Only table names are recovered; cell contents start empty.
    pub fn with_store(markers: Arc<dyn MarkerStore>) -> Result<Self, DbError> {
        let tables = DashMap::new();
        for name in markers.list_markers()? {
            let table = Arc::new(Table::new(name.clone()));
            tables.insert(name, table);
        }
        tracing::info!("Opened table registry with {} tables", tables.len());
        Ok(Self {
            tables,
            pending: DashSet::new(),
            markers,
        })
    }

    /// Claims `name` for one lifecycle operation, or `None` if another
    /// create or delete of `name` is in progress.
    fn claim<'a>(&'a self, name: &'a str) -> Option<NameClaim<'a>> {
        if self.pending.insert(name.to_string()) {
            Some(NameClaim {
                pending: &self.pending,
                name,
            })
        } else {
            None
        }
    }

    /// Creates a new empty table.
    ///
    /// The marker is written before the table becomes visible; if that fails
    /// nothing is registered. Racing a create or delete of the same name
    /// fails with `TableAlreadyExists`.
    ///
    /// # Arguments
    /// * `name` - Table name
    ///
    /// # Returns
    /// `Result<(), DbError>` indicating success or failure.
    pub fn create_table(&self, name: &str) -> Result<(), DbError> {
        let Some(_claim) = self.claim(name) else {
            return Err(DbError::TableAlreadyExists(name.to_string()));
        };
        if self.tables.contains_key(name) {
            return Err(DbError::TableAlreadyExists(name.to_string()));
        }

        self.markers.create_marker(name)?;
        self.tables.insert(name.to_string(), Arc::new(Table::new(name)));
        tracing::info!("Created table {}", name);
        Ok(())
    }

    /// Returns true if `name` is registered. Never touches the marker store.
    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Deletes a table and its marker, discarding its cells.
    ///
    /// The marker is removed first; if that fails the table stays
    /// registered. Racing a create or delete of the same name fails with
    /// `TableNotFound`.
    ///
    /// # Arguments
    /// * `name` - Table name
    ///
    /// # Returns
    /// `Result<(), DbError>` indicating success or failure.
    pub fn delete_table(&self, name: &str) -> Result<(), DbError> {
        let not_found = || DbError::TableNotFound {
            table: name.to_string(),
        };
        let Some(_claim) = self.claim(name) else {
            return Err(not_found());
        };
        if !self.tables.contains_key(name) {
            return Err(not_found());
        }

        self.markers.remove_marker(name)?;
        self.tables.remove(name);
        tracing::info!("Deleted table {}", name);
        Ok(())
    }

    /// Returns the live table registered as `name`.
    ///
    /// # Returns
    /// `Result<Arc<Table>, DbError>` containing a shared handle; writes
    /// through it are visible to every other holder.
    pub fn open_table(&self, name: &str) -> Result<Arc<Table>, DbError> {
        self.tables
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| DbError::TableNotFound {
                table: name.to_string(),
            })
    }

    /// Returns all table names in ascending order.
    pub fn list_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tables
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    /// Returns the number of registered tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Closes every table and shuts the registry down.
    ///
    /// A table that fails to close is logged and reported; the remaining
    /// tables are still closed.
    pub fn close(self) -> CloseReport {
        let mut tables: Vec<(String, Arc<Table>)> = self.tables.into_iter().collect();
        tables.sort_by(|a, b| a.0.cmp(&b.0));

        let table_count = tables.len();
        let mut report = CloseReport::default();
        for (name, table) in tables {
            match table.close() {
                Ok(()) => report.closed += 1,
                Err(e) => {
                    // Log error but continue with other tables
                    tracing::error!("Failed to close table {}: {}", name, e);
                    report.failures.push((name, e));
                }
            }
        }

        tracing::debug!(
            "Close completed: {}/{} tables closed successfully, {} errors",
            report.closed,
            table_count,
            report.failures.len()
        );
        report
    }
}

/// Exclusive claim on a table name; released on drop.
struct NameClaim<'a> {
    pending: &'a DashSet<String>,
    name: &'a str,
}

impl Drop for NameClaim<'_> {
    fn drop(&mut self) {
        self.pending.remove(self.name);
    }
}
