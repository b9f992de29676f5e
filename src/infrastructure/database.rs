use crate::error::StorageError;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Value>,
    // Highest id handed out or observed; the next generated id is `sequence + 1`.
    sequence: i32,
}

impl Table {
    /// `sequence + 1` while it is free, otherwise the lowest unused positive id.
    /// `None` only when every positive id is taken.
    fn next_id(&self) -> Option<i32> {
        match self.sequence.checked_add(1) {
            Some(candidate) if !self.rows.contains_key(&candidate) => Some(candidate),
            _ => self.lowest_free_id(),
        }
    }

    fn lowest_free_id(&self) -> Option<i32> {
        let mut expected = 1;
        for &id in self.rows.range(1..).map(|(id, _)| id) {
            if id != expected {
                return Some(expected);
            }
            expected = expected.checked_add(1)?;
        }
        Some(expected)
    }
}

/// In-process table store keyed by integer primary key.
///
/// Each table keeps its own identity sequence. Mutations of one table are
/// serialised by the shard lock of its entry, so id assignment and insert
/// happen atomically.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<DashMap<String, Table>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row.
    ///
    /// `requested_id == 0` asks the store to assign the next id, falling back
    /// to the lowest free id once the sequence has run past `i32::MAX`; any
    /// other value is used as-is and must not already exist. `make_row` receives the
    /// final id and builds the stored value.
    pub fn insert_with<F>(&self, table: &str, requested_id: i32, make_row: F) -> Result<i32, StorageError>
    where
        F: FnOnce(i32) -> Result<Value, StorageError>,
    {
        let mut table_ref = self.tables.entry(table.to_string()).or_default();
        let table = table_ref.value_mut();

        let id = if requested_id == 0 {
            table
                .next_id()
                .ok_or_else(|| StorageError::Backend("identity sequence exhausted".to_string()))?
        } else {
            requested_id
        };

        if table.rows.contains_key(&id) {
            return Err(StorageError::Constraint(format!(
                "duplicate key value violates primary key: id={}",
                id
            )));
        }

        let row = make_row(id)?;
        table.rows.insert(id, row);
        table.sequence = table.sequence.max(id);
        Ok(id)
    }

    pub fn get(&self, table: &str, id: i32) -> Option<Value> {
        self.tables
            .get(table)
            .and_then(|t| t.rows.get(&id).cloned())
    }

    /// Overwrite an existing row. Returns `false` (and stores nothing) when absent.
    pub fn replace(&self, table: &str, id: i32, row: Value) -> bool {
        match self.tables.get_mut(table) {
            Some(mut t) => match t.rows.get_mut(&id) {
                Some(existing) => {
                    *existing = row;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Remove a row. Returns whether a row was removed.
    pub fn remove(&self, table: &str, id: i32) -> bool {
        self.tables
            .get_mut(table)
            .is_some_and(|mut t| t.rows.remove(&id).is_some())
    }

    /// All rows of a table, ordered by id.
    pub fn scan(&self, table: &str) -> Vec<Value> {
        self.tables
            .get(table)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default()
    }
}
