//! Keyed JSON table shared by all repositories
//!
//! Rows live in memory in an `RwLock<BTreeMap>` and the whole table is
//! written back with [`write_json_atomic`] after every mutation. A mutation
//! either reaches disk or is rolled back in memory, so callers never observe
//! a change that was not persisted.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use super::file_io::{read_json, write_json_atomic};
use crate::error::{BankError, BankResult};

/// A row type stored in a [`JsonTable`]
pub trait Record: Clone + Serialize + DeserializeOwned {
    type Key: Ord + Clone + fmt::Display;

    /// Entity name used in error messages
    const ENTITY: &'static str;

    fn key(&self) -> Self::Key;
}

pub struct JsonTable<R: Record> {
    path: PathBuf,
    rows: RwLock<BTreeMap<R::Key, R>>,
}

impl<R: Record> JsonTable<R> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the in-memory rows with the file contents
    pub fn load(&self) -> BankResult<()> {
        let file_rows: Vec<R> = read_json(&self.path)?;

        let mut rows = self.write_lock()?;
        rows.clear();
        for row in file_rows {
            rows.insert(row.key(), row);
        }

        Ok(())
    }

    pub fn get(&self, key: &R::Key) -> BankResult<Option<R>> {
        Ok(self.read_lock()?.get(key).cloned())
    }

    /// All rows in key order
    pub fn all(&self) -> BankResult<Vec<R>> {
        Ok(self.read_lock()?.values().cloned().collect())
    }

    /// First row (in key order) matching the predicate
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> BankResult<Option<R>> {
        Ok(self.read_lock()?.values().find(|r| predicate(r)).cloned())
    }

    pub fn count(&self) -> BankResult<usize> {
        Ok(self.read_lock()?.len())
    }

    /// Read access to the rows for range queries
    pub fn read(&self) -> BankResult<RwLockReadGuard<'_, BTreeMap<R::Key, R>>> {
        self.read_lock()
    }

    /// Run a mutation and persist it as one unit
    ///
    /// The write lock is held for the whole call. If `mutate` fails or the
    /// file cannot be written, the rows are restored to their prior state.
    pub fn update<T>(
        &self,
        mutate: impl FnOnce(&mut BTreeMap<R::Key, R>) -> BankResult<T>,
    ) -> BankResult<T> {
        let mut rows = self.write_lock()?;
        let snapshot = rows.clone();

        let result = mutate(&mut rows).and_then(|value| {
            let file_rows: Vec<&R> = rows.values().collect();
            write_json_atomic(&self.path, &file_rows)?;
            Ok(value)
        });

        if result.is_err() {
            *rows = snapshot;
        }

        result
    }

    fn read_lock(&self) -> BankResult<RwLockReadGuard<'_, BTreeMap<R::Key, R>>> {
        self.rows.read().map_err(|e| {
            BankError::Storage(format!(
                "Failed to acquire read lock on {} table: {}",
                R::ENTITY,
                e
            ))
        })
    }

    fn write_lock(&self) -> BankResult<RwLockWriteGuard<'_, BTreeMap<R::Key, R>>> {
        self.rows.write().map_err(|e| {
            BankError::Storage(format!(
                "Failed to acquire write lock on {} table: {}",
                R::ENTITY,
                e
            ))
        })
    }
}
