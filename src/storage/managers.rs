//! Manager repository for JSON storage

use std::path::PathBuf;

use crate::error::{BankError, BankResult};
use crate::models::Manager;

use super::table::{JsonTable, Record};

impl Record for Manager {
    type Key = String;
    const ENTITY: &'static str = "Manager";

    fn key(&self) -> String {
        self.login.clone()
    }
}

pub struct ManagerRepository {
    table: JsonTable<Manager>,
}

impl ManagerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path),
        }
    }

    pub fn load(&self) -> BankResult<()> {
        self.table.load()
    }

    pub fn get(&self, login: &str) -> BankResult<Option<Manager>> {
        self.table.get(&login.to_string())
    }

    pub fn insert(&self, manager: Manager) -> BankResult<()> {
        self.table.update(|rows| {
            if rows.contains_key(&manager.login) {
                return Err(BankError::Duplicate {
                    entity_type: "Manager",
                    identifier: manager.login.clone(),
                });
            }
            rows.insert(manager.login.clone(), manager);
            Ok(())
        })
    }

    pub fn count(&self) -> BankResult<usize> {
        self.table.count()
    }
}
