//! ATM repository for JSON storage

use std::path::PathBuf;

use crate::error::{BankError, BankResult};
use crate::models::{Atm, AtmId};

use super::table::{JsonTable, Record};

impl Record for Atm {
    type Key = AtmId;
    const ENTITY: &'static str = "ATM";

    fn key(&self) -> AtmId {
        self.id
    }
}

pub struct AtmRepository {
    table: JsonTable<Atm>,
}

impl AtmRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path),
        }
    }

    pub fn load(&self) -> BankResult<()> {
        self.table.load()
    }

    pub fn get_all(&self) -> BankResult<Vec<Atm>> {
        self.table.all()
    }

    pub fn create(&self, address: &str) -> BankResult<Atm> {
        self.table.update(|rows| {
            let id = match rows.keys().next_back() {
                Some(last) => last.checked_next().ok_or_else(|| {
                    BankError::Storage(format!("ATM ids exhausted after {}", last))
                })?,
                None => AtmId::new(1),
            };

            let atm = Atm::new(id, address);
            rows.insert(id, atm.clone());
            Ok(atm)
        })
    }

    /// Insert or overwrite ATM records by id as one unit (imports)
    pub fn upsert_all(&self, atms: impl IntoIterator<Item = Atm>) -> BankResult<usize> {
        self.table.update(|rows| {
            let mut count = 0;
            for atm in atms {
                rows.insert(atm.id, atm);
                count += 1;
            }
            Ok(count)
        })
    }
}
