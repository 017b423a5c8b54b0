//! Service repository for JSON storage
//!
//! Manages services.json, the payable services and their target accounts.

use std::path::PathBuf;

use crate::error::{BankError, BankResult};
use crate::models::{AccountRef, Service, ServiceId};

use super::table::{JsonTable, Record};

impl Record for Service {
    type Key = ServiceId;
    const ENTITY: &'static str = "Service";

    fn key(&self) -> ServiceId {
        self.id
    }
}

/// Repository for service persistence
pub struct ServiceRepository {
    table: JsonTable<Service>,
}

impl ServiceRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path),
        }
    }

    pub fn load(&self) -> BankResult<()> {
        self.table.load()
    }

    pub fn get(&self, id: ServiceId) -> BankResult<Option<Service>> {
        self.table.get(&id)
    }

    pub fn get_all(&self) -> BankResult<Vec<Service>> {
        self.table.all()
    }

    /// Register a service under the next free id
    ///
    /// Ids grow from the highest id ever stored, so they never collide with
    /// existing or imported services.
    pub fn create(&self, name: &str, target: AccountRef) -> BankResult<Service> {
        self.table.update(|rows| {
            let id = match rows.keys().next_back() {
                Some(last) => last.checked_next().ok_or_else(|| {
                    BankError::Storage(format!("Service ids exhausted after {}", last))
                })?,
                None => ServiceId::new(1),
            };

            let service = Service::new(id, name, target);
            rows.insert(id, service.clone());
            Ok(service)
        })
    }

    /// Insert or overwrite service records by id as one unit (imports)
    pub fn upsert_all(&self, services: impl IntoIterator<Item = Service>) -> BankResult<usize> {
        self.table.update(|rows| {
            let mut count = 0;
            for service in services {
                rows.insert(service.id, service);
                count += 1;
            }
            Ok(count)
        })
    }

    pub fn count(&self) -> BankResult<usize> {
        self.table.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountNumber, ClientId};
    use tempfile::TempDir;

    #[test]
    fn test_create_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ServiceRepository::new(temp_dir.path().join("services.json"));
        repo.load().unwrap();

        let target = AccountRef::new(ClientId::new(3), AccountNumber::new(1));
        let electricity = repo.create("Electricity", target).unwrap();
        let water = repo.create("Water", target).unwrap();

        assert_eq!(electricity.id, ServiceId::new(1));
        assert_eq!(water.id, ServiceId::new(2));
        assert_eq!(repo.get(electricity.id).unwrap().unwrap().target(), target);
    }

    #[test]
    fn test_ids_continue_after_imported_records() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ServiceRepository::new(temp_dir.path().join("services.json"));
        let target = AccountRef::new(ClientId::new(3), AccountNumber::new(1));

        repo.upsert_all([Service::new(ServiceId::new(7), "Gas", target)])
            .unwrap();
        let next = repo.create("Internet", target).unwrap();

        assert_eq!(next.id, ServiceId::new(8));
    }

    #[test]
    fn test_create_after_maximum_id_fails_without_panic() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ServiceRepository::new(temp_dir.path().join("services.json"));
        let target = AccountRef::new(ClientId::new(3), AccountNumber::new(1));

        repo.upsert_all([Service::new(ServiceId::new(u32::MAX), "Gas", target)])
            .unwrap();
        let err = repo.create("Internet", target).unwrap_err();

        assert!(matches!(err, BankError::Storage(_)));
        assert_eq!(repo.count().unwrap(), 1);
    }
}
