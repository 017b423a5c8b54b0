//! ATM directory

use crate::error::{BankError, BankResult};
use crate::models::Atm;
use crate::storage::Storage;

pub struct AtmService<'a> {
    storage: &'a Storage,
}

impl<'a> AtmService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, address: &str) -> BankResult<Atm> {
        let address = address.trim();
        if address.is_empty() {
            return Err(BankError::Validation("ATM address cannot be empty".into()));
        }

        let atm = self.storage.atms.create(address)?;
        tracing::info!(atm = %atm.id, address, "ATM added");
        Ok(atm)
    }

    pub fn list(&self) -> BankResult<Vec<Atm>> {
        self.storage.atms.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BankPaths;
    use tempfile::TempDir;

    #[test]
    fn test_add_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(BankPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = AtmService::new(&storage);

        service.add("1 Main St").unwrap();
        service.add(" 2 Side St ").unwrap();
        assert!(service.add("").unwrap_err().is_validation());

        let addresses: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|a| a.address)
            .collect();
        assert_eq!(addresses, vec!["1 Main St", "2 Side St"]);
    }
}
