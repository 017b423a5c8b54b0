//! Manager accounts
//!
//! Back-office operators log in with their own credentials, kept apart from
//! client credentials.

use crate::crypto::{hash_password, verify_password};
use crate::error::{BankError, BankResult};
use crate::models::Manager;
use crate::storage::Storage;

pub struct ManagerService<'a> {
    storage: &'a Storage,
}

impl<'a> ManagerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, login: &str, password: &str) -> BankResult<Manager> {
        let login = login.trim();
        if login.is_empty() || login.chars().any(char::is_whitespace) {
            return Err(BankError::Validation(format!("Invalid login '{}'", login)));
        }

        let manager = Manager::new(login, hash_password(password)?);
        self.storage.managers.insert(manager.clone())?;
        tracing::info!(manager = login, "manager created");
        Ok(manager)
    }

    /// `None` for an unknown login or a wrong password
    pub fn authenticate(&self, login: &str, password: &str) -> BankResult<Option<Manager>> {
        let Some(manager) = self.storage.managers.get(login.trim())? else {
            tracing::info!(manager = login.trim(), "manager login rejected");
            return Ok(None);
        };

        if verify_password(password, &manager.password_hash)? {
            tracing::info!(manager = %manager.login, "manager logged in");
            Ok(Some(manager))
        } else {
            tracing::info!(manager = %manager.login, "manager login rejected");
            Ok(None)
        }
    }

    pub fn count(&self) -> BankResult<usize> {
        self.storage.managers.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BankPaths;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_authenticate() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(BankPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = ManagerService::new(&storage);

        service.create("admin", "s3cret").unwrap();
        assert_eq!(service.count().unwrap(), 1);

        assert!(service.authenticate("admin", "s3cret").unwrap().is_some());
        assert!(service.authenticate("admin", "nope").unwrap().is_none());
        assert!(service.authenticate("root", "s3cret").unwrap().is_none());

        let err = service.create("admin", "other").unwrap_err();
        assert!(matches!(err, BankError::Duplicate { .. }));
        assert!(service.create("two words", "pw").unwrap_err().is_validation());
    }
}
