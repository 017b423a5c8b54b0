//! Client service
//!
//! The client directory: resolves client ids from logins and phone numbers,
//! registers new clients and checks customer credentials.

use crate::crypto::{hash_password, verify_password};
use crate::error::{BankError, BankResult};
use crate::models::{normalize_phone, Client, ClientId};
use crate::storage::{LedgerStore, Storage};

/// Input for registering a client
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub login: String,
    pub password: String,
    pub phone: String,
}

/// Service for client lookup and registration
pub struct ClientService<'a, S: ?Sized = Storage> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> ClientService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn resolve_by_login(&self, login: &str) -> BankResult<ClientId> {
        self.store
            .client_by_login(login.trim())?
            .map(|c| c.id)
            .ok_or_else(|| BankError::client_not_found(login.trim()))
    }

    /// Phone numbers are normalized first, so formatting does not matter
    ///
    /// A string that is not a phone number cannot belong to any client and
    /// is `NotFound` like any other unregistered number.
    pub fn resolve_by_phone(&self, phone: &str) -> BankResult<ClientId> {
        let normalized =
            normalize_phone(phone).map_err(|_| BankError::client_not_found(phone.trim()))?;

        self.store
            .client_by_phone(&normalized)?
            .map(|c| c.id)
            .ok_or_else(|| BankError::client_not_found(normalized))
    }

    /// Check customer credentials
    ///
    /// Returns `None` for an unknown login or a wrong password.
    pub fn authenticate(&self, login: &str, password: &str) -> BankResult<Option<Client>> {
        let Some(client) = self.store.client_by_login(login.trim())? else {
            tracing::info!(login = login.trim(), "client login rejected: unknown login");
            return Ok(None);
        };

        if verify_password(password, &client.password_hash)? {
            tracing::info!(client = %client.id, "client logged in");
            Ok(Some(client))
        } else {
            tracing::info!(client = %client.id, "client login rejected: wrong password");
            Ok(None)
        }
    }
}

impl<'a> ClientService<'a, Storage> {
    /// Register a new client
    pub fn create(&self, input: NewClient) -> BankResult<Client> {
        let phone =
            normalize_phone(&input.phone).map_err(|e| BankError::Validation(e.to_string()))?;
        let password_hash = hash_password(&input.password)?;

        let draft = Client::new(
            ClientId::new(0),
            input.name.trim(),
            input.login.trim(),
            password_hash,
            phone,
        );
        draft
            .validate()
            .map_err(|e| BankError::Validation(e.to_string()))?;

        let client = self.store.clients.create(|id| Client { id, ..draft })?;
        tracing::info!(client = %client.id, login = %client.login, "client created");
        Ok(client)
    }

    pub fn list(&self) -> BankResult<Vec<Client>> {
        self.store.clients.get_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BankPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn new_client(login: &str, phone: &str) -> NewClient {
        NewClient {
            name: format!("{} name", login),
            login: login.into(),
            password: format!("{}-pw", login),
            phone: phone.into(),
        }
    }

    #[test]
    fn test_every_registered_client_resolves() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);

        let registered = [
            ("alice", "+79000000001"),
            ("bob", "+79000000002"),
            ("carol", "8 900 000 00 03"),
        ];
        for (login, phone) in registered {
            let client = service.create(new_client(login, phone)).unwrap();
            assert_eq!(service.resolve_by_login(login).unwrap(), client.id);
            assert_eq!(service.resolve_by_phone(phone).unwrap(), client.id);
        }
    }

    #[test]
    fn test_unregistered_lookups_are_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        service.create(new_client("alice", "+79000000001")).unwrap();

        assert!(service.resolve_by_login("mallory").unwrap_err().is_not_found());
        assert!(service
            .resolve_by_phone("+79000000099")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_malformed_phone_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        service.create(new_client("alice", "+79000000001")).unwrap();

        for phone in ["abc", "", "+", "12"] {
            assert!(service.resolve_by_phone(phone).unwrap_err().is_not_found());
        }
    }

    #[test]
    fn test_phone_formatting_is_ignored() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let client = service.create(new_client("alice", "+7 (900) 000-00-01")).unwrap();

        assert_eq!(client.phone, "+79000000001");
        assert_eq!(service.resolve_by_phone("+79000000001").unwrap(), client.id);
    }

    #[test]
    fn test_create_validates_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);

        let mut input = new_client("alice", "+79000000001");
        input.name = " ".into();
        assert!(service.create(input).unwrap_err().is_validation());

        assert!(service
            .create(new_client("alice", "not a phone"))
            .unwrap_err()
            .is_validation());

        let mut input = new_client("alice", "+79000000001");
        input.password.clear();
        assert!(service.create(input).unwrap_err().is_validation());
    }

    #[test]
    fn test_authenticate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let alice = service.create(new_client("alice", "+79000000001")).unwrap();

        let logged_in = service.authenticate("alice", "alice-pw").unwrap().unwrap();
        assert_eq!(logged_in.id, alice.id);
        assert!(service.authenticate("alice", "wrong").unwrap().is_none());
        assert!(service.authenticate("nobody", "alice-pw").unwrap().is_none());
    }

    #[test]
    fn test_password_is_not_stored_in_clear() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ClientService::new(&storage);
        let alice = service.create(new_client("alice", "+79000000001")).unwrap();

        assert_ne!(alice.password_hash, "alice-pw");
        let on_disk = std::fs::read_to_string(storage.paths().clients_file()).unwrap();
        assert!(!on_disk.contains("alice-pw"));
    }
}
