//! Client repository for JSON storage
//!
//! Manages clients.json and enforces the uniqueness of logins and phone
//! numbers.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{BankError, BankResult};
use crate::models::account::MAX_CLIENT_ID;
use crate::models::{Client, ClientId};

use super::table::{JsonTable, Record};

impl Record for Client {
    type Key = ClientId;
    const ENTITY: &'static str = "Client";

    fn key(&self) -> ClientId {
        self.id
    }
}

/// Repository for client persistence
pub struct ClientRepository {
    table: JsonTable<Client>,
}

impl ClientRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path),
        }
    }

    pub fn load(&self) -> BankResult<()> {
        self.table.load()
    }

    pub fn get(&self, id: ClientId) -> BankResult<Option<Client>> {
        self.table.get(&id)
    }

    pub fn get_all(&self) -> BankResult<Vec<Client>> {
        self.table.all()
    }

    /// Logins are case-sensitive
    pub fn get_by_login(&self, login: &str) -> BankResult<Option<Client>> {
        self.table.find(|c| c.login == login)
    }

    /// Expects a normalized phone number
    pub fn get_by_phone(&self, phone: &str) -> BankResult<Option<Client>> {
        self.table.find(|c| c.phone == phone)
    }

    /// Insert a new client under the next free id
    pub fn create(&self, build: impl FnOnce(ClientId) -> Client) -> BankResult<Client> {
        self.table.update(|rows| {
            let id = match rows.keys().next_back() {
                Some(last) => last.checked_next().ok_or_else(|| {
                    BankError::Storage(format!("Client ids exhausted after {}", last))
                })?,
                None => ClientId::new(1),
            };

            if id.value() > MAX_CLIENT_ID {
                return Err(BankError::Validation(format!(
                    "Client id {} exceeds {}",
                    id, MAX_CLIENT_ID
                )));
            }

            let client = build(id);
            check_unique(rows, &client)?;
            rows.insert(id, client.clone());
            Ok(client)
        })
    }

    /// Insert or overwrite client records by id as one unit (imports)
    ///
    /// Logins and phones must stay unique across the stored clients and the
    /// batch itself; on any clash none of the batch is stored.
    pub fn upsert_all(&self, clients: impl IntoIterator<Item = Client>) -> BankResult<usize> {
        self.table.update(|rows| {
            let mut count = 0;
            for client in clients {
                check_unique(rows, &client)?;
                rows.insert(client.id, client);
                count += 1;
            }
            Ok(count)
        })
    }

    pub fn count(&self) -> BankResult<usize> {
        self.table.count()
    }
}

/// Login and phone must not belong to any other client
fn check_unique(rows: &BTreeMap<ClientId, Client>, client: &Client) -> BankResult<()> {
    for other in rows.values().filter(|c| c.id != client.id) {
        if other.login == client.login {
            return Err(BankError::Duplicate {
                entity_type: "Client login",
                identifier: client.login.clone(),
            });
        }
        if other.phone == client.phone {
            return Err(BankError::Duplicate {
                entity_type: "Client phone",
                identifier: client.phone.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ClientRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ClientRepository::new(temp_dir.path().join("clients.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn add(repo: &ClientRepository, login: &str, phone: &str) -> BankResult<Client> {
        repo.create(|id| Client::new(id, login.to_uppercase(), login, "hash", phone))
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let (_temp_dir, repo) = create_test_repo();

        let alice = add(&repo, "alice", "+79000000001").unwrap();
        let bob = add(&repo, "bob", "+79000000002").unwrap();

        assert_eq!(alice.id, ClientId::new(1));
        assert_eq!(bob.id, ClientId::new(2));
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_lookup_by_login_and_phone() {
        let (_temp_dir, repo) = create_test_repo();
        let alice = add(&repo, "alice", "+79000000001").unwrap();

        assert_eq!(repo.get_by_login("alice").unwrap().unwrap().id, alice.id);
        assert_eq!(repo.get_by_phone("+79000000001").unwrap().unwrap().id, alice.id);
        assert!(repo.get_by_login("Alice").unwrap().is_none());
        assert!(repo.get_by_phone("+79000000009").unwrap().is_none());
    }

    #[test]
    fn test_duplicates_rejected() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, "alice", "+79000000001").unwrap();

        let err = add(&repo, "alice", "+79000000002").unwrap_err();
        assert!(matches!(err, BankError::Duplicate { .. }));

        let err = add(&repo, "bob", "+79000000001").unwrap_err();
        assert!(matches!(err, BankError::Duplicate { .. }));

        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_create_stops_at_last_nine_digit_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert_all([Client::new(
            ClientId::new(MAX_CLIENT_ID),
            "Last",
            "last",
            "hash",
            "+79000000099",
        )])
        .unwrap();

        let err = add(&repo, "alice", "+79000000001").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_create_after_maximum_id_fails_without_panic() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert_all([Client::new(
            ClientId::new(u64::MAX),
            "Max",
            "max",
            "hash",
            "+79000000098",
        )])
        .unwrap();

        let err = add(&repo, "alice", "+79000000001").unwrap_err();
        assert!(matches!(err, BankError::Storage(_)));
    }

    #[test]
    fn test_upsert_overwrites_same_id() {
        let (_temp_dir, repo) = create_test_repo();
        let mut alice = add(&repo, "alice", "+79000000001").unwrap();

        alice.name = "Alice Smith".into();
        repo.upsert_all([alice.clone()]).unwrap();

        assert_eq!(repo.get(alice.id).unwrap().unwrap().name, "Alice Smith");
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_upsert_all_rejects_duplicates_inside_batch() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, "alice", "+79000000001").unwrap();

        let batch = [
            Client::new(ClientId::new(2), "Bob", "bob", "hash", "+79000000002"),
            Client::new(ClientId::new(3), "Bob Two", "bob", "hash", "+79000000003"),
        ];
        let err = repo.upsert_all(batch).unwrap_err();

        assert!(matches!(err, BankError::Duplicate { .. }));
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.get_by_login("bob").unwrap().is_none());
    }
}
