//! Storage layer for ibank
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. [`Storage`] owns one repository per entity and implements the
//! [`LedgerStore`] interface used by the banking core.

pub mod accounts;
pub mod atms;
pub mod clients;
pub mod file_io;
pub mod ledger;
pub mod managers;
pub mod services;
pub mod table;

pub use accounts::{AccountRepository, Posting};
pub use atms::AtmRepository;
pub use clients::ClientRepository;
pub use file_io::{read_json, write_json_atomic};
pub use ledger::LedgerStore;
pub use managers::ManagerRepository;
pub use services::ServiceRepository;

use crate::config::paths::BankPaths;
use crate::error::BankResult;
use crate::models::{Account, AccountRef, Client, ClientId, Money, Service, ServiceId};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BankPaths,
    pub clients: ClientRepository,
    pub accounts: AccountRepository,
    pub services: ServiceRepository,
    pub atms: AtmRepository,
    pub managers: ManagerRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BankPaths) -> BankResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            clients: ClientRepository::new(paths.clients_file()),
            accounts: AccountRepository::new(paths.accounts_file()),
            services: ServiceRepository::new(paths.services_file()),
            atms: AtmRepository::new(paths.atms_file()),
            managers: ManagerRepository::new(paths.managers_file()),
            paths,
        })
    }

    /// Create storage and load everything from disk
    pub fn open(paths: BankPaths) -> BankResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &BankPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> BankResult<()> {
        self.clients.load()?;
        self.accounts.load()?;
        self.services.load()?;
        self.atms.load()?;
        self.managers.load()?;
        Ok(())
    }
}

impl LedgerStore for Storage {
    fn account(&self, account: AccountRef) -> BankResult<Option<Account>> {
        self.accounts.get(account)
    }

    fn accounts_of(&self, client_id: ClientId) -> BankResult<Vec<Account>> {
        self.accounts.get_by_client(client_id)
    }

    fn credit(&self, account: AccountRef, amount: Money) -> BankResult<Account> {
        let mut applied = self.accounts.apply(&[Posting::Credit { account, amount }])?;
        Ok(applied.remove(0))
    }

    fn debit(&self, account: AccountRef, amount: Money) -> BankResult<Account> {
        let mut applied = self.accounts.apply(&[Posting::Debit { account, amount }])?;
        Ok(applied.remove(0))
    }

    fn client_by_login(&self, login: &str) -> BankResult<Option<Client>> {
        self.clients.get_by_login(login)
    }

    fn client_by_phone(&self, phone: &str) -> BankResult<Option<Client>> {
        self.clients.get_by_phone(phone)
    }

    fn service(&self, id: ServiceId) -> BankResult<Option<Service>> {
        self.services.get(id)
    }

    /// Both postings go through one locked, atomically persisted batch
    fn transfer(
        &self,
        from: AccountRef,
        to: AccountRef,
        amount: Money,
    ) -> BankResult<(Account, Account)> {
        let mut applied = self.accounts.apply(&[
            Posting::Debit {
                account: from,
                amount,
            },
            Posting::Credit {
                account: to,
                amount,
            },
        ])?;
        let credited = applied.remove(1);
        let debited = applied.remove(0);
        Ok((debited, credited))
    }
}
