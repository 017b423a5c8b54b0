//! Service registry
//!
//! Payable services (utilities, providers) and the account each one's
//! payments land on.

use crate::error::{BankError, BankResult};
use crate::models::{AccountRef, ClientId, Service, ServiceId};
use crate::storage::{LedgerStore, Storage};

use super::account::AccountService;

/// Service for registering and resolving payable services
pub struct ServiceRegistry<'a, S: ?Sized = Storage> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> ServiceRegistry<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The account payments for a service go to
    pub fn resolve_target(&self, id: ServiceId) -> BankResult<AccountRef> {
        self.store
            .service(id)?
            .map(|s| s.target())
            .ok_or_else(|| BankError::service_not_found(id.to_string()))
    }
}

impl<'a> ServiceRegistry<'a, Storage> {
    /// Register a service settled to a fresh account of `owner`
    ///
    /// The first service registered gets id `S1`.
    pub fn register(&self, name: &str, owner: ClientId) -> BankResult<Service> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BankError::Validation("Service name cannot be empty".into()));
        }

        let settlement = AccountService::new(self.store).open_account(owner)?.reference();
        let service = match self.store.services.create(name, settlement) {
            Ok(service) => service,
            Err(err) => {
                if let Err(undo) = self.store.accounts.remove_empty(settlement) {
                    tracing::warn!(
                        account = %settlement,
                        error = %undo,
                        "settlement account left open"
                    );
                }
                return Err(err);
            }
        };

        tracing::info!(
            service = %service.id,
            name,
            target = %service.target(),
            "service registered"
        );
        Ok(service)
    }

    pub fn list(&self) -> BankResult<Vec<Service>> {
        self.store.services.get_all()
    }
}
