//! Account service
//!
//! The account store operations of the banking core: lookup, listing,
//! credit and debit, plus the administrative opening of accounts and
//! replenishment (a one-sided deposit).

use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountRef, ClientId, Money};
use crate::storage::{LedgerStore, Storage};

/// Service for account lookup and balance changes
pub struct AccountService<'a, S: ?Sized = Storage> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> AccountService<'a, S> {
    /// Create a new account service
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Get an account, failing with `NotFound` if it does not exist
    pub fn lookup_account(&self, account: AccountRef) -> BankResult<Account> {
        self.store
            .account(account)?
            .ok_or_else(|| BankError::account_not_found(account.to_string()))
    }

    /// All accounts of a client in creation order
    pub fn list_accounts(&self, client_id: ClientId) -> BankResult<Vec<Account>> {
        self.store.accounts_of(client_id)
    }

    /// Increase a balance
    pub fn credit(&self, account: AccountRef, amount: Money) -> BankResult<Account> {
        ensure_positive(amount)?;
        let updated = self.store.credit(account, amount)?;
        tracing::debug!(%account, %amount, balance = %updated.balance, "credited");
        Ok(updated)
    }

    /// Decrease a balance; the amount may not exceed it
    pub fn debit(&self, account: AccountRef, amount: Money) -> BankResult<Account> {
        ensure_positive(amount)?;
        let updated = self.store.debit(account, amount)?;
        tracing::debug!(%account, %amount, balance = %updated.balance, "debited");
        Ok(updated)
    }

    /// Deposit funds with no matching debit (back-office replenishment)
    pub fn replenish(&self, account: AccountRef, amount: Money) -> BankResult<Account> {
        let updated = self.credit(account, amount)?;
        tracing::info!(%account, %amount, balance = %updated.balance, "account replenished");
        Ok(updated)
    }
}

impl<'a> AccountService<'a, Storage> {
    /// Open a new zero-balance account for an existing client
    pub fn open_account(&self, client_id: ClientId) -> BankResult<Account> {
        if self.store.clients.get(client_id)?.is_none() {
            return Err(BankError::client_not_found(client_id.to_string()));
        }

        let account = self.store.accounts.open(client_id)?;
        tracing::info!(account = %account.reference(), "account opened");
        Ok(account)
    }
}

fn ensure_positive(amount: Money) -> BankResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(BankError::InvalidAmount(amount))
    }
}
