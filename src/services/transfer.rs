//! Transfer engine
//!
//! Moves funds between accounts: by explicit account number, to a client
//! found by phone, or to the target account of a payable service. Every
//! transfer is validated, checked against the sender's balance and then
//! applied through [`LedgerStore::transfer`], so either both balances change
//! or neither does.

use chrono::Utc;

use crate::error::{BankError, BankResult};
use crate::models::{
    Account, AccountRef, Money, MoneyTransfer, Receiver, ServiceId, TransferReceipt,
};
use crate::storage::{LedgerStore, Storage};

use super::account::AccountService;
use super::client::ClientService;
use super::registry::ServiceRegistry;

/// Service for executing transfers
pub struct TransferEngine<'a, S: ?Sized = Storage> {
    store: &'a S,
}

impl<'a, S: LedgerStore + ?Sized> TransferEngine<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Execute a transfer
    ///
    /// Fails with `InvalidAmount` for a non-positive amount, `NotFound` when
    /// either account is missing and `InsufficientFunds` when the sender
    /// cannot cover the amount. None of these change any balance.
    pub fn execute(&self, transfer: MoneyTransfer) -> BankResult<TransferReceipt> {
        let validated = transfer.validate().inspect_err(|e| {
            tracing::warn!(error = %e, "transfer rejected");
        })?;

        let accounts = AccountService::new(self.store);
        let sender = accounts.lookup_account(validated.sender())?;
        accounts.lookup_account(validated.receiver())?;

        if sender.balance < validated.amount() {
            tracing::warn!(
                sender = %sender.reference(),
                amount = %validated.amount(),
                balance = %sender.balance,
                "transfer rejected: insufficient funds"
            );
            return Err(BankError::InsufficientFunds {
                account: sender.reference().to_string(),
                needed: validated.amount().cents(),
                available: sender.balance.cents(),
            });
        }

        let (sender, receiver) = self.store.transfer(
            validated.sender(),
            validated.receiver(),
            validated.amount(),
        )?;

        tracing::info!(
            sender = %sender.reference(),
            receiver = %receiver.reference(),
            amount = %validated.amount(),
            "transfer applied"
        );

        Ok(TransferReceipt {
            sender,
            receiver,
            amount: validated.amount(),
            applied_at: Utc::now(),
        })
    }

    /// Turn a receiver designation into a concrete account
    ///
    /// A phone receiver's chosen account must belong to the client that owns
    /// the phone number.
    pub fn resolve_receiver(&self, receiver: &Receiver) -> BankResult<AccountRef> {
        match receiver {
            Receiver::Account(account) => Ok(*account),
            Receiver::Phone { phone, account } => {
                let client_id = ClientService::new(self.store).resolve_by_phone(phone)?;
                let target = AccountRef::new(client_id, *account);
                AccountService::new(self.store).lookup_account(target)?;
                Ok(target)
            }
            Receiver::Service(id) => ServiceRegistry::new(self.store).resolve_target(*id),
        }
    }

    /// Accounts a sender may pick from when paying a client by phone
    pub fn accounts_for_phone(&self, phone: &str) -> BankResult<Vec<Account>> {
        let client_id = ClientService::new(self.store).resolve_by_phone(phone)?;
        AccountService::new(self.store).list_accounts(client_id)
    }

    /// Resolve the receiver, then execute
    pub fn send(
        &self,
        sender: AccountRef,
        receiver: &Receiver,
        amount: Money,
    ) -> BankResult<TransferReceipt> {
        let target = self.resolve_receiver(receiver)?;
        self.execute(MoneyTransfer::new(sender, target, amount))
    }

    /// Pay a service: a transfer to its target account
    pub fn pay_service(
        &self,
        sender: AccountRef,
        service: ServiceId,
        amount: Money,
    ) -> BankResult<TransferReceipt> {
        self.send(sender, &Receiver::Service(service), amount)
    }
}
