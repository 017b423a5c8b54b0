//! Money transfer model
//!
//! A transfer is ephemeral: built by the caller, validated, applied by the
//! transfer engine and then discarded. The lifecycle is encoded in types:
//! [`MoneyTransfer`] (constructed) becomes a [`ValidatedTransfer`] and, once
//! applied, yields a [`TransferReceipt`]. A rejected transfer yields an error
//! instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountRef};
use super::ids::{AccountNumber, ClientId, ServiceId};
use super::money::Money;
use crate::error::{BankError, BankResult};

/// A request to move funds from one account to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyTransfer {
    pub sender_id: ClientId,
    pub sender_account: AccountNumber,
    pub receiver_id: ClientId,
    pub receiver_account: AccountNumber,
    pub amount: Money,
}

impl MoneyTransfer {
    pub fn new(sender: AccountRef, receiver: AccountRef, amount: Money) -> Self {
        Self {
            sender_id: sender.client_id,
            sender_account: sender.number,
            receiver_id: receiver.client_id,
            receiver_account: receiver.number,
            amount,
        }
    }

    pub fn sender(&self) -> AccountRef {
        AccountRef::new(self.sender_id, self.sender_account)
    }

    pub fn receiver(&self) -> AccountRef {
        AccountRef::new(self.receiver_id, self.receiver_account)
    }

    /// Check the request itself, without touching any store
    pub fn validate(self) -> BankResult<ValidatedTransfer> {
        if !self.amount.is_positive() {
            return Err(BankError::InvalidAmount(self.amount));
        }

        if self.sender() == self.receiver() {
            return Err(BankError::Validation(
                "Cannot transfer to the same account".into(),
            ));
        }

        Ok(ValidatedTransfer { inner: self })
    }
}

/// A transfer whose amount and endpoints passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedTransfer {
    inner: MoneyTransfer,
}

impl ValidatedTransfer {
    pub fn sender(&self) -> AccountRef {
        self.inner.sender()
    }

    pub fn receiver(&self) -> AccountRef {
        self.inner.receiver()
    }

    pub fn amount(&self) -> Money {
        self.inner.amount
    }
}

/// Outcome of an applied transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Sender account after the debit
    pub sender: Account,
    /// Receiver account after the credit
    pub receiver: Account,
    pub amount: Money,
    pub applied_at: DateTime<Utc>,
}

/// How the caller designates the receiving account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// A known 13-digit account number
    Account(AccountRef),
    /// A client found by phone, plus the account the caller picked
    Phone {
        phone: String,
        account: AccountNumber,
    },
    /// The fixed target account of a payable service
    Service(ServiceId),
}
