//! Bank account model
//!
//! An account belongs to one client and is addressed by the pair
//! (client id, account number). Its balance only changes through
//! [`Account::credit`] and [`Account::debit`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{AccountNumber, ClientId};
use super::money::Money;
use crate::error::{BankError, BankResult};

const CLIENT_DIGITS: usize = 9;
const ACCOUNT_DIGITS: usize = 4;

/// Largest client id that fits the nine client digits of an [`AccountRef`]
pub const MAX_CLIENT_ID: u64 = 999_999_999;

/// Largest account number that fits the four account digits of an [`AccountRef`]
pub const MAX_ACCOUNT_NUMBER: u32 = 9_999;

/// Fully qualified account address: owning client plus per-client number
///
/// The textual form is 13 digits, the client id padded to nine digits
/// followed by the account number padded to four (`0000000010001`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountRef {
    pub client_id: ClientId,
    pub number: AccountNumber,
}

impl AccountRef {
    pub const fn new(client_id: ClientId, number: AccountNumber) -> Self {
        Self { client_id, number }
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0cw$}{:0aw$}",
            self.client_id.value(),
            self.number.value(),
            cw = CLIENT_DIGITS,
            aw = ACCOUNT_DIGITS
        )
    }
}

impl FromStr for AccountRef {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != CLIENT_DIGITS + ACCOUNT_DIGITS || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(BankError::Validation(format!(
                "Account number must be {} digits, got '{}'",
                CLIENT_DIGITS + ACCOUNT_DIGITS,
                s
            )));
        }

        let (client, number) = s.split_at(CLIENT_DIGITS);
        let invalid = |_| BankError::Validation(format!("Invalid account number '{}'", s));
        Ok(Self {
            client_id: ClientId::new(client.parse().map_err(invalid)?),
            number: AccountNumber::new(number.parse().map_err(invalid)?),
        })
    }
}

/// A client's bank account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Owning client
    pub client_id: ClientId,

    /// Number unique within the owning client
    pub number: AccountNumber,

    /// Current balance in minor units
    pub balance: Money,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Open a new zero-balance account
    pub fn new(client_id: ClientId, number: AccountNumber) -> Self {
        let now = Utc::now();
        Self {
            client_id,
            number,
            balance: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Open an account with an initial balance (imports and tests)
    pub fn with_balance(client_id: ClientId, number: AccountNumber, balance: Money) -> Self {
        let mut account = Self::new(client_id, number);
        account.balance = balance;
        account
    }

    pub fn reference(&self) -> AccountRef {
        AccountRef::new(self.client_id, self.number)
    }

    /// Increase the balance by a positive amount
    pub fn credit(&mut self, amount: Money) -> BankResult<()> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::InvalidAmount(amount))?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Decrease the balance by a positive amount, never below zero
    pub fn debit(&mut self, amount: Money) -> BankResult<()> {
        if !amount.is_positive() {
            return Err(BankError::InvalidAmount(amount));
        }

        if amount > self.balance {
            return Err(BankError::InsufficientFunds {
                account: self.reference().to_string(),
                needed: amount.cents(),
                available: self.balance.cents(),
            });
        }

        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankError::InvalidAmount(amount))?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.number.value() == 0 {
            return Err(AccountValidationError::ZeroNumber);
        }

        if self.number.value() > MAX_ACCOUNT_NUMBER {
            return Err(AccountValidationError::NumberOutOfRange(self.number));
        }

        if self.client_id.value() > MAX_CLIENT_ID {
            return Err(AccountValidationError::ClientOutOfRange(self.client_id));
        }

        if self.balance.is_negative() {
            return Err(AccountValidationError::NegativeBalance(self.balance));
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account: {} balance: {}", self.reference(), self.balance)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    ZeroNumber,
    NumberOutOfRange(AccountNumber),
    ClientOutOfRange(ClientId),
    NegativeBalance(Money),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroNumber => write!(f, "Account number must be at least 1"),
            Self::NumberOutOfRange(number) => {
                write!(f, "Account number {} exceeds {}", number, MAX_ACCOUNT_NUMBER)
            }
            Self::ClientOutOfRange(id) => {
                write!(f, "Client id {} exceeds {}", id, MAX_CLIENT_ID)
            }
            Self::NegativeBalance(balance) => {
                write!(f, "Account balance cannot be negative ({})", balance)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
