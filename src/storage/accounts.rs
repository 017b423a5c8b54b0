//! Account repository for JSON storage
//!
//! Manages the balances in accounts.json. Balance changes go through
//! [`AccountRepository::apply`], which applies a batch of postings as one
//! unit.

use std::path::PathBuf;

use crate::error::{BankError, BankResult};
use crate::models::account::MAX_ACCOUNT_NUMBER;
use crate::models::{Account, AccountNumber, AccountRef, ClientId, Money};

use super::table::{JsonTable, Record};

impl Record for Account {
    type Key = AccountRef;
    const ENTITY: &'static str = "Account";

    fn key(&self) -> AccountRef {
        self.reference()
    }
}

/// A single balance movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posting {
    Credit { account: AccountRef, amount: Money },
    Debit { account: AccountRef, amount: Money },
}

impl Posting {
    pub fn account(&self) -> AccountRef {
        match self {
            Self::Credit { account, .. } | Self::Debit { account, .. } => *account,
        }
    }

    fn apply_to(&self, target: &mut Account) -> BankResult<()> {
        match self {
            Self::Credit { amount, .. } => target.credit(*amount),
            Self::Debit { amount, .. } => target.debit(*amount),
        }
    }
}

/// Repository for account persistence
pub struct AccountRepository {
    table: JsonTable<Account>,
}

impl AccountRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: JsonTable::new(path),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> BankResult<()> {
        self.table.load()
    }

    pub fn get(&self, account: AccountRef) -> BankResult<Option<Account>> {
        self.table.get(&account)
    }

    /// All accounts, ordered by client then account number
    pub fn get_all(&self) -> BankResult<Vec<Account>> {
        self.table.all()
    }

    /// Accounts of one client in creation order
    pub fn get_by_client(&self, client_id: ClientId) -> BankResult<Vec<Account>> {
        let rows = self.table.read()?;
        Ok(rows
            .range(client_range(client_id))
            .map(|(_, account)| account.clone())
            .collect())
    }

    /// Open a zero-balance account with the client's next account number
    ///
    /// Fails with `Validation` once the number would no longer fit the
    /// 13-digit account reference.
    pub fn open(&self, client_id: ClientId) -> BankResult<Account> {
        self.table.update(|rows| {
            let number = match rows.range(client_range(client_id)).next_back() {
                Some((last, _)) => last.number.checked_next(),
                None => Some(AccountNumber::new(1)),
            }
            .filter(|n| n.value() <= MAX_ACCOUNT_NUMBER)
            .ok_or_else(|| {
                BankError::Validation(format!("Client {} has no free account numbers", client_id))
            })?;

            let account = Account::new(client_id, number);
            account
                .validate()
                .map_err(|e| BankError::Validation(e.to_string()))?;
            rows.insert(account.reference(), account.clone());
            Ok(account)
        })
    }

    /// Insert or overwrite account records as one unit (imports)
    ///
    /// If any record is invalid, none is stored.
    pub fn upsert_all(&self, accounts: impl IntoIterator<Item = Account>) -> BankResult<usize> {
        self.table.update(|rows| {
            let mut count = 0;
            for account in accounts {
                account
                    .validate()
                    .map_err(|e| BankError::Validation(e.to_string()))?;
                rows.insert(account.reference(), account);
                count += 1;
            }
            Ok(count)
        })
    }

    /// Apply postings as one unit and persist them
    ///
    /// Every posting is checked against the running balance of its account.
    /// If any posting fails, or the file cannot be written, no balance
    /// changes. Returns the resulting account of each posting, in order.
    pub fn apply(&self, postings: &[Posting]) -> BankResult<Vec<Account>> {
        self.table.update(|rows| {
            let mut touched = Vec::with_capacity(postings.len());

            for posting in postings {
                let key = posting.account();
                let account = rows
                    .get_mut(&key)
                    .ok_or_else(|| BankError::account_not_found(key.to_string()))?;
                posting.apply_to(account)?;
                touched.push(key);
            }

            touched
                .iter()
                .map(|key| {
                    rows.get(key)
                        .cloned()
                        .ok_or_else(|| BankError::account_not_found(key.to_string()))
                })
                .collect()
        })
    }

    /// Remove an account that holds no money, undoing an `open`
    pub fn remove_empty(&self, account: AccountRef) -> BankResult<()> {
        self.table.update(|rows| match rows.get(&account) {
            Some(existing) if !existing.balance.is_zero() => Err(BankError::Validation(format!(
                "Account {} still holds {}",
                account, existing.balance
            ))),
            _ => {
                rows.remove(&account);
                Ok(())
            }
        })
    }

    pub fn exists(&self, account: AccountRef) -> BankResult<bool> {
        Ok(self.table.get(&account)?.is_some())
    }

    pub fn count(&self) -> BankResult<usize> {
        self.table.count()
    }
}

fn client_range(client_id: ClientId) -> std::ops::RangeInclusive<AccountRef> {
    AccountRef::new(client_id, AccountNumber::new(0))
        ..=AccountRef::new(client_id, AccountNumber::new(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, AccountRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = AccountRepository::new(temp_dir.path().join("accounts.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn funded(repo: &AccountRepository, client: u64, cents: i64) -> AccountRef {
        let account = repo.open(ClientId::new(client)).unwrap();
        if cents > 0 {
            repo.apply(&[Posting::Credit {
                account: account.reference(),
                amount: Money::from_cents(cents),
            }])
            .unwrap();
        }
        account.reference()
    }

    #[test]
    fn test_open_assigns_sequential_numbers_per_client() {
        let (_temp_dir, repo) = create_test_repo();

        let a1 = repo.open(ClientId::new(1)).unwrap();
        let b1 = repo.open(ClientId::new(2)).unwrap();
        let a2 = repo.open(ClientId::new(1)).unwrap();

        assert_eq!(a1.number, AccountNumber::new(1));
        assert_eq!(b1.number, AccountNumber::new(1));
        assert_eq!(a2.number, AccountNumber::new(2));

        let listed: Vec<_> = repo
            .get_by_client(ClientId::new(1))
            .unwrap()
            .into_iter()
            .map(|a| a.number)
            .collect();
        assert_eq!(listed, vec![AccountNumber::new(1), AccountNumber::new(2)]);
    }

    #[test]
    fn test_apply_moves_funds_and_persists() {
        let (temp_dir, repo) = create_test_repo();
        let a = funded(&repo, 1, 1000);
        let b = funded(&repo, 2, 0);

        let after = repo
            .apply(&[
                Posting::Debit {
                    account: a,
                    amount: Money::from_cents(400),
                },
                Posting::Credit {
                    account: b,
                    amount: Money::from_cents(400),
                },
            ])
            .unwrap();
        assert_eq!(after[0].balance.cents(), 600);
        assert_eq!(after[1].balance.cents(), 400);

        let reloaded = AccountRepository::new(temp_dir.path().join("accounts.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(a).unwrap().unwrap().balance.cents(), 600);
        assert_eq!(reloaded.get(b).unwrap().unwrap().balance.cents(), 400);
    }

    #[test]
    fn test_apply_is_all_or_nothing() {
        let (_temp_dir, repo) = create_test_repo();
        let a = funded(&repo, 1, 1000);
        let missing = AccountRef::new(ClientId::new(9), AccountNumber::new(1));

        let err = repo
            .apply(&[
                Posting::Debit {
                    account: a,
                    amount: Money::from_cents(400),
                },
                Posting::Credit {
                    account: missing,
                    amount: Money::from_cents(400),
                },
            ])
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(repo.get(a).unwrap().unwrap().balance.cents(), 1000);
    }

    #[test]
    fn test_apply_rejects_overdraft() {
        let (_temp_dir, repo) = create_test_repo();
        let a = funded(&repo, 1, 100);

        let err = repo
            .apply(&[Posting::Debit {
                account: a,
                amount: Money::from_cents(500),
            }])
            .unwrap_err();

        assert!(matches!(err, BankError::InsufficientFunds { .. }));
        assert_eq!(repo.get(a).unwrap().unwrap().balance.cents(), 100);
    }

    #[test]
    fn test_open_stops_at_last_four_digit_number() {
        let (_temp_dir, repo) = create_test_repo();
        let client = ClientId::new(1);
        repo.upsert_all([Account::new(client, AccountNumber::new(MAX_ACCOUNT_NUMBER - 1))])
            .unwrap();

        let last = repo.open(client).unwrap();
        assert_eq!(last.number, AccountNumber::new(MAX_ACCOUNT_NUMBER));
        assert_eq!(last.reference().to_string(), "0000000019999");

        assert!(repo.open(client).unwrap_err().is_validation());
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_upsert_rejects_numbers_outside_reference() {
        let (_temp_dir, repo) = create_test_repo();

        for (client, number) in [(1, 10_000), (1, u32::MAX), (1_000_000_000, 1)] {
            let account = Account::new(ClientId::new(client), AccountNumber::new(number));
            assert!(repo.upsert_all([account]).unwrap_err().is_validation());
        }

        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_open_rejects_client_outside_reference() {
        let (_temp_dir, repo) = create_test_repo();

        let err = repo.open(ClientId::new(1_000_000_000)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_remove_empty_keeps_funded_accounts() {
        let (_temp_dir, repo) = create_test_repo();
        let empty = funded(&repo, 1, 0);
        let rich = funded(&repo, 2, 100);

        repo.remove_empty(empty).unwrap();
        assert!(!repo.exists(empty).unwrap());

        assert!(repo.remove_empty(rich).unwrap_err().is_validation());
        assert_eq!(repo.get(rich).unwrap().unwrap().balance.cents(), 100);
    }

    #[test]
    fn test_upsert_rejects_negative_balance() {
        let (_temp_dir, repo) = create_test_repo();
        let account =
            Account::with_balance(ClientId::new(1), AccountNumber::new(1), Money::from_cents(-5));

        assert!(repo.upsert_all([account]).unwrap_err().is_validation());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_all_stores_nothing_when_one_record_is_invalid() {
        let (_temp_dir, repo) = create_test_repo();
        let good = Account::new(ClientId::new(1), AccountNumber::new(1));
        let bad = Account::new(ClientId::new(1), AccountNumber::new(0));

        assert!(repo.upsert_all([good, bad]).unwrap_err().is_validation());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
