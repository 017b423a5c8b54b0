//! Account display formatting
//!
//! Formats a client's accounts for the terminal.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::money::format_minor_units;
use crate::models::{Account, Money};

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Account")]
    number: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format a list of accounts with balances and a total as a table
pub fn format_account_list(accounts: &[Account], currency_symbol: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = accounts.iter().map(|a| AccountRow {
        number: a.reference().to_string(),
        balance: a.balance.format_with_symbol(currency_symbol),
    });
    let total = Money::sum_wide(accounts.iter().map(|a| a.balance));

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()));

    format!(
        "{}\nTotal: {}",
        table,
        format_minor_units(total, currency_symbol)
    )
}

/// Numbered choices when picking one of a receiver's accounts
///
/// Only account numbers are shown, never another client's balances.
pub fn format_account_choices(accounts: &[Account]) -> String {
    accounts
        .iter()
        .map(|a| format!("  {}) {}", a.number, a.reference()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountNumber, ClientId};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[], "$"), "No accounts found.");
    }

    #[test]
    fn test_list_shows_numbers_balances_and_total() {
        let accounts = vec![
            Account::with_balance(
                ClientId::new(1),
                AccountNumber::new(1),
                Money::from_cents(60000),
            ),
            Account::with_balance(ClientId::new(1), AccountNumber::new(2), Money::from_cents(50)),
        ];
        let output = format_account_list(&accounts, "$");

        assert!(output.contains("0000000010001"));
        assert!(output.contains("$600.00"));
        assert!(output.contains("$0.50"));
        assert!(output.ends_with("Total: $600.50"));
    }

    #[test]
    fn test_total_of_large_balances_does_not_overflow() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        let accounts = vec![
            Account::with_balance(ClientId::new(1), AccountNumber::new(1), half),
            Account::with_balance(ClientId::new(1), AccountNumber::new(2), half),
        ];
        let output = format_account_list(&accounts, "$");

        assert!(output.ends_with("Total: $92233720368547758.08"));
    }

    #[test]
    fn test_choices_hide_balances() {
        let accounts = vec![Account::with_balance(
            ClientId::new(2),
            AccountNumber::new(3),
            Money::from_cents(999),
        )];
        let output = format_account_choices(&accounts);

        assert_eq!(output, "  3) 0000000020003");
    }
}
