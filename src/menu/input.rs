//! Parsing of terminal answers
//!
//! Each function turns one line of user input into a typed value, or a
//! `Validation` error naming what was wrong.

use crate::error::{BankError, BankResult};
use crate::models::{normalize_phone, AccountNumber, AccountRef, ClientId, Money, ServiceId};

/// A decimal amount in major units, e.g. `400` or `12.50`
pub fn parse_amount(input: &str) -> BankResult<Money> {
    Money::parse(input).map_err(|e| BankError::Validation(e.to_string()))
}

/// The 13-digit public form of an account
pub fn parse_account_ref(input: &str) -> BankResult<AccountRef> {
    input.trim().parse()
}

/// An account number within one client, e.g. `1`
pub fn parse_account_number(input: &str) -> BankResult<AccountNumber> {
    input
        .parse()
        .map_err(|_| BankError::Validation(format!("Invalid account number '{}'", input.trim())))
}

pub fn parse_client_id(input: &str) -> BankResult<ClientId> {
    input
        .parse()
        .map_err(|_| BankError::Validation(format!("Invalid client id '{}'", input.trim())))
}

/// A service number with or without its `S` prefix
pub fn parse_service_id(input: &str) -> BankResult<ServiceId> {
    input
        .parse()
        .map_err(|_| BankError::Validation(format!("Invalid service number '{}'", input.trim())))
}

pub fn parse_phone(input: &str) -> BankResult<String> {
    normalize_phone(input).map_err(|e| BankError::Validation(e.to_string()))
}

/// A required free-text field
pub fn non_empty(field: &str, input: &str) -> BankResult<String> {
    let value = input.trim();
    if value.is_empty() {
        Err(BankError::Validation(format!("{} cannot be empty", field)))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("400").unwrap().cents(), 40000);
        assert_eq!(parse_amount(" 12.5 ").unwrap().cents(), 1250);
        assert!(parse_amount("12,50").unwrap_err().is_validation());
        assert!(parse_amount("").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_account_ref() {
        let account = parse_account_ref("0000000020001").unwrap();
        assert_eq!(account.client_id, ClientId::new(2));
        assert_eq!(account.number, AccountNumber::new(1));

        assert!(parse_account_ref("20001").unwrap_err().is_validation());
        assert!(parse_account_ref("00000000200x1").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_account_number("2").unwrap(), AccountNumber::new(2));
        assert_eq!(parse_client_id(" 7 ").unwrap(), ClientId::new(7));
        assert_eq!(parse_service_id("S1").unwrap(), ServiceId::new(1));
        assert_eq!(parse_service_id("1").unwrap(), ServiceId::new(1));

        assert!(parse_account_number("-1").unwrap_err().is_validation());
        assert!(parse_client_id("alice").unwrap_err().is_validation());
        assert!(parse_service_id("X1").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_phone() {
        assert_eq!(parse_phone("+7 (900) 000-00-01").unwrap(), "+79000000001");
        assert!(parse_phone("call me").unwrap_err().is_validation());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("Name", "  Alice ").unwrap(), "Alice");
        let err = non_empty("Name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Name cannot be empty");
    }
}
