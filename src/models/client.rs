//! Client model
//!
//! A bank customer. Login and phone number are both unique across clients
//! and either one resolves back to the client id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::MAX_CLIENT_ID;
use super::ids::ClientId;

/// A bank customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,

    /// Display name
    pub name: String,

    /// Unique login used by the customer terminal
    pub login: String,

    /// Argon2 PHC string, never the clear password
    pub password_hash: String,

    /// Unique phone number in normalized form
    pub phone: String,

    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        id: ClientId,
        name: impl Into<String>,
        login: impl Into<String>,
        password_hash: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            login: login.into(),
            password_hash: password_hash.into(),
            phone: phone.into(),
            created_at: Utc::now(),
        }
    }

    /// Validate the client
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.id.value() > MAX_CLIENT_ID {
            return Err(ClientValidationError::IdOutOfRange(self.id));
        }

        if self.name.trim().is_empty() {
            return Err(ClientValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ClientValidationError::NameTooLong(self.name.len()));
        }

        if self.login.trim().is_empty() || self.login.chars().any(char::is_whitespace) {
            return Err(ClientValidationError::InvalidLogin(self.login.clone()));
        }

        normalize_phone(&self.phone)?;
        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.login, self.phone)
    }
}

/// Normalize a phone number: optional leading `+`, then 5 to 15 digits
///
/// Spaces, dashes and parentheses are dropped so `+7 (900) 123-45-67` and
/// `+79001234567` resolve to the same client.
pub fn normalize_phone(raw: &str) -> Result<String, ClientValidationError> {
    let trimmed = raw.trim();
    let (plus, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", trimmed),
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '(' | ')' => {}
            _ => return Err(ClientValidationError::InvalidPhone(raw.to_string())),
        }
    }

    if !(5..=15).contains(&digits.len()) {
        return Err(ClientValidationError::InvalidPhone(raw.to_string()));
    }

    Ok(format!("{}{}", plus, digits))
}

/// Validation errors for clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientValidationError {
    IdOutOfRange(ClientId),
    EmptyName,
    NameTooLong(usize),
    InvalidLogin(String),
    InvalidPhone(String),
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdOutOfRange(id) => {
                write!(f, "Client id {} exceeds {}", id, MAX_CLIENT_ID)
            }
            Self::EmptyName => write!(f, "Client name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Client name too long ({} chars, max 100)", len)
            }
            Self::InvalidLogin(login) => write!(f, "Invalid login '{}'", login),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number '{}'", phone),
        }
    }
}

impl std::error::Error for ClientValidationError {}
