//! Manager model
//!
//! Back-office operators who create clients, accounts, services and ATMs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    /// Unique login
    pub login: String,

    /// Argon2 PHC string
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl Manager {
    pub fn new(login: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}
