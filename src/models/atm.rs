//! ATM model
//!
//! Reference data only: the address list any visitor can browse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AtmId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atm {
    pub id: AtmId,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Atm {
    pub fn new(id: AtmId, address: impl Into<String>) -> Self {
        Self {
            id,
            address: address.into(),
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Atm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}
