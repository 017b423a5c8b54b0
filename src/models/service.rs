//! Payable service model
//!
//! A service (utility, provider, merchant) that customers pay into. Payments
//! land on the service's target account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::AccountRef;
use super::ids::{AccountNumber, ClientId, ServiceId};

/// A billable entity with a fixed target account
///
/// The target is stored as two flat columns so the record stays
/// representable in every interchange format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,

    pub name: String,

    /// Client owning the account that receives payments
    pub target_client_id: ClientId,

    /// Number of the receiving account within the target client
    pub target_account: AccountNumber,

    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(id: ServiceId, name: impl Into<String>, target: AccountRef) -> Self {
        Self {
            id,
            name: name.into(),
            target_client_id: target.client_id,
            target_account: target.number,
            created_at: Utc::now(),
        }
    }

    /// The account that receives payments for this service
    pub fn target(&self) -> AccountRef {
        AccountRef::new(self.target_client_id, self.target_account)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.id, self.name, self.target())
    }
}
