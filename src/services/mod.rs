//! Service layer for ibank
//!
//! The service layer provides the banking operations on top of the storage
//! layer: validation, lookups across entities and transfers. Core services
//! are generic over [`LedgerStore`](crate::storage::LedgerStore) and default
//! to the file-backed [`Storage`](crate::storage::Storage).

pub mod account;
pub mod atm;
pub mod client;
pub mod manager;
pub mod registry;
pub mod transfer;

pub use account::AccountService;
pub use atm::AtmService;
pub use client::{ClientService, NewClient};
pub use manager::ManagerService;
pub use registry::ServiceRegistry;
pub use transfer::TransferEngine;
