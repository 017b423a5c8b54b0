//! Core data models for ibank
//!
//! This module contains the data structures of the banking domain: clients,
//! their accounts, transfers between accounts, payable services and ATMs.

pub mod account;
pub mod atm;
pub mod client;
pub mod ids;
pub mod manager;
pub mod money;
pub mod service;
pub mod transfer;

pub use account::{Account, AccountRef};
pub use atm::Atm;
pub use client::{normalize_phone, Client};
pub use ids::{AccountNumber, AtmId, ClientId, ServiceId};
pub use manager::Manager;
pub use money::Money;
pub use service::Service;
pub use transfer::{MoneyTransfer, Receiver, TransferReceipt, ValidatedTransfer};
