//! ibank - text-menu banking terminal
//!
//! This library provides the core of the ibank terminal: clients and their
//! accounts, transfers between accounts (by account number, by phone number
//! and as service payments), and the two text-menu front-ends that drive
//! them, one for customers and one for the back office.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (clients, accounts, transfers, services, ATMs)
//! - `storage`: JSON file storage layer and the `LedgerStore` interface
//! - `services`: Business logic layer, including the transfer engine
//! - `crypto`: Password hashing
//! - `export`: Record exchange in JSON, YAML and CSV
//! - `display`: Terminal tables
//! - `menu`: Customer and back-office terminals
//! - `logging`: Log file setup
//!
//! # Example
//!
//! ```rust,ignore
//! use ibank_cli::config::paths::BankPaths;
//! use ibank_cli::models::{Money, MoneyTransfer};
//! use ibank_cli::services::TransferEngine;
//! use ibank_cli::storage::Storage;
//!
//! let storage = Storage::open(BankPaths::new()?)?;
//! let transfer = MoneyTransfer::new(
//!     "0000000010001".parse()?,
//!     "0000000020001".parse()?,
//!     Money::parse("400")?,
//! );
//! let receipt = TransferEngine::new(&storage).execute(transfer)?;
//! ```

pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod menu;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{BankError, BankResult};
