//! Display formatting for terminal output
//!
//! Table rendering for accounts, ATMs and services.

pub mod account;
pub mod directory;

pub use account::{format_account_choices, format_account_list};
pub use directory::{format_atm_list, format_service_list};
