//! Cryptographic helpers for ibank
//!
//! Client and manager passwords are stored as Argon2id PHC strings.

pub mod password;

pub use password::{hash_password, verify_password};
