//! Password hashing using Argon2id
//!
//! Produces self-describing PHC strings (`$argon2id$v=19$...`) that carry
//! their own salt and cost parameters.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{BankError, BankResult};

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> BankResult<String> {
    if password.is_empty() {
        return Err(BankError::Validation("Password cannot be empty".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| BankError::Validation(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC string
///
/// A malformed stored hash is a storage problem, not a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> BankResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| BankError::Storage(format!("Malformed password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let first = hash_password("s3cret").unwrap();
        let second = hash_password("s3cret").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(hash_password("").unwrap_err().is_validation());
    }

    #[test]
    fn test_malformed_hash_is_storage_error() {
        let err = verify_password("s3cret", "plaintext").unwrap_err();
        assert!(matches!(err, BankError::Storage(_)));
    }
}
