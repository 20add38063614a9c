//! Keystore password policy
//!
//! A pre-condition gate checked before any keystore is created, opened or
//! exported. It has no influence on the key derivation parameters.

use thiserror::Error;

/// Minimum password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password length is less than {min} characters")]
    PasswordTooShort { length: usize, min: usize },
}

/// Check a password against the policy.
///
/// # Example
/// ```
/// use cosmwallet_core::password::{verify_password, PasswordError};
/// assert_eq!(verify_password(""), Err(PasswordError::PasswordRequired));
/// assert!(verify_password("12345678").is_ok());
/// ```
pub fn verify_password(password: &str) -> Result<(), PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::PasswordRequired);
    }
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::PasswordTooShort {
            length,
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}
