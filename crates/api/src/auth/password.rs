//! Argon2id password hashing and verification.
//!
//! Hashes use the Argon2id variant with a cryptographically random salt from
//! [`OsRng`], stored in PHC string format so algorithm parameters and salt
//! travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default(); // Argon2id with default params
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("newt-eye-and-frog-toe").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"), "expected argon2id PHC prefix");

        let verified =
            verify_password("newt-eye-and-frog-toe", &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let hash = hash_password("the-real-password").expect("hashing should succeed");
        let verified = verify_password("a-guess", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_garbage_hash_is_an_error_not_a_mismatch() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(result.is_err(), "malformed stored hash must surface as an error");
    }
}
