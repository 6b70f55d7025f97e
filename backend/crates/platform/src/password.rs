//! Generated Passwords
//!
//! Accounts provisioned in bulk never see a user-chosen password: a random
//! alphanumeric one is generated, hashed, and only the hash is stored. Users
//! set their own through the normal reset flow.
//!
//! ## Security Features
//! - Generation uses the OS CSPRNG
//! - Argon2id hashing (memory-hard, OWASP recommended defaults)
//! - Clear text is zeroized on drop and redacted from `Debug`
//! - Optional application-wide pepper

use std::fmt;

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use rand::distributions::Alphanumeric;
use rand::{Rng, rngs::OsRng};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default generated password length
pub const DEFAULT_PASSWORD_LENGTH: usize = 12;

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

/// Random alphanumeric string from the OS CSPRNG
pub fn generate_password(length: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop
///
/// Not `Clone`; `Debug` output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Generate a fresh random password of `length` characters
    pub fn generate(length: usize) -> Self {
        Self(generate_password(length))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id, appending `pepper` when given
    ///
    /// Returns a PHC-formatted hash.
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = peppered(self, pepper);

        // 128-bit random salt
        let salt = SaltString::generate(OsRng);

        // Argon2id, m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

fn peppered(password: &ClearTextPassword, pepper: Option<&[u8]>) -> Vec<u8> {
    let mut bytes = password.as_bytes().to_vec();
    if let Some(p) = pepper {
        bytes.extend_from_slice(p);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    fn verify(hashed: &HashedPassword, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let parsed = PasswordHash::new(hashed.as_phc_string()).unwrap();
        Argon2::default()
            .verify_password(&peppered(password, pepper), &parsed)
            .is_ok()
    }

    mod generation {
        use super::*;

        #[test]
        fn test_generated_length_and_charset() {
            let password = generate_password(DEFAULT_PASSWORD_LENGTH);
            assert_eq!(password.len(), DEFAULT_PASSWORD_LENGTH);
            assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
        }

        #[test]
        fn test_generated_passwords_differ() {
            assert_ne!(generate_password(32), generate_password(32));
        }

        #[test]
        fn test_zero_length() {
            assert!(ClearTextPassword::generate(0).0.is_empty());
        }
    }

    mod hashing {
        use super::*;

        #[test]
        fn test_hash_is_argon2id_phc() {
            let hashed = ClearTextPassword::generate(DEFAULT_PASSWORD_LENGTH)
                .hash(None)
                .unwrap();
            assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        }

        #[test]
        fn test_hash_and_verify() {
            let password = ClearTextPassword::generate(DEFAULT_PASSWORD_LENGTH);
            let hashed = password.hash(None).unwrap();

            assert!(verify(&hashed, &password, None));

            let wrong = ClearTextPassword("not-the-password".to_string());
            assert!(!verify(&hashed, &wrong, None));
        }

        #[test]
        fn test_hash_with_pepper() {
            let password = ClearTextPassword("Gq7tLm2xPa9R".to_string());
            let pepper = b"provisioning_pepper";
            let hashed = password.hash(Some(pepper)).unwrap();

            assert!(verify(&hashed, &password, Some(pepper)));
            assert!(!verify(&hashed, &password, None));
            assert!(!verify(&hashed, &password, Some(b"other_pepper")));
        }

        #[test]
        fn test_salt_differs_per_hash() {
            let password = ClearTextPassword("Gq7tLm2xPa9R".to_string());
            let a = password.hash(None).unwrap();
            let b = password.hash(None).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = password.hash(None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
