//! Login Value Object
//!
//! The handle an account signs in with. A `Login` always satisfies the
//! user store's rules (`platform::login::is_valid_login`): non-empty, at most
//! `MAX_LOGIN_LENGTH` characters, already in sanitized form.
//!
//! Case is preserved as given; generated logins are lowercase because the
//! slug step lowercases, but overrides may supply mixed case.

use platform::login::{MAX_LOGIN_LENGTH, sanitize_user_login};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Login cannot be empty")]
    Empty,

    #[error("Login is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Login '{login}' contains characters that are not allowed")]
    NotSanitized { login: String },
}

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(String);

impl Login {
    pub fn new(input: impl Into<String>) -> Result<Self, LoginError> {
        let login = input.into();

        if login.is_empty() {
            return Err(LoginError::Empty);
        }

        let length = login.chars().count();
        if length > MAX_LOGIN_LENGTH {
            return Err(LoginError::TooLong {
                length,
                max: MAX_LOGIN_LENGTH,
            });
        }

        if sanitize_user_login(&login) != login {
            return Err(LoginError::NotSanitized { login });
        }

        Ok(Self(login))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(login: impl Into<String>) -> Self {
        Self(login.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Login").field(&self.0).finish()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Login {
    type Error = LoginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Login> for String {
    fn from(login: Login) -> Self {
        login.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_shapes_are_valid() {
        assert!(Login::new("janedoe").is_ok());
        assert!(Login::new("janedoe-12").is_ok());
        assert!(Login::new("j_doe").is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(Login::new(""), Err(LoginError::Empty));
    }

    #[test]
    fn test_too_long() {
        let input = "a".repeat(MAX_LOGIN_LENGTH + 1);
        assert!(matches!(
            Login::new(input),
            Err(LoginError::TooLong { length: 61, max: 60 })
        ));
    }

    #[test]
    fn test_not_sanitized() {
        assert!(matches!(
            Login::new("o'brien"),
            Err(LoginError::NotSanitized { .. })
        ));
        assert!(matches!(
            Login::new("zoë"),
            Err(LoginError::NotSanitized { .. })
        ));
        assert!(matches!(
            Login::new(" padded"),
            Err(LoginError::NotSanitized { .. })
        ));
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(Login::new("JaneDoe").unwrap().as_str(), "JaneDoe");
    }

    #[test]
    fn test_serde() {
        let login: Login = serde_json::from_str("\"janedoe-1\"").unwrap();
        assert_eq!(login.as_str(), "janedoe-1");
        assert_eq!(serde_json::to_string(&login).unwrap(), "\"janedoe-1\"");
        assert!(serde_json::from_str::<Login>("\"bad login!\"").is_err());
    }
}
