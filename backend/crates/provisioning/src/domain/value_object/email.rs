//! Email Value Object
//!
//! A syntactically valid email address (see `platform::email`).
//! Stored lowercased so uniqueness checks are case-insensitive.

use platform::email::is_valid_email;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Trim, validate, lowercase
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let trimmed = email.as_ref().trim();

        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }

        if !is_valid_email(trimmed) {
            return Err(EmailError::InvalidFormat(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_lowercase()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("user.name+crm@example.co.jp").is_ok());
        assert!(Email::new("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_email_invalid() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
        assert_eq!(Email::new("   "), Err(EmailError::Empty));
        assert!(matches!(
            Email::new("userexample.com"),
            Err(EmailError::InvalidFormat(_))
        ));
        assert!(Email::new("user@example").is_err());
        assert!(Email::new("user@@example.com").is_err());
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("Jane.Doe@Example.COM").unwrap();
        assert_eq!(email.as_str(), "jane.doe@example.com");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<Email, _> = serde_json::from_str("\"A@Example.com\"");
        assert_eq!(ok.unwrap().as_str(), "a@example.com");

        let bad: Result<Email, _> = serde_json::from_str("\"nope\"");
        assert!(bad.is_err());
    }
}
