//! Candidate Contact
//!
//! A person from the contact directory for whom an account may be created.
//! Read-only input to provisioning.

use crate::domain::value_object::contact_id::ContactId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateContact {
    pub contact_id: ContactId,
    pub display_name: String,
    /// Raw email as held by the directory; validated during provisioning
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CandidateContact {
    pub fn new(contact_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            contact_id: ContactId::new(contact_id),
            display_name: display_name.into(),
            email: None,
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// Email with surrounding whitespace removed, `None` when blank
    pub fn trimmed_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_email() {
        let c = CandidateContact::new(1, "Jane Doe").with_email("  jane@example.com ");
        assert_eq!(c.trimmed_email(), Some("jane@example.com"));

        let blank = CandidateContact::new(2, "No Mail").with_email("   ");
        assert_eq!(blank.trimmed_email(), None);

        assert_eq!(CandidateContact::new(3, "Absent").trimmed_email(), None);
    }
}
