//! User Entity
//!
//! A provisioned login account. Credentials live in [`UserCredentials`] so
//! the profile can be passed around without the hash.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::entity::candidate::CandidateContact;
use crate::domain::value_object::{email::Email, login::Login, user_id::UserId};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub login: Login,
    pub email: Email,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(login: Login, email: Email, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            login,
            email,
            display_name: display_name.into(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Account profile for a directory contact
    pub fn from_candidate(candidate: &CandidateContact, login: Login, email: Email) -> Self {
        Self {
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            ..Self::new(login, email, candidate.display_name.clone())
        }
    }
}

/// Password hash for a user
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user_id: UserId,
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
}

impl UserCredentials {
    pub fn new(user_id: UserId, password_hash: HashedPassword) -> Self {
        Self {
            user_id,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_candidate_copies_profile() {
        let candidate = CandidateContact::new(7, "Jane Doe")
            .with_email("jane@example.com")
            .with_names("Jane", "Doe");
        let user = User::from_candidate(
            &candidate,
            Login::new("janedoe").unwrap(),
            Email::new("jane@example.com").unwrap(),
        );

        assert_eq!(user.display_name, "Jane Doe");
        assert_eq!(user.first_name.as_deref(), Some("Jane"));
        assert_eq!(user.last_name.as_deref(), Some("Doe"));
        assert_eq!(user.login.as_str(), "janedoe");
        assert_eq!(user.created_at, user.updated_at);
    }
}
