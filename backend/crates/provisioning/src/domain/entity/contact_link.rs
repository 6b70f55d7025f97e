//! Contact Link Entity
//!
//! Cross-reference between a provisioned account and the contact it was
//! created from. One link per contact and one per user.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{contact_id::ContactId, email::Email, user_id::UserId};

#[derive(Debug, Clone)]
pub struct ContactLink {
    pub contact_id: ContactId,
    pub user_id: UserId,
    /// Email the account had when the link was made
    pub uf_name: Email,
    pub created_at: DateTime<Utc>,
}

impl ContactLink {
    pub fn new(contact_id: ContactId, user_id: UserId, uf_name: Email) -> Self {
        Self {
            contact_id,
            user_id,
            uf_name,
            created_at: Utc::now(),
        }
    }
}
