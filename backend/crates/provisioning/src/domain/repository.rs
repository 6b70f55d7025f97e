//! Repository Traits
//!
//! Interfaces for persistence and for the external contact directory.
//! Implementations live in the infrastructure layer.

use crate::domain::entity::{contact::NewContact, contact_link::ContactLink, user::{User, UserCredentials}};
use crate::domain::value_object::{contact_id::ContactId, email::Email, user_id::UserId};
use crate::error::ProvisioningResult;

/// "Is this login already taken?"
///
/// The existence oracle consulted by username generation. Implementations
/// only read; nothing is reserved by asking.
#[trait_variant::make(LoginExistence: Send)]
pub trait LocalLoginExistence {
    async fn login_exists(&self, login: &str) -> ProvisioningResult<bool>;
}

/// User account store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create the account and its credentials atomically
    ///
    /// A login or email taken between check and create surfaces as
    /// `LoginTaken` / `EmailTaken`.
    async fn create_user(&self, user: &User, credentials: &UserCredentials)
        -> ProvisioningResult<()>;

    async fn find_user_by_id(&self, user_id: &UserId) -> ProvisioningResult<Option<User>>;

    async fn email_exists(&self, email: &Email) -> ProvisioningResult<bool>;
}

/// Account <-> contact cross-reference store
#[trait_variant::make(ContactLinkRepository: Send)]
pub trait LocalContactLinkRepository {
    async fn create_link(&self, link: &ContactLink) -> ProvisioningResult<()>;

    async fn find_link_by_contact(&self, contact_id: ContactId)
        -> ProvisioningResult<Option<ContactLink>>;

    async fn find_link_by_user(&self, user_id: &UserId) -> ProvisioningResult<Option<ContactLink>>;
}

/// External contact directory (write side used by reverse sync)
#[trait_variant::make(ContactDirectory: Send)]
pub trait LocalContactDirectory {
    async fn find_contact_by_email(&self, email: &Email) -> ProvisioningResult<Option<ContactId>>;

    async fn create_contact(&self, contact: &NewContact) -> ProvisioningResult<ContactId>;
}
