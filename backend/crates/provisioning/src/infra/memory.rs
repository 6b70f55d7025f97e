//! In-memory Repository
//!
//! Single-process implementation of every repository trait. Enforces the
//! same uniqueness rules as the PostgreSQL schema (case-insensitive login,
//! unique email, one link per contact and per user). Used by tests and local
//! tooling.

use std::sync::{Mutex, MutexGuard};

use platform::password::{ClearTextPassword, DEFAULT_PASSWORD_LENGTH};

use crate::domain::entity::{
    contact::NewContact,
    contact_link::ContactLink,
    user::{User, UserCredentials},
};
use crate::domain::repository::{
    ContactDirectory, ContactLinkRepository, LoginExistence, UserRepository,
};
use crate::domain::value_object::{
    contact_id::ContactId, email::Email, login::Login, user_id::UserId,
};
use crate::error::{ProvisioningError, ProvisioningResult};

#[derive(Default)]
struct State {
    users: Vec<(User, UserCredentials)>,
    links: Vec<ContactLink>,
    contacts: Vec<(ContactId, NewContact)>,
    next_contact_id: i64,
    fail_link_creation: bool,
    lose_next_login_race: bool,
    login_queries: Vec<String>,
}

#[derive(Default)]
pub struct InMemoryDirectory {
    state: Mutex<State>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed an existing account with a random password (no uniqueness check)
    pub fn insert_user(&self, login: Login, email: Email) -> ProvisioningResult<UserId> {
        let user = User::new(login, email, "Existing User");
        let user_id = user.user_id;
        let password_hash = ClearTextPassword::generate(DEFAULT_PASSWORD_LENGTH).hash(None)?;
        self.state()
            .users
            .push((user, UserCredentials::new(user_id, password_hash)));
        Ok(user_id)
    }

    /// Seed a directory contact
    pub fn insert_contact(&self, display_name: &str, email: &str) -> ContactId {
        let email = Email::from_db(email.trim().to_lowercase());
        let contact = NewContact {
            display_name: display_name.to_string(),
            email,
            first_name: None,
            last_name: None,
        };
        let mut state = self.state();
        state.next_contact_id += 1;
        let contact_id = ContactId::new(state.next_contact_id);
        state.contacts.push((contact_id, contact));
        contact_id
    }

    /// Seed a link
    pub fn insert_link(&self, link: ContactLink) {
        self.state().links.push(link);
    }

    /// Make every subsequent `create_link` fail
    pub fn fail_link_creation(&self) {
        self.state().fail_link_creation = true;
    }

    /// Make the next `create_user` behave as if a concurrent create took the
    /// login after the oracle reported it free
    pub fn lose_next_login_race(&self) {
        self.state().lose_next_login_race = true;
    }

    pub fn users(&self) -> Vec<User> {
        self.state().users.iter().map(|(u, _)| u.clone()).collect()
    }

    pub fn credentials(&self, user_id: &UserId) -> Option<UserCredentials> {
        self.state()
            .users
            .iter()
            .find(|(u, _)| &u.user_id == user_id)
            .map(|(_, c)| c.clone())
    }

    pub fn links(&self) -> Vec<ContactLink> {
        self.state().links.clone()
    }

    pub fn contacts(&self) -> Vec<(ContactId, NewContact)> {
        self.state().contacts.clone()
    }

    /// Every login the oracle was asked about, in order
    pub fn login_queries(&self) -> Vec<String> {
        self.state().login_queries.clone()
    }
}

impl LoginExistence for InMemoryDirectory {
    async fn login_exists(&self, login: &str) -> ProvisioningResult<bool> {
        let mut state = self.state();
        state.login_queries.push(login.to_string());
        Ok(state
            .users
            .iter()
            .any(|(u, _)| u.login.as_str().eq_ignore_ascii_case(login)))
    }
}

impl UserRepository for InMemoryDirectory {
    async fn create_user(
        &self,
        user: &User,
        credentials: &UserCredentials,
    ) -> ProvisioningResult<()> {
        let mut state = self.state();

        if std::mem::take(&mut state.lose_next_login_race) {
            return Err(ProvisioningError::LoginTaken(user.login.to_string()));
        }
        if state
            .users
            .iter()
            .any(|(u, _)| u.login.as_str().eq_ignore_ascii_case(user.login.as_str()))
        {
            return Err(ProvisioningError::LoginTaken(user.login.to_string()));
        }
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(ProvisioningError::EmailTaken);
        }

        state.users.push((user.clone(), credentials.clone()));
        Ok(())
    }

    async fn find_user_by_id(&self, user_id: &UserId) -> ProvisioningResult<Option<User>> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|(u, _)| &u.user_id == user_id)
            .map(|(u, _)| u.clone()))
    }

    async fn email_exists(&self, email: &Email) -> ProvisioningResult<bool> {
        Ok(self.state().users.iter().any(|(u, _)| &u.email == email))
    }
}

impl ContactLinkRepository for InMemoryDirectory {
    async fn create_link(&self, link: &ContactLink) -> ProvisioningResult<()> {
        let mut state = self.state();

        if state.fail_link_creation {
            return Err(ProvisioningError::Internal("link store unavailable".into()));
        }
        if state.links.iter().any(|l| l.contact_id == link.contact_id) {
            return Err(ProvisioningError::ContactAlreadyLinked(link.contact_id.value()));
        }
        if state.links.iter().any(|l| l.user_id == link.user_id) {
            return Err(ProvisioningError::Internal(format!(
                "user {} is already linked",
                link.user_id
            )));
        }

        state.links.push(link.clone());
        Ok(())
    }

    async fn find_link_by_contact(
        &self,
        contact_id: ContactId,
    ) -> ProvisioningResult<Option<ContactLink>> {
        Ok(self
            .state()
            .links
            .iter()
            .find(|l| l.contact_id == contact_id)
            .cloned())
    }

    async fn find_link_by_user(&self, user_id: &UserId) -> ProvisioningResult<Option<ContactLink>> {
        Ok(self
            .state()
            .links
            .iter()
            .find(|l| &l.user_id == user_id)
            .cloned())
    }
}

impl ContactDirectory for InMemoryDirectory {
    async fn find_contact_by_email(&self, email: &Email) -> ProvisioningResult<Option<ContactId>> {
        Ok(self
            .state()
            .contacts
            .iter()
            .find(|(_, c)| &c.email == email)
            .map(|(id, _)| *id))
    }

    async fn create_contact(&self, contact: &NewContact) -> ProvisioningResult<ContactId> {
        let mut state = self.state();
        state.next_contact_id += 1;
        let contact_id = ContactId::new(state.next_contact_id);
        state.contacts.push((contact_id, contact.clone()));
        Ok(contact_id)
    }
}
