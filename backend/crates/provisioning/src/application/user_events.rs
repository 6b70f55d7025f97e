//! User Events
//!
//! Listeners notified when an account comes into existence. The reverse-sync
//! listener makes sure every account has a directory contact and a link to
//! it, unless the account was itself created from a contact (guard active).

use std::sync::Arc;

use crate::application::sync_guard::SyncGuard;
use crate::domain::entity::{contact::NewContact, contact_link::ContactLink, user::User};
use crate::domain::repository::{ContactDirectory, ContactLinkRepository};
use crate::domain::value_object::contact_id::ContactId;
use crate::error::ProvisioningResult;

#[trait_variant::make(UserEventListener: Send)]
pub trait LocalUserEventListener {
    async fn user_registered(&self, user: &User, guard: &SyncGuard) -> ProvisioningResult<()>;
}

/// Listener that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUserEvents;

impl UserEventListener for NoopUserEvents {
    async fn user_registered(&self, _user: &User, _guard: &SyncGuard) -> ProvisioningResult<()> {
        Ok(())
    }
}

/// What reverse sync did for one account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReverseSyncOutcome {
    /// Guard active: the write came from provisioning itself
    Suppressed,
    /// Account already had a link
    AlreadyLinked(ContactId),
    /// Linked to an existing contact with the same email
    LinkedExisting(ContactId),
    /// Created a new contact and linked it
    CreatedContact(ContactId),
}

impl ReverseSyncOutcome {
    pub fn contact_id(&self) -> Option<ContactId> {
        match self {
            Self::Suppressed => None,
            Self::AlreadyLinked(id) | Self::LinkedExisting(id) | Self::CreatedContact(id) => {
                Some(*id)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Suppressed => "suppressed",
            Self::AlreadyLinked(_) => "already_linked",
            Self::LinkedExisting(_) => "linked_existing",
            Self::CreatedContact(_) => "created_contact",
        }
    }
}

/// Account -> contact sync
pub struct ReverseSyncListener<D, L>
where
    D: ContactDirectory,
    L: ContactLinkRepository,
{
    directory: Arc<D>,
    link_repo: Arc<L>,
}

impl<D, L> ReverseSyncListener<D, L>
where
    D: ContactDirectory + Send + Sync,
    L: ContactLinkRepository + Send + Sync,
{
    pub fn new(directory: Arc<D>, link_repo: Arc<L>) -> Self {
        Self {
            directory,
            link_repo,
        }
    }

    pub async fn sync_user(
        &self,
        user: &User,
        guard: &SyncGuard,
    ) -> ProvisioningResult<ReverseSyncOutcome> {
        if guard.is_active() {
            tracing::debug!(
                user_id = %user.user_id,
                login = %user.login,
                "Reverse sync suppressed during provisioning write"
            );
            return Ok(ReverseSyncOutcome::Suppressed);
        }

        if let Some(link) = self.link_repo.find_link_by_user(&user.user_id).await? {
            return Ok(ReverseSyncOutcome::AlreadyLinked(link.contact_id));
        }

        let outcome = match self.directory.find_contact_by_email(&user.email).await? {
            Some(contact_id) => ReverseSyncOutcome::LinkedExisting(contact_id),
            None => {
                let contact = NewContact {
                    display_name: user.display_name.clone(),
                    email: user.email.clone(),
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                };
                ReverseSyncOutcome::CreatedContact(self.directory.create_contact(&contact).await?)
            }
        };

        // Every non-suppressed outcome carries an id
        if let Some(contact_id) = outcome.contact_id() {
            let link = ContactLink::new(contact_id, user.user_id, user.email.clone());
            self.link_repo.create_link(&link).await?;
        }

        tracing::info!(
            user_id = %user.user_id,
            outcome = outcome.as_str(),
            "Account synced to contact directory"
        );

        Ok(outcome)
    }
}

impl<D, L> UserEventListener for ReverseSyncListener<D, L>
where
    D: ContactDirectory + Send + Sync,
    L: ContactLinkRepository + Send + Sync,
{
    async fn user_registered(&self, user: &User, guard: &SyncGuard) -> ProvisioningResult<()> {
        self.sync_user(user, guard).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, login::Login};
    use crate::infra::memory::InMemoryDirectory;

    fn user(login: &str, email: &str) -> User {
        User::new(
            Login::new(login).unwrap(),
            Email::new(email).unwrap(),
            "Test Person",
        )
    }

    fn listener(store: &Arc<InMemoryDirectory>) -> ReverseSyncListener<InMemoryDirectory, InMemoryDirectory> {
        ReverseSyncListener::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_suppressed_while_guard_active() {
        let store = Arc::new(InMemoryDirectory::new());
        let guard = SyncGuard::new();
        let _scope = guard.enter();

        let outcome = listener(&store)
            .sync_user(&user("alice", "alice@example.com"), &guard)
            .await
            .unwrap();

        assert_eq!(outcome, ReverseSyncOutcome::Suppressed);
        assert!(store.contacts().is_empty());
        assert!(store.links().is_empty());
    }

    #[tokio::test]
    async fn test_creates_contact_and_link() {
        let store = Arc::new(InMemoryDirectory::new());
        let u = user("bob", "bob@example.com");

        let outcome = listener(&store).sync_user(&u, &SyncGuard::new()).await.unwrap();

        let ReverseSyncOutcome::CreatedContact(contact_id) = outcome else {
            panic!("expected a created contact, got {outcome:?}");
        };
        assert_eq!(store.contacts().len(), 1);
        let links = store.links();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].contact_id, contact_id);
        assert_eq!(links[0].user_id, u.user_id);
    }

    #[tokio::test]
    async fn test_links_existing_contact_by_email() {
        let store = Arc::new(InMemoryDirectory::new());
        let existing = store.insert_contact("Carol", "carol@example.com");

        let outcome = listener(&store)
            .sync_user(&user("carol", "Carol@Example.com"), &SyncGuard::new())
            .await
            .unwrap();

        assert_eq!(outcome, ReverseSyncOutcome::LinkedExisting(existing));
        assert_eq!(store.contacts().len(), 1);
    }

    #[tokio::test]
    async fn test_second_sync_is_noop() {
        let store = Arc::new(InMemoryDirectory::new());
        let u = user("dave", "dave@example.com");
        let l = listener(&store);

        let first = l.sync_user(&u, &SyncGuard::new()).await.unwrap();
        let second = l.sync_user(&u, &SyncGuard::new()).await.unwrap();

        assert_eq!(second, ReverseSyncOutcome::AlreadyLinked(first.contact_id().unwrap()));
        assert_eq!(store.links().len(), 1);
    }
}
