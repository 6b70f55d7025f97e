//! Bulk Create Use Case
//!
//! Creates accounts for a batch of directory contacts.
//!
//! Each candidate is handled on its own, in order:
//! 1. skip if the contact is already linked to an account
//! 2. skip if the email is missing or malformed
//! 3. skip if the email already belongs to an account
//! 4. generate a username (then apply the override, if any)
//! 5. skip if the username is not a valid login
//! 6. create the account with a random password, inside the sync guard
//! 7. link the account to the contact
//!
//! A skipped or failed candidate never stops the batch. Nothing is retried
//! and nothing is rolled back: an account whose link could not be written
//! stays, and the candidate is reported as failed.

use std::fmt;
use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::ProvisioningConfig;
use crate::application::sync_guard::SyncGuard;
use crate::application::user_events::UserEventListener;
use crate::domain::entity::{
    candidate::CandidateContact,
    contact_link::ContactLink,
    user::{User, UserCredentials},
};
use crate::domain::repository::{ContactLinkRepository, LoginExistence, UserRepository};
use crate::domain::services::{UsernameOverrideFn, generate_username};
use crate::domain::value_object::{
    contact_id::ContactId,
    email::Email,
    login::{Login, LoginError},
    user_id::UserId,
};
use crate::error::{ProvisioningError, ProvisioningResult};

/// Bulk create input
pub struct BulkCreateInput {
    pub candidates: Vec<CandidateContact>,
}

/// Why a candidate did not get an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyLinked,
    MissingEmail,
    InvalidEmail,
    EmailTaken,
    InvalidLogin(String),
    /// Login claimed by someone else between check and create
    LoginTaken(String),
    /// Account created but the link could not be written
    LinkFailed(UserId),
    /// Infrastructure failure; details are in the log
    Error,
}

impl SkipReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyLinked => "ALREADY_LINKED",
            Self::MissingEmail => "MISSING_EMAIL",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidLogin(_) => "INVALID_LOGIN",
            Self::LoginTaken(_) => "LOGIN_TAKEN",
            Self::LinkFailed(_) => "LINK_FAILED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyLinked => f.write_str("Contact already has an account"),
            Self::MissingEmail => f.write_str("Contact has no email address"),
            Self::InvalidEmail => f.write_str("Contact email address is not valid"),
            Self::EmailTaken => f.write_str("Email address is already registered"),
            Self::InvalidLogin(login) => write!(f, "Username '{login}' is not a valid login"),
            Self::LoginTaken(login) => write!(f, "Username '{login}' was taken concurrently"),
            Self::LinkFailed(_) => f.write_str("Account created but could not be linked to contact"),
            Self::Error => f.write_str("Account could not be created"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { user_id: UserId, login: Login },
    Skipped(SkipReason),
}

/// Result for one candidate
#[derive(Debug, Clone)]
pub struct CandidateOutcome {
    pub contact_id: ContactId,
    pub display_name: String,
    pub outcome: Outcome,
}

/// Bulk create output
///
/// `succeeded` and `failed` hold display names in processing order.
#[derive(Debug, Clone, Default)]
pub struct BulkCreateOutput {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    pub outcomes: Vec<CandidateOutcome>,
}

/// Bulk create use case
pub struct BulkCreateUsersUseCase<U, L, E>
where
    U: UserRepository + LoginExistence,
    L: ContactLinkRepository,
    E: UserEventListener,
{
    user_repo: Arc<U>,
    link_repo: Arc<L>,
    events: Arc<E>,
    config: Arc<ProvisioningConfig>,
    username_override: Option<Arc<UsernameOverrideFn>>,
}

impl<U, L, E> BulkCreateUsersUseCase<U, L, E>
where
    U: UserRepository + LoginExistence + Send + Sync,
    L: ContactLinkRepository + Send + Sync,
    E: UserEventListener + Send + Sync,
{
    pub fn new(
        user_repo: Arc<U>,
        link_repo: Arc<L>,
        events: Arc<E>,
        config: Arc<ProvisioningConfig>,
    ) -> Self {
        Self {
            user_repo,
            link_repo,
            events,
            config,
            username_override: None,
        }
    }

    /// Install the final username override
    pub fn with_username_override<F>(mut self, f: F) -> Self
    where
        F: Fn(String, &CandidateContact) -> String + Send + Sync + 'static,
    {
        self.username_override = Some(Arc::new(f));
        self
    }

    pub async fn execute(&self, input: BulkCreateInput) -> BulkCreateOutput {
        let guard = SyncGuard::new();
        self.execute_with_guard(input, &guard).await
    }

    /// Run the batch under a caller-owned guard
    pub async fn execute_with_guard(
        &self,
        input: BulkCreateInput,
        guard: &SyncGuard,
    ) -> BulkCreateOutput {
        let mut output = BulkCreateOutput::default();

        for candidate in input.candidates {
            let outcome = match self.provision(&candidate, guard).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(
                        contact_id = %candidate.contact_id,
                        error = %e,
                        "Provisioning failed for contact"
                    );
                    Outcome::Skipped(SkipReason::Error)
                }
            };

            match &outcome {
                Outcome::Created { user_id, login } => {
                    tracing::info!(
                        contact_id = %candidate.contact_id,
                        user_id = %user_id,
                        login = %login,
                        "Account created for contact"
                    );
                    output.succeeded.push(candidate.display_name.clone());
                }
                Outcome::Skipped(reason) => {
                    tracing::debug!(
                        contact_id = %candidate.contact_id,
                        reason = reason.code(),
                        "Contact skipped"
                    );
                    output.failed.push(candidate.display_name.clone());
                }
            }

            output.outcomes.push(CandidateOutcome {
                contact_id: candidate.contact_id,
                display_name: candidate.display_name,
                outcome,
            });
        }

        tracing::info!(
            succeeded = output.succeeded.len(),
            failed = output.failed.len(),
            "Bulk provisioning finished"
        );

        output
    }

    async fn provision(
        &self,
        candidate: &CandidateContact,
        guard: &SyncGuard,
    ) -> ProvisioningResult<Outcome> {
        if self
            .link_repo
            .find_link_by_contact(candidate.contact_id)
            .await?
            .is_some()
        {
            return Ok(Outcome::Skipped(SkipReason::AlreadyLinked));
        }

        let Some(raw_email) = candidate.trimmed_email() else {
            return Ok(Outcome::Skipped(SkipReason::MissingEmail));
        };
        let Ok(email) = Email::new(raw_email) else {
            return Ok(Outcome::Skipped(SkipReason::InvalidEmail));
        };

        if self.user_repo.email_exists(&email).await? {
            return Ok(Outcome::Skipped(SkipReason::EmailTaken));
        }

        let mut username =
            generate_username(&candidate.display_name, self.user_repo.as_ref()).await?;
        if let Some(override_fn) = &self.username_override {
            username = override_fn(username, candidate);
        }

        let login = match Login::new(username.clone()) {
            Ok(login) => login,
            Err(LoginError::NotSanitized { login }) => {
                return Ok(Outcome::Skipped(SkipReason::InvalidLogin(login)));
            }
            Err(_) => return Ok(Outcome::Skipped(SkipReason::InvalidLogin(username))),
        };

        let password = ClearTextPassword::generate(self.config.password_length);
        let password_hash = password.hash(self.config.pepper())?;

        let user = User::from_candidate(candidate, login, email);
        let credentials = UserCredentials::new(user.user_id, password_hash);

        {
            let _scope = guard.enter();

            match self.user_repo.create_user(&user, &credentials).await {
                Ok(()) => {}
                Err(ProvisioningError::LoginTaken(login)) => {
                    return Ok(Outcome::Skipped(SkipReason::LoginTaken(login)));
                }
                Err(ProvisioningError::EmailTaken) => {
                    return Ok(Outcome::Skipped(SkipReason::EmailTaken));
                }
                Err(e) => return Err(e),
            }

            if let Err(e) = self.events.user_registered(&user, guard).await {
                tracing::warn!(user_id = %user.user_id, error = %e, "User event listener failed");
            }
        }

        let link = ContactLink::new(candidate.contact_id, user.user_id, user.email.clone());
        if let Err(e) = self.link_repo.create_link(&link).await {
            tracing::warn!(
                contact_id = %candidate.contact_id,
                user_id = %user.user_id,
                error = %e,
                "Account created but contact link failed"
            );
            return Ok(Outcome::Skipped(SkipReason::LinkFailed(user.user_id)));
        }

        Ok(Outcome::Created {
            user_id: user.user_id,
            login: user.login,
        })
    }
}
