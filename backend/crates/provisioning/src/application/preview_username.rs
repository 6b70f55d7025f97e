//! Preview Username Use Case
//!
//! Read-only: returns the login the generator would pick for a display name
//! right now. The override hook is not applied and nothing is reserved.
//! A name that yields no valid login (e.g. no Latin characters) is rejected
//! the same way bulk creation would reject it.

use std::sync::Arc;

use crate::domain::repository::LoginExistence;
use crate::domain::services::generate_username;
use crate::domain::value_object::login::Login;
use crate::error::{ProvisioningError, ProvisioningResult};

pub struct PreviewUsernameUseCase<U>
where
    U: LoginExistence,
{
    oracle: Arc<U>,
}

impl<U> PreviewUsernameUseCase<U>
where
    U: LoginExistence + Send + Sync,
{
    pub fn new(oracle: Arc<U>) -> Self {
        Self { oracle }
    }

    pub async fn execute(&self, display_name: &str) -> ProvisioningResult<String> {
        if display_name.trim().is_empty() {
            return Err(ProvisioningError::EmptyDisplayName);
        }

        let username = generate_username(display_name, self.oracle.as_ref()).await?;

        Ok(Login::new(username)?.into_inner())
    }
}
