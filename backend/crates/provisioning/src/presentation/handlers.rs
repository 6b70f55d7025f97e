//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::config::ProvisioningConfig;
use crate::application::{
    BulkCreateInput, BulkCreateUsersUseCase, PreviewUsernameUseCase, ReverseSyncListener,
    SyncGuard,
};
use crate::domain::repository::{
    ContactDirectory, ContactLinkRepository, LoginExistence, UserRepository,
};
use crate::domain::value_object::user_id::UserId;
use crate::error::{ProvisioningError, ProvisioningResult};
use crate::presentation::dto::{
    BulkCreateRequest, BulkCreateResponse, ContactSyncResponse, PreviewUsernameRequest,
    PreviewUsernameResponse,
};

/// Shared state for provisioning handlers
pub struct ProvisioningAppState<R>
where
    R: UserRepository
        + LoginExistence
        + ContactLinkRepository
        + ContactDirectory
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ProvisioningConfig>,
}

impl<R> Clone for ProvisioningAppState<R>
where
    R: UserRepository
        + LoginExistence
        + ContactLinkRepository
        + ContactDirectory
        + Send
        + Sync
        + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Bulk Create
// ============================================================================

/// POST /api/provisioning/users/bulk
pub async fn bulk_create_users<R>(
    State(state): State<ProvisioningAppState<R>>,
    Json(req): Json<BulkCreateRequest>,
) -> ProvisioningResult<Json<BulkCreateResponse>>
where
    R: UserRepository
        + LoginExistence
        + ContactLinkRepository
        + ContactDirectory
        + Send
        + Sync
        + 'static,
{
    let listener = Arc::new(ReverseSyncListener::new(
        state.repo.clone(),
        state.repo.clone(),
    ));
    let use_case = BulkCreateUsersUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        listener,
        state.config.clone(),
    );

    let input = BulkCreateInput {
        candidates: req.contacts.into_iter().map(Into::into).collect(),
    };

    let output = use_case.execute(input).await;

    Ok(Json(BulkCreateResponse {
        succeeded: output.succeeded,
        failed: output.failed,
        outcomes: output.outcomes.into_iter().map(Into::into).collect(),
    }))
}

// ============================================================================
// Username Preview
// ============================================================================

/// POST /api/provisioning/username/preview
pub async fn preview_username<R>(
    State(state): State<ProvisioningAppState<R>>,
    Json(req): Json<PreviewUsernameRequest>,
) -> ProvisioningResult<Json<PreviewUsernameResponse>>
where
    R: UserRepository
        + LoginExistence
        + ContactLinkRepository
        + ContactDirectory
        + Send
        + Sync
        + 'static,
{
    let use_case = PreviewUsernameUseCase::new(state.repo.clone());

    let username = use_case.execute(&req.display_name).await?;

    Ok(Json(PreviewUsernameResponse { username }))
}

// ============================================================================
// Contact Sync
// ============================================================================

/// POST /api/provisioning/users/{user_id}/contact-sync
///
/// Runs reverse sync for an account registered outside provisioning.
pub async fn sync_user_contact<R>(
    State(state): State<ProvisioningAppState<R>>,
    Path(user_id): Path<Uuid>,
) -> ProvisioningResult<Json<ContactSyncResponse>>
where
    R: UserRepository
        + LoginExistence
        + ContactLinkRepository
        + ContactDirectory
        + Send
        + Sync
        + 'static,
{
    let user = state
        .repo
        .find_user_by_id(&UserId::from_uuid(user_id))
        .await?
        .ok_or(ProvisioningError::UserNotFound)?;

    let listener = ReverseSyncListener::new(state.repo.clone(), state.repo.clone());
    let outcome = listener.sync_user(&user, &SyncGuard::new()).await?;

    Ok(Json(ContactSyncResponse {
        outcome: outcome.as_str(),
        contact_id: outcome.contact_id().map(|id| id.value()),
    }))
}
