//! Application Layer
//!
//! Use cases and application services.

pub mod bulk_create;
pub mod config;
pub mod preview_username;
pub mod sync_guard;
pub mod user_events;

// Re-exports
pub use bulk_create::{
    BulkCreateInput, BulkCreateOutput, BulkCreateUsersUseCase, CandidateOutcome, Outcome,
    SkipReason,
};
pub use config::ProvisioningConfig;
pub use preview_username::PreviewUsernameUseCase;
pub use sync_guard::{SyncGuard, SyncScope};
pub use user_events::{NoopUserEvents, ReverseSyncListener, ReverseSyncOutcome, UserEventListener};
