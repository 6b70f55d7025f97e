//! Provisioning Backend Module
//!
//! Creates login accounts for people held in an external contact directory.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, username generation
//! - `application/` - Use cases (bulk creation, username preview, reverse sync)
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Collision-free login derivation from a display name
//! - Bulk account creation that never aborts on a single bad record
//! - Cross-reference links between accounts and their contacts
//! - Reverse sync (account -> contact) suppressed while provisioning writes

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ProvisioningConfig;
pub use error::{ProvisioningError, ProvisioningResult};
pub use infra::memory::InMemoryDirectory;
pub use infra::postgres::PgProvisioningRepository;
pub use presentation::router::provisioning_router;

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
