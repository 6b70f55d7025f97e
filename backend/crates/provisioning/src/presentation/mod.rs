//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ProvisioningAppState;
pub use router::{provisioning_router, provisioning_router_generic};
