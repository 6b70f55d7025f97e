//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - Unified error type and result alias ([`error::app_error::AppError`])
//! - Error classification mapped to HTTP status codes ([`error::kind::ErrorKind`])
//! - Typed UUID identifiers ([`id::Id`])
//!
//! Only things whose meaning is identical across provisioning, platform and
//! the API binary belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
