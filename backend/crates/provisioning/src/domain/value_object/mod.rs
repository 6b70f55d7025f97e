//! Value Object Module

pub mod contact_id;
pub mod email;
pub mod login;
pub mod user_id;

pub use contact_id::ContactId;
pub use email::{Email, EmailError};
pub use login::{Login, LoginError};
pub use user_id::UserId;
