//! Domain Layer
//!
//! Entities, value objects, repository traits and the username generator.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{CandidateContact, ContactLink, NewContact, User, UserCredentials};
pub use repository::{ContactDirectory, ContactLinkRepository, LoginExistence, UserRepository};
