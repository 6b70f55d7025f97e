//! Entity Module

pub mod candidate;
pub mod contact;
pub mod contact_link;
pub mod user;

pub use candidate::CandidateContact;
pub use contact::NewContact;
pub use contact_link::ContactLink;
pub use user::{User, UserCredentials};
