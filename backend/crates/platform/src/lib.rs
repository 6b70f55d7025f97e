//! Platform Crate - Host Platform Rules
//!
//! The text and credential primitives account provisioning depends on but
//! does not define:
//! - Login sanitization and validity (`login`)
//! - Slug normalization (`slug`)
//! - Email address validity (`email`)
//! - Random password generation and Argon2id hashing (`password`)
//!
//! Everything here is synchronous and free of I/O.

pub mod email;
pub mod login;
pub mod password;
pub mod slug;
mod text;
