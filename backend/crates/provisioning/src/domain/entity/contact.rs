//! Contact to be created in the directory by reverse sync.

use crate::domain::value_object::email::Email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub display_name: String,
    pub email: Email,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
