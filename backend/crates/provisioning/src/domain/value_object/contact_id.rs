//! Contact ID Value Object
//!
//! Identifier assigned by the external contact directory. Opaque to us;
//! only equality and display matter.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i64);

impl ContactId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }
}
