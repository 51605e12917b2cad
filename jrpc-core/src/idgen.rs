//! Random request ids
//!
//! Ids are UUID version 4 strings drawn from the operating system's secure
//! random source (via the `uuid` crate).

use crate::types::Id;
use uuid::Uuid;

/// Generate a random UUID v4 string, e.g. `"a0d1b6c2-3f7e-4f4b-9c55-0e2f1d7e8b11"`
pub fn rand_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a random string [`Id`]
pub fn rand_request_id() -> Id {
    Id::String(rand_id())
}
