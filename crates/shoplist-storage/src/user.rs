//! User collection - byte-level API for user documents.

use crate::define_simple_storage;

define_simple_storage! {
    /// Low-level user storage with byte-level API
    pub struct UserStorage { table: "users" }
}
