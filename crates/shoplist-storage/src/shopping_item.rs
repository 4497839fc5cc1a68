//! Shopping item collection - byte-level API for item documents.

use crate::define_simple_storage;

define_simple_storage! {
    /// Low-level shopping item storage with byte-level API
    pub struct ShoppingItemStorage { table: "shopping_items" }
}
