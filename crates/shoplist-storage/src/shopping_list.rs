//! Shopping list collection - byte-level API for list documents.

use crate::define_simple_storage;

define_simple_storage! {
    /// Low-level shopping list storage with byte-level API
    pub struct ShoppingListStorage { table: "shopping_lists" }
}
