//! Storage layer with typed wrappers around shoplist-storage.
//!
//! Wraps the byte-level collections with the model types and exposes the
//! document operations the services use: find-by-id, find-many, insert,
//! update-fields, add/remove from the members set and delete.

pub mod shopping_item;
pub mod shopping_list;
pub mod user;

use crate::models::{ObjectId, ShoppingItem};
use anyhow::Result;
use redb::Database;
use shoplist_storage::SimpleStorage;
use std::sync::Arc;

pub use shopping_item::ShoppingItemStorage;
pub use shopping_list::ShoppingListStorage;
pub use user::UserStorage;

/// Central storage manager that initializes all collections.
pub struct Storage {
    db: Arc<Database>,
    pub shopping_lists: ShoppingListStorage,
    pub shopping_items: ShoppingItemStorage,
    pub users: UserStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    pub fn new(path: &str) -> Result<Self> {
        let db = shoplist_storage::open_database(path)?;

        let shopping_lists = ShoppingListStorage::new(db.clone())?;
        let shopping_items = ShoppingItemStorage::new(db.clone())?;
        let users = UserStorage::new(db.clone())?;

        Ok(Self {
            db,
            shopping_lists,
            shopping_items,
            users,
        })
    }

    /// Delete a list and all of its items in one transaction.
    ///
    /// Returns the number of items removed, or `None` if the list does not
    /// exist.
    pub fn delete_list_with_items(&self, list_id: &ObjectId) -> Result<Option<usize>> {
        shoplist_storage::delete_with_children(
            &self.db,
            <shoplist_storage::ShoppingListStorage as SimpleStorage>::TABLE,
            list_id.as_str(),
            <shoplist_storage::ShoppingItemStorage as SimpleStorage>::TABLE,
            |bytes| {
                let item: ShoppingItem = serde_json::from_slice(bytes)?;
                Ok(&item.list_id == list_id)
            },
        )
    }
}
