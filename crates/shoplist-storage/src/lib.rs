//! Shoplist Storage - Low-level document storage layer
//!
//! This crate provides the persistence layer for Shoplist, using redb as the
//! embedded database. It exposes byte-level APIs; the typed documents live
//! in shoplist-core.
//!
//! # Tables
//!
//! - `shopping_lists` - Shopping list documents
//! - `shopping_items` - Shopping item documents
//! - `users` - Registered users

pub mod shopping_item;
pub mod shopping_list;
pub mod simple_storage;
pub mod time_utils;
pub mod user;

use anyhow::Result;
use redb::Database;
use std::sync::Arc;

pub use shopping_item::ShoppingItemStorage;
pub use shopping_list::ShoppingListStorage;
pub use simple_storage::{SimpleStorage, delete_with_children};
pub use user::UserStorage;

/// Open (or create) the database file and make sure every table exists.
pub fn open_database(path: &str) -> Result<Arc<Database>> {
    let db = Arc::new(Database::create(path)?);
    ShoppingListStorage::new(db.clone())?;
    ShoppingItemStorage::new(db.clone())?;
    UserStorage::new(db.clone())?;
    tracing::debug!(path, "Database opened");
    Ok(db)
}
