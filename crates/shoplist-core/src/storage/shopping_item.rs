//! Typed shopping item storage.

use crate::models::{ItemPatch, ObjectId, ShoppingItem};
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

/// Typed wrapper around shoplist-storage::ShoppingItemStorage.
#[derive(Clone)]
pub struct ShoppingItemStorage {
    inner: shoplist_storage::ShoppingItemStorage,
}

impl ShoppingItemStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: shoplist_storage::ShoppingItemStorage::new(db)?,
        })
    }

    pub fn insert(&self, item: &ShoppingItem) -> Result<()> {
        let json_bytes = serde_json::to_vec(item)?;
        self.inner.put_raw(item.id.as_str(), &json_bytes)
    }

    pub fn get(&self, id: &ObjectId) -> Result<Option<ShoppingItem>> {
        match self.inner.get_raw(id.as_str())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn find_by_list(&self, list_id: &ObjectId) -> Result<Vec<ShoppingItem>> {
        let mut result = Vec::new();
        for (_, bytes) in self.inner.list_raw()? {
            let item: ShoppingItem = serde_json::from_slice(&bytes)?;
            if &item.list_id == list_id {
                result.push(item);
            }
        }
        Ok(result)
    }

    /// Set the given fields. Returns `None` if the item does not exist.
    pub fn update_fields(&self, id: &ObjectId, patch: ItemPatch) -> Result<Option<ShoppingItem>> {
        let updated = self.inner.update_raw(id.as_str(), |bytes| {
            let mut item: ShoppingItem = serde_json::from_slice(bytes)?;
            patch.apply_to(&mut item);
            item.touch();
            Ok(serde_json::to_vec(&item)?)
        })?;

        match updated {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn delete(&self, id: &ObjectId) -> Result<bool> {
        self.inner.delete(id.as_str())
    }
}
