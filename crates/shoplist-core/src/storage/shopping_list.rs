//! Typed shopping list storage.

use crate::models::{ListPatch, ObjectId, ShoppingList};
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

/// Typed wrapper around shoplist-storage::ShoppingListStorage.
#[derive(Clone)]
pub struct ShoppingListStorage {
    inner: shoplist_storage::ShoppingListStorage,
}

impl ShoppingListStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: shoplist_storage::ShoppingListStorage::new(db)?,
        })
    }

    pub fn insert(&self, list: &ShoppingList) -> Result<()> {
        let json_bytes = serde_json::to_vec(list)?;
        self.inner.put_raw(list.id.as_str(), &json_bytes)
    }

    pub fn get(&self, id: &ObjectId) -> Result<Option<ShoppingList>> {
        match self.inner.get_raw(id.as_str())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Scan the collection and keep the lists matching `filter`.
    pub fn find<F>(&self, filter: F) -> Result<Vec<ShoppingList>>
    where
        F: Fn(&ShoppingList) -> bool,
    {
        let mut result = Vec::new();
        for (_, bytes) in self.inner.list_raw()? {
            let list: ShoppingList = serde_json::from_slice(&bytes)?;
            if filter(&list) {
                result.push(list);
            }
        }
        Ok(result)
    }

    /// Set the given fields. Returns `None` if the list does not exist.
    pub fn update_fields(&self, id: &ObjectId, patch: ListPatch) -> Result<Option<ShoppingList>> {
        self.modify(id, |list| patch.apply_to(list))
    }

    /// Add `member` to the members set unless present or the owner.
    pub fn add_member(&self, id: &ObjectId, member: &ObjectId) -> Result<Option<ShoppingList>> {
        self.modify(id, |list| {
            list.insert_member(member.clone());
        })
    }

    /// Remove `member` from the members set; absent members are a no-op.
    pub fn remove_member(&self, id: &ObjectId, member: &ObjectId) -> Result<Option<ShoppingList>> {
        self.modify(id, |list| {
            list.remove_member(member);
        })
    }

    pub fn delete(&self, id: &ObjectId) -> Result<bool> {
        self.inner.delete(id.as_str())
    }

    fn modify<F>(&self, id: &ObjectId, change: F) -> Result<Option<ShoppingList>>
    where
        F: FnOnce(&mut ShoppingList),
    {
        let updated = self.inner.update_raw(id.as_str(), |bytes| {
            let mut list: ShoppingList = serde_json::from_slice(bytes)?;
            change(&mut list);
            list.touch();
            Ok(serde_json::to_vec(&list)?)
        })?;

        match updated {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}
