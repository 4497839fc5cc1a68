//! Typed user storage.

use crate::models::{ObjectId, User};
use anyhow::Result;
use redb::Database;
use std::sync::Arc;

/// Typed wrapper around shoplist-storage::UserStorage.
#[derive(Clone)]
pub struct UserStorage {
    inner: shoplist_storage::UserStorage,
}

impl UserStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        Ok(Self {
            inner: shoplist_storage::UserStorage::new(db)?,
        })
    }

    pub fn insert(&self, user: &User) -> Result<()> {
        let json_bytes = serde_json::to_vec(user)?;
        self.inner.put_raw(user.id.as_str(), &json_bytes)
    }

    pub fn list(&self) -> Result<Vec<User>> {
        let mut result = Vec::new();
        for (_, bytes) in self.inner.list_raw()? {
            result.push(serde_json::from_slice(&bytes)?);
        }
        Ok(result)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        Ok(self.list()?.into_iter().find(|user| user.name == name))
    }

    pub fn delete(&self, id: &ObjectId) -> Result<bool> {
        self.inner.delete(id.as_str())
    }
}
