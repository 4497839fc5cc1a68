use super::ObjectId;
use serde::{Deserialize, Serialize};
use shoplist_storage::time_utils;
use ts_rs::TS;

/// A shopping list owned by one user and shared with members.
///
/// `members` behaves as an insertion-ordered set and never contains
/// `owner_id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoppingList {
    pub id: ObjectId,
    pub name: String,
    pub owner_id: ObjectId,
    #[serde(default)]
    pub members: Vec<ObjectId>,
    #[serde(default)]
    pub is_archived: bool,
    #[ts(type = "number")]
    pub created_at: i64,
    #[ts(type = "number")]
    pub updated_at: i64,
}

impl ShoppingList {
    pub fn new(name: String, owner_id: ObjectId) -> Self {
        let now = time_utils::now_ms();
        Self {
            id: ObjectId::new(),
            name,
            owner_id,
            members: Vec::new(),
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owner(&self, user_id: &ObjectId) -> bool {
        &self.owner_id == user_id
    }

    pub fn has_member(&self, user_id: &ObjectId) -> bool {
        self.members.contains(user_id)
    }

    /// Owner or member.
    pub fn is_participant(&self, user_id: &ObjectId) -> bool {
        self.is_owner(user_id) || self.has_member(user_id)
    }

    /// Set-insert a member. The owner is never inserted.
    pub fn insert_member(&mut self, user_id: ObjectId) -> bool {
        if self.is_participant(&user_id) {
            return false;
        }
        self.members.push(user_id);
        true
    }

    pub fn remove_member(&mut self, user_id: &ObjectId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != user_id);
        self.members.len() != before
    }

    pub fn touch(&mut self) {
        self.updated_at = time_utils::now_ms();
    }
}

/// Partial update of list fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ListPatch {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub is_archived: Option<bool>,
}

impl ListPatch {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn archive() -> Self {
        Self {
            is_archived: Some(true),
            ..Default::default()
        }
    }

    pub fn apply_to(self, list: &mut ShoppingList) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(is_archived) = self.is_archived {
            list.is_archived = is_archived;
        }
    }
}
