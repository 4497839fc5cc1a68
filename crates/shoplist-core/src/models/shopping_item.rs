use super::ObjectId;
use serde::{Deserialize, Serialize};
use shoplist_storage::time_utils;
use ts_rs::TS;

/// An entry on a shopping list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShoppingItem {
    pub id: ObjectId,
    pub list_id: ObjectId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub is_done: bool,
    #[ts(type = "number")]
    pub created_at: i64,
    #[ts(type = "number")]
    pub updated_at: i64,
}

impl ShoppingItem {
    pub fn new(list_id: ObjectId, name: String, quantity: Option<String>) -> Self {
        let now = time_utils::now_ms();
        Self {
            id: ObjectId::new(),
            list_id,
            name,
            quantity,
            is_done: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = time_utils::now_ms();
    }
}

/// Fields accepted when creating an item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    #[ts(optional)]
    pub quantity: Option<String>,
}

/// Partial update of item fields.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemPatch {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub quantity: Option<String>,
    #[ts(optional)]
    pub is_done: Option<bool>,
}

impl ItemPatch {
    pub fn done(is_done: bool) -> Self {
        Self {
            is_done: Some(is_done),
            ..Default::default()
        }
    }

    pub fn apply_to(self, item: &mut ShoppingItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = normalize_quantity(Some(quantity));
        }
        if let Some(is_done) = self.is_done {
            item.is_done = is_done;
        }
    }
}

/// Blank quantities are stored as absent.
pub fn normalize_quantity(quantity: Option<String>) -> Option<String> {
    quantity
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
}
