use super::ObjectId;
use serde::{Deserialize, Serialize};
use shoplist_storage::time_utils;
use ts_rs::TS;

/// A registered user. Names are unique.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: ObjectId,
    pub name: String,
    #[ts(type = "number")]
    pub created_at: i64,
}

impl User {
    pub fn new(name: String) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            created_at: time_utils::now_ms(),
        }
    }
}
