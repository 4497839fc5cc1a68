pub mod id;
pub mod shopping_item;
pub mod shopping_list;
pub mod user;
pub mod validation;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use id::{InvalidObjectId, OBJECT_ID_LEN, ObjectId};
pub use shopping_item::{ItemPatch, NewItem, ShoppingItem};
pub use shopping_list::{ListPatch, ShoppingList};
pub use user::User;

/// Acknowledgement returned by delete operations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeleteAck {
    pub deleted_id: String,
}

impl DeleteAck {
    pub fn new(id: impl ToString) -> Self {
        Self {
            deleted_id: id.to_string(),
        }
    }
}
