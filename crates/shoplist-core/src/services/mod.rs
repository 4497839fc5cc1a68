//! Resource mutators.
//!
//! Every operation loads its target first (absent → `NotFound`), then runs
//! the route's role gate, then the ownership policy, and only then writes.

pub mod shopping_item;
pub mod shopping_list;
pub mod user;

use crate::error::{Resource, Result, ShopError};
use crate::models::ObjectId;

/// A request body as decoded by the transport. A decoding failure surfaces
/// only once the target has been loaded and the caller authorized.
pub type Payload<T> = Result<T>;

/// Parse a path identifier; a malformed one cannot name an existing document.
pub(crate) fn existing_id(resource: Resource, raw: &str) -> Result<ObjectId> {
    ObjectId::parse(raw).ok_or_else(|| ShopError::not_found(resource, raw))
}

/// Parse an identifier supplied as an argument rather than a lookup key.
pub(crate) fn argument_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse(raw)
        .ok_or_else(|| ShopError::invalid_input("invalidId", format!("invalid id '{raw}'")))
}
