//! Shopping item service layer
//!
//! Items are always addressed through their parent list; an item that
//! belongs to a different list is reported as missing.

use super::{Payload, existing_id, shopping_list::load_list};
use crate::{
    AppCore,
    auth::{Principal, RoleGate, policy},
    error::{Resource, Result, ShopError},
    models::{
        DeleteAck, ItemPatch, NewItem, ShoppingItem, ShoppingList,
        shopping_item::normalize_quantity, validation::validate_title,
    },
};
use anyhow::Context;
use std::sync::Arc;
use tracing::debug;

fn load_item(core: &AppCore, list: &ShoppingList, item_id: &str) -> Result<ShoppingItem> {
    let id = existing_id(Resource::ShoppingItem, item_id)?;
    core.storage
        .shopping_items
        .get(&id)
        .with_context(|| format!("Failed to load shopping item {}", id))?
        .filter(|item| item.list_id == list.id)
        .ok_or_else(|| ShopError::not_found(Resource::ShoppingItem, item_id))
}

pub async fn list_items(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
) -> Result<Vec<ShoppingItem>> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;

    let items = core
        .storage
        .shopping_items
        .find_by_list(&list.id)
        .with_context(|| format!("Failed to list items of shopping list {}", list.id))?;
    Ok(items)
}

pub async fn create_item(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    new_item: Payload<NewItem>,
) -> Result<ShoppingItem> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;
    policy::can_edit_items(&list, principal)?;
    let new_item = new_item?;
    let name = validate_title("name", &new_item.name)?;

    let item = ShoppingItem::new(list.id.clone(), name, normalize_quantity(new_item.quantity));
    core.storage
        .shopping_items
        .insert(&item)
        .with_context(|| format!("Failed to create item in shopping list {}", list.id))?;
    debug!(list_id = %list.id, item_id = %item.id, "Item created");
    Ok(item)
}

pub async fn update_item(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    item_id: &str,
    patch: Payload<ItemPatch>,
) -> Result<ShoppingItem> {
    let list = load_list(core, list_id)?;
    let item = load_item(core, &list, item_id)?;
    gate.check(principal)?;
    policy::can_edit_items(&list, principal)?;
    let mut patch = patch?;
    if let Some(name) = patch.name.as_deref() {
        patch.name = Some(validate_title("name", name)?);
    }

    let updated = core
        .storage
        .shopping_items
        .update_fields(&item.id, patch)
        .with_context(|| format!("Failed to update shopping item {}", item.id))?;
    debug!(list_id = %list.id, item_id = %item.id, "Item updated");
    updated.ok_or_else(|| ShopError::not_found(Resource::ShoppingItem, item_id))
}

pub async fn delete_item(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    item_id: &str,
) -> Result<DeleteAck> {
    let list = load_list(core, list_id)?;
    let item = load_item(core, &list, item_id)?;
    gate.check(principal)?;
    policy::can_edit_items(&list, principal)?;

    let deleted = core
        .storage
        .shopping_items
        .delete(&item.id)
        .with_context(|| format!("Failed to delete shopping item {}", item.id))?;
    if !deleted {
        return Err(ShopError::not_found(Resource::ShoppingItem, item_id));
    }
    debug!(list_id = %list.id, item_id = %item.id, "Item deleted");
    Ok(DeleteAck::new(&item.id))
}

pub async fn resolve_item(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    item_id: &str,
) -> Result<ShoppingItem> {
    update_item(core, principal, gate, list_id, item_id, Ok(ItemPatch::done(true))).await
}

pub async fn unresolve_item(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    item_id: &str,
) -> Result<ShoppingItem> {
    update_item(core, principal, gate, list_id, item_id, Ok(ItemPatch::done(false))).await
}
