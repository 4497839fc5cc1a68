//! Shopping list service layer

use super::{Payload, argument_id, existing_id};
use crate::{
    AppCore,
    auth::{Principal, RoleGate, policy},
    error::{Resource, Result, ShopError},
    models::{DeleteAck, ListPatch, ObjectId, ShoppingList, validation::validate_title},
};
use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info};

/// Load a list by its raw path id.
pub(crate) fn load_list(core: &AppCore, list_id: &str) -> Result<ShoppingList> {
    let id = existing_id(Resource::ShoppingList, list_id)?;
    core.storage
        .shopping_lists
        .get(&id)
        .with_context(|| format!("Failed to load shopping list {}", id))?
        .ok_or_else(|| ShopError::not_found(Resource::ShoppingList, list_id))
}

/// A concurrent delete between load and write surfaces as `NotFound`.
fn written(list: Option<ShoppingList>, id: &ObjectId) -> Result<ShoppingList> {
    list.ok_or_else(|| ShopError::not_found(Resource::ShoppingList, id.as_str()))
}

/// Active lists the caller owns or is a member of.
pub async fn list_for_user(core: &Arc<AppCore>, principal: &Principal) -> Result<Vec<ShoppingList>> {
    let user_id = &principal.user_id;
    let lists = core
        .storage
        .shopping_lists
        .find(|list| !list.is_archived && list.is_participant(user_id))
        .context("Failed to list shopping lists")?;
    Ok(lists)
}

pub async fn get_list(core: &Arc<AppCore>, list_id: &str) -> Result<ShoppingList> {
    load_list(core, list_id)
}

/// Create a list owned by the caller.
pub async fn create_list(
    core: &Arc<AppCore>,
    principal: &Principal,
    name: &str,
) -> Result<ShoppingList> {
    let name = validate_title("name", name)?;
    let list = ShoppingList::new(name, principal.user_id.clone());
    core.storage
        .shopping_lists
        .insert(&list)
        .with_context(|| format!("Failed to create shopping list {}", list.name))?;
    info!(list_id = %list.id, owner = %list.owner_id, "Shopping list created");
    Ok(list)
}

pub async fn rename_list(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    name: Payload<String>,
) -> Result<ShoppingList> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;
    policy::can_rename(&list, principal)?;
    let name = validate_title("name", &name?)?;

    let updated = core
        .storage
        .shopping_lists
        .update_fields(&list.id, ListPatch::rename(name))
        .with_context(|| format!("Failed to rename shopping list {}", list.id))?;
    debug!(list_id = %list.id, "Shopping list renamed");
    written(updated, &list.id)
}

pub async fn archive_list(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
) -> Result<ShoppingList> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;
    policy::can_archive(&list, principal)?;

    let updated = core
        .storage
        .shopping_lists
        .update_fields(&list.id, ListPatch::archive())
        .with_context(|| format!("Failed to archive shopping list {}", list.id))?;
    debug!(list_id = %list.id, "Shopping list archived");
    written(updated, &list.id)
}

/// Delete a list together with its items.
pub async fn delete_list(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
) -> Result<DeleteAck> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;
    policy::can_delete(&list, principal)?;

    let removed_items = core
        .storage
        .delete_list_with_items(&list.id)
        .with_context(|| format!("Failed to delete shopping list {}", list.id))?
        .ok_or_else(|| ShopError::not_found(Resource::ShoppingList, list_id))?;
    info!(list_id = %list.id, removed_items, "Shopping list deleted");

    Ok(DeleteAck::new(&list.id))
}

pub async fn add_member(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    member_id: &str,
) -> Result<ShoppingList> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;
    let candidate = argument_id(member_id)?;
    policy::can_add_member(&list, principal, &candidate)?;

    let updated = core
        .storage
        .shopping_lists
        .add_member(&list.id, &candidate)
        .with_context(|| format!("Failed to add member to shopping list {}", list.id))?;
    debug!(list_id = %list.id, member = %candidate, "Member added");
    written(updated, &list.id)
}

/// Removing someone who is not a member returns the list unchanged.
pub async fn remove_member(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
    member_id: &str,
) -> Result<ShoppingList> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;
    let target = argument_id(member_id)?;
    policy::can_remove_member(&list, principal, &target)?;

    if !list.has_member(&target) {
        return Ok(list);
    }

    let updated = core
        .storage
        .shopping_lists
        .remove_member(&list.id, &target)
        .with_context(|| format!("Failed to remove member from shopping list {}", list.id))?;
    debug!(list_id = %list.id, member = %target, "Member removed");
    written(updated, &list.id)
}

pub async fn leave_list(
    core: &Arc<AppCore>,
    principal: &Principal,
    gate: RoleGate,
    list_id: &str,
) -> Result<ShoppingList> {
    let list = load_list(core, list_id)?;
    gate.check(principal)?;
    policy::can_leave(&list, principal)?;

    let updated = core
        .storage
        .shopping_lists
        .remove_member(&list.id, &principal.user_id)
        .with_context(|| format!("Failed to leave shopping list {}", list.id))?;
    debug!(list_id = %list.id, member = %principal.user_id, "Member left");
    written(updated, &list.id)
}
