//! User service layer

use super::existing_id;
use crate::{
    AppCore,
    error::{Resource, Result, ShopError},
    models::{User, validation::validate_and_format_user_name},
};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// Register a user. Names are formatted first, then checked for uniqueness.
pub async fn create_user(core: &Arc<AppCore>, name: &str) -> Result<User> {
    let name = validate_and_format_user_name(name)?;

    let existing = core
        .storage
        .users
        .find_by_name(&name)
        .with_context(|| format!("Failed to look up user {}", name))?;
    if existing.is_some() {
        return Err(ShopError::conflict("userExists", "Name already taken"));
    }

    let user = User::new(name);
    core.storage
        .users
        .insert(&user)
        .with_context(|| format!("Failed to create user {}", user.name))?;
    info!(user_id = %user.id, "User created");
    Ok(user)
}

pub async fn list_users(core: &Arc<AppCore>) -> Result<Vec<User>> {
    Ok(core.storage.users.list().context("Failed to list users")?)
}

pub async fn delete_user(core: &Arc<AppCore>, user_id: &str) -> Result<()> {
    let id = existing_id(Resource::User, user_id)?;
    let deleted = core
        .storage
        .users
        .delete(&id)
        .with_context(|| format!("Failed to delete user {}", id))?;
    if !deleted {
        return Err(ShopError::not_found(Resource::User, user_id));
    }
    info!(user_id = %id, "User deleted");
    Ok(())
}
