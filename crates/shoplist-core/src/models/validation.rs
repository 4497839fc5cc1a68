//! Input validation for names carried in request bodies.

use crate::error::{Result, ShopError};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of list and item names.
pub const MAX_TITLE_LEN: usize = 100;

/// Maximum length of user names.
pub const MAX_USER_NAME_LEN: usize = 20;

static USER_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("valid user name pattern"));

/// Trim a list or item name and check it is usable.
pub fn validate_title(field: &str, input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ShopError::invalid_input(
            "emptyName",
            format!("{field} is required"),
        ));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(ShopError::invalid_input(
            "nameTooLong",
            format!("{field} must be at most {MAX_TITLE_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a user name and format it as "Julie vitkova".
pub fn validate_and_format_user_name(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ShopError::invalid_input("emptyName", "name is required"));
    }
    if trimmed.chars().count() > MAX_USER_NAME_LEN {
        return Err(ShopError::invalid_input(
            "nameTooLong",
            format!("name must be at most {MAX_USER_NAME_LEN} characters"),
        ));
    }
    if !USER_NAME_PATTERN.is_match(trimmed) {
        return Err(ShopError::invalid_input(
            "invalidCharacters",
            "name may contain only letters and spaces",
        ));
    }

    let lower = trimmed.to_lowercase();
    let mut chars = lower.chars();
    Ok(match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    })
}
