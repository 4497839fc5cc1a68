//! Access control for shopping lists.
//!
//! Applied in order on every request:
//! - [`resolve_identity`] builds the request's [`Principal`] from headers.
//! - [`RoleGate`] filters on the caller-declared role, per route.
//! - [`policy`] decides against the loaded list and is authoritative.

pub mod gate;
pub mod policy;
pub mod principal;

pub use gate::{ITEM_READ, ITEM_WRITE, LIST_ADMIN, LIST_LEAVE, RoleGate};
pub use policy::{Decision, Denial};
pub use principal::{
    IdentityError, Principal, Role, USER_ID_HEADER, USER_PROFILE_HEADER, resolve_identity,
};

use crate::error::ShopError;

impl From<IdentityError> for ShopError {
    fn from(err: IdentityError) -> Self {
        ShopError::Unauthenticated(err.to_string())
    }
}

impl From<Denial> for ShopError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::OwnerAlreadyInList => {
                ShopError::invalid_input(denial.code(), denial.to_string())
            }
            other => ShopError::Forbidden(other),
        }
    }
}
