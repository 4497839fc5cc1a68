//! Ownership policy: per-list permission decisions.
//!
//! Every predicate is pure and takes an already loaded list. Callers check
//! existence first and turn a [`Denial`] into an error.

use super::principal::Principal;
use crate::models::{ObjectId, ShoppingList};
use thiserror::Error;

/// Outcome of a permission check.
pub type Decision = Result<(), Denial>;

/// Why an action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("insufficient permissions")]
    InsufficientRole,

    #[error("only the list owner can do this")]
    NotListOwner,

    #[error("owner is already part of the list")]
    OwnerAlreadyInList,

    #[error("owner cannot leave own list")]
    OwnerCannotLeave,

    #[error("not a member of the list")]
    NotAMember,

    #[error("not the owner or a member of the list")]
    NotListParticipant,
}

impl Denial {
    /// Stable machine-readable reason.
    pub fn code(self) -> &'static str {
        match self {
            Denial::InsufficientRole => "insufficientRole",
            Denial::NotListOwner => "notListOwner",
            Denial::OwnerAlreadyInList => "ownerAlreadyInList",
            Denial::OwnerCannotLeave => "ownerCannotLeave",
            Denial::NotAMember => "notAMember",
            Denial::NotListParticipant => "notListParticipant",
        }
    }
}

fn require_owner(list: &ShoppingList, principal: &Principal) -> Decision {
    if list.is_owner(&principal.user_id) {
        Ok(())
    } else {
        Err(Denial::NotListOwner)
    }
}

pub fn can_rename(list: &ShoppingList, principal: &Principal) -> Decision {
    require_owner(list, principal)
}

pub fn can_archive(list: &ShoppingList, principal: &Principal) -> Decision {
    require_owner(list, principal)
}

pub fn can_delete(list: &ShoppingList, principal: &Principal) -> Decision {
    require_owner(list, principal)
}

/// Owner only, and the owner is never added to `members`.
pub fn can_add_member(list: &ShoppingList, principal: &Principal, candidate: &ObjectId) -> Decision {
    require_owner(list, principal)?;
    if list.is_owner(candidate) {
        return Err(Denial::OwnerAlreadyInList);
    }
    Ok(())
}

pub fn can_remove_member(list: &ShoppingList, principal: &Principal, _target: &ObjectId) -> Decision {
    require_owner(list, principal)
}

pub fn can_leave(list: &ShoppingList, principal: &Principal) -> Decision {
    if list.is_owner(&principal.user_id) {
        return Err(Denial::OwnerCannotLeave);
    }
    if !list.has_member(&principal.user_id) {
        return Err(Denial::NotAMember);
    }
    Ok(())
}

/// Item mutation is limited to the people the list is shared with.
pub fn can_edit_items(list: &ShoppingList, principal: &Principal) -> Decision {
    if list.is_participant(&principal.user_id) {
        Ok(())
    } else {
        Err(Denial::NotListParticipant)
    }
}
