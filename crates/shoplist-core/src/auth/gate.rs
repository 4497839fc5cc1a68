//! Per-route role gate.
//!
//! The role is declared by the caller, so the gate is only a cheap filter in
//! front of the ownership policy, which stays authoritative.

use super::policy::{Decision, Denial};
use super::principal::{Principal, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleGate {
    allowed: &'static [Role],
}

/// Reading items: any role.
pub const ITEM_READ: RoleGate = RoleGate::new(&[Role::Owner, Role::Member, Role::Viewer]);
/// Creating, editing, deleting and resolving items.
pub const ITEM_WRITE: RoleGate = RoleGate::new(&[Role::Owner, Role::Member]);
/// Rename, archive, delete and membership management.
pub const LIST_ADMIN: RoleGate = RoleGate::new(&[Role::Owner]);
/// Leaving a list.
pub const LIST_LEAVE: RoleGate = RoleGate::new(&[Role::Member]);

impl RoleGate {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    pub fn check(&self, principal: &Principal) -> Decision {
        if self.allows(principal.role) {
            Ok(())
        } else {
            Err(Denial::InsufficientRole)
        }
    }
}
