//! Identity resolution from request headers.

use crate::models::ObjectId;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

/// Header carrying the caller's user identifier.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's self-declared role.
pub const USER_PROFILE_HEADER: &str = "x-user-profile";

/// Coarse, caller-declared role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    Owner,
    Member,
    Viewer,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Member => "member",
            Role::Viewer => "viewer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner" => Some(Role::Owner),
            "member" => Some(Role::Member),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }

    /// Absent or unknown values fall back to `Member`; they are never rejected.
    pub fn from_header(value: Option<&str>) -> Self {
        value.and_then(Role::parse).unwrap_or(Role::Member)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved caller of one request. Never cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: ObjectId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: ObjectId, role: Role) -> Self {
        Self { user_id, role }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("missing user identifier")]
    MissingUserId,

    #[error("user identifier is not valid text")]
    UnreadableUserId,

    #[error("malformed user identifier '{0}'")]
    MalformedUserId(String),
}

/// Build the principal for a request from its headers.
pub fn resolve_identity(headers: &HeaderMap) -> Result<Principal, IdentityError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .ok_or(IdentityError::MissingUserId)?
        .to_str()
        .map_err(|_| IdentityError::UnreadableUserId)?;

    if raw.is_empty() {
        return Err(IdentityError::MissingUserId);
    }

    let user_id =
        ObjectId::parse(raw).ok_or_else(|| IdentityError::MalformedUserId(raw.to_string()))?;

    let role = Role::from_header(
        headers
            .get(USER_PROFILE_HEADER)
            .and_then(|value| value.to_str().ok()),
    );

    Ok(Principal { user_id, role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    const USER: &str = "507f1f77bcf86cd799439011";

    fn headers(user: Option<&str>, profile: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(user) = user {
            map.insert(USER_ID_HEADER, HeaderValue::from_str(user).unwrap());
        }
        if let Some(profile) = profile {
            map.insert(USER_PROFILE_HEADER, HeaderValue::from_str(profile).unwrap());
        }
        map
    }

    #[test]
    fn test_resolves_user_and_role() {
        let principal = resolve_identity(&headers(Some(USER), Some("viewer"))).unwrap();
        assert_eq!(principal.user_id.as_str(), USER);
        assert_eq!(principal.role, Role::Viewer);
    }

    #[test]
    fn test_role_defaults_to_member() {
        let principal = resolve_identity(&headers(Some(USER), None)).unwrap();
        assert_eq!(principal.role, Role::Member);

        let principal = resolve_identity(&headers(Some(USER), Some("admin"))).unwrap();
        assert_eq!(principal.role, Role::Member);

        let principal = resolve_identity(&headers(Some(USER), Some("Owner"))).unwrap();
        assert_eq!(principal.role, Role::Member);
    }

    #[test]
    fn test_missing_user_is_rejected() {
        assert_eq!(
            resolve_identity(&headers(None, Some("owner"))),
            Err(IdentityError::MissingUserId)
        );
        assert_eq!(
            resolve_identity(&headers(Some(""), None)),
            Err(IdentityError::MissingUserId)
        );
    }

    #[test]
    fn test_malformed_user_is_rejected() {
        assert_eq!(
            resolve_identity(&headers(Some("ghost"), None)),
            Err(IdentityError::MalformedUserId("ghost".to_string()))
        );
    }

    #[test]
    fn test_non_text_user_is_rejected() {
        let mut map = HeaderMap::new();
        map.insert(USER_ID_HEADER, HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());
        assert_eq!(resolve_identity(&map), Err(IdentityError::UnreadableUserId));
    }

    #[test]
    fn test_user_id_is_canonicalized() {
        let principal =
            resolve_identity(&headers(Some("507F1F77BCF86CD799439011"), None)).unwrap();
        assert_eq!(principal.user_id.as_str(), USER);
    }
}
