//! Document identifiers.
//!
//! Identifiers are 24-character hexadecimal strings. Every comparison in the
//! crate goes through [`ObjectId`], whose constructor is the only place raw
//! identifier text is canonicalized.

use serde::{Deserialize, Serialize};
use shoplist_storage::time_utils;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

/// Length of an identifier in hexadecimal characters.
pub const OBJECT_ID_LEN: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a 24-character hexadecimal identifier")]
pub struct InvalidObjectId(pub String);

/// Canonical (lowercase) document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generate a fresh identifier: 4 bytes of epoch seconds, 8 random bytes.
    pub fn new() -> Self {
        let mut bytes = [0u8; 12];
        let secs = time_utils::now_secs() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..].copy_from_slice(&Uuid::new_v4().as_bytes()[..8]);
        Self(hex::encode(bytes))
    }

    /// Parse and canonicalize raw identifier text.
    pub fn parse(raw: &str) -> Option<Self> {
        if Self::is_valid(raw) {
            Some(Self(raw.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Whether `raw` has the identifier format (either hex case accepted).
    pub fn is_valid(raw: &str) -> bool {
        raw.len() == OBJECT_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidObjectId(s.to_string()))
    }
}

impl TryFrom<String> for ObjectId {
    type Error = InvalidObjectId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
