//! Class, weapon, role, and pass identity types.
//!
//! A class is addressed two ways: by its label (the key it is filed under in
//! the taxonomy document) and by its internal id (the `ID` field inside the
//! entry). The two are separate types so one can never stand in for the other.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
            JsonSchema,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                $name(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name(value)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id! {
    /// Key a class is filed under in the taxonomy (`"Tank"`, `"Heal"`).
    ClassLabel
}

string_id! {
    /// Internal class id from the entry's `ID` field (`"tank"`).
    ClassId
}

string_id! {
    /// Internal weapon id, unique within its class (`"hammer"`).
    WeaponId
}

string_id! {
    /// Remote role identifier (a platform snowflake, kept opaque).
    RoleId
}

/// Pass ID for tracking reconciliation runs.
///
/// Format: `pass-<date>-<time>-<random>`
/// Example: `pass-20260115-143022-abc123`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassId(pub String);

impl PassId {
    /// Generate a new pass ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let random: String = uuid::Uuid::new_v4()
            .to_string()
            .chars()
            .take(6)
            .collect();
        PassId(format!("pass-{}-{}", now.format("%Y%m%d-%H%M%S"), random))
    }
}

impl Default for PassId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
