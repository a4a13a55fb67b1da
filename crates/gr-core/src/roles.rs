//! Remote role index and the caller's rank ceiling.
//!
//! The index is rebuilt from a role snapshot at the start of every pass and
//! dropped afterwards; nothing here outlives one reconciliation.

use std::collections::HashMap;
use std::fmt;

use gr_common::RoleId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// A role as it exists on the remote guild at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRole {
    pub id: RoleId,

    #[serde(default)]
    pub name: String,

    /// Position in the guild hierarchy; higher outranks lower.
    #[serde(alias = "position")]
    pub rank: i64,

    /// Controlled by the platform or an integration; never hand-assignable.
    #[serde(default, alias = "is_managed")]
    pub managed: bool,
}

impl RemoteRole {
    pub fn new(id: impl Into<RoleId>, name: impl Into<String>, rank: i64, managed: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rank,
            managed,
        }
    }
}

/// Highest rank among the roles the caller holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankCeiling(pub i64);

impl fmt::Display for RankCeiling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CeilingError {
    #[error("caller holds no role known to the guild ({held} held role id(s) unresolved)")]
    NoRolesAssigned { held: usize },
}

impl From<CeilingError> for gr_common::Error {
    fn from(err: CeilingError) -> Self {
        match err {
            CeilingError::NoRolesAssigned { .. } => gr_common::Error::NoRolesAssigned,
        }
    }
}

/// Role id → role lookup for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleIndex {
    roles: HashMap<RoleId, RemoteRole>,
}

impl RoleIndex {
    /// Re-key a role list by id. Remote ids are unique, so no entry is shadowed.
    pub fn build(roles: &[RemoteRole]) -> Self {
        roles.iter().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&RemoteRole> {
        self.roles.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.roles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Maximum rank among `held` roles that exist in the index.
    ///
    /// Held ids missing from the index are ignored. When none resolve there is
    /// no ceiling at all, which is distinct from a ceiling of rank 0.
    pub fn rank_ceiling<'a, I>(&self, held: I) -> Result<RankCeiling, CeilingError>
    where
        I: IntoIterator<Item = &'a RoleId>,
    {
        let mut count = 0;
        let mut ceiling = None;
        for id in held {
            count += 1;
            match self.roles.get(id) {
                Some(role) => {
                    ceiling = Some(ceiling.map_or(role.rank, |max: i64| max.max(role.rank)));
                }
                None => trace!(role_id = %id, "held role not in index"),
            }
        }
        ceiling
            .map(RankCeiling)
            .ok_or(CeilingError::NoRolesAssigned { held: count })
    }
}

impl FromIterator<RemoteRole> for RoleIndex {
    fn from_iter<T: IntoIterator<Item = RemoteRole>>(iter: T) -> Self {
        Self {
            roles: iter.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> RoleIndex {
        RoleIndex::build(&[
            RemoteRole::new("everyone", "@everyone", 0, false),
            RemoteRole::new("officer", "Officer", 7, false),
            RemoteRole::new("bot", "Roster Bot", 5, true),
        ])
    }

    #[test]
    fn build_keys_by_id() {
        let index = sample_index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("officer").unwrap().rank, 7);
        assert!(index.contains("bot"));
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn ceiling_is_max_of_resolved_roles() {
        let index = sample_index();
        let held = vec![RoleId::from("bot"), RoleId::from("officer")];
        assert_eq!(index.rank_ceiling(&held).unwrap(), RankCeiling(7));
    }

    #[test]
    fn unresolved_held_roles_are_ignored() {
        let index = sample_index();
        let held = vec![RoleId::from("ghost"), RoleId::from("bot")];
        assert_eq!(index.rank_ceiling(&held).unwrap(), RankCeiling(5));
    }

    #[test]
    fn rank_zero_is_a_valid_ceiling() {
        let index = sample_index();
        let held = vec![RoleId::from("everyone")];
        assert_eq!(index.rank_ceiling(&held).unwrap(), RankCeiling(0));
    }

    #[test]
    fn no_resolved_roles_is_an_error() {
        let index = sample_index();
        let held = vec![RoleId::from("ghost"), RoleId::from("phantom")];
        assert_eq!(
            index.rank_ceiling(&held),
            Err(CeilingError::NoRolesAssigned { held: 2 })
        );
        let none: Vec<RoleId> = Vec::new();
        assert_eq!(
            index.rank_ceiling(&none),
            Err(CeilingError::NoRolesAssigned { held: 0 })
        );
    }

    #[test]
    fn role_accepts_position_alias() {
        let role: RemoteRole =
            serde_json::from_str(r#"{"id": "1", "name": "A", "position": 4, "is_managed": true}"#)
                .unwrap();
        assert_eq!(role.rank, 4);
        assert!(role.managed);
    }
}
