//! Usability gate for a single role reference.
//!
//! A role is usable when it exists, is not managed, and does not sit strictly
//! above the caller's rank ceiling. A role at exactly the ceiling passes this
//! gate even though diagnostics flag it as too high.

use crate::roles::{RankCeiling, RemoteRole, RoleIndex};

/// Outcome of checking one role reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    /// The role id is not present on the guild.
    Missing,
    /// The role exists but is platform-controlled.
    Managed(&'a RemoteRole),
    /// The role ranks strictly above the caller's ceiling.
    AboveCeiling(&'a RemoteRole),
    Usable(&'a RemoteRole),
}

impl<'a> Verdict<'a> {
    pub fn role(&self) -> Option<&'a RemoteRole> {
        match *self {
            Verdict::Missing => None,
            Verdict::Managed(role) | Verdict::AboveCeiling(role) | Verdict::Usable(role) => {
                Some(role)
            }
        }
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Verdict::Usable(_))
    }
}

/// Classify `role_ref` against the index and ceiling.
///
/// Managed is reported ahead of rank when both apply.
pub fn check<'a>(role_ref: &str, index: &'a RoleIndex, ceiling: RankCeiling) -> Verdict<'a> {
    match index.get(role_ref) {
        None => Verdict::Missing,
        Some(role) if role.managed => Verdict::Managed(role),
        Some(role) if role.rank > ceiling.0 => Verdict::AboveCeiling(role),
        Some(role) => Verdict::Usable(role),
    }
}

/// Tuple form of [`check`]: the resolved role, if any, and whether it is usable.
pub fn is_usable<'a>(
    role_ref: &str,
    index: &'a RoleIndex,
    ceiling: RankCeiling,
) -> (Option<&'a RemoteRole>, bool) {
    let verdict = check(role_ref, index, ceiling);
    (verdict.role(), verdict.is_usable())
}
