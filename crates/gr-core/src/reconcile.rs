//! Reconciliation of a taxonomy against one guild role snapshot.
//!
//! Two outputs come out of a pass:
//! - the ordered list of classes (and, per class, weapons) the caller can
//!   actually hand out, gated by [`permission::check`]
//! - a [`DiagnosticsReport`] of every entry whose role is missing, managed,
//!   or at/above the caller's ceiling
//!
//! The too-high diagnostic is inclusive (`rank >= ceiling`) while the
//! usability gate is exclusive (`rank > ceiling`). A role at exactly the
//! ceiling is therefore usable and flagged at the same time.

use std::fmt;

use gr_common::{ClassLabel, RoleId, WeaponId};
use gr_config::{Class, Taxonomy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ordering::{class_order, weapon_order};
use crate::permission;
use crate::roles::{CeilingError, RankCeiling, RoleIndex};
use crate::snapshot::GuildSnapshot;

/// Why an entry was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reason {
    Missing,
    TooHigh,
    Managed,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Missing => write!(f, "missing"),
            Reason::TooHigh => write!(f, "too-high"),
            Reason::Managed => write!(f, "managed"),
        }
    }
}

/// One flagged class or weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticItem {
    /// `Class <label>` or `Weapon <label>/<weapon name>`.
    pub path: String,
    pub role_ref: RoleId,
    pub reason: Reason,
}

/// Flagged entries grouped by reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub missing: Vec<DiagnosticItem>,
    pub too_high: Vec<DiagnosticItem>,
    pub managed: Vec<DiagnosticItem>,
}

impl DiagnosticsReport {
    fn push(&mut self, path: &str, role_ref: &RoleId, reason: Reason) {
        debug!(path, role_id = %role_ref, %reason, "diagnostic");
        let item = DiagnosticItem {
            path: path.to_string(),
            role_ref: role_ref.clone(),
            reason,
        };
        match reason {
            Reason::Missing => self.missing.push(item),
            Reason::TooHigh => self.too_high.push(item),
            Reason::Managed => self.managed.push(item),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    pub fn total(&self) -> usize {
        self.missing.len() + self.too_high.len() + self.managed.len()
    }

    /// Every item, missing first, then too-high, then managed.
    pub fn items(&self) -> impl Iterator<Item = &DiagnosticItem> {
        self.missing
            .iter()
            .chain(self.too_high.iter())
            .chain(self.managed.iter())
    }
}

fn class_path(label: &ClassLabel) -> String {
    format!("Class {}", label)
}

fn weapon_path(label: &ClassLabel, weapon_name: &str) -> String {
    format!("Weapon {}/{}", label, weapon_name)
}

/// Flag every class and weapon whose role is missing, managed, or at/above
/// the ceiling. The whole taxonomy is walked; nothing short-circuits.
pub fn build_diagnostics(
    index: &RoleIndex,
    taxonomy: &Taxonomy,
    ceiling: RankCeiling,
) -> DiagnosticsReport {
    let mut report = DiagnosticsReport::default();
    for (label, class) in &taxonomy.classes {
        let path = class_path(label);
        flag_role(&mut report, index, ceiling, &path, &class.role_ref);

        for weapon in &class.weapons {
            let path = weapon_path(label, &weapon.display_name);
            flag_role(&mut report, index, ceiling, &path, &weapon.role_ref);
        }
    }
    report
}

fn flag_role(
    report: &mut DiagnosticsReport,
    index: &RoleIndex,
    ceiling: RankCeiling,
    path: &str,
    role_ref: &RoleId,
) {
    let Some(role) = index.get(role_ref.as_str()) else {
        // A missing role has nothing further to check.
        report.push(path, role_ref, Reason::Missing);
        return;
    };
    // Independent checks: one role can be both managed and too high.
    if role.managed {
        report.push(path, &role.id, Reason::Managed);
    }
    if role.rank >= ceiling.0 {
        report.push(path, &role.id, Reason::TooHigh);
    }
}

/// Class labels in display order whose class role passes the usability gate.
pub fn valid_class_labels<'a>(
    taxonomy: &'a Taxonomy,
    index: &RoleIndex,
    ceiling: RankCeiling,
) -> Vec<&'a ClassLabel> {
    class_order(taxonomy)
        .into_iter()
        .filter(|label| {
            taxonomy.class(label.as_str()).is_some_and(|class| {
                permission::check(class.role_ref.as_str(), index, ceiling).is_usable()
            })
        })
        .collect()
}

/// Weapon ids of the class filed under `label`, in display order, whose role
/// passes the usability gate. Unknown labels yield nothing; ordered ids the
/// class does not declare are skipped.
pub fn valid_weapon_ids<'a>(
    label: &str,
    taxonomy: &'a Taxonomy,
    index: &RoleIndex,
    ceiling: RankCeiling,
) -> Vec<&'a WeaponId> {
    let Some(class) = taxonomy.class(label) else {
        return Vec::new();
    };
    usable_weapons(taxonomy, label, class, index, ceiling)
}

fn usable_weapons<'a>(
    taxonomy: &'a Taxonomy,
    label: &str,
    class: &'a Class,
    index: &RoleIndex,
    ceiling: RankCeiling,
) -> Vec<&'a WeaponId> {
    weapon_order(taxonomy, label, class)
        .into_iter()
        .filter(|id| {
            class.weapon(id.as_str()).is_some_and(|weapon| {
                permission::check(weapon.role_ref.as_str(), index, ceiling).is_usable()
            })
        })
        .collect()
}

/// A usable class with its usable weapons, both in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidEntry {
    pub label: ClassLabel,
    pub display_name: String,
    pub weapons: Vec<WeaponId>,
}

/// Every usable class, each carrying its usable weapons.
pub fn valid_entries(
    taxonomy: &Taxonomy,
    index: &RoleIndex,
    ceiling: RankCeiling,
) -> Vec<ValidEntry> {
    valid_class_labels(taxonomy, index, ceiling)
        .into_iter()
        .filter_map(|label| {
            let class = taxonomy.class(label.as_str())?;
            Some(ValidEntry {
                label: label.clone(),
                display_name: class.display_name.clone(),
                weapons: usable_weapons(taxonomy, label.as_str(), class, index, ceiling)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
        })
        .collect()
}

/// Output of one complete pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub role_count: usize,
    pub rank_ceiling: RankCeiling,
    pub entries: Vec<ValidEntry>,
    pub diagnostics: DiagnosticsReport,
}

/// Run a full pass: index the snapshot, derive the ceiling, then reconcile.
///
/// Fails before producing anything when the caller's held roles do not
/// resolve to a ceiling.
pub fn reconcile(
    taxonomy: &Taxonomy,
    snapshot: &GuildSnapshot,
) -> Result<Reconciliation, CeilingError> {
    let index = RoleIndex::build(&snapshot.roles);
    let rank_ceiling = index.rank_ceiling(&snapshot.caller_roles)?;
    debug!(roles = index.len(), ceiling = %rank_ceiling, "role index built");

    let diagnostics = build_diagnostics(&index, taxonomy, rank_ceiling);
    let entries = valid_entries(taxonomy, &index, rank_ceiling);
    info!(
        usable_classes = entries.len(),
        missing = diagnostics.missing.len(),
        too_high = diagnostics.too_high.len(),
        managed = diagnostics.managed.len(),
        "reconciliation complete"
    );

    Ok(Reconciliation {
        role_count: index.len(),
        rank_ceiling,
        entries,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::RemoteRole;

    fn taxonomy() -> Taxonomy {
        Taxonomy::parse_json(
            r#"{"Classes": {
                "Tank": {"ID": "tank", "Name": "Tank", "RoleID": "r-tank", "Weapons": [
                    {"ID": "hammer", "Name": "Hammer", "RoleID": "r-hammer"},
                    {"ID": "mace", "Name": "Mace", "RoleID": "r-mace"}
                ]},
                "Heal": {"ID": "heal", "Name": "Heal", "RoleID": "r-heal", "Weapons": [
                    {"ID": "holy", "Name": "Holy", "RoleID": "r-gone"}
                ]}
            }}"#,
        )
        .unwrap()
    }

    fn index() -> RoleIndex {
        RoleIndex::build(&[
            RemoteRole::new("r-tank", "Tank", 3, false),
            RemoteRole::new("r-hammer", "Hammer", 5, false),
            RemoteRole::new("r-mace", "Mace", 9, true),
            RemoteRole::new("r-heal", "Heal", 2, true),
        ])
    }

    fn paths(items: &[DiagnosticItem]) -> Vec<&str> {
        items.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn diagnostics_walk_every_entry() {
        let report = build_diagnostics(&index(), &taxonomy(), RankCeiling(5));
        assert_eq!(paths(&report.missing), vec!["Weapon Heal/Holy"]);
        assert_eq!(paths(&report.managed), vec!["Class Heal", "Weapon Tank/Mace"]);
        assert_eq!(
            paths(&report.too_high),
            vec!["Weapon Tank/Hammer", "Weapon Tank/Mace"]
        );
        assert_eq!(report.total(), 5);
        assert!(!report.is_clean());
    }

    #[test]
    fn diagnostic_items_carry_reason_and_role() {
        let report = build_diagnostics(&index(), &taxonomy(), RankCeiling(5));
        let missing = &report.missing[0];
        assert_eq!(missing.role_ref.as_str(), "r-gone");
        assert_eq!(missing.reason, Reason::Missing);
        assert!(report.too_high.iter().all(|i| i.reason == Reason::TooHigh));
        assert!(report.managed.iter().all(|i| i.reason == Reason::Managed));
    }

    #[test]
    fn missing_class_role_still_checks_weapons() {
        let taxonomy = Taxonomy::parse_json(
            r#"{"Classes": {"Tank": {"ID": "tank", "Name": "Tank", "RoleID": "gone",
                "Weapons": [{"ID": "hammer", "Name": "Hammer", "RoleID": "r-mace"}]}}}"#,
        )
        .unwrap();
        let report = build_diagnostics(&index(), &taxonomy, RankCeiling(5));
        assert_eq!(paths(&report.missing), vec!["Class Tank"]);
        assert_eq!(paths(&report.managed), vec!["Weapon Tank/Hammer"]);
    }

    #[test]
    fn ceiling_rank_is_usable_but_flagged() {
        let index = index();
        let taxonomy = taxonomy();
        let ceiling = RankCeiling(5);
        let weapons = valid_weapon_ids("Tank", &taxonomy, &index, ceiling);
        assert_eq!(weapons, vec![&WeaponId::from("hammer")]);
        let report = build_diagnostics(&index, &taxonomy, ceiling);
        assert!(report.too_high.iter().any(|i| i.role_ref.as_str() == "r-hammer"));
    }

    #[test]
    fn valid_classes_skip_managed_roles() {
        let taxonomy = taxonomy();
        let labels = valid_class_labels(&taxonomy, &index(), RankCeiling(5));
        assert_eq!(labels, vec![&ClassLabel::from("Tank")]);
    }

    #[test]
    fn unknown_class_label_has_no_weapons() {
        let taxonomy = taxonomy();
        assert!(valid_weapon_ids("Dps", &taxonomy, &index(), RankCeiling(5)).is_empty());
    }

    #[test]
    fn valid_entries_nest_weapons() {
        let entries = valid_entries(&taxonomy(), &index(), RankCeiling(5));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label.as_str(), "Tank");
        assert_eq!(entries[0].display_name, "Tank");
        assert_eq!(entries[0].weapons, vec![WeaponId::from("hammer")]);
    }

    #[test]
    fn reason_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Reason::TooHigh).unwrap(), "\"too-high\"");
        assert_eq!(Reason::TooHigh.to_string(), "too-high");
    }

    #[test]
    fn reconcile_requires_a_ceiling() {
        let snapshot = GuildSnapshot {
            guild_id: None,
            roles: vec![RemoteRole::new("r-tank", "Tank", 3, false)],
            caller_roles: vec![RoleId::from("stranger")],
        };
        let err = reconcile(&taxonomy(), &snapshot).unwrap_err();
        assert_eq!(err, CeilingError::NoRolesAssigned { held: 1 });
    }
}
