//! Display order for classes and weapons.
//!
//! An explicit order in the taxonomy is used verbatim. Without one, classes
//! sort ascending by display name (case-sensitive) and weapons sort
//! descending by display name (case-insensitive). The two fallbacks point in
//! opposite directions on purpose; both are pinned by tests.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use gr_common::{ClassLabel, WeaponId};
use gr_config::{Class, Taxonomy};

/// Class labels in display order.
///
/// `ClassOrder` entries are returned as written, including labels that have
/// no class; callers filter those out.
pub fn class_order(taxonomy: &Taxonomy) -> Vec<&ClassLabel> {
    if !taxonomy.class_order.is_empty() {
        return taxonomy.class_order.iter().collect();
    }
    let mut labels: Vec<(&ClassLabel, &Class)> = taxonomy.classes.iter().collect();
    // Stable sort over the label-ordered map, so equal names stay label-ascending.
    labels.sort_by(|(_, a), (_, b)| a.display_name.cmp(&b.display_name));
    labels.into_iter().map(|(label, _)| label).collect()
}

/// Weapon ids of `class` in display order.
///
/// `WeaponOrder[label]` is returned as written. The fallback lists each
/// distinct weapon id once, Z→A by lowercased display name, ties broken by id.
pub fn weapon_order<'a>(
    taxonomy: &'a Taxonomy,
    label: &str,
    class: &'a Class,
) -> Vec<&'a WeaponId> {
    let configured = taxonomy.weapon_order_for(label);
    if !configured.is_empty() {
        return configured.iter().collect();
    }
    let ids: BTreeSet<&WeaponId> = class.weapons.iter().map(|w| &w.id).collect();
    let mut keyed: Vec<(String, &WeaponId)> = ids
        .into_iter()
        .map(|id| {
            let name = class
                .weapon(id.as_str())
                .map(|w| w.display_name.to_lowercase())
                .unwrap_or_default();
            (name, id)
        })
        .collect();
    keyed.sort_by(|(name_a, id_a), (name_b, id_b)| {
        descending_name(name_a, name_b).then(id_a.cmp(id_b))
    });
    keyed.into_iter().map(|(_, id)| id).collect()
}

fn descending_name(a: &str, b: &str) -> Ordering {
    b.cmp(a)
}
