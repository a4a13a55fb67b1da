//! End-to-end reconciliation scenarios over small hand-built guilds.

use gr_common::{ClassLabel, RoleId, WeaponId};
use gr_config::Taxonomy;
use gr_core::{
    build_diagnostics, permission, reconcile, valid_class_labels, valid_weapon_ids,
    CeilingError, GuildSnapshot, RankCeiling, RemoteRole, RoleIndex,
};

fn labels(order: Vec<&ClassLabel>) -> Vec<&str> {
    order.into_iter().map(ClassLabel::as_str).collect()
}

fn weapons(order: Vec<&WeaponId>) -> Vec<&str> {
    order.into_iter().map(WeaponId::as_str).collect()
}

fn tank_taxonomy() -> Taxonomy {
    Taxonomy::parse_json(
        r#"{"Classes": {"Tank": {"ID": "tank", "Name": "Tank", "RoleID": "R1",
            "Weapons": [{"ID": "hammer", "Name": "Hammer", "RoleID": "R2"}]}}}"#,
    )
    .unwrap()
}

#[test]
fn scenario_a_missing_weapon_role() {
    let taxonomy = tank_taxonomy();
    let index = RoleIndex::build(&[RemoteRole::new("R1", "Tank", 5, false)]);
    let ceiling = RankCeiling(5);

    assert_eq!(labels(valid_class_labels(&taxonomy, &index, ceiling)), vec!["Tank"]);
    assert!(valid_weapon_ids("Tank", &taxonomy, &index, ceiling).is_empty());

    let report = build_diagnostics(&index, &taxonomy, ceiling);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].path, "Weapon Tank/Hammer");
    assert_eq!(report.missing[0].role_ref, RoleId::from("R2"));
    // Class role sits at the ceiling: usable, yet flagged.
    assert_eq!(report.too_high.len(), 1);
    assert_eq!(report.too_high[0].path, "Class Tank");
    assert!(report.managed.is_empty());
}

#[test]
fn scenario_b_managed_class_role() {
    let taxonomy = tank_taxonomy();
    let index = RoleIndex::build(&[RemoteRole::new("R1", "Tank", 5, true)]);
    let ceiling = RankCeiling(5);

    assert!(valid_class_labels(&taxonomy, &index, ceiling).is_empty());
    let report = build_diagnostics(&index, &taxonomy, ceiling);
    assert_eq!(report.managed.len(), 1);
    assert_eq!(report.managed[0].path, "Class Tank");
}

#[test]
fn scenario_c_class_fallback_ascending() {
    let taxonomy = Taxonomy::parse_json(
        r#"{"Classes": {
            "Tank": {"ID": "tank", "Name": "Tank", "RoleID": "R1"},
            "Heal": {"ID": "heal", "Name": "Heal", "RoleID": "R2"}
        }}"#,
    )
    .unwrap();
    let index = RoleIndex::build(&[
        RemoteRole::new("R1", "Tank", 1, false),
        RemoteRole::new("R2", "Heal", 1, false),
    ]);
    assert_eq!(
        labels(valid_class_labels(&taxonomy, &index, RankCeiling(5))),
        vec!["Heal", "Tank"]
    );
}

#[test]
fn scenario_d_weapon_fallback_descending() {
    let taxonomy = Taxonomy::parse_json(
        r#"{"Classes": {"Dps": {"ID": "dps", "Name": "Dps", "RoleID": "R1", "Weapons": [
            {"ID": "axe-id", "Name": "Axe", "RoleID": "R2"},
            {"ID": "bow-id", "Name": "Bow", "RoleID": "R3"}
        ]}}}"#,
    )
    .unwrap();
    let index = RoleIndex::build(&[
        RemoteRole::new("R1", "Dps", 1, false),
        RemoteRole::new("R2", "Axe", 1, false),
        RemoteRole::new("R3", "Bow", 1, false),
    ]);
    assert_eq!(
        weapons(valid_weapon_ids("Dps", &taxonomy, &index, RankCeiling(5))),
        vec!["bow-id", "axe-id"]
    );
}

#[test]
fn scenario_e_no_resolvable_caller_role() {
    let snapshot = GuildSnapshot {
        guild_id: Some("123456ABCDEF".into()),
        roles: vec![RemoteRole::new("R1", "Tank", 5, false)],
        caller_roles: vec![RoleId::from("R404")],
    };
    let result = reconcile(&tank_taxonomy(), &snapshot);
    assert!(matches!(result, Err(CeilingError::NoRolesAssigned { .. })));
}

#[test]
fn explicit_orders_are_filtered_not_reordered() {
    let taxonomy = Taxonomy::parse_json(
        r#"{"Classes": {
            "Tank": {"ID": "tank", "Name": "Tank", "RoleID": "R1", "Weapons": [
                {"ID": "hammer", "Name": "Hammer", "RoleID": "R4"},
                {"ID": "mace", "Name": "Mace", "RoleID": "R5"},
                {"ID": "sword", "Name": "Sword", "RoleID": "R6"}
            ]},
            "Heal": {"ID": "heal", "Name": "Heal", "RoleID": "R2"},
            "Dps": {"ID": "dps", "Name": "Dps", "RoleID": "R3"}
        },
        "ClassOrder": ["Tank", "Ghost", "Dps", "Heal"],
        "WeaponOrder": {"Tank": ["sword", "lance", "hammer", "mace"]}}"#,
    )
    .unwrap();
    let index = RoleIndex::build(&[
        RemoteRole::new("R1", "Tank", 1, false),
        RemoteRole::new("R2", "Heal", 1, false),
        RemoteRole::new("R3", "Dps", 9, false),
        RemoteRole::new("R4", "Hammer", 1, false),
        RemoteRole::new("R5", "Mace", 1, true),
        RemoteRole::new("R6", "Sword", 2, false),
    ]);
    let ceiling = RankCeiling(4);
    assert_eq!(
        labels(valid_class_labels(&taxonomy, &index, ceiling)),
        vec!["Tank", "Heal"]
    );
    assert_eq!(
        weapons(valid_weapon_ids("Tank", &taxonomy, &index, ceiling)),
        vec!["sword", "hammer"]
    );
}

#[test]
fn role_at_ceiling_is_usable_and_too_high() {
    let taxonomy = tank_taxonomy();
    let index = RoleIndex::build(&[
        RemoteRole::new("R1", "Tank", 3, false),
        RemoteRole::new("R2", "Hammer", 5, false),
    ]);
    let ceiling = RankCeiling(5);
    assert!(permission::check("R2", &index, ceiling).is_usable());
    assert_eq!(
        weapons(valid_weapon_ids("Tank", &taxonomy, &index, ceiling)),
        vec!["hammer"]
    );
    let report = build_diagnostics(&index, &taxonomy, ceiling);
    assert_eq!(report.too_high.len(), 1);
    assert_eq!(report.too_high[0].path, "Weapon Tank/Hammer");
}

#[test]
fn full_pass_from_snapshot() {
    let snapshot = GuildSnapshot {
        guild_id: None,
        roles: vec![
            RemoteRole::new("R1", "Tank", 2, false),
            RemoteRole::new("R2", "Hammer", 1, false),
            RemoteRole::new("BOT", "Roster Bot", 6, true),
        ],
        caller_roles: vec![RoleId::from("BOT")],
    };
    let result = reconcile(&tank_taxonomy(), &snapshot).unwrap();
    assert_eq!(result.rank_ceiling, RankCeiling(6));
    assert_eq!(result.role_count, 3);
    assert!(result.diagnostics.is_clean());
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].weapons, vec![WeaponId::from("hammer")]);
}
