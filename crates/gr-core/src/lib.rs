//! Guild Roster core: reconciles a class/weapon taxonomy against a guild's
//! role snapshot.
//!
//! A pass is pure and synchronous:
//! 1. [`roles::RoleIndex`] re-keys the snapshot's roles by id and derives the
//!    caller's [`roles::RankCeiling`]
//! 2. [`permission::check`] gates each role reference
//! 3. [`ordering`] fixes display order for classes and weapons
//! 4. [`reconcile`] produces the usable entries and the diagnostics report
//!
//! Fetching the snapshot is the job of a [`snapshot::SnapshotSource`].

pub mod exit_codes;
pub mod logging;
pub mod ordering;
pub mod output;
pub mod permission;
pub mod reconcile;
pub mod report;
pub mod roles;
pub mod snapshot;

pub use exit_codes::ExitCode;
pub use permission::Verdict;
pub use reconcile::{
    build_diagnostics, reconcile, valid_class_labels, valid_entries, valid_weapon_ids,
    DiagnosticItem, DiagnosticsReport, Reason, Reconciliation, ValidEntry,
};
pub use report::ReconciliationReport;
pub use roles::{CeilingError, RankCeiling, RemoteRole, RoleIndex};
pub use snapshot::{FileSnapshotSource, GuildSnapshot, SnapshotError, SnapshotSource};
