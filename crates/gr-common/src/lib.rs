//! Guild Roster common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - Identifier newtypes that keep class labels, class ids, weapon ids and
//!   remote role ids apart
//! - Per-pass identity for reconciliation reports
//! - Common error types with stable codes
//! - Output format specifications

pub mod error;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use id::{ClassId, ClassLabel, PassId, RoleId, WeaponId};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
