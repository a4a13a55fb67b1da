//! Guild Roster configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the class/weapon taxonomy document
//! - JSON, TOML and YAML parsing with load-time validation
//! - Non-fatal lint for dangling order hints
//! - Config resolution (CLI → env → XDG → working directory)
//! - Config snapshots for report provenance

pub mod resolve;
pub mod snapshot;
pub mod taxonomy;
pub mod validate;

pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use taxonomy::{taxonomy_schema, Class, DocumentFormat, Taxonomy, Weapon};
pub use validate::{lint, validate, ConfigError, ConfigWarning, InvalidKind};
