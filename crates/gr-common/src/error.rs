//! Error types for Guild Roster.

use thiserror::Error;

/// Result type alias for Guild Roster operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Guild Roster.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid class '{label}': {detail}")]
    InvalidClass { label: String, detail: String },

    #[error("invalid weapon in class '{label}': {detail}")]
    InvalidWeapon { label: String, detail: String },

    // Snapshot errors (20-29)
    #[error("role snapshot unavailable: {0}")]
    Snapshot(String),

    // Reconciliation errors (30-39)
    #[error("caller holds no role known to the guild")]
    NoRolesAssigned,

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidClass { .. } => 11,
            Error::InvalidWeapon { .. } => 12,
            Error::Snapshot(_) => 20,
            Error::NoRolesAssigned => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Whether the error originates from the taxonomy document.
    pub fn is_config(&self) -> bool {
        (10..20).contains(&self.code())
    }
}
