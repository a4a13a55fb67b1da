//! Exit codes for the gr-core CLI.
//!
//! Exit codes communicate the outcome of a pass without requiring output
//! parsing. Codes below 10 are successful runs; 10 and above are failures.

/// Exit codes for gr-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Pass completed, no diagnostics
    Clean = 0,

    /// Pass completed, diagnostics reported
    DriftFound = 1,

    /// Taxonomy could not be read, parsed, or validated
    ConfigError = 10,

    /// Role snapshot could not be read or parsed
    SnapshotError = 11,

    /// Caller holds no role known to the guild
    NoRoles = 12,

    /// I/O error writing output
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Map a unified error onto its exit code.
    pub fn for_error(err: &gr_common::Error) -> Self {
        match err {
            err if err.is_config() => ExitCode::ConfigError,
            gr_common::Error::Snapshot(_) => ExitCode::SnapshotError,
            gr_common::Error::NoRolesAssigned => ExitCode::NoRoles,
            gr_common::Error::Io(_) => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
