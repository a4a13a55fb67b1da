//! Guild role snapshots and the sources that provide them.
//!
//! A pass never reaches for a process-wide session. Whatever talks to the
//! remote platform implements [`SnapshotSource`] and hands the resulting
//! [`GuildSnapshot`] to [`crate::reconcile::reconcile`]. The static
//! [`FileSnapshotSource`] reads a previously captured snapshot from disk.

use std::fs;
use std::path::{Path, PathBuf};

use gr_common::RoleId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::roles::RemoteRole;

/// Everything a pass needs to know about the remote guild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,

    /// Every role defined on the guild.
    #[serde(default)]
    pub roles: Vec<RemoteRole>,

    /// Role ids held by the acting identity.
    #[serde(default, alias = "bot_roles")]
    pub caller_roles: Vec<RoleId>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<SnapshotError> for gr_common::Error {
    fn from(err: SnapshotError) -> Self {
        gr_common::Error::Snapshot(err.to_string())
    }
}

/// Provider of guild snapshots.
pub trait SnapshotSource {
    fn fetch(&self) -> Result<GuildSnapshot, SnapshotError>;
}

/// An in-memory snapshot is its own source.
impl SnapshotSource for GuildSnapshot {
    fn fetch(&self) -> Result<GuildSnapshot, SnapshotError> {
        Ok(self.clone())
    }
}

/// Reads a JSON snapshot document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
}

impl FileSnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSnapshotSource {
    fn fetch(&self) -> Result<GuildSnapshot, SnapshotError> {
        let content = fs::read_to_string(&self.path).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: GuildSnapshot = serde_json::from_str(&content)?;
        debug!(
            path = %self.path.display(),
            roles = snapshot.roles.len(),
            held = snapshot.caller_roles.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}
