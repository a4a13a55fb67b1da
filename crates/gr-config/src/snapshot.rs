//! Config snapshots embedded in reconciliation reports.
//!
//! Two reports carrying the same digest were produced from the same taxonomy,
//! regardless of key order or formatting in the source document.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// SHA-256 over the canonical JSON form of the loaded taxonomy.
    pub digest: String,
    pub class_count: usize,
    pub weapon_count: usize,
}

impl ConfigSnapshot {
    pub fn capture(taxonomy: &Taxonomy) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_string(taxonomy)?;
        Ok(Self {
            digest: sha256_hex(canonical.as_bytes()),
            class_count: taxonomy.classes.len(),
            weapon_count: taxonomy.weapon_count(),
        })
    }
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
