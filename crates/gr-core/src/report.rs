//! Report envelope handed to the presentation layer.

use chrono::Utc;
use gr_common::{PassId, SCHEMA_VERSION};
use gr_config::ConfigSnapshot;
use serde::{Deserialize, Serialize};

use crate::reconcile::{DiagnosticsReport, Reconciliation, ValidEntry};
use crate::roles::RankCeiling;

/// One pass's results plus the provenance needed to compare reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub schema_version: String,
    pub pass_id: PassId,
    /// RFC 3339 timestamp of report creation.
    pub generated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    pub config: ConfigSnapshot,
    pub role_count: usize,
    pub rank_ceiling: RankCeiling,
    pub classes: Vec<ValidEntry>,
    pub diagnostics: DiagnosticsReport,
}

impl ReconciliationReport {
    pub fn new(
        reconciliation: Reconciliation,
        config: ConfigSnapshot,
        guild_id: Option<String>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            pass_id: PassId::new(),
            generated_at: Utc::now().to_rfc3339(),
            guild_id,
            config,
            role_count: reconciliation.role_count,
            rank_ceiling: reconciliation.rank_ceiling,
            classes: reconciliation.entries,
            diagnostics: reconciliation.diagnostics,
        }
    }

    pub fn has_drift(&self) -> bool {
        !self.diagnostics.is_clean()
    }
}
