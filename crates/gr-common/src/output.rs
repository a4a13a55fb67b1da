//! Output format selection for rendered reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a reconciliation report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable validation listing.
    #[default]
    Text,
    /// Pretty-printed JSON report envelope.
    Json,
    /// Single-line JSON, one report per line.
    Jsonl,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}
