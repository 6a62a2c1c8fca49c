//! Report records produced by the analysis pipeline.
//!
//! Check ordering inside a report reflects execution order and must be
//! preserved for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::ENGINE_VERSION;

/// Stable check identifiers, exactly as they appear in serialized reports.
pub mod check_id {
    pub const ASSET_TYPE: &str = "assetType";
    pub const FORMAT: &str = "format";
    pub const SVG_STROKE: &str = "svg-stroke";
    pub const SVG_FONT: &str = "svg-font";
    pub const PDF_CHECK: &str = "pdf-check";
    pub const DIMENSIONS: &str = "dimensions";
    pub const DOMINANT_COLOR: &str = "dominantColor";
    pub const RASTER_ERROR: &str = "raster-error";
    pub const FILESIZE: &str = "filesize";
}

/// One rule evaluation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub id: String,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    pub fn new(id: &str, passed: bool, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            passed,
            message: message.into(),
        }
    }

    pub fn pass(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, true, message)
    }

    pub fn fail(id: &str, message: impl Into<String>) -> Self {
        Self::new(id, false, message)
    }
}

/// Full result of one analysis. Produced fresh per request, never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub filename: String,
    pub engine_version: String,
    pub analyzed_at: DateTime<Utc>,
    /// SHA-256 of the analyzed bytes, hex encoded.
    pub source_hash: String,
    pub checks: Vec<CheckResult>,
}

impl AnalysisReport {
    pub fn new(filename: &str, source: &[u8], checks: Vec<CheckResult>) -> Self {
        Self {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            analyzed_at: Utc::now(),
            source_hash: sha256_hex(source),
            checks,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// First check with the given id, if it ran.
    pub fn check(&self, id: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.id == id)
    }
}

/// SHA-256 of bytes as a lowercase hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
