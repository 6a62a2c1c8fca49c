//! Analysis Pipeline - Single Entry Point
//!
//! Checks are independent and never short-circuit: a submitter always
//! gets the full report, every violation at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::{classify, AssetCategory};
use crate::color::ColorError;
use crate::document::DocumentInspector;
use crate::raster::{ImageRasterDecoder, RasterDecoder, RasterInspector};
use crate::report::{check_id, AnalysisReport, CheckResult};
use crate::rules::{RuleSet, RulesError};
use crate::vector::VectorInspector;

/// Hard ceiling for the `filesize` backstop check. Deliberately not
/// configurable per asset type; the transport layer enforces its own,
/// larger upload cap before bytes reach the pipeline.
pub const FILE_SIZE_CEILING: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid rule configuration: {0}")]
    Rules(#[from] RulesError),

    #[error("Configuration defect: {0}")]
    Color(#[from] ColorError),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Input for one analysis. Consumed entirely within a single `analyze`
/// call; the transport rejects empty payloads before constructing one.
#[derive(Debug, Clone)]
pub struct AssetInput {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: Option<String>,
    pub asset_type: Option<String>,
}

impl AssetInput {
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            content_type: None,
            asset_type: None,
        }
    }

    pub fn with_asset_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = Some(asset_type.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Declared label, trimmed and lowercased; empty when not provided.
    fn normalized_asset_type(&self) -> String {
        self.asset_type
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase()
    }
}

/// Wire form of an analysis request: asset bytes travel base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub filename: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub asset_type: Option<String>,
    pub data_base64: String,
}

impl AnalyzeRequest {
    pub fn from_json(payload: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn into_input(self) -> Result<AssetInput, PipelineError> {
        let bytes = base64::Engine::decode(
            &base64::engine::general_purpose::STANDARD,
            self.data_base64.as_bytes(),
        )
        .map_err(|e| PipelineError::InvalidPayload(e.to_string()))?;
        Ok(AssetInput {
            bytes,
            filename: self.filename,
            content_type: self.content_type,
            asset_type: self.asset_type,
        })
    }
}

/// The analysis pipeline - single entry point for asset compliance checks.
///
/// Holds only immutable state, so one instance may serve any number of
/// concurrent analyses.
pub struct AnalysisPipeline {
    rules: RuleSet,
    decoder: Box<dyn RasterDecoder>,
    vector: VectorInspector,
    document: DocumentInspector,
}

impl AnalysisPipeline {
    /// Build with the default `image`-backed decoder. The rule set is
    /// validated here; no pipeline exists with unvalidated rules.
    pub fn new(rules: RuleSet) -> Result<Self, PipelineError> {
        Self::with_decoder(rules, Box::new(ImageRasterDecoder))
    }

    /// Build with an alternative raster decoder.
    pub fn with_decoder(
        mut rules: RuleSet,
        decoder: Box<dyn RasterDecoder>,
    ) -> Result<Self, PipelineError> {
        rules.validate()?;
        Ok(Self {
            rules,
            decoder,
            vector: VectorInspector::new(),
            document: DocumentInspector,
        })
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run every applicable check in fixed order: `assetType`, `format`,
    /// the per-category branch, then `filesize`. Rule violations become
    /// failed checks, never errors; the only error path is a palette
    /// invariant violation, which is a deployment defect.
    pub fn analyze(&self, input: &AssetInput) -> Result<AnalysisReport, PipelineError> {
        let mut checks = Vec::new();

        let asset_type = input.normalized_asset_type();
        checks.push(CheckResult::new(
            check_id::ASSET_TYPE,
            !asset_type.is_empty(),
            if asset_type.is_empty() {
                "Asset type not provided".to_string()
            } else {
                format!("Asset type: {}", asset_type)
            },
        ));

        let limits = self.rules.resolve_limits(&asset_type);
        let kind = classify(&input.filename, input.content_type.as_deref());

        let allowed = self.rules.allows_format(&kind.extension)
            || (kind.extension == "pdf" && limits.allow_pdf);
        checks.push(CheckResult::new(
            check_id::FORMAT,
            allowed,
            if allowed {
                "Format allowed".to_string()
            } else {
                format!("Disallowed format: .{}", kind.extension)
            },
        ));

        if kind.extension == "pdf" || asset_type == "pdf" {
            checks.push(self.document.inspect(&kind.extension));
        } else if kind.category == AssetCategory::Vector {
            let markup = String::from_utf8_lossy(&input.bytes);
            checks.extend(self.vector.inspect(&markup));
        } else {
            // Everything else, unknown formats included, goes down the
            // raster path; undecodable bytes report as raster-error.
            let inspector = RasterInspector::new(self.decoder.as_ref());
            checks.extend(inspector.inspect(&input.bytes, &limits, self.rules.palette())?);
        }

        let size = input.bytes.len();
        let within = size <= FILE_SIZE_CEILING;
        checks.push(CheckResult::new(
            check_id::FILESIZE,
            within,
            if within {
                format!("Size OK: {} bytes", size)
            } else {
                format!("File too large: {} bytes", size)
            },
        ));

        Ok(AnalysisReport::new(&input.filename, &input.bytes, checks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new(
            800,
            800,
            30.0,
            vec!["png".into(), "jpg".into(), "svg".into()],
            vec!["#FF0000".into()],
        )
    }

    #[test]
    fn test_pipeline_rejects_invalid_rules() {
        let bad = RuleSet::new(0, 800, 30.0, vec![], vec!["#FF0000".into()]);
        assert!(matches!(
            AnalysisPipeline::new(bad),
            Err(PipelineError::Rules(RulesError::NonPositiveDimension))
        ));
    }

    #[test]
    fn test_analyze_request_roundtrip() {
        let request = AnalyzeRequest {
            filename: "logo.svg".into(),
            content_type: Some("image/svg+xml".into()),
            asset_type: Some("illustration".into()),
            data_base64: "PHN2Zy8+".into(), // "<svg/>"
        };
        let input = request.into_input().unwrap();
        assert_eq!(input.bytes, b"<svg/>");
        assert_eq!(input.filename, "logo.svg");
    }

    #[test]
    fn test_analyze_request_bad_base64() {
        let request = AnalyzeRequest {
            filename: "logo.svg".into(),
            content_type: None,
            asset_type: None,
            data_base64: "%%not base64%%".into(),
        };
        assert!(matches!(
            request.into_input(),
            Err(PipelineError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_analyze_request_from_json() {
        let input = AnalyzeRequest::from_json(
            r#"{"filename": "a.svg", "data_base64": "PHN2Zy8+"}"#,
        )
        .unwrap();
        assert_eq!(input.filename, "a.svg");
        assert!(input.asset_type.is_none());

        assert!(matches!(
            AnalyzeRequest::from_json("not json"),
            Err(PipelineError::Serialization(_))
        ));
    }

    #[test]
    fn test_asset_type_label_is_normalized() {
        let pipeline = AnalysisPipeline::new(rules()).unwrap();
        let input = AssetInput::new(b"<svg/>".to_vec(), "a.svg").with_asset_type("  Icon ");
        let report = pipeline.analyze(&input).unwrap();
        let check = report.check(check_id::ASSET_TYPE).unwrap();
        assert!(check.passed);
        assert_eq!(check.message, "Asset type: icon");
    }

    #[test]
    fn test_missing_asset_type_reported() {
        let pipeline = AnalysisPipeline::new(rules()).unwrap();
        let report = pipeline
            .analyze(&AssetInput::new(b"<svg/>".to_vec(), "a.svg"))
            .unwrap();
        let check = report.check(check_id::ASSET_TYPE).unwrap();
        assert!(!check.passed);
        assert_eq!(check.message, "Asset type not provided");
    }
}
