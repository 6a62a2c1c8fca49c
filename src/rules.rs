//! Brand rule configuration.
//!
//! A `RuleSet` is loaded once at startup, validated, and treated as
//! read-only for the process lifetime. Invalid configuration is fatal
//! before any analysis runs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::color::{BrandColor, ColorError};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse rules file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("maxWidth and maxHeight must be positive")]
    NonPositiveDimension,

    #[error("colorTolerance must not be negative")]
    NegativeTolerance,

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("Rules require engine >= {required}, current is {current}")]
    EngineVersionMismatch { required: String, current: String },

    #[error("Invalid engine version requirement: {0}")]
    InvalidVersion(String),
}

/// Sparse per-asset-type override. Absent fields fall back to the global
/// limits at resolution time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTypeOverride {
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub max_height: Option<u32>,
    #[serde(default)]
    pub color_tolerance: Option<f64>,
    #[serde(default)]
    pub allow_pdf: Option<bool>,
}

/// Limits in force for one analysis, after applying the asset-type
/// override atop the global defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveLimits {
    pub max_width: u32,
    pub max_height: u32,
    pub color_tolerance: f64,
    pub allow_pdf: bool,
}

/// Global brand rules plus per-asset-type overrides, in the
/// `brand-rules.json` document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub max_width: u32,
    pub max_height: u32,
    pub color_tolerance: f64,
    /// Lowercase extensions without dots; normalized during validation.
    pub allowed_formats: Vec<String>,
    /// 6-hex-digit tokens; order matters for nearest-color tie-breaks.
    pub brand_colors: Vec<String>,
    #[serde(default)]
    pub asset_types: HashMap<String, AssetTypeOverride>,
    #[serde(default)]
    pub engine_min_version: Option<String>,
    #[serde(skip)]
    palette: Vec<BrandColor>,
}

impl RuleSet {
    pub fn new(
        max_width: u32,
        max_height: u32,
        color_tolerance: f64,
        allowed_formats: Vec<String>,
        brand_colors: Vec<String>,
    ) -> Self {
        Self {
            max_width,
            max_height,
            color_tolerance,
            allowed_formats,
            brand_colors,
            asset_types: HashMap::new(),
            engine_min_version: None,
            palette: Vec::new(),
        }
    }

    /// Load and validate a rules document.
    pub fn load_from_file(path: &Path) -> Result<Self, RulesError> {
        let content = fs::read_to_string(path)?;
        let mut rules: RuleSet = serde_json::from_str(&content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Startup validation: limits sane, formats normalized, every palette
    /// token parseable, palette non-empty, engine requirement satisfied.
    /// Idempotent; must succeed before the rule set reaches a pipeline.
    pub fn validate(&mut self) -> Result<(), RulesError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(RulesError::NonPositiveDimension);
        }
        if self.color_tolerance < 0.0 {
            return Err(RulesError::NegativeTolerance);
        }

        if let Some(required) = &self.engine_min_version {
            let min = semver::Version::parse(required)
                .map_err(|_| RulesError::InvalidVersion(required.clone()))?;
            let current = semver::Version::parse(ENGINE_VERSION)
                .map_err(|_| RulesError::InvalidVersion(ENGINE_VERSION.to_string()))?;
            if current < min {
                return Err(RulesError::EngineVersionMismatch {
                    required: required.clone(),
                    current: ENGINE_VERSION.to_string(),
                });
            }
        }

        for format in &mut self.allowed_formats {
            *format = format.trim().trim_start_matches('.').to_ascii_lowercase();
        }

        if self.brand_colors.is_empty() {
            return Err(RulesError::Color(ColorError::EmptyPalette));
        }
        self.palette = self
            .brand_colors
            .iter()
            .map(|token| BrandColor::parse(token))
            .collect::<Result<_, _>>()?;

        Ok(())
    }

    /// Parsed palette, in configuration order. Empty until `validate`.
    pub fn palette(&self) -> &[BrandColor] {
        &self.palette
    }

    pub fn allows_format(&self, extension: &str) -> bool {
        self.allowed_formats.iter().any(|f| f == extension)
    }

    /// Effective limits for a declared asset type. Total: unknown labels
    /// (including the implicit unspecified one) resolve to the global
    /// limits with PDFs disallowed.
    pub fn resolve_limits(&self, asset_type: &str) -> EffectiveLimits {
        let over = self
            .asset_types
            .get(asset_type)
            .cloned()
            .or_else(|| builtin_override(asset_type))
            .unwrap_or_default();
        EffectiveLimits {
            max_width: over.max_width.unwrap_or(self.max_width),
            max_height: over.max_height.unwrap_or(self.max_height),
            color_tolerance: over.color_tolerance.unwrap_or(self.color_tolerance),
            allow_pdf: over.allow_pdf.unwrap_or(false),
        }
    }
}

/// Built-in overrides for the well-known asset types. A rules document
/// may shadow these per key via `assetTypes`.
fn builtin_override(asset_type: &str) -> Option<AssetTypeOverride> {
    match asset_type {
        "icon" => Some(AssetTypeOverride {
            max_width: Some(512),
            max_height: Some(512),
            color_tolerance: Some(40.0),
            allow_pdf: None,
        }),
        "illustration" => Some(AssetTypeOverride::default()),
        "pdf" => Some(AssetTypeOverride {
            allow_pdf: Some(true),
            ..Default::default()
        }),
        _ => None,
    }
}
