//! BrandCheck Core - Brand Compliance Engine
//!
//! # Ground Rules (Non-Negotiable)
//! 1. Rules Are Loaded Once, Validated Once
//! 2. Every Check Reports, Nothing Short-Circuits
//! 3. Decode Failures Never Abort An Analysis
//! 4. Deterministic Check Order
//! 5. The Pipeline Owns No Mutable State

pub mod classify;
pub mod color;
pub mod document;
pub mod pipeline;
pub mod raster;
pub mod report;
pub mod rules;
pub mod vector;

pub use classify::{classify, AssetCategory, FileKind};
pub use color::{distance, nearest_brand_color, BrandColor, ColorError, Rgb};
pub use document::DocumentInspector;
pub use pipeline::{
    AnalysisPipeline, AnalyzeRequest, AssetInput, PipelineError, FILE_SIZE_CEILING,
};
pub use raster::{ImageRasterDecoder, RasterDecodeError, RasterDecoder, RasterSummary};
pub use report::{AnalysisReport, CheckResult};
pub use rules::{AssetTypeOverride, EffectiveLimits, RuleSet, RulesError};
pub use vector::VectorInspector;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
