//! Asset classification from filename extension and declared content type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad category an asset falls into; decides which inspector runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Vector,
    Raster,
    Document,
    Unknown,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Vector => write!(f, "vector"),
            AssetCategory::Raster => write!(f, "raster"),
            AssetCategory::Document => write!(f, "document"),
            AssetCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classification outcome: lowercase extension without the dot, plus the
/// category. A filename with no usable extension yields an empty string
/// and `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileKind {
    pub extension: String,
    pub category: AssetCategory,
}

/// Classify from the filename's final dot-segment. A declared
/// `image/svg+xml` content type forces the vector category regardless of
/// extension; otherwise the extension alone drives the decision.
pub fn classify(filename: &str, declared_content_type: Option<&str>) -> FileKind {
    let extension = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    };

    let svg_declared = declared_content_type
        .map_or(false, |ct| ct.trim().eq_ignore_ascii_case("image/svg+xml"));

    let category = if svg_declared {
        AssetCategory::Vector
    } else {
        match extension.as_str() {
            "svg" => AssetCategory::Vector,
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" => AssetCategory::Raster,
            "pdf" => AssetCategory::Document,
            _ => AssetCategory::Unknown,
        }
    };

    FileKind {
        extension,
        category,
    }
}
