//! Raster decoding and checks.
//!
//! `RasterDecoder` is the only surface touching a native image library.
//! Everything downstream works from the `RasterSummary` it produces.

use image::imageops::FilterType;
use thiserror::Error;

use crate::color::{nearest_brand_color, BrandColor, ColorError, Rgb};
use crate::report::{check_id, CheckResult};
use crate::rules::EffectiveLimits;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RasterDecodeError(pub String);

/// What an analysis needs from a decoded raster: intrinsic dimensions and
/// one averaged color sample, the dominant-color proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSummary {
    pub width: u32,
    pub height: u32,
    pub average: Rgb,
}

/// Decode capability. Implementations must be pure per call; the pipeline
/// shares one instance across concurrent analyses.
pub trait RasterDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<RasterSummary, RasterDecodeError>;
}

/// Default decoder backed by the `image` crate. The averaged sample comes
/// from collapsing the full image to a single pixel.
pub struct ImageRasterDecoder;

impl RasterDecoder for ImageRasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RasterSummary, RasterDecodeError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| RasterDecodeError(e.to_string()))?;
        let (width, height) = (img.width(), img.height());
        let sample = img.resize_exact(1, 1, FilterType::Triangle).to_rgb8();
        let pixel = sample.get_pixel(0, 0);
        Ok(RasterSummary {
            width,
            height,
            average: Rgb::new(pixel[0], pixel[1], pixel[2]),
        })
    }
}

/// Runs the raster checks against effective limits and the brand palette.
pub struct RasterInspector<'a> {
    decoder: &'a dyn RasterDecoder,
}

impl<'a> RasterInspector<'a> {
    pub fn new(decoder: &'a dyn RasterDecoder) -> Self {
        Self { decoder }
    }

    /// `dimensions` then `dominantColor`; a decode failure collapses the
    /// whole raster path into a single `raster-error` result. The only
    /// hard error is an empty palette, which load-time validation is
    /// supposed to have ruled out.
    pub fn inspect(
        &self,
        bytes: &[u8],
        limits: &EffectiveLimits,
        palette: &[BrandColor],
    ) -> Result<Vec<CheckResult>, ColorError> {
        let summary = match self.decoder.decode(bytes) {
            Ok(s) => s,
            Err(e) => {
                return Ok(vec![CheckResult::fail(
                    check_id::RASTER_ERROR,
                    format!("Error processing raster image: {}", e),
                )])
            }
        };

        let mut checks = Vec::with_capacity(2);

        let within = summary.width <= limits.max_width && summary.height <= limits.max_height;
        checks.push(CheckResult::new(
            check_id::DIMENSIONS,
            within,
            format!(
                "Dimensions: {}x{} (limit {}x{})",
                summary.width, summary.height, limits.max_width, limits.max_height
            ),
        ));

        let nearest = nearest_brand_color(summary.average, palette)?;
        let close = nearest.distance <= limits.color_tolerance;
        checks.push(CheckResult::new(
            check_id::DOMINANT_COLOR,
            close,
            if close {
                format!("Matches brand color {}", nearest.matched.token)
            } else {
                format!(
                    "No close brand color (closest: {}, dist {})",
                    nearest.matched.token,
                    nearest.distance.round()
                )
            },
        ));

        Ok(checks)
    }
}
