//! Rasterization options and configuration.

use crate::error::{Error, Result};
use crate::model::ImageFormat;
use crate::options::PageSelection;

/// Default magnification applied on top of the device pixel ratio.
pub const DEFAULT_VISUAL_SCALE: f32 = 1.5;

/// Default cap on either surface dimension, in device pixels.
pub const DEFAULT_MAX_SURFACE_DIMENSION: u32 = 16_384;

/// Options for rasterizing PDF pages.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    /// Device pixels per document-space unit on the target display
    pub device_pixel_ratio: f32,

    /// Extra magnification for crisper pages when zoomed in
    pub visual_scale: f32,

    /// Encoding of the rendered pages
    pub image_format: ImageFormat,

    /// Largest width or height the scratch surface may take
    pub max_surface_dimension: u32,

    /// Which source pages to rasterize
    pub pages: PageSelection,
}

impl RasterOptions {
    /// Create new raster options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the device pixel ratio.
    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Set the visual scale.
    pub fn with_visual_scale(mut self, scale: f32) -> Self {
        self.visual_scale = scale;
        self
    }

    /// Set the image format.
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.image_format = format;
        self
    }

    /// Set the maximum surface dimension.
    pub fn with_max_surface_dimension(mut self, pixels: u32) -> Self {
        self.max_surface_dimension = pixels;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Device pixels per PDF point used when rendering.
    pub fn render_scale(&self) -> f32 {
        self.device_pixel_ratio * self.visual_scale
    }

    /// Reject options no surface could be rendered with.
    pub fn validate(&self) -> Result<()> {
        if !(self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0) {
            return Err(Error::InvalidOptions(format!(
                "device pixel ratio must be positive, got {}",
                self.device_pixel_ratio
            )));
        }
        if !(self.visual_scale.is_finite() && self.visual_scale > 0.0) {
            return Err(Error::InvalidOptions(format!(
                "visual scale must be positive, got {}",
                self.visual_scale
            )));
        }
        if self.max_surface_dimension == 0 {
            return Err(Error::InvalidOptions(
                "max surface dimension must be at least 1".into(),
            ));
        }
        if let ImageFormat::Jpeg { quality } = self.image_format {
            if !(1..=100).contains(&quality) {
                return Err(Error::InvalidOptions(format!(
                    "JPEG quality must be within 1-100, got {}",
                    quality
                )));
            }
        }
        Ok(())
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
            visual_scale: DEFAULT_VISUAL_SCALE,
            image_format: ImageFormat::Png,
            max_surface_dimension: DEFAULT_MAX_SURFACE_DIMENSION,
            pages: PageSelection::All,
        }
    }
}
