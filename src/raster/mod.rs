//! Page rasterization.
//!
//! [`PageRasterizer`] walks the selected pages of a PDF in source order and
//! renders each one through a [`PdfBackend`] onto a shared scratch
//! [`Surface`], yielding encoded images with device-independent sizes.

mod backend;
mod options;
mod rasterizer;
mod surface;

pub use backend::{device_pixels, HayroBackend, PdfBackend, PdfPages};
pub use options::{RasterOptions, DEFAULT_MAX_SURFACE_DIMENSION, DEFAULT_VISUAL_SCALE};
pub use rasterizer::{PageExtent, PageRasterizer, RasterPage};
pub use surface::Surface;
