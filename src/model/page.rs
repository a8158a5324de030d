//! Page-level types.

use super::{AssetId, Bounds, PageImage, ShapeId};
use serde::Serialize;

/// One rendered, placed page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Page number in the source PDF (1-indexed)
    pub number: u32,

    /// Rendered page image
    pub image: PageImage,

    /// Placement in document-space units
    pub bounds: Bounds,

    /// Identifier of the page image in the host's asset store
    pub asset_id: AssetId,

    /// Identifier of the placeable object the host creates for this page
    pub shape_id: ShapeId,
}

impl Page {
    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.bounds.width > self.bounds.height
    }

    /// Device pixels per document-space unit of the rendered image.
    pub fn pixel_density(&self) -> f64 {
        if self.bounds.width > 0.0 {
            f64::from(self.image.pixel_width) / self.bounds.width
        } else {
            0.0
        }
    }
}
