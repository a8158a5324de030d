//! Document-level types.

use super::{Bounds, Page};
use serde::Serialize;
use std::sync::Arc;

/// Original PDF bytes, shared between the document and the decoder.
pub type SourceBytes = Arc<Vec<u8>>;

/// An imported PDF, laid out for the host editor.
///
/// Serializes to the JSON manifest, which leaves out the source and image
/// bytes. The manifest is write-only: a `Document` only comes out of an
/// import, so it always carries its source.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Display name of the source file
    pub name: String,

    /// Pages in source order
    pub pages: Vec<Page>,

    /// Original PDF bytes, kept for re-export
    #[serde(skip)]
    pub source: SourceBytes,
}

impl Document {
    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by its source page number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        self.pages.iter().find(|page| page.number == number)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The original PDF bytes.
    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_slice()
    }

    /// Width of the widest page.
    pub fn widest(&self) -> f64 {
        self.pages
            .iter()
            .map(|page| page.bounds.width)
            .fold(0.0, f64::max)
    }

    /// Rectangle covering every page, or `None` for an empty document.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.pages
            .iter()
            .map(|page| page.bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssetId, ImageFormat, PageImage, ShapeId};
    use uuid::Uuid;

    fn page(number: u32, bounds: Bounds) -> Page {
        Page {
            number,
            image: PageImage::new(Vec::new(), ImageFormat::Png, 0, 0),
            bounds,
            asset_id: AssetId::new(Uuid::from_u64_pair(0, u64::from(number) * 2)),
            shape_id: ShapeId::new(Uuid::from_u64_pair(0, u64::from(number) * 2 + 1)),
        }
    }

    fn sample() -> Document {
        Document {
            name: "sample.pdf".into(),
            pages: vec![
                page(1, Bounds::new(20.0, 0.0, 40.0, 100.0)),
                page(2, Bounds::new(0.0, 132.0, 80.0, 50.0)),
            ],
            source: Arc::new(b"%PDF-1.4".to_vec()),
        }
    }

    #[test]
    fn test_page_lookup() {
        let doc = sample();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.get_page(2).unwrap().bounds.y, 132.0);
        assert!(doc.get_page(0).is_none());
        assert!(doc.get_page(3).is_none());
    }

    #[test]
    fn test_content_bounds_and_widest() {
        let doc = sample();
        assert_eq!(doc.widest(), 80.0);
        assert_eq!(
            doc.content_bounds(),
            Some(Bounds::new(0.0, 0.0, 80.0, 182.0))
        );
    }

    #[test]
    fn test_landscape() {
        let doc = sample();
        assert!(!doc.pages[0].is_landscape());
        assert!(doc.pages[1].is_landscape());
    }

    #[test]
    fn test_source_bytes_retained() {
        let doc = sample();
        assert_eq!(doc.source_bytes(), b"%PDF-1.4");
    }
}
