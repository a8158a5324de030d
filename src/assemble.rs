//! Final assembly of laid-out pages into a [`Document`].

use crate::layout::Layout;
use crate::model::{AssetId, Document, IdAllocator, Page, ShapeId, SourceBytes};
use crate::raster::RasterPage;

/// Gives every laid-out page its asset and shape identifiers.
pub struct DocumentAssembler<'a> {
    ids: &'a dyn IdAllocator,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(ids: &'a dyn IdAllocator) -> Self {
        Self { ids }
    }

    /// Build the document. Page order follows the layout.
    pub fn assemble(
        &self,
        name: impl Into<String>,
        layout: Layout<RasterPage>,
        source: SourceBytes,
    ) -> Document {
        let widest = layout.widest;
        let height = layout.height;

        let pages: Vec<Page> = layout
            .into_iter()
            .map(|placed| Page {
                number: placed.item.number(),
                image: placed.item.image,
                bounds: placed.bounds,
                asset_id: AssetId::new(self.ids.next_id()),
                shape_id: ShapeId::new(self.ids.next_id()),
            })
            .collect();

        let document = Document {
            name: name.into(),
            pages,
            source,
        };

        log::info!(
            "Assembled '{}': {} pages, {}x{} document units",
            document.name,
            document.pages.len(),
            widest,
            height
        );

        document
    }
}
