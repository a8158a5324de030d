//! Observer hooks for following an import while it runs.
//!
//! # Example
//!
//! ```
//! use pdfcanvas::progress::ImportObserver;
//! use pdfcanvas::RasterPage;
//!
//! struct PrintProgress;
//!
//! impl ImportObserver for PrintProgress {
//!     fn on_page(&mut self, page: &RasterPage, rendered: usize, selected: usize) {
//!         println!("page {} ({}/{})", page.number(), rendered, selected);
//!     }
//! }
//! ```

use crate::raster::RasterPage;

/// Trait for receiving import events.
///
/// All methods do nothing by default. Events arrive on the importing
/// thread, in page order.
pub trait ImportObserver {
    /// Called once the document is open, before any page is rendered.
    ///
    /// # Arguments
    /// * `selected` - Pages that will be rendered
    /// * `page_count` - Pages in the source document
    fn on_start(&mut self, selected: usize, page_count: usize) {
        let _ = (selected, page_count);
    }

    /// Called after each page is rendered and encoded.
    ///
    /// # Arguments
    /// * `page` - The page just rendered
    /// * `rendered` - Pages rendered so far, this one included
    /// * `selected` - Pages that will be rendered in total
    fn on_page(&mut self, page: &RasterPage, rendered: usize, selected: usize) {
        let _ = (page, rendered, selected);
    }
}

/// Observer that ignores every event.
impl ImportObserver for () {}
