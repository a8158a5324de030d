//! # pdfcanvas
//!
//! Import PDF documents as pages for an infinite-canvas editor.
//!
//! Every page is rasterized to an image, stacked in a single centered
//! column, and given the asset and shape identifiers a host editor needs to
//! register the image and place it on the canvas.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfcanvas::import_file;
//!
//! fn main() -> pdfcanvas::Result<()> {
//!     let doc = import_file("document.pdf")?;
//!
//!     for page in &doc.pages {
//!         println!(
//!             "page {} at ({}, {}) size {}x{} -> {}",
//!             page.number,
//!             page.bounds.x,
//!             page.bounds.y,
//!             page.bounds.width,
//!             page.bounds.height,
//!             page.shape_id
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`raster::PageRasterizer`] renders pages one at a time, in source order,
//!   onto a single reused scratch surface.
//! - [`layout::LayoutAccumulator`] stacks them with a fixed gap and centers
//!   them on the widest page.
//! - [`assemble::DocumentAssembler`] draws identifiers from an injected
//!   [`IdAllocator`] and returns the [`Document`].
//!
//! [`PdfImporter::import_observed`] reports each page to an
//! [`ImportObserver`] as it renders, and [`PdfImporter::measure`] computes
//! the same layout from page boxes without rendering.
//!
//! Any failure aborts the import; no partial documents are returned.

pub mod assemble;
pub mod detect;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod options;
pub mod progress;
pub mod raster;

// Re-export commonly used types
pub use assemble::DocumentAssembler;
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use export::{to_json, JsonFormat};
pub use layout::{Layout, LayoutAccumulator, LayoutOptions};
pub use model::{
    AssetId, Bounds, Document, IdAllocator, ImageFormat, Page, PageImage, RandomIds,
    SequentialIds, ShapeId, SourceBytes,
};
pub use options::PageSelection;
pub use progress::ImportObserver;
pub use raster::{
    HayroBackend, PageExtent, PageRasterizer, PdfBackend, RasterOptions, RasterPage,
};

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Import a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdfcanvas::import_bytes;
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let doc = import_bytes("document.pdf", data).unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn import_bytes(name: impl Into<String>, data: impl Into<SourceBytes>) -> Result<Document> {
    PdfImporter::new().import(name, data)
}

/// Import a PDF file, named after its file name.
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    PdfImporter::new().import_file(path)
}

/// Import a PDF from a reader.
pub fn import_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Document> {
    PdfImporter::new().import_reader(name, reader)
}

/// Builder for importing PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfcanvas::{PdfImporter, PageSelection};
///
/// let doc = PdfImporter::new()
///     .with_device_pixel_ratio(2.0)
///     .with_page_spacing(48.0)
///     .with_pages(PageSelection::Range(1..=3))
///     .import_file("document.pdf")?;
/// # Ok::<(), pdfcanvas::Error>(())
/// ```
#[derive(Clone)]
pub struct PdfImporter {
    raster_options: RasterOptions,
    layout_options: LayoutOptions,
    backend: Arc<dyn PdfBackend>,
    ids: Arc<dyn IdAllocator>,
}

impl PdfImporter {
    /// Create an importer with the `hayro` backend and random ids.
    pub fn new() -> Self {
        Self {
            raster_options: RasterOptions::default(),
            layout_options: LayoutOptions::default(),
            backend: Arc::new(HayroBackend::new()),
            ids: Arc::new(RandomIds),
        }
    }

    /// Set the device pixel ratio of the target display.
    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.raster_options = self.raster_options.with_device_pixel_ratio(ratio);
        self
    }

    /// Set the extra magnification used when rendering.
    pub fn with_visual_scale(mut self, scale: f32) -> Self {
        self.raster_options = self.raster_options.with_visual_scale(scale);
        self
    }

    /// Set the encoding of page images.
    pub fn with_image_format(mut self, format: ImageFormat) -> Self {
        self.raster_options = self.raster_options.with_image_format(format);
        self
    }

    /// Set the largest surface dimension a page may render to.
    pub fn with_max_surface_dimension(mut self, pixels: u32) -> Self {
        self.raster_options = self.raster_options.with_max_surface_dimension(pixels);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.raster_options = self.raster_options.with_pages(pages);
        self
    }

    /// Set the vertical gap between pages.
    pub fn with_page_spacing(mut self, spacing: f64) -> Self {
        self.layout_options = self.layout_options.with_page_spacing(spacing);
        self
    }

    /// Replace all raster options.
    pub fn with_raster_options(mut self, options: RasterOptions) -> Self {
        self.raster_options = options;
        self
    }

    /// Replace all layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Decode and render with a different backend.
    pub fn with_backend(mut self, backend: Arc<dyn PdfBackend>) -> Self {
        self.backend = backend;
        self
    }

    /// Draw page identifiers from the host editor's allocator.
    pub fn with_id_allocator(mut self, ids: Arc<dyn IdAllocator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn raster_options(&self) -> &RasterOptions {
        &self.raster_options
    }

    pub fn layout_options(&self) -> &LayoutOptions {
        &self.layout_options
    }

    /// Run the full pipeline on `source`.
    pub fn import(
        &self,
        name: impl Into<String>,
        source: impl Into<SourceBytes>,
    ) -> Result<Document> {
        self.import_observed(name, source, &mut ())
    }

    /// Run the full pipeline, reporting each rendered page to `observer`.
    ///
    /// The observer sees pages as they render; a later failure still
    /// discards them.
    pub fn import_observed(
        &self,
        name: impl Into<String>,
        source: impl Into<SourceBytes>,
        observer: &mut dyn ImportObserver,
    ) -> Result<Document> {
        let name = name.into();
        let source = source.into();
        self.layout_options.validate()?;

        let rasterizer =
            PageRasterizer::open(self.backend.as_ref(), &source, self.raster_options.clone())?;
        let selected = rasterizer.remaining();
        log::debug!(
            "Importing '{}': {} of {} pages selected",
            name,
            selected,
            rasterizer.page_count()
        );
        observer.on_start(selected, rasterizer.page_count());

        let mut layout = LayoutAccumulator::new(&self.layout_options);
        for page in rasterizer {
            let page = page?;
            observer.on_page(&page, layout.len() + 1, selected);
            let (width, height) = (page.width, page.height);
            layout.push(page, width, height);
        }

        Ok(DocumentAssembler::new(self.ids.as_ref()).assemble(name, layout.finish(), source))
    }

    /// Lay out the selected pages from their page boxes alone.
    ///
    /// Nothing is rendered or encoded and no identifiers are drawn; the
    /// geometry matches what [`PdfImporter::import`] would produce.
    pub fn measure(&self, source: impl Into<SourceBytes>) -> Result<Layout<PageExtent>> {
        let source = source.into();
        self.layout_options.validate()?;

        let rasterizer =
            PageRasterizer::open(self.backend.as_ref(), &source, self.raster_options.clone())?;
        let mut layout = LayoutAccumulator::new(&self.layout_options);
        for extent in rasterizer.measure()? {
            layout.push(extent, extent.width, extent.height);
        }
        Ok(layout.finish())
    }

    /// Import a PDF file, named after its file name.
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path)?;
        self.import(name, data)
    }

    /// Import a PDF from a reader.
    pub fn import_reader<R: Read>(&self, name: impl Into<String>, mut reader: R) -> Result<Document> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.import(name, data)
    }

    /// Run the pipeline on tokio's blocking pool.
    ///
    /// Pages are still rendered one after another; the calling task stays
    /// free while they are.
    #[cfg(feature = "async")]
    pub async fn import_async(
        &self,
        name: impl Into<String>,
        source: impl Into<SourceBytes>,
    ) -> Result<Document> {
        let importer = self.clone();
        let name = name.into();
        let source = source.into();
        tokio::task::spawn_blocking(move || importer.import(name, source))
            .await
            .map_err(|e| Error::Other(format!("import task failed: {}", e)))?
    }
}

impl Default for PdfImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PdfImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfImporter")
            .field("raster_options", &self.raster_options)
            .field("layout_options", &self.layout_options)
            .field("backend", &self.backend.name())
            .finish()
    }
}
