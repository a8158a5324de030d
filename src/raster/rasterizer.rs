//! Lazy, in-order page rasterization.

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{PageImage, SourceBytes};

use super::{device_pixels, PdfBackend, PdfPages, RasterOptions, Surface};

/// One rendered page, before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPage {
    /// 0-based page index in the source PDF
    pub index: usize,

    /// Encoded page image
    pub image: PageImage,

    /// Width in device-independent units
    pub width: f64,

    /// Height in device-independent units
    pub height: f64,
}

impl RasterPage {
    /// 1-indexed page number in the source PDF.
    pub fn number(&self) -> u32 {
        self.index as u32 + 1
    }
}

/// Size a selected page will render at, read without rendering it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageExtent {
    /// 0-based page index in the source PDF
    pub index: usize,
    pub pixel_width: u32,
    pub pixel_height: u32,

    /// Width in device-independent units
    pub width: f64,

    /// Height in device-independent units
    pub height: f64,
}

impl PageExtent {
    /// 1-indexed page number in the source PDF.
    pub fn number(&self) -> u32 {
        self.index as u32 + 1
    }
}

/// Iterator that renders selected pages one at a time, in source order.
///
/// All pages share one scratch [`Surface`]. It is released as soon as the
/// last page is encoded or a page fails; after a failure the iterator is
/// exhausted.
pub struct PageRasterizer {
    pages: Box<dyn PdfPages>,
    options: RasterOptions,
    surface: Surface,
    indices: std::vec::IntoIter<usize>,
    page_count: usize,
    finished: bool,
}

impl PageRasterizer {
    /// Open `source` with `backend` and prepare to render the selected pages.
    ///
    /// Nothing is rendered until the iterator is advanced.
    pub fn open(
        backend: &dyn PdfBackend,
        source: &SourceBytes,
        options: RasterOptions,
    ) -> Result<Self> {
        options.validate()?;
        let format = detect_format_from_bytes(source)?;
        log::debug!(
            "Opening {} ({} bytes) with {} backend",
            format,
            source.len(),
            backend.name()
        );

        let pages = backend.open(source)?;
        let page_count = pages.page_count();
        if page_count == 0 {
            return Err(Error::Decode("document has no pages".into()));
        }
        let indices = options.pages.resolve(page_count)?;

        let surface = Surface::new(options.max_surface_dimension);
        Ok(Self {
            pages,
            options,
            surface,
            indices: indices.into_iter(),
            page_count,
            finished: false,
        })
    }

    /// Number of pages in the source PDF.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Pages still to be rendered.
    pub fn remaining(&self) -> usize {
        if self.finished {
            0
        } else {
            self.indices.len()
        }
    }

    /// Whether the scratch surface has been released.
    pub fn surface_released(&self) -> bool {
        self.surface.is_released()
    }

    /// Sizes of the pages still to be rendered, in render order.
    ///
    /// Only page boxes are read; nothing is drawn or encoded.
    pub fn measure(&self) -> Result<Vec<PageExtent>> {
        if self.finished {
            return Ok(Vec::new());
        }
        let scale = self.options.render_scale();
        self.indices
            .as_slice()
            .iter()
            .map(|&index| {
                let (width, height) = self.pages.page_size(index)?;
                let pixel_width = device_pixels(width, scale);
                let pixel_height = device_pixels(height, scale);
                Ok(PageExtent {
                    index,
                    pixel_width,
                    pixel_height,
                    width: self.document_units(pixel_width),
                    height: self.document_units(pixel_height),
                })
            })
            .collect()
    }

    // Only the pixel ratio is undone; the visual scale stays part of the
    // page's document-space size.
    fn document_units(&self, pixels: u32) -> f64 {
        f64::from(pixels) / f64::from(self.options.device_pixel_ratio)
    }

    fn render(&mut self, index: usize) -> Result<RasterPage> {
        self.pages
            .render_page(index, self.options.render_scale(), &mut self.surface)?;

        let pixel_width = self.surface.width();
        let pixel_height = self.surface.height();
        let data = self.surface.encode(self.options.image_format)?;

        let width = self.document_units(pixel_width);
        let height = self.document_units(pixel_height);

        log::debug!(
            "Rendered page {}/{}: {}x{} px, {} bytes",
            index + 1,
            self.page_count,
            pixel_width,
            pixel_height,
            data.len()
        );

        Ok(RasterPage {
            index,
            image: PageImage::new(data, self.options.image_format, pixel_width, pixel_height),
            width,
            height,
        })
    }

    fn finish(&mut self) {
        self.finished = true;
        self.surface.release();
    }
}

impl Iterator for PageRasterizer {
    type Item = Result<RasterPage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let Some(index) = self.indices.next() else {
            self.finish();
            return None;
        };

        let result = self.render(index);
        if let Err(ref e) = result {
            log::debug!("Rendering page {} failed: {}", index + 1, e);
            self.finish();
        } else if self.indices.len() == 0 {
            self.finish();
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl std::fmt::Debug for PageRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRasterizer")
            .field("options", &self.options)
            .field("page_count", &self.page_count)
            .field("remaining", &self.remaining())
            .field("surface", &self.surface)
            .finish()
    }
}
