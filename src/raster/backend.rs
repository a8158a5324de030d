//! PDF decoding backends.
//!
//! A backend opens a byte buffer and draws single pages onto a [`Surface`].
//! Everything else (page order, scaling, encoding, layout) stays in the
//! crate, so a backend only has to answer "how many pages" and "draw page
//! `i` at this scale".

use hayro::hayro_interpret::InterpreterSettings;
use hayro::hayro_syntax::page::Page;
use hayro::hayro_syntax::Pdf;
use hayro::{render, RenderSettings};

use crate::error::{Error, Result};
use crate::model::SourceBytes;

use super::Surface;

/// Trait for PDF decoders.
///
/// Implement this trait to rasterize with a different PDF library.
pub trait PdfBackend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Open a PDF held in `source`.
    ///
    /// Fails with [`Error::Decode`] if the bytes are not an openable PDF.
    fn open(&self, source: &SourceBytes) -> Result<Box<dyn PdfPages>>;
}

/// An opened PDF, ready to draw pages.
pub trait PdfPages {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Size of page `index` (0-based) in PDF points, rotation applied.
    fn page_size(&self, index: usize) -> Result<(f32, f32)>;

    /// Draw page `index` (0-based) into `surface`.
    ///
    /// `scale` is the number of device pixels per PDF point. The backend
    /// resizes the surface to [`device_pixels`] of the page size before it
    /// allocates anything of its own, then replaces all of its pixels.
    fn render_page(&self, index: usize, scale: f32, surface: &mut Surface) -> Result<()>;
}

/// Device pixels covered by `points` at `scale`, rounded down.
///
/// Negative and NaN inputs give 0; overly large ones saturate.
pub fn device_pixels(points: f32, scale: f32) -> u32 {
    (f64::from(points) * f64::from(scale)).floor() as u32
}

/// Pure-Rust backend built on `hayro`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HayroBackend;

impl HayroBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for HayroBackend {
    fn name(&self) -> &str {
        "hayro"
    }

    fn open(&self, source: &SourceBytes) -> Result<Box<dyn PdfPages>> {
        let pdf = Pdf::new(source.clone())
            .map_err(|e| Error::Decode(format!("failed to open PDF: {:?}", e)))?;
        Ok(Box::new(HayroPages { pdf }))
    }
}

struct HayroPages {
    pdf: Pdf,
}

impl HayroPages {
    fn page(&self, index: usize) -> Result<&Page<'_>> {
        let pages = self.pdf.pages();
        pages
            .get(index)
            .ok_or(Error::PageOutOfRange(index as u32 + 1, pages.len() as u32))
    }
}

impl PdfPages for HayroPages {
    fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        Ok(self.page(index)?.render_dimensions())
    }

    fn render_page(&self, index: usize, scale: f32, surface: &mut Surface) -> Result<()> {
        let page = self.page(index)?;
        let (width, height) = page.render_dimensions();
        let (pixel_width, pixel_height) = (device_pixels(width, scale), device_pixels(height, scale));

        // hayro allocates its pixmap unchecked, so the cap is enforced here first.
        surface.resize(pixel_width, pixel_height)?;
        let (Ok(viewport_width), Ok(viewport_height)) =
            (u16::try_from(pixel_width), u16::try_from(pixel_height))
        else {
            return Err(Error::RenderSurface(format!(
                "{}x{} exceeds the renderer's {} pixel limit",
                pixel_width,
                pixel_height,
                u16::MAX
            )));
        };

        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            width: Some(viewport_width),
            height: Some(viewport_height),
            ..Default::default()
        };
        let pixmap = render(page, &InterpreterSettings::default(), &render_settings);
        surface.write_premultiplied(pixmap.data_as_u8_slice())
    }
}
