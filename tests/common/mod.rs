//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pdfcanvas::raster::{device_pixels, PdfBackend, PdfPages, Surface};
use pdfcanvas::{Error, Result, SourceBytes};

/// Build a well-formed PDF with one page per `(width, height)` media box,
/// in points. Each page draws a filled rectangle.
pub fn synthetic_pdf(sizes: &[(u32, u32)]) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

    let mut push_object = |out: &mut Vec<u8>, body: String| {
        offsets.push(out.len());
        let number = offsets.len();
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", number, body).as_bytes());
    };

    push_object(&mut out, "<< /Type /Catalog /Pages 2 0 R >>".to_string());

    let kids: Vec<String> = (0..sizes.len())
        .map(|i| format!("{} 0 R", 3 + i * 2))
        .collect();
    push_object(
        &mut out,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            sizes.len()
        ),
    );

    for (i, (width, height)) in sizes.iter().enumerate() {
        let content_obj = 4 + i * 2;
        push_object(
            &mut out,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R >>",
                width, height, content_obj
            ),
        );
        let stream = format!("0.2 0.4 0.8 rg 10 10 {} {} re f", width / 2, height / 2);
        push_object(
            &mut out,
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ),
        );
    }

    let xref_offset = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1);
    for offset in &offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        xref_offset
    ));
    out.extend_from_slice(xref.as_bytes());
    out
}

/// Backend that draws blank pages of fixed sizes (in points) without
/// decoding anything. Counts how often it is opened.
pub struct MockBackend {
    pub sizes: Vec<(f32, f32)>,
    pub fail_on: Option<usize>,
    pub opened: AtomicUsize,
}

impl MockBackend {
    pub fn new(sizes: &[(f32, f32)]) -> Self {
        Self {
            sizes: sizes.to_vec(),
            fail_on: None,
            opened: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, index: usize) -> Self {
        self.fail_on = Some(index);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn open(&self, _source: &SourceBytes) -> Result<Box<dyn PdfPages>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockPages {
            sizes: self.sizes.clone(),
            fail_on: self.fail_on,
            rendered: Cell::new(0),
        }))
    }
}

struct MockPages {
    sizes: Vec<(f32, f32)>,
    fail_on: Option<usize>,
    rendered: Cell<usize>,
}

impl PdfPages for MockPages {
    fn page_count(&self) -> usize {
        self.sizes.len()
    }

    fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        Ok(self.sizes[index])
    }

    fn render_page(&self, index: usize, scale: f32, surface: &mut Surface) -> Result<()> {
        if self.fail_on == Some(index) {
            return Err(Error::RenderSurface(format!(
                "no drawing context for page {}",
                index + 1
            )));
        }
        // Pages must be rendered strictly in order.
        assert!(index >= self.rendered.get());
        self.rendered.set(index + 1);

        let (width, height) = self.sizes[index];
        surface.resize(device_pixels(width, scale), device_pixels(height, scale))?;
        surface.fill([255, 255, 255, 255]);
        Ok(())
    }
}

/// Any bytes with a PDF header; the mock backend never looks past it.
pub fn pdf_header_bytes() -> Vec<u8> {
    b"%PDF-1.7\n%%EOF\n".to_vec()
}
