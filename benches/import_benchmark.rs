//! Benchmarks for pdfcanvas import performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic PDFs with letter-sized pages.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfcanvas::layout::{stack_and_center, LayoutOptions};
use pdfcanvas::raster::Surface;
use pdfcanvas::{ImageFormat, PdfImporter};

/// Creates a synthetic PDF with the given number of letter-sized pages.
fn create_test_pdf(page_count: usize) -> Vec<u8> {
    let mut content = String::new();
    let mut offsets = Vec::new();

    content.push_str("%PDF-1.4\n");

    offsets.push(content.len());
    content.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 3 + i * 2)).collect();
    offsets.push(content.len());
    content.push_str(&format!(
        "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
        kids.join(" "),
        page_count
    ));

    for i in 0..page_count {
        let page_obj = 3 + i * 2;
        let content_obj = page_obj + 1;

        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R >>\nendobj\n",
            page_obj, content_obj
        ));

        let stream = format!("0.1 0.3 0.{} rg 72 72 468 {} re f", i % 10, 100 + i * 10);
        offsets.push(content.len());
        content.push_str(&format!(
            "{} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
            content_obj,
            stream.len(),
            stream
        ));
    }

    let xref_offset = content.len();
    content.push_str(&format!("xref\n0 {}\n", offsets.len() + 1));
    content.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        content.push_str(&format!("{:010} 00000 n \n", offset));
    }

    content.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        offsets.len() + 1,
        xref_offset
    ));

    content.into_bytes()
}

/// Benchmark PDF header detection.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = create_test_pdf(1);
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("detect_valid_pdf", |b| {
        b.iter(|| pdfcanvas::detect_format_from_bytes(black_box(&pdf_data)).unwrap());
    });

    c.bench_function("detect_non_pdf", |b| {
        b.iter(|| pdfcanvas::detect_format_from_bytes(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark the full pipeline at various sizes.
fn bench_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("import");
    group.sample_size(10);

    for page_count in [1, 5, 10].iter() {
        let data = Arc::new(create_test_pdf(*page_count));
        let importer = PdfImporter::new();

        group.bench_function(format!("{}_pages_png", page_count), |b| {
            b.iter(|| importer.import("bench.pdf", black_box(Arc::clone(&data))).unwrap());
        });
    }

    let data = Arc::new(create_test_pdf(5));
    let importer = PdfImporter::new().with_image_format(ImageFormat::Jpeg { quality: 85 });
    group.bench_function("5_pages_jpeg", |b| {
        b.iter(|| importer.import("bench.pdf", black_box(Arc::clone(&data))).unwrap());
    });

    group.finish();
}

/// Benchmark layout alone.
fn bench_layout(c: &mut Criterion) {
    let sizes: Vec<(f64, f64)> = (0..1000)
        .map(|i| (400.0 + (i % 7) as f64 * 50.0, 600.0 + (i % 3) as f64 * 100.0))
        .collect();
    let options = LayoutOptions::default();

    c.bench_function("layout_1000_pages", |b| {
        b.iter(|| stack_and_center(black_box(sizes.iter().copied()), &options));
    });
}

/// Benchmark encoding a letter page at 1.5x.
fn bench_surface_encode(c: &mut Criterion) {
    let mut surface = Surface::new(16_384);
    surface.resize(918, 1188).unwrap();
    surface.fill([255, 255, 255, 255]);

    c.bench_function("encode_letter_png", |b| {
        b.iter(|| surface.encode(black_box(ImageFormat::Png)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_format_detection,
    bench_import,
    bench_layout,
    bench_surface_encode,
);
criterion_main!(benches);
