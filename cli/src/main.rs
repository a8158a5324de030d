//! pdfcanvas CLI - import PDF pages as canvas images

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfcanvas::{
    ImageFormat, ImportObserver, JsonFormat, Layout, LayoutOptions, PageExtent, PageSelection,
    PdfFormat, PdfImporter, RasterOptions, RasterPage, SourceBytes,
};

#[derive(Parser)]
#[command(name = "pdfcanvas")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rasterize PDF pages and stack them for an infinite canvas", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every page and write the images plus layout.json
    Import {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the page layout as JSON without writing images
    Layout {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct RenderArgs {
    /// Device pixel ratio of the target display
    #[arg(long, env = "PDFCANVAS_DEVICE_PIXEL_RATIO", default_value = "1.0")]
    dpr: f32,

    /// Extra magnification applied when rendering
    #[arg(long, env = "PDFCANVAS_VISUAL_SCALE", default_value = "1.5")]
    visual_scale: f32,

    /// Vertical gap between pages
    #[arg(long, default_value = "32")]
    spacing: f64,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Image encoding for rendered pages
    #[arg(long, value_enum, default_value = "png")]
    format: OutputFormat,

    /// JPEG quality (1-100)
    #[arg(long, default_value = "85")]
    quality: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Lossless PNG
    Png,
    /// Lossy JPEG on a white background
    Jpeg,
}

impl RenderArgs {
    fn raster_options(&self) -> Result<RasterOptions, Box<dyn std::error::Error>> {
        let pages = match self.pages.as_deref() {
            Some(p) => PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?,
            None => PageSelection::All,
        };
        let format = match self.format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg {
                quality: self.quality,
            },
        };

        Ok(RasterOptions::new()
            .with_device_pixel_ratio(self.dpr)
            .with_visual_scale(self.visual_scale)
            .with_image_format(format)
            .with_pages(pages))
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions::new().with_page_spacing(self.spacing)
    }

    fn importer(&self) -> Result<PdfImporter, Box<dyn std::error::Error>> {
        Ok(PdfImporter::new()
            .with_raster_options(self.raster_options()?)
            .with_layout_options(self.layout_options()))
    }
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            dpr: 1.0,
            visual_scale: 1.5,
            spacing: 32.0,
            pages: None,
            format: OutputFormat::Png,
            quality: 85,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Import {
            input,
            output,
            render,
        }) => cmd_import(&input, output.as_deref(), &render),
        Some(Commands::Layout {
            input,
            compact,
            render,
        }) => cmd_layout(&input, compact, &render),
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: import if input is provided
            if let Some(input) = cli.input {
                cmd_import(&input, cli.output.as_deref(), &RenderArgs::default())
            } else {
                println!("{}", "Usage: pdfcanvas <FILE> [OUTPUT]".yellow());
                println!("       pdfcanvas --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_source(input: &Path) -> Result<(String, SourceBytes), Box<dyn std::error::Error>> {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let data = fs::read(input)?;
    Ok((name, Arc::new(data)))
}

/// Advances a progress bar as pages render.
struct ProgressObserver<'a> {
    pb: &'a ProgressBar,
}

impl ImportObserver for ProgressObserver<'_> {
    fn on_start(&mut self, selected: usize, page_count: usize) {
        log::info!("Rendering {} of {} pages", selected, page_count);
        self.pb.set_length(selected as u64);
    }

    fn on_page(&mut self, page: &RasterPage, rendered: usize, selected: usize) {
        log::debug!(
            "Page {} rendered ({}/{}): {}x{} px",
            page.number(),
            rendered,
            selected,
            page.image.pixel_width,
            page.image.pixel_height
        );
        self.pb.set_message(format!("Rendered page {}", page.number()));
        self.pb.inc(1);
    }
}

fn cmd_import(
    input: &Path,
    output: Option<&Path>,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_canvas", stem))
    });

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering pages...");

    let (name, source) = read_source(input)?;
    let mut observer = ProgressObserver { pb: &pb };
    let doc = match render
        .importer()?
        .import_observed(name, source, &mut observer)
    {
        Ok(doc) => doc,
        Err(e) => {
            log::error!("Import of {} failed: {}", input.display(), e);
            pb.abandon_with_message("Failed");
            return Err(e.into());
        }
    };
    pb.finish_with_message("Done!");

    // Nothing is written until every page has rendered.
    let pages_dir = output_dir.join("pages");
    fs::create_dir_all(&pages_dir)?;
    for page in &doc.pages {
        let filename = page.image.suggested_filename(page.number);
        fs::write(pages_dir.join(&filename), &page.image.data)?;
    }

    let json = pdfcanvas::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("layout.json"), &json)?;

    println!("\n{}", "Output files:".green().bold());
    println!("  {} layout.json", "├─".dimmed());
    println!("  {} pages/ ({} images)", "└─".dimmed(), doc.page_count());

    Ok(())
}

fn cmd_layout(
    input: &Path,
    compact: bool,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (name, source) = read_source(input)?;
    let doc = render.importer()?.import(name, source)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    println!("{}", pdfcanvas::to_json(&doc, format)?);

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = pdfcanvas::detect_format_from_path(input)?;
    let (_, source) = read_source(input)?;
    // Page boxes are enough to lay the pages out; nothing is rendered.
    let layout = PdfImporter::new().measure(source)?;

    if json {
        let info = info_value(input, &format, &layout);
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!(
        "{}: {}",
        "Linearized".bold(),
        if format.linearized { "Yes" } else { "No" }
    );
    println!("{}: {}", "Pages".bold(), layout.len());

    println!();
    println!("{}", "Canvas Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for placed in layout.iter() {
        let bounds = placed.bounds;
        println!(
            "  {} {:>4}: {:.0}x{:.0} at ({:.0}, {:.0}){}",
            "Page".bold(),
            placed.item.number(),
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y,
            if bounds.width > bounds.height { " landscape" } else { "" }
        );
    }
    println!("{}: {:.0}", "Widest".bold(), layout.widest);
    println!("{}: {:.0}", "Total height".bold(), layout.height);

    Ok(())
}

fn info_value(input: &Path, format: &PdfFormat, layout: &Layout<PageExtent>) -> serde_json::Value {
    let sizes: Vec<serde_json::Value> = layout
        .iter()
        .map(|placed| {
            serde_json::json!({
                "number": placed.item.number(),
                "width": placed.bounds.width,
                "height": placed.bounds.height,
            })
        })
        .collect();

    serde_json::json!({
        "file": input.display().to_string(),
        "version": format.version,
        "linearized": format.linearized,
        "pages": layout.len(),
        "widest": layout.widest,
        "height": layout.height,
        "sizes": sizes,
    })
}

fn cmd_version() {
    println!("{} {}", "pdfcanvas".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to infinite-canvas import tool");
    println!();
    println!("Backend: {}", "hayro".dimmed());
    println!("License: MIT");
}
