//! Error types for the pdfcanvas library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfcanvas operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while importing a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The buffer is not an openable PDF document.
    #[error("PDF decode error: {0}")]
    Decode(String),

    /// The PDF version in the header is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// No drawable surface could be obtained for a page.
    #[error("Render surface error: {0}")]
    RenderSurface(String),

    /// Error encoding a rendered surface to an image.
    #[error("Image encoding error: {0}")]
    Encode(String),

    /// Raster or layout options are out of range.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// An asset or shape identifier could not be parsed.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Error serializing a document manifest.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error means the input could not be decoded as a PDF.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::UnsupportedVersion(_))
    }

    /// Whether this error means a page could not be given a drawing surface.
    pub fn is_render_surface(&self) -> bool {
        matches!(self, Error::RenderSurface(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Encode(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
