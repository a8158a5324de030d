//! Document model handed to the host editor.
//!
//! Everything here is plain data: geometry in document-space units, encoded
//! page images, and the identifiers the host keys its records off.

mod document;
mod geometry;
mod ids;
mod image;
mod page;

pub use document::{Document, SourceBytes};
pub use geometry::Bounds;
pub use ids::{AssetId, IdAllocator, RandomIds, SequentialIds, ShapeId};
pub use image::{ImageFormat, PageImage};
pub use page::Page;
