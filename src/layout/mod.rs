//! Document-space layout of rendered pages.

mod accumulator;
mod options;

pub use accumulator::{stack_and_center, Layout, LayoutAccumulator, Placed};
pub use options::{LayoutOptions, DEFAULT_PAGE_SPACING};
