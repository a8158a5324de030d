//! Single-column page layout.

use crate::model::Bounds;

use super::LayoutOptions;

/// An item together with its assigned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed<T> {
    pub item: T,
    pub bounds: Bounds,
}

/// Stacks items top to bottom, then centers them on the widest one.
///
/// Centering needs the width of every item, so it only happens in
/// [`LayoutAccumulator::finish`]; bounds returned by
/// [`LayoutAccumulator::push`] still have `x = 0`.
#[derive(Debug, Clone)]
pub struct LayoutAccumulator<T> {
    spacing: f64,
    top: f64,
    widest: f64,
    placed: Vec<Placed<T>>,
}

impl<T> LayoutAccumulator<T> {
    pub fn new(options: &LayoutOptions) -> Self {
        Self::with_spacing(options.page_spacing)
    }

    pub fn with_spacing(spacing: f64) -> Self {
        Self {
            spacing,
            top: 0.0,
            widest: 0.0,
            placed: Vec::new(),
        }
    }

    /// Place `item` below everything pushed so far.
    pub fn push(&mut self, item: T, width: f64, height: f64) -> Bounds {
        let bounds = Bounds::new(0.0, self.top, width, height);
        self.top += height + self.spacing;
        self.widest = self.widest.max(width);
        self.placed.push(Placed { item, bounds });
        bounds
    }

    /// Vertical position the next item would get.
    pub fn cursor(&self) -> f64 {
        self.top
    }

    /// Widest item pushed so far.
    pub fn widest(&self) -> f64 {
        self.widest
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Center every item horizontally on the widest one.
    pub fn finish(mut self) -> Layout<T> {
        for placed in &mut self.placed {
            placed.bounds.x = (self.widest - placed.bounds.width) / 2.0;
        }

        let height = if self.placed.is_empty() {
            0.0
        } else {
            self.top - self.spacing
        };

        Layout {
            placed: self.placed,
            widest: self.widest,
            height,
        }
    }
}

impl<T> Default for LayoutAccumulator<T> {
    fn default() -> Self {
        Self::new(&LayoutOptions::default())
    }
}

/// Finished layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<T> {
    /// Items in push order with their final bounds
    pub placed: Vec<Placed<T>>,
    /// Width of the widest item
    pub widest: f64,
    /// Distance from the top of the first item to the bottom of the last
    pub height: f64,
}

impl<T> Layout<T> {
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placed<T>> {
        self.placed.iter()
    }

    /// Final bounds in push order.
    pub fn bounds(&self) -> Vec<Bounds> {
        self.placed.iter().map(|p| p.bounds).collect()
    }
}

impl<T> IntoIterator for Layout<T> {
    type Item = Placed<T>;
    type IntoIter = std::vec::IntoIter<Placed<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.placed.into_iter()
    }
}

/// Lay out bare `(width, height)` sizes.
pub fn stack_and_center<I>(sizes: I, options: &LayoutOptions) -> Vec<Bounds>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut accumulator = LayoutAccumulator::new(options);
    for (width, height) in sizes {
        accumulator.push((), width, height);
    }
    accumulator.finish().bounds()
}
