//! Layout options.

use crate::error::{Error, Result};

/// Default gap between consecutive pages, in document-space units.
pub const DEFAULT_PAGE_SPACING: f64 = 32.0;

/// Options for laying out pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Vertical gap between consecutive pages
    pub page_spacing: f64,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page spacing.
    pub fn with_page_spacing(mut self, spacing: f64) -> Self {
        self.page_spacing = spacing;
        self
    }

    /// Reject spacing that would make pages overlap.
    pub fn validate(&self) -> Result<()> {
        if !(self.page_spacing.is_finite() && self.page_spacing >= 0.0) {
            return Err(Error::InvalidOptions(format!(
                "page spacing must be zero or positive, got {}",
                self.page_spacing
            )));
        }
        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_spacing: DEFAULT_PAGE_SPACING,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacing() {
        assert_eq!(LayoutOptions::default().page_spacing, 32.0);
        assert!(LayoutOptions::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_spacing() {
        let options = LayoutOptions::new().with_page_spacing(-1.0);
        assert!(matches!(options.validate(), Err(Error::InvalidOptions(_))));
    }
}
