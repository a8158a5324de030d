//! Page selection shared by the rasterizer and the CLI.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Which source pages to import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Import all pages
    #[default]
    All,
    /// Import a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Import specific pages (1-indexed)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = parse_bounds(start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_bounds(start, end)?;
                pages.extend(start..=end);
            } else {
                pages.push(parse_page_number(part)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }

    /// Resolve the selection against a document with `page_count` pages.
    ///
    /// Returns 0-based page indices in ascending source order. Pages beyond
    /// the document are dropped with a warning; a selection that matches no
    /// page at all is an error.
    pub fn resolve(&self, page_count: usize) -> Result<Vec<usize>> {
        let page_count_u32 = u32::try_from(page_count).unwrap_or(u32::MAX);
        let indices: Vec<usize> = (1..=page_count_u32)
            .filter(|number| self.includes(*number))
            .map(|number| (number - 1) as usize)
            .collect();

        let beyond = match self {
            PageSelection::All => 0,
            PageSelection::Range(range) if *range.end() > page_count_u32 => {
                let first_beyond = (*range.start()).max(page_count_u32.saturating_add(1));
                (range.end() - first_beyond) as usize + 1
            }
            PageSelection::Range(_) => 0,
            PageSelection::Pages(pages) => pages.iter().filter(|n| **n > page_count_u32).count(),
        };
        if beyond > 0 {
            log::warn!(
                "Page selection names {} page(s) beyond the document's {} pages",
                beyond,
                page_count
            );
        }

        if indices.is_empty() {
            return Err(Error::InvalidPageRange(format!(
                "selection matches none of the document's {} pages",
                page_count
            )));
        }

        Ok(indices)
    }
}

fn parse_page_number(s: &str) -> Result<u32> {
    let number: u32 = s
        .trim()
        .parse()
        .map_err(|_| Error::InvalidPageRange(format!("invalid page number '{}'", s.trim())))?;
    if number == 0 {
        return Err(Error::InvalidPageRange("page numbers start at 1".into()));
    }
    Ok(number)
}

fn parse_bounds(start: &str, end: &str) -> Result<(u32, u32)> {
    let start = parse_page_number(start)?;
    let end = parse_page_number(end)?;
    if start > end {
        return Err(Error::InvalidPageRange(format!(
            "range start {} is after end {}",
            start, end
        )));
    }
    Ok((start, end))
}
