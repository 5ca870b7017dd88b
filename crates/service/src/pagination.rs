//! Pagination utilities for the list endpoint.
//!
//! Page indexing is zero-based; page size defaults to 10.

use serde::Serialize;

/// Pagination parameters as received from the query string.
#[derive(Clone, Copy, Debug)]
pub struct PageQuery {
    /// items per page
    pub page_size: u64,
    /// 0-based page index
    pub page_index: u64,
}

impl PageQuery {
    /// Saturating: both factors come straight from the query string.
    pub fn offset(self) -> u64 {
        self.page_index.saturating_mul(self.page_size)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page_size: 10, page_index: 0 }
    }
}

/// Ceiling division; a page size of 0 yields 0 pages rather than dividing by zero.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    }
}

/// One page of results plus the collection totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page<T> {
    pub total_items: u64,
    pub total_pages: u64,
    pub items: Vec<T>,
}
