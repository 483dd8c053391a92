//! Pagination request and result types.

use serde::Serialize;

/// A 0-indexed page window request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page ordinal, starting at 0.
    pub page: u32,
    /// Page size, at least 1. Enforced at the boundary.
    pub size: u32,
}

impl PageRequest {
    /// Create a page request.
    #[must_use]
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Offset of the first element of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// One page of results, with the totals across the whole result set.
///
/// Serializes to the wire shape the cart endpoints return:
/// `{numberOfElements, first, last, totalElements, totalPages, content}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub total_elements: u64,
    pub total_pages: u32,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page for a windowed read.
    ///
    /// `content` holds the elements of this window only; `total_elements`
    /// counts the whole result set. An empty result set has zero pages and
    /// its sole (empty) page is both first and last.
    #[must_use]
    pub fn paged(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size);
        let total_pages = if size == 0 {
            1
        } else {
            u32::try_from(total_elements.div_ceil(size)).unwrap_or(u32::MAX)
        };
        let first = request.page == 0;
        let last = u64::from(request.page) + 1 >= u64::from(total_pages.max(1));

        Self {
            number_of_elements: content.len(),
            first,
            last,
            total_elements,
            total_pages,
            content,
        }
    }

    /// Build an unpaged result: everything in one page.
    #[must_use]
    pub fn unpaged(content: Vec<T>) -> Self {
        Self {
            number_of_elements: content.len(),
            first: true,
            last: true,
            total_elements: content.len() as u64,
            total_pages: 1,
            content,
        }
    }
}
