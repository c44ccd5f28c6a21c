//! Page slicing and pagination metadata

use serde::Serialize;

/// Pagination metadata returned with every page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages, never less than 1
    pub total_pages: usize,

    /// Total number of items (after filters)
    pub total_items: usize,

    /// Number of items per page
    pub page_size: usize,

    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// Build metadata for `page` of a result set holding `total_items`
    ///
    /// `page` is taken as given; callers that clamp do so beforehand.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        // Ensure page_size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let page = page.max(1);

        Self {
            current_page: page,
            total_pages: total_pages(total_items, page_size),
            total_items,
            page_size,
            has_next_page: page.saturating_mul(page_size) < total_items,
            has_previous_page: page > 1,
        }
    }

    /// Index of the first item on the current page
    pub fn offset(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size)
    }
}

/// `ceil(total / page_size)`, with a minimum of one page for empty sets
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// How a paginator treats a page number past the last page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Serve the last page instead (in-memory backend)
    Clamp,
    /// Keep the requested page; it holds no rows (store pushdown backend)
    Passthrough,
}

/// Resolves a requested page against a result size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    overflow: OverflowPolicy,
}

impl Paginator {
    pub fn new(page: usize, page_size: usize, overflow: OverflowPolicy) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            overflow,
        }
    }

    /// Metadata for a result set of `total_items`, applying the overflow policy
    pub fn resolve(&self, total_items: usize) -> PaginationMeta {
        let page = match self.overflow {
            OverflowPolicy::Clamp => self.page.min(total_pages(total_items, self.page_size)),
            OverflowPolicy::Passthrough => self.page,
        };
        PaginationMeta::new(page, self.page_size, total_items)
    }

    /// Slice an ordered result set down to the resolved page
    pub fn apply<T>(&self, items: Vec<T>) -> (Vec<T>, PaginationMeta) {
        let meta = self.resolve(items.len());
        let page: Vec<T> = items
            .into_iter()
            .skip(meta.offset())
            .take(meta.page_size)
            .collect();
        (page, meta)
    }
}
