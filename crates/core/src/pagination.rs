//! Feed pagination.
//!
//! Pages are 1-based with a fixed size. Requests beyond the last page clip
//! to the last page rather than erroring; requests below 1 clip to the
//! first. An empty result set still has one (empty) page, so every request
//! resolves to a servable page.

/// Computes page boundaries for a fixed page size.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: u64,
}

/// One resolved page of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage<T> {
    /// The page actually served (after clipping).
    pub page: u64,
    /// Total number of pages (at least 1).
    pub pages: u64,
    /// Total number of items across all pages.
    pub total: u64,
    /// Items on this page.
    pub items: Vec<T>,
}

impl Paginator {
    /// Create a paginator with the given page size.
    ///
    /// A page size of 0 is treated as 1.
    #[must_use]
    pub const fn new(page_size: u64) -> Self {
        Self {
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    /// The configured page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of pages for `total` items (at least 1).
    #[must_use]
    pub const fn num_pages(&self, total: u64) -> u64 {
        let pages = total.div_ceil(self.page_size);
        if pages == 0 { 1 } else { pages }
    }

    /// Resolve a requested 1-based page number against `total` items,
    /// clipping out-of-range requests into `1..=num_pages`.
    #[must_use]
    pub const fn resolve(&self, requested: u64, total: u64) -> u64 {
        let pages = self.num_pages(total);
        if requested == 0 {
            1
        } else if requested > pages {
            pages
        } else {
            requested
        }
    }

    /// Row offset of a resolved page.
    #[must_use]
    pub const fn offset(&self, page: u64) -> u64 {
        (page - 1) * self.page_size
    }

    /// Assemble a [`FeedPage`] from a fetched slice.
    #[must_use]
    pub fn assemble<T>(&self, requested: u64, total: u64, items: Vec<T>) -> FeedPage<T> {
        FeedPage {
            page: self.resolve(requested, total),
            pages: self.num_pages(total),
            total,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_items_make_two_pages() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.num_pages(13), 2);
    }

    #[test]
    fn test_first_page_holds_page_size_items() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.resolve(1, 13), 1);
        assert_eq!(paginator.offset(1), 0);
    }

    #[test]
    fn test_remainder_page_offset() {
        // 13 items: page 2 starts at row 10 and holds 3 items.
        let paginator = Paginator::new(10);
        let page = paginator.resolve(2, 13);
        assert_eq!(page, 2);
        assert_eq!(paginator.offset(page), 10);
    }

    #[test]
    fn test_exact_multiple_has_no_extra_page() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.num_pages(20), 2);
        assert_eq!(paginator.num_pages(21), 3);
    }

    #[test]
    fn test_out_of_range_page_clips_to_last() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.resolve(99, 13), 2);
    }

    #[test]
    fn test_page_zero_clips_to_first() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.resolve(0, 13), 1);
    }

    #[test]
    fn test_empty_total_serves_single_empty_page() {
        let paginator = Paginator::new(10);
        assert_eq!(paginator.num_pages(0), 1);
        assert_eq!(paginator.resolve(5, 0), 1);

        let page = paginator.assemble::<()>(5, 0, vec![]);
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 1);
        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_zero_page_size_treated_as_one() {
        let paginator = Paginator::new(0);
        assert_eq!(paginator.page_size(), 1);
        assert_eq!(paginator.num_pages(3), 3);
    }
}
