//! Pagination math.
//!
//! Pages are 1-based. The current page is re-clamped against the filtered
//! collection size whenever that size can change, so it always lies in
//! `[1, total_pages]`.

use crate::domain::error::{Result, ZadminError};
use std::ops::Range;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Current page and page size of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// Creates a state on page 1. A zero `page_size` falls back to the default.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(total / page_size))`.
    ///
    /// ```
    /// use zadmin::table::PageState;
    ///
    /// let pages = PageState::new(10);
    /// assert_eq!(pages.total_pages(0), 1);
    /// assert_eq!(pages.total_pages(10), 1);
    /// assert_eq!(pages.total_pages(11), 2);
    /// ```
    #[must_use]
    pub const fn total_pages(&self, total: usize) -> usize {
        let pages = total.div_ceil(self.page_size);
        if pages == 0 {
            1
        } else {
            pages
        }
    }

    /// Pulls the current page back into `[1, total_pages(total)]`.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.clamp(1, self.total_pages(total));
    }

    /// Index range of the current page within a collection of `total` items.
    #[must_use]
    pub fn bounds(&self, total: usize) -> Range<usize> {
        let page = self.page.clamp(1, self.total_pages(total));
        let start = ((page - 1) * self.page_size).min(total);
        let end = (page * self.page_size).min(total);
        start..end
    }

    /// Items of the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.bounds(items.len())]
    }

    /// Moves forward one page. Returns `false` on the last page.
    pub fn next(&mut self, total: usize) -> bool {
        self.go_to(self.page + 1, total)
    }

    /// Moves back one page. Returns `false` on the first page.
    pub fn prev(&mut self, total: usize) -> bool {
        self.go_to(self.page.saturating_sub(1), total)
    }

    pub fn first(&mut self) -> bool {
        let moved = self.page != 1;
        self.page = 1;
        moved
    }

    pub fn last(&mut self, total: usize) -> bool {
        let last = self.total_pages(total);
        let moved = self.page != last;
        self.page = last;
        moved
    }

    /// Jumps to `page`, clamped. Returns `true` when the page changed.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        let target = page.clamp(1, self.total_pages(total));
        let moved = self.page != target;
        self.page = target;
        moved
    }

    /// Changes the page size and returns to page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ZadminError::Validation`] for a zero page size; the state is
    /// left unchanged.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(ZadminError::validation(
                "page_size",
                "Page size must be at least 1",
            ));
        }
        self.page_size = page_size;
        self.page = 1;
        Ok(())
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }
}
