use serde::{Deserialize, Serialize};

/// Page size the list view starts with.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    current_page: usize,
    page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// A zero page size is raised to one.
    pub fn new(page_size: usize) -> Self {
        Self { current_page: 1, page_size: page_size.max(1) }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Jumps to `page`, never below the first page.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// No upper clamp; see [`PaginationState::has_next`].
    pub fn next(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Returns whether the page moved.
    pub fn prev(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.page_size)
    }

    pub fn has_next(&self, item_count: usize) -> bool {
        self.current_page < self.total_pages(item_count)
    }

    /// Slice of `items` for the current page; empty past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size).min(items.len());
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }
}
