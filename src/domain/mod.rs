//! Paging primitives shared by the repositories, services and handlers.

use std::fmt;

use crate::constants::paging;

/// Sort order enumeration to replace boolean blindness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Parses the `direction` query parameter. Anything other than `desc`
    /// (case-insensitive) sorts ascending.
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }

    #[must_use]
    pub const fn as_param(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub order: SortOrder,
}

impl PageRequest {
    #[must_use]
    pub const fn new(page: u64, size: u64, order: SortOrder) -> Self {
        Self { page, size, order }
    }

    /// Same size and order, different page number.
    #[must_use]
    pub const fn with_page(&self, page: u64) -> Self {
        Self {
            page,
            size: self.size,
            order: self.order,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(paging::DEFAULT_PAGE, paging::DEFAULT_SIZE, SortOrder::Ascending)
    }
}

/// One page of results plus the totals needed to render navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub request: PageRequest,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(
        content: Vec<T>,
        request: PageRequest,
        total_elements: u64,
        total_pages: u64,
    ) -> Self {
        Self {
            content,
            request,
            total_elements,
            total_pages,
        }
    }

    #[must_use]
    pub const fn number(&self) -> u64 {
        self.request.page
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.page > 0
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.request.page.saturating_add(1) < self.total_pages
    }

    /// Index of the last page, `None` when there are no results at all.
    #[must_use]
    pub const fn last_page(&self) -> Option<u64> {
        self.total_pages.checked_sub(1)
    }

    /// Converts the whole content at once, keeping request and totals.
    pub fn map_content<U, F>(self, f: F) -> Page<U>
    where
        F: FnOnce(Vec<T>) -> Vec<U>,
    {
        Page {
            content: f(self.content),
            request: self.request,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
