use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Highest page index whose offset still binds as a signed 64-bit value.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_SIZE;

//
// ──────────────────────────────────────────────────────────
// Page Request
// ──────────────────────────────────────────────────────────
//

/// Zero-based page window. `size` is always within `1..=MAX_PAGE_SIZE` and
/// `page` never exceeds `MAX_PAGE`, so `offset()` fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, size: Option<u64>) -> Self {
        let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

        Self {
            page: page.unwrap_or(0).min(MAX_PAGE),
            size,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

//
// ──────────────────────────────────────────────────────────
// Page Result
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total,
            total_pages: total.div_ceil(request.size()),
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}
