use serde::{Deserialize, Serialize};

use super::composer::QuerySpec;

/// Navigation metadata attached to every listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    /// Panics when `per_page` is zero; callers default it upstream.
    pub fn compute(page: u64, per_page: u64, total_items: u64) -> Self {
        assert!(per_page > 0, "per_page must be positive, got {per_page}");

        Self {
            current_page: page,
            per_page,
            total_items,
            total_pages: total_items.div_ceil(per_page),
        }
    }
}

/// Listing envelope: one page of items plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> Paginated<T> {
    pub fn from_query(items: Vec<T>, total_items: u64, spec: &QuerySpec) -> Self {
        Self {
            items,
            meta: PaginationMeta::compute(spec.page_number(), spec.take, total_items),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
