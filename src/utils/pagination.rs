//! Basic pagination over an in-memory list

use serde::{Deserialize, Serialize};

/// One page of results, already in envelope shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Slice `items` to the requested page. Page and limit are clamped to at least 1.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> Paginated<T> {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(limit as usize) as u32;
    let start = (page as usize - 1).saturating_mul(limit as usize);

    Paginated {
        data: items.into_iter().skip(start).take(limit as usize).collect(),
        meta: PaginationMeta {
            total,
            page,
            limit,
            total_pages,
        },
    }
}
