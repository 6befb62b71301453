//! Pagination contract for bounded list operations.
//!
//! This module provides [`PageRequest`] for inbound pagination options and
//! [`Page`]/[`PageInfo`] for the outbound payload. Pages are 1-indexed.

use serde::{Deserialize, Serialize};

/// Default number of items per page when the caller does not specify one.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Upper bound on items per page. Requests above it are clamped, never
/// honored, so a caller cannot force an unbounded scan.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Inbound pagination options, both optional.
///
/// Values are accepted as signed integers so that non-positive input can be
/// detected and normalized rather than rejected at deserialization time.
///
/// # Example
///
/// ```ignore
/// let request = PageRequest { page: Some(2), limit: Some(50) };
/// let (page, limit) = request.normalize(MAX_PAGE_LIMIT);
/// assert_eq!((page, limit), (2, 50));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: Option<i64>,
    /// Number of items per page.
    pub limit: Option<i64>,
}

impl PageRequest {
    /// Creates a request for a specific page and limit.
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page: Some(page), limit: Some(limit) }
    }

    /// Resolves the request into effective `(page, limit)` values.
    ///
    /// Omitted or non-positive values fall back to page 1 and
    /// [`DEFAULT_PAGE_LIMIT`]; a limit above `max_limit` is clamped to it.
    pub fn normalize(&self, max_limit: u64) -> (u64, u64) {
        let page = match self.page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        };
        let limit = match self.limit {
            Some(l) if l > 0 => (l as u64).min(max_limit),
            _ => DEFAULT_PAGE_LIMIT.min(max_limit),
        };

        (page, limit)
    }

    /// The number of items to skip for the effective page. Saturates at
    /// `u64::MAX` rather than wrapping for absurdly large page numbers.
    pub fn offset(&self, max_limit: u64) -> u64 {
        let (page, limit) = self.normalize(max_limit);

        page.saturating_sub(1).saturating_mul(limit)
    }
}

/// Navigation metadata for a page of results.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The page number this payload represents (1-indexed).
    pub page: u64,
    /// The effective items-per-page used for the fetch.
    pub limit: u64,
    /// Total matching items across all pages.
    pub total_items: u64,
    /// Total number of pages: `ceil(total_items / limit)`.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl PageInfo {
    /// Computes the metadata for a page position over a known total.
    ///
    /// Invariants: `total_pages = ceil(total_items / limit)`,
    /// `has_next = page < total_pages`, `has_prev = page > 1`. A zero total
    /// yields zero pages and no next page.
    pub fn compute(page: u64, limit: u64, total_items: u64) -> Self {
        debug_assert!(page > 0 && limit > 0, "normalize before computing page info");
        let total_pages = total_items.div_ceil(limit);

        Self {
            page,
            limit,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// A single page of results together with its navigation metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items on this page, in store order.
    pub data: Vec<T>,
    /// Navigation metadata.
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Assembles a page from fetched items and the computed metadata.
    pub fn new(data: Vec<T>, pagination: PageInfo) -> Self {
        Self { data, pagination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_when_omitted() {
        let (page, limit) = PageRequest::default().normalize(MAX_PAGE_LIMIT);
        assert_eq!((page, limit), (1, DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn normalize_defaults_when_non_positive() {
        let request = PageRequest::new(0, -5);
        assert_eq!(request.normalize(MAX_PAGE_LIMIT), (1, DEFAULT_PAGE_LIMIT));

        let request = PageRequest::new(-1, 0);
        assert_eq!(request.normalize(MAX_PAGE_LIMIT), (1, DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn normalize_clamps_limit_to_ceiling() {
        let request = PageRequest::new(1, 10_000);
        assert_eq!(request.normalize(MAX_PAGE_LIMIT), (1, MAX_PAGE_LIMIT));
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(PageRequest::new(3, 20).offset(MAX_PAGE_LIMIT), 40);
        assert_eq!(PageRequest::new(1, 20).offset(MAX_PAGE_LIMIT), 0);
    }

    #[test]
    fn offset_saturates_for_huge_page_numbers() {
        let request = PageRequest::new(i64::MAX, 100);
        assert_eq!(request.offset(MAX_PAGE_LIMIT), u64::MAX);
    }

    #[test]
    fn page_info_formulas_hold() {
        let info = PageInfo::compute(2, 10, 45);
        assert_eq!(info.total_pages, 5);
        assert!(info.has_next);
        assert!(info.has_prev);

        let info = PageInfo::compute(1, 10, 10);
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn zero_total_yields_zero_pages() {
        let info = PageInfo::compute(1, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn last_page_has_no_next() {
        let info = PageInfo::compute(5, 10, 45);
        assert!(!info.has_next);
        assert!(info.has_prev);
    }

    #[test]
    fn pagination_serializes_camel_case() {
        let value = serde_json::to_value(PageInfo::compute(2, 10, 45)).unwrap();
        assert_eq!(value["totalItems"], 45);
        assert_eq!(value["totalPages"], 5);
        assert_eq!(value["hasNext"], true);
        assert_eq!(value["hasPrev"], true);
    }
}
