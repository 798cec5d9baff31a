//! # Page Module
//!
//! This module provides the page request normalizer and the page metadata
//! calculator: [`PageRequest`] turns a (page, size) pair into an
//! offset/limit window, and [`PageMeta`] derives total pages and the
//! next/previous pointers from a row count.
//!
//! ## Features
//!
//! - **Serde Compatibility**: derives `Serialize` and `Deserialize`
//! - **Defaults**: sane defaults (page 1, size 10) substituted for
//!   non-positive inputs
//! - **Boundary Pointers**: `next_page`/`prev_page` are `None` at the edges
//!   and serialize as JSON `null`

use serde::{Deserialize, Serialize};

/// Page size substituted when the requested size is not positive.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// A 1-indexed request for a bounded slice of an ordered result set.
///
/// Can be deserialized from query parameters (e.g., `?page=2&size=20`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed). Default: 1.
    #[serde(default = "default_page")]
    pub page: i64,

    /// The number of items per page. Default: 10.
    #[serde(default = "default_size")]
    pub size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, size: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    /// Creates a new request. The values are taken as-is; call
    /// [`PageRequest::normalize`] before deriving the window.
    pub fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// Substitutes defaults for non-positive page/size (1 and 10).
    pub fn normalize(self) -> Self {
        self.normalize_with(DEFAULT_PAGE_SIZE)
    }

    /// Substitutes defaults for non-positive page/size, using `fallback_size`
    /// instead of 10. `fallback_size` must be positive.
    pub fn normalize_with(self, fallback_size: i64) -> Self {
        Self {
            page: if self.page <= 0 { 1 } else { self.page },
            size: if self.size <= 0 { fallback_size } else { self.size },
        }
    }

    /// Zero-based row skip count: `(page - 1) * size`.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }

    /// Maximum row count for the page.
    pub fn limit(&self) -> i64 {
        self.size
    }
}

/// Pagination metadata for a result page.
///
/// `next_page`/`prev_page` are present only when a further page exists in
/// that direction; `None` serializes as JSON `null`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    /// The current page number (1-indexed).
    pub page: i64,
    /// The number of items per page.
    pub size: i64,
    /// The total number of rows matching the query.
    pub total: i64,
    /// The total number of pages (0 when there are no rows).
    pub total_pages: i64,
    /// The next page number, if one exists.
    pub next_page: Option<i64>,
    /// The previous page number, if one exists.
    pub prev_page: Option<i64>,
}

impl PageMeta {
    /// Computes the metadata for a normalized request and a total row count.
    ///
    /// `total_pages` is the integer ceiling of `total / size`; `next_page`
    /// is only set while `page < total_pages`, so the pointer never runs
    /// past the last page.
    pub fn new(request: PageRequest, total: i64) -> Self {
        let PageRequest { page, size } = request;
        let total_pages = if total == 0 { 0 } else { (total + size - 1) / size };

        let prev_page = if page > 1 { Some(page - 1) } else { None };
        let next_page = if page < total_pages { Some(page + 1) } else { None };

        Self { page, size, total, total_pages, next_page, prev_page }
    }
}

/// A wrapper for paginated results.
///
/// Contains the data items and metadata about the pagination state.
/// This struct is `Serialize`d to JSON for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// The list of items for the current page.
    pub data: Vec<T>,
    /// Metadata about the pagination state.
    pub paginate: PageMeta,
}

impl<T> Paginated<T> {
    /// Maps the items of the page, keeping the metadata intact.
    ///
    /// Useful for converting fetched rows into DTOs.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated { data: self.data.into_iter().map(f).collect(), paginate: self.paginate }
    }
}
