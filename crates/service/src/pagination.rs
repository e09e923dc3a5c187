//! Pagination utilities for service layer
//!
//! Turns raw `page` / `page_size` query values into a page window plus the
//! metadata returned with every list response. Malformed input is never an
//! error: sizes are clamped and bad page numbers fall back to page 1.

use std::num::IntErrorKind;

use serde::Serialize;

pub const MIN_PAGE_SIZE: u64 = 5;
pub const MAX_PAGE_SIZE: u64 = 200;
pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const DEFAULT_PAGE: u64 = 1;

/// Page requested by a client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number as sent; checked against the page count in [`PageRequest::resolve`]
    pub page: Option<i64>,
    /// items per page, already clamped to `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`
    pub page_size: u64,
}

impl PageRequest {
    /// Build from raw query-string values.
    pub fn from_params(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self { page: parse_page(page), page_size: parse_page_size(page_size) }
    }

    /// Build from numbers, clamping the size like [`PageRequest::from_params`] does.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page: Some(page), page_size: clamp_page_size(page_size) }
    }

    /// Resolve against the number of matching items.
    pub fn resolve(self, total_items: u64) -> PageWindow {
        let page_size = self.page_size;
        let total_pages = if total_items == 0 { 1 } else { total_items.div_ceil(page_size) };
        let current_page = match self.page {
            Some(p) if p >= 1 && (p as u64) <= total_pages => p as u64,
            _ => DEFAULT_PAGE,
        };
        let has_next = current_page < total_pages;
        let has_previous = current_page > 1;
        PageWindow {
            offset: (current_page - 1) * page_size,
            limit: page_size,
            meta: PageMeta {
                current_page,
                total_pages,
                total_items,
                page_size,
                has_next,
                has_previous,
                next_page: has_next.then_some(current_page + 1),
                previous_page: has_previous.then(|| current_page - 1),
            },
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page: None, page_size: DEFAULT_PAGE_SIZE } }
}

/// Slice bounds for one page together with its metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
    pub meta: PageMeta,
}

/// Pagination block of a list response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
}

/// Paginate an in-memory, already ordered slice.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> (Vec<T>, PageMeta) {
    let window = request.resolve(items.len() as u64);
    let page = items
        .iter()
        .skip(window.offset as usize)
        .take(window.limit as usize)
        .cloned()
        .collect();
    (page, window.meta)
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_page(raw: Option<&str>) -> Option<i64> {
    non_empty(raw)?.parse::<i64>().ok()
}

fn parse_page_size(raw: Option<&str>) -> u64 {
    let Some(raw) = non_empty(raw) else { return DEFAULT_PAGE_SIZE };
    match raw.parse::<i64>() {
        Ok(n) => clamp_page_size(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => MAX_PAGE_SIZE,
            IntErrorKind::NegOverflow => MIN_PAGE_SIZE,
            _ => DEFAULT_PAGE_SIZE,
        },
    }
}

fn clamp_page_size(n: i64) -> u64 {
    n.clamp(MIN_PAGE_SIZE as i64, MAX_PAGE_SIZE as i64) as u64
}
