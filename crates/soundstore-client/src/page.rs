//! Pagination metadata and the page-number display window.

use serde::Serialize;

/// Pagination metadata for one fetched page.
///
/// Replaced wholesale from each server response; only the optimistic
/// `current_page`/`page_size` used for the next request are set locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 10,
            total_items: 0,
            total_pages: 0,
            has_previous_page: false,
            has_next_page: false,
        }
    }
}

/// One element of the rendered page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A concrete page button.
    Page(u32),
    /// A gap between page buttons.
    Ellipsis,
}

impl std::fmt::Display for PageItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{n}"),
            PageItem::Ellipsis => write!(f, "..."),
        }
    }
}

/// Computes the page buttons to render for a page-number control.
///
/// Up to five pages are shown in full; beyond that the window keeps the
/// first page, the last page, and `current_page` with one neighbor on each
/// side, with ellipses covering the gaps. One page or fewer renders no
/// buttons at all. Callers must pass a `current_page` inside
/// `[1, total_pages]`; the accessor clamps page changes upstream.
pub fn page_items(current_page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }

    if total_pages <= 5 {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut items = vec![PageItem::Page(1)];

    let start = (current_page.saturating_sub(1)).max(2);
    let end = (current_page + 1).min(total_pages - 1);

    if start > 2 {
        items.push(PageItem::Ellipsis);
    }

    items.extend((start..=end).map(PageItem::Page));

    if end < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }

    items.push(PageItem::Page(total_pages));
    items
}
