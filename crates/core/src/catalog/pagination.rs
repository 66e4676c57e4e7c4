use serde::{Deserialize, Serialize};

/// Records shown per catalog page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Half-open slice `[(page - 1) * page_size, page * page_size)` clipped to `records`.
///
/// Pages start at 1; page 0 is treated as page 1. A page past the end, or a
/// zero page size, yields an empty slice.
pub fn paginate<T>(records: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }

    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(records.len());
    &records[start..end]
}

/// `ceil(total / page_size)`; zero when either side is zero.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

/// Pagination control model for a results view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageControls {
    pub current: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub links: Vec<PageLink>,
}

impl PageControls {
    pub fn new(current: usize, total_pages: usize) -> Self {
        let current = current.max(1);
        Self {
            current,
            total_pages,
            has_previous: current > 1,
            has_next: current < total_pages,
            links: page_links(current, total_pages),
        }
    }
}

/// First page, last page and the neighbours of `current`, with an ellipsis
/// standing in for the page two steps away on either side. Empty when
/// everything fits on one page.
pub fn page_links(current: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut links = Vec::new();
    for page in 1..=total_pages {
        let near_current = page + 1 >= current && page <= current + 1;
        if page == 1 || page == total_pages || near_current {
            links.push(PageLink::Page(page));
        } else if page + 2 == current || page == current + 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links
}
