use serde::{Deserialize, Serialize};

/// Pagination metadata as reported by the backend for a list query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    #[serde(default)]
    pub total: Option<u32>,
}

impl Pagination {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    pub fn new(page: u32, page_size: u32, total: u32) -> Pagination {
        Pagination {
            page,
            page_size,
            page_count: Self::page_count_for(total, page_size),
            total: Some(total),
        }
    }

    /// Number of pages needed to hold `total` items, zero when there are none.
    pub fn page_count_for(total: u32, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        total.div_ceil(page_size)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    /// Highest page that can be displayed. An empty collection still shows page 1.
    pub fn last_page(&self) -> u32 {
        self.page_count.max(1)
    }

    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.last_page())
    }
}
