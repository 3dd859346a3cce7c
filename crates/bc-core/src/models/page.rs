use serde::{Deserialize, Serialize};

/// One page of a paginated listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty(page: u32) -> Self {
        Self {
            items: Vec::new(),
            page,
            total_pages: 0,
        }
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}
