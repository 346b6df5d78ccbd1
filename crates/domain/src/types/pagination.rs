//! Pagination metadata returned by list endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Absent when the endpoint returned a bare array
    pub pagination: Option<Pagination>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self { items: Vec::new(), pagination: None }
    }
}

impl<T> Paginated<T> {
    pub fn has_more(&self) -> bool {
        self.pagination.is_some_and(|p| p.page < p.total_pages)
    }
}
