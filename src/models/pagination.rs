//! Pagination data structures shared by the list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            page_size: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn get_offset(&self) -> u64 {
        let page = self.page.unwrap_or(1).max(1);
        (page - 1) * self.get_limit()
    }

    pub fn get_limit(&self) -> u64 {
        self.page_size.unwrap_or(20).clamp(1, 100)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, page: u64, page_size: u64, total: u64) -> Self {
        let total_pages = total.div_ceil(page_size.max(1));
        Self {
            data,
            page,
            page_size,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let p = PaginationParams {
            page: Some(3),
            page_size: Some(25),
        };
        assert_eq!(p.get_offset(), 50);
        assert_eq!(p.get_limit(), 25);
    }

    #[test]
    fn test_defaults_and_clamping() {
        let p = PaginationParams {
            page: None,
            page_size: Some(10_000),
        };
        assert_eq!(p.get_offset(), 0);
        assert_eq!(p.get_limit(), 100);
    }
}
