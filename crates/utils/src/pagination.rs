//! Page-window types for grid-backed list endpoints.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query parameters accepted by paginated list endpoints.
#[derive(Debug, Clone, Default, Deserialize, TS)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub search: Option<String>,
}

/// One page of results plus the bookkeeping the data grid needs.
#[derive(Debug, Clone, Serialize, TS)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };
        Self {
            data,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], 7, 1, 3);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Paginated<i64> = Paginated::new(vec![], 0, 1, 25);
        assert_eq!(page.total_pages, 0);
    }
}
