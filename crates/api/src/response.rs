//! Shared response envelope types for API handlers.
//!
//! Plain responses use a `{ "data": ... }` envelope; paginated listings add
//! the page metadata the dashboard's pager expects.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paginated `{ "data", "total", "page", "limit", "totalPages" }` envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T: Serialize> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Build the envelope, deriving `total_pages` from `total` and `limit`.
    pub fn new(data: Vec<T>, total: i64, page: i64, limit: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let r = PaginatedResponse::new(vec![1, 2, 3], 11, 1, 5);
        assert_eq!(r.total_pages, 3);

        let r = PaginatedResponse::new(vec![1], 10, 1, 5);
        assert_eq!(r.total_pages, 2);

        let r = PaginatedResponse::<i32>::new(vec![], 0, 1, 5);
        assert_eq!(r.total_pages, 0);
    }
}
