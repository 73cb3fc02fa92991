//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Hard cap on page size to keep list responses bounded.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Generic 1-based pagination parameters (`?page=&limit=`).
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Effective page, clamped to at least 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn limit(&self, default: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, MAX_PAGE_LIMIT)
    }

    /// Row offset for the effective page.
    pub fn offset(&self, default_limit: i64) -> i64 {
        (self.page() - 1) * self.limit(default_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_clamps() {
        let p = PageParams {
            page: None,
            limit: None,
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(10), 10);
        assert_eq!(p.offset(10), 0);

        let p = PageParams {
            page: Some(0),
            limit: Some(100_000),
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(10), MAX_PAGE_LIMIT);

        let p = PageParams {
            page: Some(3),
            limit: Some(5),
        };
        assert_eq!(p.offset(10), 10);
    }
}
