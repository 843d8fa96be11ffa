//! Pagination bounds for list endpoints.

use serde::Serialize;

/// Page size used when the caller supplies none.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// A validated `LIMIT`/`OFFSET` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            offset: clamp_offset(offset),
        }
    }
}

/// One page of rows plus the unpaginated row count.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
