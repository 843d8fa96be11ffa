//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters accepted by every list endpoint
/// (`?eagerload=&limit=&offset=`).
///
/// Paging applies only when `limit` or `offset` is supplied; values are
/// clamped by `PageRequest::new`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub eagerload: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    pub fn is_paged(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }
}
