//! Page envelope for list endpoints.
//!
//! Wraps a sequence of items together with the paging parameters that
//! produced it, so clients can drive offset/limit pagination without
//! guessing server defaults.

use serde::Serialize;
use utoipa::ToSchema;

/// Paginated response envelope.
///
/// # JSON Example
///
/// ```json
/// {
///   "items": [{"id": "...", "name": "Mug"}],
///   "skip": 0,
///   "limit": 20,
///   "count": 1
/// }
/// ```
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    /// The items on this page
    pub items: Vec<T>,
    /// Offset that produced this page
    pub skip: u64,
    /// Maximum number of items requested
    pub limit: u64,
    /// Number of items actually returned
    pub count: usize,
}

impl<T> Page<T> {
    /// Wrap a sequence into a page envelope.
    pub fn new(items: Vec<T>, skip: u64, limit: u64) -> Self {
        let count = items.len();
        Self {
            items,
            skip,
            limit,
            count,
        }
    }
}
