//! Common traits for record access
//!
//! Defines the abstraction over the call-record store and the pagination
//! types shared by list endpoints.

use crate::error::AppError;
use crate::models::CallDetailRecord;
use async_trait::async_trait;
use serde::Serialize;

/// Read access to the call-record store
///
/// Implementations return records in their stored order; the report engine
/// relies on that order for stable filtering and first-seen grouping.
#[async_trait]
pub trait CallRecordRepository: Send + Sync {
    /// All records in stored order
    async fn find_all(&self) -> Result<Vec<CallDetailRecord>, AppError>;

    /// The first `limit` records in stored order
    async fn find_first(&self, limit: usize) -> Result<Vec<CallDetailRecord>, AppError>;

    /// Find record by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<CallDetailRecord>, AppError>;

    /// Count stored records
    async fn count(&self) -> Result<usize, AppError>;

    /// Distinct language labels in order of first appearance
    async fn languages(&self) -> Result<Vec<String>, AppError>;
}

/// Pagination parameters
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 1000),
        }
    }

    /// Offset of the first item, saturating for pages past any real result
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).max(0).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    /// Slice one page out of an already-materialized result
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(0);
        items.into_iter().skip(offset).take(limit).collect()
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
