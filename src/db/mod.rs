pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;
use crate::models::employee::{Employee, EmployeeDraft};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already exists")]
    DuplicateEmail,
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub enum EmployeeFilter {
    Id(Uuid),
    /// Matched case-insensitively.
    Email(String),
}

/// Persistent collection of employee records.
///
/// Implementations enforce email uniqueness themselves: `insert` and
/// `update_by_id` fail with [`StoreError::DuplicateEmail`] on collision even
/// when a caller's earlier `find_one` saw no match.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Generates `id` and `created_at`.
    async fn insert(&self, draft: EmployeeDraft) -> Result<Employee, StoreError>;

    async fn find_one(&self, filter: EmployeeFilter) -> Result<Option<Employee>, StoreError>;

    /// All records in creation order.
    async fn find_all(&self) -> Result<Vec<Employee>, StoreError>;

    /// Overwrites the mutable fields. A `None` image path keeps the stored one.
    /// Returns `None` when no record has this id.
    async fn update_by_id(&self, id: Uuid, patch: EmployeeDraft) -> Result<Option<Employee>, StoreError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

pub(crate) fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
