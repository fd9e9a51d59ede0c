//! Port for allocation persistence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::booking::{Allocation, AllocationChanges, NewAllocation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by allocation repository adapters.
    pub enum AllocationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "allocation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "allocation repository query failed: {message}",
    }
}

/// Field an allocation listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Order by window start.
    StartAt,
    /// Order by window end.
    EndAt,
}

/// Direction applied to the sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    /// Earliest first.
    Ascending,
    /// Latest first.
    Descending,
}

/// Ordering applied to an allocation listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationOrder {
    /// Field to order by.
    pub field: SortField,
    /// Direction to apply.
    pub direction: SortDirection,
}

/// Filter and pagination applied to an allocation listing.
///
/// `limit` and `offset` arrive already clamped by the query service; the
/// identifier is always used as a tie breaker so pages are stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationFilter {
    /// Restrict to allocations booking this room.
    pub room_id: Option<i64>,
    /// Restrict to allocations booked by this employee email.
    pub employee_email: Option<String>,
    /// Ordering to apply; natural identifier order when absent.
    pub order: Option<AllocationOrder>,
    /// Maximum number of rows to return.
    pub limit: i64,
    /// Number of rows to skip.
    pub offset: i64,
}

/// Port for reading and writing allocations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllocationRepository: Send + Sync {
    /// Persist a new allocation and return the stored record with its
    /// generated identifier.
    async fn insert(
        &self,
        allocation: &NewAllocation,
    ) -> Result<Allocation, AllocationRepositoryError>;

    /// Find an allocation by id.
    async fn find_by_id(
        &self,
        allocation_id: i64,
    ) -> Result<Option<Allocation>, AllocationRepositoryError>;

    /// Apply changes to an existing allocation, returning the updated record
    /// or `None` when the id does not resolve.
    async fn update(
        &self,
        allocation_id: i64,
        changes: &AllocationChanges,
    ) -> Result<Option<Allocation>, AllocationRepositoryError>;

    /// Delete an allocation, returning whether a record was removed.
    async fn delete(&self, allocation_id: i64) -> Result<bool, AllocationRepositoryError>;

    /// List allocations matching the filter.
    async fn list(
        &self,
        filter: &AllocationFilter,
    ) -> Result<Vec<Allocation>, AllocationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAllocationRepository;

#[async_trait]
impl AllocationRepository for FixtureAllocationRepository {
    async fn insert(
        &self,
        allocation: &NewAllocation,
    ) -> Result<Allocation, AllocationRepositoryError> {
        Ok(Allocation {
            id: 1,
            room_id: allocation.room_id,
            employee: allocation.employee.clone(),
            subject: allocation.subject.clone(),
            start_at: allocation.start_at,
            end_at: allocation.end_at,
            created_at: allocation.created_at,
            updated_at: allocation.updated_at,
        })
    }

    async fn find_by_id(
        &self,
        _allocation_id: i64,
    ) -> Result<Option<Allocation>, AllocationRepositoryError> {
        Ok(None)
    }

    async fn update(
        &self,
        _allocation_id: i64,
        _changes: &AllocationChanges,
    ) -> Result<Option<Allocation>, AllocationRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _allocation_id: i64) -> Result<bool, AllocationRepositoryError> {
        Ok(false)
    }

    async fn list(
        &self,
        _filter: &AllocationFilter,
    ) -> Result<Vec<Allocation>, AllocationRepositoryError> {
        Ok(Vec::new())
    }
}
