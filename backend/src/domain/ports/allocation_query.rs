//! Driving port for allocation read operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

use super::allocation_command::AllocationPayload;
use super::allocation_repository::AllocationOrder;

/// Request to fetch one allocation by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllocationRequest {
    /// Allocation to fetch.
    pub allocation_id: i64,
}

/// Response for a single allocation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllocationResponse {
    /// The persisted allocation.
    pub allocation: AllocationPayload,
}

/// Request to list allocations with optional filters and pagination.
///
/// `limit` and `page` are taken as supplied by the caller; the query
/// implementation applies the default page size and the upper bound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAllocationsRequest {
    /// Restrict to allocations booking this room.
    pub room_id: Option<i64>,
    /// Restrict to allocations booked by this employee email.
    pub employee_email: Option<String>,
    /// Ordering to apply; stable identifier order when absent.
    pub order_by: Option<AllocationOrder>,
    /// Requested page size.
    pub limit: Option<i64>,
    /// Zero-based page index.
    pub page: Option<i64>,
}

/// Response containing one page of allocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAllocationsResponse {
    /// Allocations in the requested order.
    pub allocations: Vec<AllocationPayload>,
}

/// Driving port for allocation read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllocationQuery: Send + Sync {
    /// Fetches one persisted allocation by identifier.
    async fn get_allocation(
        &self,
        request: GetAllocationRequest,
    ) -> Result<GetAllocationResponse, Error>;

    /// Lists allocations matching the filters, one page at a time.
    async fn list_allocations(
        &self,
        request: ListAllocationsRequest,
    ) -> Result<ListAllocationsResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAllocationQuery;

#[async_trait]
impl AllocationQuery for FixtureAllocationQuery {
    async fn get_allocation(
        &self,
        request: GetAllocationRequest,
    ) -> Result<GetAllocationResponse, Error> {
        Err(Error::not_found(format!(
            "allocation {} not found",
            request.allocation_id
        )))
    }

    async fn list_allocations(
        &self,
        _request: ListAllocationsRequest,
    ) -> Result<ListAllocationsResponse, Error> {
        Ok(ListAllocationsResponse {
            allocations: Vec::new(),
        })
    }
}
