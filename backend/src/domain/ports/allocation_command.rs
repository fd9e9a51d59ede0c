//! Driving port for allocation mutations.
//!
//! Inbound adapters submit booking requests through this port; the
//! implementation validates, persists, and notifies without leaking
//! repository details back across the boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::booking::{
    Allocation, AllocationRequest, ValidationErrors, ValidationLimits, validate_booking_update,
    validate_new_booking,
};

/// Serializable allocation record for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationPayload {
    /// Stable allocation identifier.
    pub id: i64,
    /// Room the allocation books.
    pub room_id: i64,
    /// Employee display name.
    pub employee_name: String,
    /// Employee email address.
    pub employee_email: String,
    /// Meeting subject.
    pub subject: String,
    /// Start of the booking window.
    pub start_at: DateTime<Utc>,
    /// End of the booking window.
    pub end_at: DateTime<Utc>,
    /// When the record was first persisted.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl From<Allocation> for AllocationPayload {
    fn from(value: Allocation) -> Self {
        Self {
            id: value.id,
            room_id: value.room_id,
            employee_name: value.employee.name,
            employee_email: value.employee.email,
            subject: value.subject,
            start_at: value.start_at,
            end_at: value.end_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Requested booking fields prior to validation.
///
/// Every field is optional; presence is one of the rules the validation
/// pipeline checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequestPayload {
    /// Meeting subject, when supplied.
    pub subject: Option<String>,
    /// Employee display name, when supplied.
    pub employee_name: Option<String>,
    /// Employee email address, when supplied.
    pub employee_email: Option<String>,
    /// Window start, when supplied.
    pub start_at: Option<DateTime<Utc>>,
    /// Window end, when supplied.
    pub end_at: Option<DateTime<Utc>>,
}

impl From<AllocationRequestPayload> for AllocationRequest {
    fn from(value: AllocationRequestPayload) -> Self {
        Self {
            subject: value.subject,
            employee_name: value.employee_name,
            employee_email: value.employee_email,
            start_at: value.start_at,
            end_at: value.end_at,
        }
    }
}

/// Request to create an allocation in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllocationRequest {
    /// Room to book.
    pub room_id: i64,
    /// Requested booking fields.
    pub booking: AllocationRequestPayload,
}

/// Response from creating an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllocationResponse {
    /// The persisted allocation.
    pub allocation: AllocationPayload,
}

/// Request to change an existing allocation's subject or window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAllocationRequest {
    /// Allocation to change.
    pub allocation_id: i64,
    /// Replacement booking fields. Employee fields are ignored.
    pub booking: AllocationRequestPayload,
}

/// Request to delete an allocation that has not started yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllocationRequest {
    /// Allocation to delete.
    pub allocation_id: i64,
}

/// Driving port for allocation write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AllocationCommand: Send + Sync {
    /// Validates and persists a new allocation.
    ///
    /// Fails with a not-found error when the room id does not resolve,
    /// before any field rule runs; fails with a validation error carrying
    /// every violation when field rules reject the payload.
    async fn create_allocation(
        &self,
        request: CreateAllocationRequest,
    ) -> Result<CreateAllocationResponse, Error>;

    /// Validates and applies changes to an existing allocation.
    ///
    /// Revisits the subject and window rules only; fails with a not-found
    /// error when the allocation id does not resolve.
    async fn update_allocation(&self, request: UpdateAllocationRequest) -> Result<(), Error>;

    /// Deletes an allocation while its window has not started.
    ///
    /// Fails with a not-found error for unknown ids and with an
    /// operation-not-permitted error once the window has started.
    async fn delete_allocation(&self, request: DeleteAllocationRequest) -> Result<(), Error>;
}

/// Fixture command running real validation without persistence.
///
/// Accepted creates are echoed back under a fabricated identifier; updates
/// and deletes succeed unconditionally once validated.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAllocationCommand;

#[async_trait]
impl AllocationCommand for FixtureAllocationCommand {
    async fn create_allocation(
        &self,
        request: CreateAllocationRequest,
    ) -> Result<CreateAllocationResponse, Error> {
        let now = Utc::now();
        let booking = validate_new_booking(
            &AllocationRequest::from(request.booking),
            &ValidationLimits::default(),
            now,
        )
        .map_err(ValidationErrors::into_error)?;

        Ok(CreateAllocationResponse {
            allocation: AllocationPayload {
                id: 1,
                room_id: request.room_id,
                employee_name: booking.employee().name.clone(),
                employee_email: booking.employee().email.clone(),
                subject: booking.subject().to_owned(),
                start_at: booking.start_at(),
                end_at: booking.end_at(),
                created_at: now,
                updated_at: now,
            },
        })
    }

    async fn update_allocation(&self, request: UpdateAllocationRequest) -> Result<(), Error> {
        validate_booking_update(
            &AllocationRequest::from(request.booking),
            &ValidationLimits::default(),
            Utc::now(),
        )
        .map_err(ValidationErrors::into_error)?;
        Ok(())
    }

    async fn delete_allocation(&self, _request: DeleteAllocationRequest) -> Result<(), Error> {
        Ok(())
    }
}
