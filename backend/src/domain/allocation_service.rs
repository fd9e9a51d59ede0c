//! Allocation domain services.
//!
//! These services implement the allocation driving ports: they run the
//! validation pipeline, persist accepted bookings, and emit best-effort
//! notifications. Each operation reads the clock once and reuses that
//! instant for every decision and timestamp it makes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::booking::{
    Allocation, AllocationChanges, AllocationRequest, NewAllocation, ValidationErrors,
    ValidationLimits, validate_booking_update, validate_new_booking,
};
use crate::domain::ports::{
    AllocationCommand, AllocationFilter, AllocationPayload, AllocationQuery, AllocationRepository,
    AllocationRepositoryError, BookingEvent, BookingNotification, BookingNotifier,
    CreateAllocationRequest, CreateAllocationResponse, DeleteAllocationRequest,
    GetAllocationRequest, GetAllocationResponse, ListAllocationsRequest, ListAllocationsResponse,
    RoomRepository, RoomRepositoryError, UpdateAllocationRequest,
};

/// Page size applied when a listing request does not name one.
pub const DEFAULT_PAGE_SIZE: i64 = 25;
/// Upper bound on the page size a listing request may claim.
pub const MAX_PAGE_SIZE: i64 = 100;

fn map_allocation_repository_error(error: AllocationRepositoryError) -> Error {
    match error {
        AllocationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("allocation repository unavailable: {message}"))
        }
        AllocationRepositoryError::Query { message } => {
            Error::internal(format!("allocation repository error: {message}"))
        }
    }
}

fn map_room_repository_error(error: RoomRepositoryError) -> Error {
    match error {
        RoomRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("room repository unavailable: {message}"))
        }
        RoomRepositoryError::Query { message } => {
            Error::internal(format!("room repository error: {message}"))
        }
    }
}

fn allocation_not_found(allocation_id: i64) -> Error {
    Error::not_found(format!("allocation {allocation_id} not found"))
}

/// Allocation service implementing the command driving port.
#[derive(Clone)]
pub struct AllocationCommandService<A, R, N> {
    allocations: Arc<A>,
    rooms: Arc<R>,
    notifier: Arc<N>,
    clock: Arc<dyn Clock>,
    limits: ValidationLimits,
}

impl<A, R, N> AllocationCommandService<A, R, N> {
    /// Create a new command service over the given adapters.
    pub fn new(
        allocations: Arc<A>,
        rooms: Arc<R>,
        notifier: Arc<N>,
        clock: Arc<dyn Clock>,
        limits: ValidationLimits,
    ) -> Self {
        Self {
            allocations,
            rooms,
            notifier,
            clock,
            limits,
        }
    }
}

impl<A, R, N> AllocationCommandService<A, R, N>
where
    N: BookingNotifier,
{
    /// Hand the notification to the notifier, logging and swallowing
    /// failures so the booking operation itself is unaffected.
    async fn send_notification(&self, event: BookingEvent, allocation: &Allocation) {
        let notification = BookingNotification::for_allocation(event, allocation);
        if let Err(error) = self.notifier.notify(notification).await {
            tracing::warn!(
                allocation_id = allocation.id,
                employee_email = %allocation.employee.email,
                %error,
                "booking notification failed"
            );
        }
    }
}

#[async_trait]
impl<A, R, N> AllocationCommand for AllocationCommandService<A, R, N>
where
    A: AllocationRepository,
    R: RoomRepository,
    N: BookingNotifier,
{
    async fn create_allocation(
        &self,
        request: CreateAllocationRequest,
    ) -> Result<CreateAllocationResponse, Error> {
        // An unknown room makes the rest of the request meaningless, so the
        // lookup short-circuits before any field rule runs.
        let room_exists = self
            .rooms
            .exists(request.room_id)
            .await
            .map_err(map_room_repository_error)?;
        if !room_exists {
            return Err(Error::not_found(format!(
                "room {} not found",
                request.room_id
            )));
        }

        let now = self.clock.utc();
        let booking = validate_new_booking(
            &AllocationRequest::from(request.booking),
            &self.limits,
            now,
        )
        .map_err(ValidationErrors::into_error)?;

        let allocation = self
            .allocations
            .insert(&NewAllocation {
                room_id: request.room_id,
                employee: booking.employee().clone(),
                subject: booking.subject().to_owned(),
                start_at: booking.start_at(),
                end_at: booking.end_at(),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(map_allocation_repository_error)?;

        self.send_notification(BookingEvent::Created, &allocation)
            .await;

        Ok(CreateAllocationResponse {
            allocation: AllocationPayload::from(allocation),
        })
    }

    async fn update_allocation(&self, request: UpdateAllocationRequest) -> Result<(), Error> {
        let now = self.clock.utc();
        let update = validate_booking_update(
            &AllocationRequest::from(request.booking),
            &self.limits,
            now,
        )
        .map_err(ValidationErrors::into_error)?;

        let updated = self
            .allocations
            .update(
                request.allocation_id,
                &AllocationChanges {
                    subject: update.subject().to_owned(),
                    start_at: update.start_at(),
                    end_at: update.end_at(),
                    updated_at: now,
                },
            )
            .await
            .map_err(map_allocation_repository_error)?
            .ok_or_else(|| allocation_not_found(request.allocation_id))?;

        self.send_notification(BookingEvent::Updated, &updated).await;

        Ok(())
    }

    async fn delete_allocation(&self, request: DeleteAllocationRequest) -> Result<(), Error> {
        let allocation = self
            .allocations
            .find_by_id(request.allocation_id)
            .await
            .map_err(map_allocation_repository_error)?
            .ok_or_else(|| allocation_not_found(request.allocation_id))?;

        let now = self.clock.utc();
        if !allocation.is_deletable_at(now) {
            return Err(
                Error::operation_not_permitted("allocation has already started").with_details(
                    serde_json::json!({ "reason": "allocation_already_started" }),
                ),
            );
        }

        let removed = self
            .allocations
            .delete(request.allocation_id)
            .await
            .map_err(map_allocation_repository_error)?;
        if !removed {
            // Lost a race with another delete between the lookup and here.
            return Err(allocation_not_found(request.allocation_id));
        }

        self.send_notification(BookingEvent::Cancelled, &allocation)
            .await;

        Ok(())
    }
}

/// Allocation service implementing the query driving port.
#[derive(Clone)]
pub struct AllocationQueryService<A> {
    allocations: Arc<A>,
}

impl<A> AllocationQueryService<A> {
    /// Create a new query service over the allocation repository.
    pub fn new(allocations: Arc<A>) -> Self {
        Self { allocations }
    }
}

#[async_trait]
impl<A> AllocationQuery for AllocationQueryService<A>
where
    A: AllocationRepository,
{
    async fn get_allocation(
        &self,
        request: GetAllocationRequest,
    ) -> Result<GetAllocationResponse, Error> {
        let allocation = self
            .allocations
            .find_by_id(request.allocation_id)
            .await
            .map_err(map_allocation_repository_error)?
            .ok_or_else(|| allocation_not_found(request.allocation_id))?;

        Ok(GetAllocationResponse {
            allocation: AllocationPayload::from(allocation),
        })
    }

    async fn list_allocations(
        &self,
        request: ListAllocationsRequest,
    ) -> Result<ListAllocationsResponse, Error> {
        let limit = request
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = request.page.unwrap_or(0).max(0);

        let allocations = self
            .allocations
            .list(&AllocationFilter {
                room_id: request.room_id,
                employee_email: request.employee_email,
                order: request.order_by,
                limit,
                offset: page * limit,
            })
            .await
            .map_err(map_allocation_repository_error)?;

        Ok(ListAllocationsResponse {
            allocations: allocations.into_iter().map(AllocationPayload::from).collect(),
        })
    }
}

#[cfg(test)]
#[path = "allocation_service_tests.rs"]
mod tests;
