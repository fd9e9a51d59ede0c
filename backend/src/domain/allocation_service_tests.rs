//! Tests for the allocation services.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::json;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::booking::Employee;
use crate::domain::ports::{
    AllocationOrder, AllocationRequestPayload, BookingNotifierError, MockAllocationRepository,
    MockBookingNotifier, MockRoomRepository, SortDirection, SortField,
};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

fn valid_booking() -> AllocationRequestPayload {
    let start_at = fixture_timestamp() + Duration::days(1);
    AllocationRequestPayload {
        subject: Some("Sprint planning".to_owned()),
        employee_name: Some("Grace Hopper".to_owned()),
        employee_email: Some("grace@example.com".to_owned()),
        start_at: Some(start_at),
        end_at: Some(start_at + Duration::hours(1)),
    }
}

fn stored_allocation(id: i64, start_at: DateTime<Utc>) -> Allocation {
    Allocation {
        id,
        room_id: 3,
        employee: Employee::new("Grace Hopper", "grace@example.com"),
        subject: "Sprint planning".to_owned(),
        start_at,
        end_at: start_at + Duration::hours(1),
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

fn command_service(
    allocations: MockAllocationRepository,
    rooms: MockRoomRepository,
    notifier: MockBookingNotifier,
) -> AllocationCommandService<MockAllocationRepository, MockRoomRepository, MockBookingNotifier> {
    AllocationCommandService::new(
        Arc::new(allocations),
        Arc::new(rooms),
        Arc::new(notifier),
        fixture_clock(),
        ValidationLimits::default(),
    )
}

#[tokio::test]
async fn create_stamps_both_timestamps_from_one_clock_read() {
    let now = fixture_timestamp();
    let stored = stored_allocation(7, now + Duration::days(1));

    let mut rooms = MockRoomRepository::new();
    rooms.expect_exists().times(1).return_once(|_| Ok(true));

    let mut allocations = MockAllocationRepository::new();
    let expected_start = now + Duration::days(1);
    allocations
        .expect_insert()
        .withf(move |payload| {
            payload.room_id == 3
                && payload.subject == "Sprint planning"
                && payload.start_at == expected_start
                && payload.created_at == now
                && payload.updated_at == now
        })
        .times(1)
        .return_once(move |_| Ok(stored));

    let mut notifier = MockBookingNotifier::new();
    notifier
        .expect_notify()
        .withf(|notification| notification.event == BookingEvent::Created)
        .times(1)
        .return_once(|_| Ok(()));

    let service = command_service(allocations, rooms, notifier);
    let response = service
        .create_allocation(CreateAllocationRequest {
            room_id: 3,
            booking: valid_booking(),
        })
        .await
        .expect("valid booking is accepted");

    assert_eq!(response.allocation.id, 7);
    assert_eq!(response.allocation.created_at, response.allocation.updated_at);
}

#[tokio::test]
async fn create_reports_unknown_room_before_field_validation() {
    let mut rooms = MockRoomRepository::new();
    rooms.expect_exists().times(1).return_once(|_| Ok(false));

    let mut allocations = MockAllocationRepository::new();
    allocations.expect_insert().times(0);

    let notifier = MockBookingNotifier::new();

    let service = command_service(allocations, rooms, notifier);
    // The booking payload is empty, so field validation would reject it;
    // the unknown room must win because its check runs first.
    let error = service
        .create_allocation(CreateAllocationRequest {
            room_id: 99,
            booking: AllocationRequestPayload::default(),
        })
        .await
        .expect_err("unknown room is rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert!(error.message().contains("99"));
}

#[tokio::test]
async fn create_collects_ordered_violations() {
    let mut rooms = MockRoomRepository::new();
    rooms.expect_exists().times(1).return_once(|_| Ok(true));

    let mut allocations = MockAllocationRepository::new();
    allocations.expect_insert().times(0);

    let service = command_service(allocations, rooms, MockBookingNotifier::new());
    let error = service
        .create_allocation(CreateAllocationRequest {
            room_id: 3,
            booking: AllocationRequestPayload {
                subject: None,
                employee_name: None,
                ..valid_booking()
            },
        })
        .await
        .expect_err("missing fields are rejected");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    let details = error.details().expect("violations travel in the details");
    assert_eq!(
        details["violations"],
        json!([
            { "field": "subject", "code": "missing" },
            { "field": "employeeName", "code": "missing" },
        ])
    );
}

#[tokio::test]
async fn create_maps_connection_error_to_service_unavailable() {
    let mut rooms = MockRoomRepository::new();
    rooms.expect_exists().times(1).return_once(|_| Ok(true));

    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_insert()
        .times(1)
        .return_once(|_| Err(AllocationRepositoryError::connection("pool unavailable")));

    let service = command_service(allocations, rooms, MockBookingNotifier::new());
    let error = service
        .create_allocation(CreateAllocationRequest {
            room_id: 3,
            booking: valid_booking(),
        })
        .await
        .expect_err("connection failures surface");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn create_succeeds_even_when_notification_delivery_fails() {
    let now = fixture_timestamp();
    let stored = stored_allocation(7, now + Duration::days(1));

    let mut rooms = MockRoomRepository::new();
    rooms.expect_exists().times(1).return_once(|_| Ok(true));

    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_insert()
        .times(1)
        .return_once(move |_| Ok(stored));

    let mut notifier = MockBookingNotifier::new();
    notifier
        .expect_notify()
        .times(1)
        .return_once(|_| Err(BookingNotifierError::delivery("smtp down")));

    let service = command_service(allocations, rooms, notifier);
    service
        .create_allocation(CreateAllocationRequest {
            room_id: 3,
            booking: valid_booking(),
        })
        .await
        .expect("notification failures are swallowed");
}

#[tokio::test]
async fn update_applies_changes_with_a_refreshed_timestamp() {
    let now = fixture_timestamp();
    let updated = stored_allocation(7, now + Duration::days(2));

    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_update()
        .withf(move |allocation_id, changes| {
            *allocation_id == 7 && changes.subject == "Sprint planning" && changes.updated_at == now
        })
        .times(1)
        .return_once(move |_, _| Ok(Some(updated)));

    let mut notifier = MockBookingNotifier::new();
    notifier
        .expect_notify()
        .withf(|notification| notification.event == BookingEvent::Updated)
        .times(1)
        .return_once(|_| Ok(()));

    let service = command_service(allocations, MockRoomRepository::new(), notifier);
    service
        .update_allocation(UpdateAllocationRequest {
            allocation_id: 7,
            booking: valid_booking(),
        })
        .await
        .expect("valid update is applied");
}

#[tokio::test]
async fn update_returns_not_found_for_unknown_allocation() {
    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_update()
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = command_service(
        allocations,
        MockRoomRepository::new(),
        MockBookingNotifier::new(),
    );
    let error = service
        .update_allocation(UpdateAllocationRequest {
            allocation_id: 404,
            booking: valid_booking(),
        })
        .await
        .expect_err("unknown allocation is rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_rejects_invalid_payload_without_touching_the_repository() {
    let mut allocations = MockAllocationRepository::new();
    allocations.expect_update().times(0);

    let service = command_service(
        allocations,
        MockRoomRepository::new(),
        MockBookingNotifier::new(),
    );
    let error = service
        .update_allocation(UpdateAllocationRequest {
            allocation_id: 7,
            booking: AllocationRequestPayload {
                subject: None,
                ..valid_booking()
            },
        })
        .await
        .expect_err("a missing subject is rejected");

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
}

#[tokio::test]
async fn delete_returns_not_found_for_unknown_allocation() {
    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    allocations.expect_delete().times(0);

    let service = command_service(
        allocations,
        MockRoomRepository::new(),
        MockBookingNotifier::new(),
    );
    let error = service
        .delete_allocation(DeleteAllocationRequest { allocation_id: 404 })
        .await
        .expect_err("unknown allocation is rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_vetoes_an_allocation_that_already_started() {
    let now = fixture_timestamp();
    let started = stored_allocation(7, now - Duration::minutes(10));

    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(started)));
    allocations.expect_delete().times(0);

    let service = command_service(
        allocations,
        MockRoomRepository::new(),
        MockBookingNotifier::new(),
    );
    let error = service
        .delete_allocation(DeleteAllocationRequest { allocation_id: 7 })
        .await
        .expect_err("a started allocation cannot be deleted");

    assert_eq!(error.code(), ErrorCode::OperationNotPermitted);
    assert_eq!(
        error.details(),
        Some(&json!({ "reason": "allocation_already_started" }))
    );
}

#[tokio::test]
async fn delete_removes_an_upcoming_allocation_and_notifies() {
    let now = fixture_timestamp();
    let upcoming = stored_allocation(7, now + Duration::hours(2));

    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(upcoming)));
    allocations.expect_delete().times(1).return_once(|_| Ok(true));

    let mut notifier = MockBookingNotifier::new();
    notifier
        .expect_notify()
        .withf(|notification| notification.event == BookingEvent::Cancelled)
        .times(1)
        .return_once(|_| Ok(()));

    let service = command_service(allocations, MockRoomRepository::new(), notifier);
    service
        .delete_allocation(DeleteAllocationRequest { allocation_id: 7 })
        .await
        .expect("an upcoming allocation can be deleted");
}

#[tokio::test]
async fn delete_reports_not_found_when_the_row_vanished() {
    let now = fixture_timestamp();
    let upcoming = stored_allocation(7, now + Duration::hours(2));

    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(upcoming)));
    allocations
        .expect_delete()
        .times(1)
        .return_once(|_| Ok(false));

    let service = command_service(
        allocations,
        MockRoomRepository::new(),
        MockBookingNotifier::new(),
    );
    let error = service
        .delete_allocation(DeleteAllocationRequest { allocation_id: 7 })
        .await
        .expect_err("a vanished row reads as not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_returns_the_stored_allocation() {
    let now = fixture_timestamp();
    let stored = stored_allocation(7, now + Duration::hours(2));

    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let service = AllocationQueryService::new(Arc::new(allocations));
    let response = service
        .get_allocation(GetAllocationRequest { allocation_id: 7 })
        .await
        .expect("stored allocation resolves");

    assert_eq!(response.allocation.id, 7);
    assert_eq!(response.allocation.employee_email, "grace@example.com");
}

#[tokio::test]
async fn get_returns_not_found_when_missing() {
    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let service = AllocationQueryService::new(Arc::new(allocations));
    let error = service
        .get_allocation(GetAllocationRequest { allocation_id: 404 })
        .await
        .expect_err("missing allocation is rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn list_applies_default_paging() {
    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_list()
        .withf(|filter| filter.limit == DEFAULT_PAGE_SIZE && filter.offset == 0)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let service = AllocationQueryService::new(Arc::new(allocations));
    let response = service
        .list_allocations(ListAllocationsRequest::default())
        .await
        .expect("listing succeeds");

    assert!(response.allocations.is_empty());
}

#[tokio::test]
async fn list_caps_the_page_size_and_computes_the_offset() {
    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_list()
        .withf(|filter| filter.limit == MAX_PAGE_SIZE && filter.offset == 2 * MAX_PAGE_SIZE)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let service = AllocationQueryService::new(Arc::new(allocations));
    service
        .list_allocations(ListAllocationsRequest {
            limit: Some(500),
            page: Some(2),
            ..ListAllocationsRequest::default()
        })
        .await
        .expect("listing succeeds");
}

#[tokio::test]
async fn list_passes_filters_and_ordering_through() {
    let mut allocations = MockAllocationRepository::new();
    allocations
        .expect_list()
        .withf(|filter| {
            filter.room_id == Some(3)
                && filter.employee_email.as_deref() == Some("grace@example.com")
                && filter.order
                    == Some(AllocationOrder {
                        field: SortField::StartAt,
                        direction: SortDirection::Descending,
                    })
        })
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let service = AllocationQueryService::new(Arc::new(allocations));
    service
        .list_allocations(ListAllocationsRequest {
            room_id: Some(3),
            employee_email: Some("grace@example.com".to_owned()),
            order_by: Some(AllocationOrder {
                field: SortField::StartAt,
                direction: SortDirection::Descending,
            }),
            limit: None,
            page: None,
        })
        .await
        .expect("listing succeeds");
}
