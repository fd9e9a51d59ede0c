//! Meeting-room booking domain model.
//!
//! Allocations book a room for an employee over a half-open time window.
//! Requests pass through the rule pipeline in [`validation`] before anything
//! is persisted; persisted allocations expose a lifecycle state relative to
//! the clock that gates deletion.

mod allocation;
mod employee;
mod limits;
mod room;
mod validation;

pub use allocation::{Allocation, AllocationChanges, AllocationStatus, NewAllocation};
pub use employee::Employee;
pub use limits::{
    DEFAULT_EMPLOYEE_EMAIL_MAX_LENGTH, DEFAULT_EMPLOYEE_NAME_MAX_LENGTH,
    DEFAULT_MAX_DURATION_SECONDS, DEFAULT_SUBJECT_MAX_LENGTH, ValidationLimits,
};
pub use room::Room;
pub use validation::{
    AllocationRequest, BookingUpdate, Field, NewBooking, ValidationErrors, Violation,
    ViolationCode, validate_booking_update, validate_new_booking,
};
