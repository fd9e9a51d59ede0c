//! Domain primitives and aggregates.
//!
//! Purpose: define the strongly typed booking model shared by the API and
//! persistence layers, the validation pipeline that guards it, and the port
//! traits adapters implement. Keep types immutable and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - `booking` — allocation entities, validation limits, and the rule
//!   pipeline producing ordered violations.
//! - `ports` — driving and driven port traits with fixture implementations.
//! - `allocation_service` / `room_service` — driving-port implementations
//!   orchestrating validation, persistence, and notification.
//! - [`Error`] / [`ErrorCode`] — API error response payload.

pub mod allocation_service;
pub mod booking;
pub mod error;
pub mod ports;
pub mod room_service;

pub use self::allocation_service::{AllocationCommandService, AllocationQueryService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::room_service::RoomQueryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such allocation"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
