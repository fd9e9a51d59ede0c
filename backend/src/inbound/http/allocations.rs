//! Allocation HTTP handlers.
//!
//! ```text
//! POST   /api/v1/allocations
//! PUT    /api/v1/allocations/{id}
//! DELETE /api/v1/allocations/{id}
//! GET    /api/v1/allocations/{id}
//! GET    /api/v1/allocations
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    AllocationPayload, AllocationRequestPayload, CreateAllocationRequest, DeleteAllocationRequest,
    GetAllocationRequest, ListAllocationsRequest, UpdateAllocationRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::ApiKeyGuard;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_rfc3339_timestamp, parse_order_by,
};

/// Request payload for creating an allocation.
///
/// Booking fields are optional at the transport level; absence is reported by
/// the domain validator as a `missing` violation, not as a parse failure.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllocationRequestBody {
    pub room_id: i64,
    pub subject: Option<String>,
    pub employee_name: Option<String>,
    pub employee_email: Option<String>,
    #[schema(format = "date-time")]
    pub start_at: Option<String>,
    #[schema(format = "date-time")]
    pub end_at: Option<String>,
}

/// Request payload for updating an allocation's subject and window.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAllocationRequestBody {
    pub subject: Option<String>,
    #[schema(format = "date-time")]
    pub start_at: Option<String>,
    #[schema(format = "date-time")]
    pub end_at: Option<String>,
}

/// Response payload for a stored allocation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResponseBody {
    pub id: i64,
    pub room_id: i64,
    pub subject: String,
    pub employee_name: String,
    pub employee_email: String,
    #[schema(format = "date-time")]
    pub start_at: String,
    #[schema(format = "date-time")]
    pub end_at: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<AllocationPayload> for AllocationResponseBody {
    fn from(value: AllocationPayload) -> Self {
        Self {
            id: value.id,
            room_id: value.room_id,
            subject: value.subject,
            employee_name: value.employee_name,
            employee_email: value.employee_email,
            start_at: value.start_at.to_rfc3339(),
            end_at: value.end_at.to_rfc3339(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Response payload for listing allocations.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAllocationsResponseBody {
    pub allocations: Vec<AllocationResponseBody>,
}

/// Query parameters for listing allocations.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListAllocationsQuery {
    pub room_id: Option<i64>,
    pub employee_email: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct AllocationPath {
    id: i64,
}

fn parse_booking_fields(
    subject: Option<String>,
    employee_name: Option<String>,
    employee_email: Option<String>,
    start_at: Option<String>,
    end_at: Option<String>,
) -> Result<AllocationRequestPayload, Error> {
    Ok(AllocationRequestPayload {
        subject,
        employee_name,
        employee_email,
        start_at: parse_optional_rfc3339_timestamp(start_at, FieldName::new("startAt"))?,
        end_at: parse_optional_rfc3339_timestamp(end_at, FieldName::new("endAt"))?,
    })
}

/// Book a room for an employee.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::allocations::create_allocation;
/// use backend::inbound::http::state::{HttpState, HttpStatePorts};
///
/// let state = web::Data::new(HttpState::new(HttpStatePorts::default()));
/// let app = App::new()
///     .app_data(state)
///     .service(web::scope("/api/v1").service(create_allocation));
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/allocations",
    request_body = CreateAllocationRequestBody,
    responses(
        (status = 201, description = "Allocation created", body = AllocationResponseBody),
        (status = 400, description = "Malformed request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 422, description = "Validation failed", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["allocations"],
    operation_id = "createAllocation",
    security(("ApiKey" = []))
)]
#[post("/allocations")]
pub async fn create_allocation(
    state: web::Data<HttpState>,
    _auth: ApiKeyGuard,
    payload: web::Json<CreateAllocationRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let booking = parse_booking_fields(
        body.subject,
        body.employee_name,
        body.employee_email,
        body.start_at,
        body.end_at,
    )?;

    let response = state
        .allocations
        .create_allocation(CreateAllocationRequest {
            room_id: body.room_id,
            booking,
        })
        .await?;

    Ok(HttpResponse::Created().json(AllocationResponseBody::from(response.allocation)))
}

/// Change an allocation's subject or window.
///
/// Employee fields are not part of the update surface and cannot be changed
/// once booked.
#[utoipa::path(
    put,
    path = "/api/v1/allocations/{id}",
    request_body = UpdateAllocationRequestBody,
    params(
        ("id" = i64, Path, description = "Allocation identifier")
    ),
    responses(
        (status = 204, description = "Allocation updated"),
        (status = 400, description = "Malformed request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Allocation not found", body = Error),
        (status = 422, description = "Validation failed", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["allocations"],
    operation_id = "updateAllocation",
    security(("ApiKey" = []))
)]
#[put("/allocations/{id}")]
pub async fn update_allocation(
    state: web::Data<HttpState>,
    _auth: ApiKeyGuard,
    path: web::Path<AllocationPath>,
    payload: web::Json<UpdateAllocationRequestBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let booking = parse_booking_fields(body.subject, None, None, body.start_at, body.end_at)?;

    state
        .allocations
        .update_allocation(UpdateAllocationRequest {
            allocation_id: path.into_inner().id,
            booking,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Cancel an allocation that has not started yet.
#[utoipa::path(
    delete,
    path = "/api/v1/allocations/{id}",
    params(
        ("id" = i64, Path, description = "Allocation identifier")
    ),
    responses(
        (status = 204, description = "Allocation deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Allocation not found", body = Error),
        (status = 422, description = "Allocation already started", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["allocations"],
    operation_id = "deleteAllocation",
    security(("ApiKey" = []))
)]
#[delete("/allocations/{id}")]
pub async fn delete_allocation(
    state: web::Data<HttpState>,
    _auth: ApiKeyGuard,
    path: web::Path<AllocationPath>,
) -> ApiResult<HttpResponse> {
    state
        .allocations
        .delete_allocation(DeleteAllocationRequest {
            allocation_id: path.into_inner().id,
        })
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Fetch one allocation.
#[utoipa::path(
    get,
    path = "/api/v1/allocations/{id}",
    params(
        ("id" = i64, Path, description = "Allocation identifier")
    ),
    responses(
        (status = 200, description = "Allocation", body = AllocationResponseBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Allocation not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["allocations"],
    operation_id = "getAllocation",
    security(("ApiKey" = []))
)]
#[get("/allocations/{id}")]
pub async fn get_allocation(
    state: web::Data<HttpState>,
    _auth: ApiKeyGuard,
    path: web::Path<AllocationPath>,
) -> ApiResult<web::Json<AllocationResponseBody>> {
    let response = state
        .allocation_queries
        .get_allocation(GetAllocationRequest {
            allocation_id: path.into_inner().id,
        })
        .await?;

    Ok(web::Json(AllocationResponseBody::from(response.allocation)))
}

/// List allocations with optional filters, ordering, and pagination.
#[utoipa::path(
    get,
    path = "/api/v1/allocations",
    params(
        ("roomId" = Option<i64>, Query, description = "Only allocations for this room"),
        ("employeeEmail" = Option<String>, Query, description = "Only allocations for this employee"),
        ("orderBy" = Option<String>, Query, description = "startAt or endAt; prefix with - for descending"),
        ("limit" = Option<i64>, Query, description = "Page size, capped server-side"),
        ("page" = Option<i64>, Query, description = "Zero-based page index")
    ),
    responses(
        (status = 200, description = "Allocations", body = ListAllocationsResponseBody),
        (status = 400, description = "Malformed request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["allocations"],
    operation_id = "listAllocations",
    security(("ApiKey" = []))
)]
#[get("/allocations")]
pub async fn list_allocations(
    state: web::Data<HttpState>,
    _auth: ApiKeyGuard,
    query: web::Query<ListAllocationsQuery>,
) -> ApiResult<web::Json<ListAllocationsResponseBody>> {
    let query = query.into_inner();
    let order_by = parse_order_by(query.order_by)?;

    let response = state
        .allocation_queries
        .list_allocations(ListAllocationsRequest {
            room_id: query.room_id,
            employee_email: query.employee_email,
            order_by,
            limit: query.limit,
            page: query.page,
        })
        .await?;

    Ok(web::Json(ListAllocationsResponseBody {
        allocations: response
            .allocations
            .into_iter()
            .map(AllocationResponseBody::from)
            .collect(),
    }))
}

#[cfg(test)]
#[path = "allocations_tests.rs"]
mod tests;
