//! Room HTTP handlers.
//!
//! Rooms are reference data seeded by migration, so the surface is read-only.
//!
//! ```text
//! GET /api/v1/rooms/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{GetRoomRequest, RoomPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::ApiKeyGuard;
use crate::inbound::http::state::HttpState;

/// Response payload for a room.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponseBody {
    pub id: i64,
    pub name: String,
    pub seats: i32,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<RoomPayload> for RoomResponseBody {
    fn from(value: RoomPayload) -> Self {
        Self {
            id: value.id,
            name: value.name,
            seats: value.seats,
            created_at: value.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoomPath {
    id: i64,
}

/// Fetch one room.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(
        ("id" = i64, Path, description = "Room identifier")
    ),
    responses(
        (status = 200, description = "Room", body = RoomResponseBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Room not found", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["rooms"],
    operation_id = "getRoom",
    security(("ApiKey" = []))
)]
#[get("/rooms/{id}")]
pub async fn get_room(
    state: web::Data<HttpState>,
    _auth: ApiKeyGuard,
    path: web::Path<RoomPath>,
) -> ApiResult<web::Json<RoomResponseBody>> {
    let response = state
        .rooms
        .get_room(GetRoomRequest {
            room_id: path.into_inner().id,
        })
        .await?;

    Ok(web::Json(RoomResponseBody::from(response.room)))
}
