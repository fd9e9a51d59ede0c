//! Driving port for meeting room read operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::booking::Room;

/// Serializable room record for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPayload {
    /// Stable room identifier.
    pub id: i64,
    /// Human readable room name.
    pub name: String,
    /// Seating capacity.
    pub seats: i32,
    /// When the room record was created.
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomPayload {
    fn from(value: Room) -> Self {
        Self {
            id: value.id,
            name: value.name,
            seats: value.seats,
            created_at: value.created_at,
        }
    }
}

/// Request to fetch one room by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRoomRequest {
    /// Room to fetch.
    pub room_id: i64,
}

/// Response for a single room lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetRoomResponse {
    /// The room record.
    pub room: RoomPayload,
}

/// Driving port for room read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomQuery: Send + Sync {
    /// Fetches one room by identifier.
    async fn get_room(&self, request: GetRoomRequest) -> Result<GetRoomResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoomQuery;

#[async_trait]
impl RoomQuery for FixtureRoomQuery {
    async fn get_room(&self, request: GetRoomRequest) -> Result<GetRoomResponse, Error> {
        Err(Error::not_found(format!(
            "room {} not found",
            request.room_id
        )))
    }
}
