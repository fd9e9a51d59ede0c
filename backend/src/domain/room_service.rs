//! Room domain service.
//!
//! Rooms are read-only reference data, so a single query service covers the
//! whole driving surface.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::ports::{
    GetRoomRequest, GetRoomResponse, RoomPayload, RoomQuery, RoomRepository, RoomRepositoryError,
};

fn map_repository_error(error: RoomRepositoryError) -> Error {
    match error {
        RoomRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("room repository unavailable: {message}"))
        }
        RoomRepositoryError::Query { message } => {
            Error::internal(format!("room repository error: {message}"))
        }
    }
}

/// Room service implementing the query driving port.
#[derive(Clone)]
pub struct RoomQueryService<R> {
    rooms: Arc<R>,
}

impl<R> RoomQueryService<R> {
    /// Create a new query service over the room repository.
    pub fn new(rooms: Arc<R>) -> Self {
        Self { rooms }
    }
}

#[async_trait]
impl<R> RoomQuery for RoomQueryService<R>
where
    R: RoomRepository,
{
    async fn get_room(&self, request: GetRoomRequest) -> Result<GetRoomResponse, Error> {
        let room = self
            .rooms
            .find_by_id(request.room_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("room {} not found", request.room_id)))?;

        Ok(GetRoomResponse {
            room: RoomPayload::from(room),
        })
    }
}
