//! Port for meeting room reads.
//!
//! Rooms are reference data; adapters only ever look them up.

use async_trait::async_trait;
use chrono::DateTime;

use crate::domain::booking::Room;

use super::define_port_error;

define_port_error! {
    /// Errors raised by room repository adapters.
    pub enum RoomRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "room repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "room repository query failed: {message}",
    }
}

/// Port for resolving meeting rooms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Whether a room with this id exists.
    async fn exists(&self, room_id: i64) -> Result<bool, RoomRepositoryError>;

    /// Find a room by id.
    async fn find_by_id(&self, room_id: i64) -> Result<Option<Room>, RoomRepositoryError>;
}

/// Fixture implementation resolving every room id to the same sample room.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoomRepository;

#[async_trait]
impl RoomRepository for FixtureRoomRepository {
    async fn exists(&self, _room_id: i64) -> Result<bool, RoomRepositoryError> {
        Ok(true)
    }

    async fn find_by_id(&self, room_id: i64) -> Result<Option<Room>, RoomRepositoryError> {
        Ok(Some(Room {
            id: room_id,
            name: "Hopper".to_owned(),
            seats: 8,
            created_at: DateTime::UNIX_EPOCH,
        }))
    }
}
