//! PostgreSQL-backed `RoomRepository` implementation using Diesel ORM.
//!
//! Rooms are reference data seeded by migration, so this adapter only reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::booking::Room;
use crate::domain::ports::{RoomRepository, RoomRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::RoomRow;
use super::pool::{DbPool, PoolError};
use super::schema::rooms;

/// Diesel-backed implementation of the room repository port.
#[derive(Clone)]
pub struct DieselRoomRepository {
    pool: DbPool,
}

impl DieselRoomRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_repository_pool_error(error: PoolError) -> RoomRepositoryError {
    map_pool_error(error, |message| RoomRepositoryError::connection(message))
}

fn map_repository_diesel_error(error: diesel::result::Error) -> RoomRepositoryError {
    map_diesel_error(
        error,
        RoomRepositoryError::query,
        RoomRepositoryError::connection,
    )
}

fn row_to_room(row: RoomRow) -> Room {
    Room {
        id: row.id,
        name: row.name,
        seats: row.seats,
        created_at: row.created_at,
    }
}

#[async_trait]
impl RoomRepository for DieselRoomRepository {
    async fn exists(&self, room_id: i64) -> Result<bool, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_repository_pool_error)?;

        diesel::select(diesel::dsl::exists(
            rooms::table.filter(rooms::id.eq(room_id)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_repository_diesel_error)
    }

    async fn find_by_id(&self, room_id: i64) -> Result<Option<Room>, RoomRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_repository_pool_error)?;

        let row = rooms::table
            .filter(rooms::id.eq(room_id))
            .select(RoomRow::as_select())
            .first::<RoomRow>(&mut conn)
            .await
            .optional()
            .map_err(map_repository_diesel_error)?;

        Ok(row.map(row_to_room))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_repository_pool_error(PoolError::build("bad url"));

        assert!(matches!(repo_err, RoomRepositoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("bad url"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_repository_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, RoomRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_copies_all_fields() {
        let created_at = Utc::now();
        let row = RoomRow {
            id: 3,
            name: "Lovelace".to_owned(),
            seats: 12,
            created_at,
        };

        let room = row_to_room(row);

        assert_eq!(room.id, 3);
        assert_eq!(room.name, "Lovelace");
        assert_eq!(room.seats, 12);
        assert_eq!(room.created_at, created_at);
    }
}
