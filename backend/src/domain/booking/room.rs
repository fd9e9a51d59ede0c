//! Meeting room reference data.

use chrono::{DateTime, Utc};

/// A bookable meeting room.
///
/// Rooms are reference data seeded by migration. The service reads them to
/// resolve allocation targets and never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Stable room identifier.
    pub id: i64,
    /// Human readable room name.
    pub name: String,
    /// Seating capacity.
    pub seats: i32,
    /// When the room record was created.
    pub created_at: DateTime<Utc>,
}
