//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{allocations, rooms};

/// Row struct for reading from the rooms table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rooms)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoomRow {
    pub id: i64,
    pub name: String,
    pub seats: i32,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the allocations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = allocations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AllocationRow {
    pub id: i64,
    pub room_id: i64,
    pub employee_name: String,
    pub employee_email: String,
    pub subject: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating allocation records.
///
/// The database assigns the id; every other column comes from the caller,
/// including both audit timestamps.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = allocations)]
pub(crate) struct NewAllocationRow<'a> {
    pub room_id: i64,
    pub employee_name: &'a str,
    pub employee_email: &'a str,
    pub subject: &'a str,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating an allocation's subject and window.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = allocations)]
pub(crate) struct AllocationChangesRow<'a> {
    pub subject: &'a str,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
