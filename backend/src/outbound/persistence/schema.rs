//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Bookable rooms, seeded by migration.
    rooms (id) {
        /// Primary key.
        id -> Int8,
        /// Human-readable room name.
        name -> Varchar,
        /// Seating capacity.
        seats -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Room reservations.
    allocations (id) {
        /// Primary key.
        id -> Int8,
        /// Booked room; foreign key into `rooms`.
        room_id -> Int8,
        /// Employee display name.
        employee_name -> Varchar,
        /// Employee email address.
        employee_email -> Varchar,
        /// Meeting subject.
        subject -> Varchar,
        /// Start of the booking window.
        start_at -> Timestamptz,
        /// End of the booking window.
        end_at -> Timestamptz,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(allocations -> rooms (room_id));

diesel::allow_tables_to_appear_in_same_query!(allocations, rooms);
