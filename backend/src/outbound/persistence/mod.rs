//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to the port
//!   error enums.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselAllocationRepository, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/roombook");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselAllocationRepository::new(pool);
//! ```

mod diesel_allocation_repository;
pub(crate) mod diesel_error_mapping;
mod diesel_room_repository;
mod models;
mod pool;
mod schema;

pub use diesel_allocation_repository::DieselAllocationRepository;
pub use diesel_room_repository::DieselRoomRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
