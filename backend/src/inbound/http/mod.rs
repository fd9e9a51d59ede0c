//! HTTP inbound adapter exposing REST endpoints.

pub mod allocations;
pub mod auth;
pub mod error;
pub mod health;
pub mod rooms;
pub mod state;
pub mod validation;

pub use error::ApiResult;
