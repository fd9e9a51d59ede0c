//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AllocationCommand, AllocationQuery, FixtureAllocationCommand, FixtureAllocationQuery,
    FixtureRoomQuery, RoomQuery,
};

/// Parameter object bundling the port implementations HTTP handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub allocations: Arc<dyn AllocationCommand>,
    pub allocation_queries: Arc<dyn AllocationQuery>,
    pub rooms: Arc<dyn RoomQuery>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            allocations: Arc::new(FixtureAllocationCommand),
            allocation_queries: Arc::new(FixtureAllocationQuery),
            rooms: Arc::new(FixtureRoomQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub allocations: Arc<dyn AllocationCommand>,
    pub allocation_queries: Arc<dyn AllocationQuery>,
    pub rooms: Arc<dyn RoomQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureAllocationCommand, FixtureAllocationQuery, FixtureRoomQuery,
    /// };
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     allocations: Arc::new(FixtureAllocationCommand),
    ///     allocation_queries: Arc::new(FixtureAllocationQuery),
    ///     rooms: Arc::new(FixtureRoomQuery),
    /// });
    /// let _allocations = state.allocations.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            allocations,
            allocation_queries,
            rooms,
        } = ports;
        Self {
            allocations,
            allocation_queries,
            rooms,
        }
    }
}
