//! Builders for HTTP state ports backed by the configured adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use backend::domain::booking::ValidationLimits;
use backend::domain::{AllocationCommandService, AllocationQueryService, RoomQueryService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::notify::LoggingBookingNotifier;
use backend::outbound::persistence::{DbPool, DieselAllocationRepository, DieselRoomRepository};

use super::ServerConfig;

/// Build the port bundle using real services when a pool is available,
/// otherwise using fixture implementations.
fn build_booking_ports_with_pool<Pool>(
    pool: &Option<Pool>,
    make_ports: impl FnOnce(&Pool) -> HttpStatePorts,
) -> HttpStatePorts {
    match pool {
        Some(pool) => make_ports(pool),
        None => HttpStatePorts::default(),
    }
}

/// Assemble database-backed allocation and room services over the pool.
fn make_diesel_ports(pool: &DbPool, limits: ValidationLimits) -> HttpStatePorts {
    let allocations = Arc::new(DieselAllocationRepository::new(pool.clone()));
    let rooms = Arc::new(DieselRoomRepository::new(pool.clone()));
    let notifier = Arc::new(LoggingBookingNotifier::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    HttpStatePorts {
        allocations: Arc::new(AllocationCommandService::new(
            allocations.clone(),
            rooms.clone(),
            notifier,
            clock,
            limits,
        )),
        allocation_queries: Arc::new(AllocationQueryService::new(allocations)),
        rooms: Arc::new(RoomQueryService::new(rooms)),
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = build_booking_ports_with_pool(&config.db_pool, |pool| {
        make_diesel_ports(pool, config.limits.clone())
    });
    web::Data::new(HttpState::new(ports))
}
