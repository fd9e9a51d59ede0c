//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod allocation_command;
mod allocation_query;
mod allocation_repository;
mod booking_notifier;
mod room_query;
mod room_repository;

#[cfg(test)]
pub use allocation_command::MockAllocationCommand;
pub use allocation_command::{
    AllocationCommand, AllocationPayload, AllocationRequestPayload, CreateAllocationRequest,
    CreateAllocationResponse, DeleteAllocationRequest, FixtureAllocationCommand,
    UpdateAllocationRequest,
};
#[cfg(test)]
pub use allocation_query::MockAllocationQuery;
pub use allocation_query::{
    AllocationQuery, FixtureAllocationQuery, GetAllocationRequest, GetAllocationResponse,
    ListAllocationsRequest, ListAllocationsResponse,
};
#[cfg(test)]
pub use allocation_repository::MockAllocationRepository;
pub use allocation_repository::{
    AllocationFilter, AllocationOrder, AllocationRepository, AllocationRepositoryError,
    FixtureAllocationRepository, SortDirection, SortField,
};
#[cfg(test)]
pub use booking_notifier::MockBookingNotifier;
pub use booking_notifier::{
    BookingEvent, BookingNotification, BookingNotifier, BookingNotifierError,
    FixtureBookingNotifier,
};
#[cfg(test)]
pub use room_query::MockRoomQuery;
pub use room_query::{FixtureRoomQuery, GetRoomRequest, GetRoomResponse, RoomPayload, RoomQuery};
#[cfg(test)]
pub use room_repository::MockRoomRepository;
pub use room_repository::{FixtureRoomRepository, RoomRepository, RoomRepositoryError};
