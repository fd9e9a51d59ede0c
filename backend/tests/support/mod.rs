//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, which
//! makes it awkward to share small helpers without copy/paste. This module
//! holds in-memory adapter implementations and a controllable clock so suites
//! can exercise the real domain services without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use backend::domain::booking::{Allocation, AllocationChanges, NewAllocation, Room};
use backend::domain::ports::{
    AllocationFilter, AllocationRepository, AllocationRepositoryError, BookingNotification,
    BookingNotifier, BookingNotifierError, RoomRepository, RoomRepositoryError, SortDirection,
    SortField,
};

/// Clock that only moves when a test tells it to.
#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Room catalogue backed by a fixed in-memory set.
pub struct InMemoryRoomCatalogue {
    rooms: HashMap<i64, Room>,
}

impl InMemoryRoomCatalogue {
    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self {
            rooms: rooms.into_iter().map(|room| (room.id, room)).collect(),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomCatalogue {
    async fn exists(&self, room_id: i64) -> Result<bool, RoomRepositoryError> {
        Ok(self.rooms.contains_key(&room_id))
    }

    async fn find_by_id(&self, room_id: i64) -> Result<Option<Room>, RoomRepositoryError> {
        Ok(self.rooms.get(&room_id).cloned())
    }
}

/// Allocation store backed by a mutex-guarded map.
///
/// Identifier assignment mirrors the database sequence: ids start at one and
/// never repeat, even after deletes.
pub struct InMemoryAllocationStore {
    records: Mutex<HashMap<i64, Allocation>>,
    next_id: AtomicI64,
}

impl InMemoryAllocationStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn lock_records(&self) -> MutexGuard<'_, HashMap<i64, Allocation>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("records mutex"),
        }
    }
}

#[async_trait]
impl AllocationRepository for InMemoryAllocationStore {
    async fn insert(
        &self,
        allocation: &NewAllocation,
    ) -> Result<Allocation, AllocationRepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = Allocation {
            id,
            room_id: allocation.room_id,
            employee: allocation.employee.clone(),
            subject: allocation.subject.clone(),
            start_at: allocation.start_at,
            end_at: allocation.end_at,
            created_at: allocation.created_at,
            updated_at: allocation.updated_at,
        };
        self.lock_records().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        allocation_id: i64,
    ) -> Result<Option<Allocation>, AllocationRepositoryError> {
        Ok(self.lock_records().get(&allocation_id).cloned())
    }

    async fn update(
        &self,
        allocation_id: i64,
        changes: &AllocationChanges,
    ) -> Result<Option<Allocation>, AllocationRepositoryError> {
        let mut records = self.lock_records();
        let Some(record) = records.get_mut(&allocation_id) else {
            return Ok(None);
        };
        record.subject = changes.subject.clone();
        record.start_at = changes.start_at;
        record.end_at = changes.end_at;
        record.updated_at = changes.updated_at;
        Ok(Some(record.clone()))
    }

    async fn delete(&self, allocation_id: i64) -> Result<bool, AllocationRepositoryError> {
        Ok(self.lock_records().remove(&allocation_id).is_some())
    }

    async fn list(
        &self,
        filter: &AllocationFilter,
    ) -> Result<Vec<Allocation>, AllocationRepositoryError> {
        let records = self.lock_records();
        let mut matches: Vec<Allocation> = records
            .values()
            .filter(|allocation| {
                filter
                    .room_id
                    .is_none_or(|room_id| allocation.room_id == room_id)
            })
            .filter(|allocation| {
                filter
                    .employee_email
                    .as_deref()
                    .is_none_or(|email| allocation.employee.email == email)
            })
            .cloned()
            .collect();

        matches.sort_by(|left, right| {
            let ordering = match filter.order.map(|order| order.field) {
                Some(SortField::StartAt) => left.start_at.cmp(&right.start_at),
                Some(SortField::EndAt) => left.end_at.cmp(&right.end_at),
                None => std::cmp::Ordering::Equal,
            };
            let ordering = match filter.order.map(|order| order.direction) {
                Some(SortDirection::Descending) => ordering.reverse(),
                _ => ordering,
            };
            ordering.then(left.id.cmp(&right.id))
        });

        let offset = usize::try_from(filter.offset.max(0)).expect("offset fits in usize");
        let limit = usize::try_from(filter.limit.max(0)).expect("limit fits in usize");
        Ok(matches.into_iter().skip(offset).take(limit).collect())
    }
}

/// Notifier that records every notification it is handed.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<BookingNotification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<BookingNotification> {
        match self.notifications.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => panic!("notifications mutex"),
        }
    }
}

#[async_trait]
impl BookingNotifier for RecordingNotifier {
    async fn notify(&self, notification: BookingNotification) -> Result<(), BookingNotifierError> {
        match self.notifications.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(_) => panic!("notifications mutex"),
        }
        Ok(())
    }
}

/// Instant every suite starts from: a Monday morning well before the sample
/// booking windows.
pub fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Rooms seeded into the in-memory catalogue.
pub fn seeded_rooms() -> Vec<Room> {
    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    vec![
        Room {
            id: 1,
            name: "Turing".to_owned(),
            seats: 6,
            created_at,
        },
        Room {
            id: 2,
            name: "Hopper".to_owned(),
            seats: 8,
            created_at,
        },
        Room {
            id: 3,
            name: "Lovelace".to_owned(),
            seats: 12,
            created_at,
        },
    ]
}
