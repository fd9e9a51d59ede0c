//! Persisted allocation records and their lifecycle state.

use chrono::{DateTime, Utc};

use super::Employee;

/// Lifecycle state of an allocation relative to a point in time.
///
/// Transitions are driven purely by wall-clock time advancing; the state is
/// recomputed fresh from the booking window on every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    /// The booking window has not started yet.
    Upcoming,
    /// The booking window is in progress.
    Active,
    /// The booking window has ended.
    Past,
}

/// A persisted meeting-room allocation.
///
/// ## Invariants
/// - `start_at < end_at`, enforced by the validation pipeline before any
///   write reaches persistence.
/// - `created_at` is set exactly once at first insert and never changes.
/// - `updated_at` equals `created_at` at creation and is refreshed on every
///   subsequent mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Stable allocation identifier.
    pub id: i64,
    /// Room the allocation books. Immutable after creation.
    pub room_id: i64,
    /// Employee the room is allocated to. Immutable after creation.
    pub employee: Employee,
    /// Meeting subject.
    pub subject: String,
    /// Start of the booking window, inclusive.
    pub start_at: DateTime<Utc>,
    /// End of the booking window, exclusive.
    pub end_at: DateTime<Utc>,
    /// When the record was first persisted.
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Allocation {
    /// Lifecycle state of the booking window relative to `now`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::booking::{Allocation, AllocationStatus, Employee};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let start = Utc
    ///     .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
    ///     .single()
    ///     .expect("valid timestamp");
    /// let end = Utc
    ///     .with_ymd_and_hms(2026, 3, 2, 10, 0, 0)
    ///     .single()
    ///     .expect("valid timestamp");
    /// let allocation = Allocation {
    ///     id: 1,
    ///     room_id: 1,
    ///     employee: Employee::new("Grace Hopper", "grace@example.com"),
    ///     subject: "Planning".to_owned(),
    ///     start_at: start,
    ///     end_at: end,
    ///     created_at: start,
    ///     updated_at: start,
    /// };
    /// let before = Utc
    ///     .with_ymd_and_hms(2026, 3, 2, 8, 0, 0)
    ///     .single()
    ///     .expect("valid timestamp");
    /// assert_eq!(allocation.status_at(before), AllocationStatus::Upcoming);
    /// ```
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>) -> AllocationStatus {
        if now < self.start_at {
            AllocationStatus::Upcoming
        } else if now < self.end_at {
            AllocationStatus::Active
        } else {
            AllocationStatus::Past
        }
    }

    /// Whether the allocation may still be deleted at `now`.
    ///
    /// Deletion is allowed only while the booking has not started. Active
    /// and past allocations are historical records and must be kept.
    #[must_use]
    pub fn is_deletable_at(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == AllocationStatus::Upcoming
    }
}

/// Payload for inserting a new allocation.
///
/// Timestamps are stamped by the caller from a single clock read; the
/// repository persists them verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAllocation {
    /// Room the allocation books.
    pub room_id: i64,
    /// Employee the room is allocated to.
    pub employee: Employee,
    /// Meeting subject.
    pub subject: String,
    /// Start of the booking window.
    pub start_at: DateTime<Utc>,
    /// End of the booking window.
    pub end_at: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modified timestamp, equal to `created_at` on insert.
    pub updated_at: DateTime<Utc>,
}

/// Field changes applied to an existing allocation.
///
/// Room and employee are immutable after creation, so only the subject and
/// the booking window can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationChanges {
    /// Replacement meeting subject.
    pub subject: String,
    /// Replacement window start.
    pub start_at: DateTime<Utc>,
    /// Replacement window end.
    pub end_at: DateTime<Utc>,
    /// Refreshed last-modified timestamp.
    pub updated_at: DateTime<Utc>,
}
