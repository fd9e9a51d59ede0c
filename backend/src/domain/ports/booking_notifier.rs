//! Port for notifying employees about booking changes.
//!
//! Delivery is best effort: the services log and swallow failures rather
//! than failing the operation that triggered the notification.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::booking::Allocation;

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking notifier adapters.
    pub enum BookingNotifierError {
        /// The notification could not be handed to the delivery channel.
        Delivery { message: String } =>
            "booking notification delivery failed: {message}",
    }
}

/// Lifecycle event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingEvent {
    /// The allocation was created.
    Created,
    /// The allocation's subject or window changed.
    Updated,
    /// The allocation was deleted before it started.
    Cancelled,
}

/// Notification describing one booking change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingNotification {
    /// What happened to the booking.
    pub event: BookingEvent,
    /// Allocation the event refers to.
    pub allocation_id: i64,
    /// Employee to notify.
    pub employee_email: String,
    /// Meeting subject at the time of the event.
    pub subject: String,
    /// Window start at the time of the event.
    pub start_at: DateTime<Utc>,
    /// Window end at the time of the event.
    pub end_at: DateTime<Utc>,
}

impl BookingNotification {
    /// Build a notification from a persisted allocation.
    pub fn for_allocation(event: BookingEvent, allocation: &Allocation) -> Self {
        Self {
            event,
            allocation_id: allocation.id,
            employee_email: allocation.employee.email.clone(),
            subject: allocation.subject.clone(),
            start_at: allocation.start_at,
            end_at: allocation.end_at,
        }
    }
}

/// Port for delivering booking notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    /// Deliver one notification.
    async fn notify(&self, notification: BookingNotification) -> Result<(), BookingNotifierError>;
}

/// Fixture notifier that accepts every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingNotifier;

#[async_trait]
impl BookingNotifier for FixtureBookingNotifier {
    async fn notify(&self, _notification: BookingNotification) -> Result<(), BookingNotifierError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::{Duration, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::booking::Employee;

    #[rstest]
    fn notification_copies_allocation_fields() {
        let now = Utc::now();
        let allocation = Allocation {
            id: 9,
            room_id: 2,
            employee: Employee::new("Grace Hopper", "grace@example.com"),
            subject: "Sprint planning".to_owned(),
            start_at: now + Duration::hours(1),
            end_at: now + Duration::hours(2),
            created_at: now,
            updated_at: now,
        };

        let notification = BookingNotification::for_allocation(BookingEvent::Created, &allocation);

        assert_eq!(notification.allocation_id, 9);
        assert_eq!(notification.employee_email, "grace@example.com");
        assert_eq!(notification.subject, "Sprint planning");
        assert_eq!(notification.event, BookingEvent::Created);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_notifier_accepts_everything() {
        let now = Utc::now();
        let notification = BookingNotification {
            event: BookingEvent::Cancelled,
            allocation_id: 1,
            employee_email: "grace@example.com".to_owned(),
            subject: "Sprint planning".to_owned(),
            start_at: now,
            end_at: now + Duration::hours(1),
        };

        FixtureBookingNotifier
            .notify(notification)
            .await
            .expect("fixture delivery succeeds");
    }

    #[rstest]
    fn delivery_error_formats_message() {
        let err = BookingNotifierError::delivery("smtp refused");
        assert!(err.to_string().contains("smtp refused"));
    }
}
