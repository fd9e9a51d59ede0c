//! Log-backed booking notification adapter.
//!
//! The original deployment mailed employees when their booking changed. This
//! repo ships no SMTP infrastructure, so the adapter records each
//! notification as a structured log event instead; a real mail adapter can
//! replace it behind the same port.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{BookingNotification, BookingNotifier, BookingNotifierError};

/// Notifier that emits each booking notification as a tracing event.
#[derive(Debug, Clone, Default)]
pub struct LoggingBookingNotifier;

impl LoggingBookingNotifier {
    /// Create a new logging notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BookingNotifier for LoggingBookingNotifier {
    async fn notify(&self, notification: BookingNotification) -> Result<(), BookingNotifierError> {
        info!(
            event = ?notification.event,
            allocation_id = notification.allocation_id,
            employee_email = %notification.employee_email,
            subject = %notification.subject,
            start_at = %notification.start_at.to_rfc3339(),
            end_at = %notification.end_at.to_rfc3339(),
            "booking notification"
        );
        Ok(())
    }
}
