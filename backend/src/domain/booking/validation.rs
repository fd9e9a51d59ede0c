//! Allocation request validation pipeline.
//!
//! Checks run in a fixed order and accumulate violations instead of stopping
//! at the first failure, so a caller can surface every problem in one
//! response and tests can assert on error positions. Within a single text
//! field the missing and length checks are mutually exclusive.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Employee, ValidationLimits};

/// Request field a violation refers to.
///
/// Serialises to the camel-case name used by the HTTP payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Meeting subject.
    Subject,
    /// Employee display name.
    EmployeeName,
    /// Employee email address.
    EmployeeEmail,
    /// Start of the booking window.
    StartAt,
    /// End of the booking window.
    EndAt,
}

impl Field {
    fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::EmployeeName => "employeeName",
            Self::EmployeeEmail => "employeeEmail",
            Self::StartAt => "startAt",
            Self::EndAt => "endAt",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// The field is absent or blank.
    Missing,
    /// The field exceeds its configured maximum length.
    ExceedsMaxLength,
    /// The window start is not strictly before its end.
    InconsistentOrdering,
    /// The window starts before the current instant.
    InThePast,
    /// The window is longer than the configured maximum duration.
    ExceedsMaxDuration,
}

impl ViolationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::ExceedsMaxLength => "exceeds_max_length",
            Self::InconsistentOrdering => "inconsistent_ordering",
            Self::InThePast => "in_the_past",
            Self::ExceedsMaxDuration => "exceeds_max_duration",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule violation: the field checked and why it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field the violation refers to.
    pub field: Field,
    /// Reason the field failed.
    pub code: ViolationCode,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.field, self.code)
    }
}

/// Ordered collection of rule violations.
///
/// Entries appear in the order the rules ran, so the position of a violation
/// is deterministic. Serialises as a plain JSON array of violations.
///
/// # Examples
/// ```
/// use backend::domain::booking::{AllocationRequest, ValidationLimits, validate_new_booking};
/// use chrono::Utc;
///
/// let errors = validate_new_booking(
///     &AllocationRequest::default(),
///     &ValidationLimits::default(),
///     Utc::now(),
/// )
/// .expect_err("an empty request violates every presence rule");
/// assert_eq!(errors.len(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    fn push(&mut self, field: Field, code: ViolationCode) {
        self.0.push(Violation { field, code });
    }

    /// Number of violations collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Violation at `index`, in rule-evaluation order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Violation> {
        self.0.get(index)
    }

    /// Iterate the violations in rule-evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Convert into the API error payload carrying every violation.
    ///
    /// The violations travel in the error details under a `violations` key,
    /// preserving rule-evaluation order.
    #[must_use]
    pub fn into_error(self) -> crate::domain::Error {
        crate::domain::Error::validation_failed("allocation validation failed")
            .with_details(serde_json::json!({ "violations": self }))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Transient input payload for one validation call.
///
/// Fields mirror the inbound request body; `None` marks an absent field.
/// The payload carries no identity of its own and is dropped once the call
/// returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Meeting subject, when supplied.
    pub subject: Option<String>,
    /// Employee display name, when supplied.
    pub employee_name: Option<String>,
    /// Employee email address, when supplied.
    pub employee_email: Option<String>,
    /// Window start, when supplied.
    pub start_at: Option<DateTime<Utc>>,
    /// Window end, when supplied.
    pub end_at: Option<DateTime<Utc>>,
}

/// A create request that passed every rule.
///
/// Only the validation pipeline constructs this type, so holding one proves
/// the payload was acceptable at the instant it was checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    subject: String,
    employee: Employee,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
}

impl NewBooking {
    /// Validated meeting subject.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Validated employee identity.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// Validated window start.
    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    /// Validated window end.
    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }
}

/// An update request that passed every revisited rule.
///
/// Room and employee identity are immutable after creation, so an update
/// only revisits the subject and the booking window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingUpdate {
    subject: String,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
}

impl BookingUpdate {
    /// Validated replacement subject.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Validated replacement window start.
    pub fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    /// Validated replacement window end.
    pub fn end_at(&self) -> DateTime<Utc> {
        self.end_at
    }
}

/// Validate a create request against every field rule.
///
/// Rules run in a fixed order: subject, employee name, employee email,
/// window start presence, window end presence, ordering, past check, and
/// maximum duration. `now` must come from a single clock read shared with
/// any related decision in the same operation, so one request is judged
/// against one instant.
///
/// Room existence is not checked here. An unknown room is a missing
/// dependency rather than a malformed field and is reported by the caller
/// before the field rules run.
///
/// # Errors
/// Returns the accumulated, ordered [`ValidationErrors`] when at least one
/// rule fails.
pub fn validate_new_booking(
    request: &AllocationRequest,
    limits: &ValidationLimits,
    now: DateTime<Utc>,
) -> Result<NewBooking, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_text(
        request.subject.as_deref(),
        Field::Subject,
        limits.subject_max_length,
        &mut errors,
    );
    check_text(
        request.employee_name.as_deref(),
        Field::EmployeeName,
        limits.employee_name_max_length,
        &mut errors,
    );
    check_text(
        request.employee_email.as_deref(),
        Field::EmployeeEmail,
        limits.employee_email_max_length,
        &mut errors,
    );
    check_window(request.start_at, request.end_at, limits, now, &mut errors);

    match (
        &request.subject,
        &request.employee_name,
        &request.employee_email,
        request.start_at,
        request.end_at,
    ) {
        (Some(subject), Some(name), Some(email), Some(start_at), Some(end_at))
            if errors.is_empty() =>
        {
            Ok(NewBooking {
                subject: subject.clone(),
                employee: Employee::new(name.clone(), email.clone()),
                start_at,
                end_at,
            })
        }
        _ => Err(errors),
    }
}

/// Validate an update request.
///
/// Reuses the create rules for the subject and the booking window. The
/// employee fields are not revisited and are ignored if present.
///
/// # Errors
/// Returns the accumulated, ordered [`ValidationErrors`] when at least one
/// revisited rule fails.
pub fn validate_booking_update(
    request: &AllocationRequest,
    limits: &ValidationLimits,
    now: DateTime<Utc>,
) -> Result<BookingUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    check_text(
        request.subject.as_deref(),
        Field::Subject,
        limits.subject_max_length,
        &mut errors,
    );
    check_window(request.start_at, request.end_at, limits, now, &mut errors);

    match (&request.subject, request.start_at, request.end_at) {
        (Some(subject), Some(start_at), Some(end_at)) if errors.is_empty() => Ok(BookingUpdate {
            subject: subject.clone(),
            start_at,
            end_at,
        }),
        _ => Err(errors),
    }
}

/// Presence and length checks for one text field.
///
/// A blank value counts as missing; the length check only runs when the
/// value is present, so a field reports at most one violation. Length is
/// measured in characters rather than bytes.
fn check_text(
    value: Option<&str>,
    field: Field,
    max_length: usize,
    errors: &mut ValidationErrors,
) {
    match value {
        None => errors.push(field, ViolationCode::Missing),
        Some(text) if text.trim().is_empty() => errors.push(field, ViolationCode::Missing),
        Some(text) if text.chars().count() > max_length => {
            errors.push(field, ViolationCode::ExceedsMaxLength);
        }
        Some(_) => {}
    }
}

/// Presence, ordering, past, and duration checks for the booking window.
///
/// Ordering and the past check are attributed to the start field, duration
/// to the end field. The duration rule only runs when ordering holds.
fn check_window(
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    limits: &ValidationLimits,
    now: DateTime<Utc>,
    errors: &mut ValidationErrors,
) {
    if start_at.is_none() {
        errors.push(Field::StartAt, ViolationCode::Missing);
    }
    if end_at.is_none() {
        errors.push(Field::EndAt, ViolationCode::Missing);
    }

    let ordering_holds = match (start_at, end_at) {
        (Some(start), Some(end)) if start >= end => {
            errors.push(Field::StartAt, ViolationCode::InconsistentOrdering);
            false
        }
        (Some(_), Some(_)) => true,
        _ => false,
    };

    if let Some(start) = start_at
        && start < now
    {
        errors.push(Field::StartAt, ViolationCode::InThePast);
    }

    if ordering_holds
        && let (Some(start), Some(end)) = (start_at, end_at)
        && (end - start).num_seconds() > limits.max_duration_seconds
    {
        errors.push(Field::EndAt, ViolationCode::ExceedsMaxDuration);
    }
}
