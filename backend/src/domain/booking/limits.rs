//! Configured maxima consulted by the validation pipeline.

/// Default maximum length of an allocation subject, in characters.
pub const DEFAULT_SUBJECT_MAX_LENGTH: usize = 60;
/// Default maximum length of an employee name, in characters.
pub const DEFAULT_EMPLOYEE_NAME_MAX_LENGTH: usize = 40;
/// Default maximum length of an employee email, in characters.
pub const DEFAULT_EMPLOYEE_EMAIL_MAX_LENGTH: usize = 60;
/// Default maximum allocation duration, in seconds (four hours).
pub const DEFAULT_MAX_DURATION_SECONDS: i64 = 14_400;

/// Named maxima supplied to the validation pipeline.
///
/// Every bound is explicit configuration rather than a literal embedded in
/// rule logic; deployments override individual fields through the
/// application settings.
///
/// # Examples
/// ```
/// use backend::domain::booking::ValidationLimits;
///
/// let limits = ValidationLimits::default();
/// assert_eq!(limits.subject_max_length, 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Maximum subject length, in characters.
    pub subject_max_length: usize,
    /// Maximum employee name length, in characters.
    pub employee_name_max_length: usize,
    /// Maximum employee email length, in characters.
    pub employee_email_max_length: usize,
    /// Maximum booking window, in whole seconds.
    pub max_duration_seconds: i64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            subject_max_length: DEFAULT_SUBJECT_MAX_LENGTH,
            employee_name_max_length: DEFAULT_EMPLOYEE_NAME_MAX_LENGTH,
            employee_email_max_length: DEFAULT_EMPLOYEE_EMAIL_MAX_LENGTH,
            max_duration_seconds: DEFAULT_MAX_DURATION_SECONDS,
        }
    }
}
