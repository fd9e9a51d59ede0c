//! Application configuration loaded via OrthoConfig.
//!
//! Settings merge command-line arguments, `ROOMBOOK_`-prefixed environment
//! variables, and configuration files, with later sources overriding earlier
//! ones. Validation maxima fall back to the domain defaults when unset.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::booking::{
    DEFAULT_EMPLOYEE_EMAIL_MAX_LENGTH, DEFAULT_EMPLOYEE_NAME_MAX_LENGTH,
    DEFAULT_MAX_DURATION_SECONDS, DEFAULT_SUBJECT_MAX_LENGTH, ValidationLimits,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values controlling the backend at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROOMBOOK")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; fixture adapters serve when unset.
    pub database_url: Option<String>,
    /// Shared API key required on booking endpoints; unset disables the check.
    pub api_key: Option<String>,
    /// Maximum allocation subject length, in characters.
    pub subject_max_length: Option<usize>,
    /// Maximum employee name length, in characters.
    pub employee_name_max_length: Option<usize>,
    /// Maximum employee email length, in characters.
    pub employee_email_max_length: Option<usize>,
    /// Maximum booking window, in whole seconds.
    pub max_duration_seconds: Option<i64>,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Assemble the validation maxima, falling back to domain defaults for
    /// any bound left unconfigured.
    #[must_use]
    pub fn validation_limits(&self) -> ValidationLimits {
        ValidationLimits {
            subject_max_length: self.subject_max_length.unwrap_or(DEFAULT_SUBJECT_MAX_LENGTH),
            employee_name_max_length: self
                .employee_name_max_length
                .unwrap_or(DEFAULT_EMPLOYEE_NAME_MAX_LENGTH),
            employee_email_max_length: self
                .employee_email_max_length
                .unwrap_or(DEFAULT_EMPLOYEE_EMAIL_MAX_LENGTH),
            max_duration_seconds: self
                .max_duration_seconds
                .unwrap_or(DEFAULT_MAX_DURATION_SECONDS),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for application configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("ROOMBOOK_BIND_ADDR", None::<String>),
            ("ROOMBOOK_DATABASE_URL", None::<String>),
            ("ROOMBOOK_API_KEY", None::<String>),
            ("ROOMBOOK_SUBJECT_MAX_LENGTH", None::<String>),
            ("ROOMBOOK_EMPLOYEE_NAME_MAX_LENGTH", None::<String>),
            ("ROOMBOOK_EMPLOYEE_EMAIL_MAX_LENGTH", None::<String>),
            ("ROOMBOOK_MAX_DURATION_SECONDS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), DEFAULT_BIND_ADDR);
        assert!(settings.database_url.is_none());
        assert!(settings.api_key.is_none());
        assert_eq!(settings.validation_limits(), ValidationLimits::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ROOMBOOK_BIND_ADDR", Some("127.0.0.1:9090")),
            ("ROOMBOOK_DATABASE_URL", Some("postgres://localhost/roombook")),
            ("ROOMBOOK_API_KEY", Some("sekrit")),
            ("ROOMBOOK_SUBJECT_MAX_LENGTH", Some("80")),
            ("ROOMBOOK_EMPLOYEE_NAME_MAX_LENGTH", None::<&str>),
            ("ROOMBOOK_EMPLOYEE_EMAIL_MAX_LENGTH", None::<&str>),
            ("ROOMBOOK_MAX_DURATION_SECONDS", Some("7200")),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), "127.0.0.1:9090");
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/roombook")
        );
        assert_eq!(settings.api_key.as_deref(), Some("sekrit"));

        let limits = settings.validation_limits();
        assert_eq!(limits.subject_max_length, 80);
        assert_eq!(
            limits.employee_name_max_length,
            DEFAULT_EMPLOYEE_NAME_MAX_LENGTH
        );
        assert_eq!(
            limits.employee_email_max_length,
            DEFAULT_EMPLOYEE_EMAIL_MAX_LENGTH
        );
        assert_eq!(limits.max_duration_seconds, 7200);
    }

    #[rstest]
    fn partial_limit_overrides_keep_remaining_defaults() {
        let _guard = lock_env([
            ("ROOMBOOK_BIND_ADDR", None::<&str>),
            ("ROOMBOOK_DATABASE_URL", None::<&str>),
            ("ROOMBOOK_API_KEY", None::<&str>),
            ("ROOMBOOK_SUBJECT_MAX_LENGTH", None::<&str>),
            ("ROOMBOOK_EMPLOYEE_NAME_MAX_LENGTH", Some("25")),
            ("ROOMBOOK_EMPLOYEE_EMAIL_MAX_LENGTH", None::<&str>),
            ("ROOMBOOK_MAX_DURATION_SECONDS", None::<&str>),
        ]);

        let limits = load_from_empty_args().validation_limits();
        assert_eq!(limits.subject_max_length, DEFAULT_SUBJECT_MAX_LENGTH);
        assert_eq!(limits.employee_name_max_length, 25);
        assert_eq!(limits.max_duration_seconds, DEFAULT_MAX_DURATION_SECONDS);
    }
}
