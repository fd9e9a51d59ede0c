//! Shared validation helpers for inbound HTTP adapters.
//!
//! These reject requests that are malformed at the transport level (bad
//! timestamps, unknown sort fields). Field rules such as missing or overlong
//! values belong to the domain validator, which reports them as accumulated
//! violations rather than a single bad-request error.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::{AllocationOrder, SortDirection, SortField};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidTimestamp,
    InvalidOrderBy,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
            ErrorCode::InvalidOrderBy => "invalid_order_by",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value_error(
    field: &str,
    message: impl Into<String>,
    code: ErrorCode,
    value: impl Into<String>,
) -> Error {
    Error::invalid_request(message.into()).with_details(json!({
        "field": field,
        "value": value.into(),
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    invalid_value_error(
        field,
        format!("{field} must be an RFC 3339 timestamp"),
        ErrorCode::InvalidTimestamp,
        value,
    )
}

pub(crate) fn parse_rfc3339_timestamp(
    value: String,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(&value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, &value))
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

/// Parse an `orderBy` query value into a repository ordering.
///
/// Accepts the sortable field names `startAt` and `endAt`, with a `-` prefix
/// selecting descending order.
pub(crate) fn parse_order_by(value: Option<String>) -> Result<Option<AllocationOrder>, Error> {
    let Some(raw) = value else {
        return Ok(None);
    };

    let (direction, field_name) = match raw.strip_prefix('-') {
        Some(rest) => (SortDirection::Descending, rest),
        None => (SortDirection::Ascending, raw.as_str()),
    };
    let field = match field_name {
        "startAt" => SortField::StartAt,
        "endAt" => SortField::EndAt,
        _ => {
            return Err(invalid_value_error(
                "orderBy",
                "orderBy must be startAt or endAt, optionally prefixed with -",
                ErrorCode::InvalidOrderBy,
                raw,
            ));
        }
    };

    Ok(Some(AllocationOrder { field, direction }))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;

    #[rstest]
    fn timestamps_parse_and_normalise_to_utc() {
        let parsed = parse_rfc3339_timestamp(
            "2026-03-02T10:00:00+01:00".to_owned(),
            FieldName::new("startAt"),
        )
        .expect("offset timestamp should parse");

        assert_eq!(parsed.to_rfc3339(), "2026-03-02T09:00:00+00:00");
    }

    #[rstest]
    fn malformed_timestamps_are_rejected_with_field_details() {
        let error = parse_rfc3339_timestamp("next tuesday".to_owned(), FieldName::new("endAt"))
            .expect_err("nonsense timestamp should fail");

        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        let details = error.details().expect("details should be present");
        assert_eq!(details["field"], "endAt");
        assert_eq!(details["code"], "invalid_timestamp");
    }

    #[rstest]
    fn absent_optional_timestamps_stay_absent() {
        let parsed = parse_optional_rfc3339_timestamp(None, FieldName::new("startAt"))
            .expect("absent value is fine");

        assert!(parsed.is_none());
    }

    #[rstest]
    #[case("startAt", SortField::StartAt, SortDirection::Ascending)]
    #[case("endAt", SortField::EndAt, SortDirection::Ascending)]
    #[case("-startAt", SortField::StartAt, SortDirection::Descending)]
    #[case("-endAt", SortField::EndAt, SortDirection::Descending)]
    fn order_by_accepts_the_sortable_fields(
        #[case] raw: &str,
        #[case] field: SortField,
        #[case] direction: SortDirection,
    ) {
        let order = parse_order_by(Some(raw.to_owned()))
            .expect("sortable field should parse")
            .expect("value should yield an ordering");

        assert_eq!(order.field, field);
        assert_eq!(order.direction, direction);
    }

    #[rstest]
    fn absent_order_by_means_no_ordering() {
        assert!(
            parse_order_by(None)
                .expect("absent value is fine")
                .is_none()
        );
    }

    #[rstest]
    #[case("subject")]
    #[case("-")]
    #[case("")]
    #[case("start_at")]
    fn unknown_order_by_values_are_rejected(#[case] raw: &str) {
        let error = parse_order_by(Some(raw.to_owned())).expect_err("value should be rejected");

        assert_eq!(error.code(), DomainErrorCode::InvalidRequest);
        let details = error.details().expect("details should be present");
        assert_eq!(details["code"], "invalid_order_by");
        assert_eq!(details["value"], raw);
    }
}
