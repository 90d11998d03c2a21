use chrono::{DateTime, NaiveDateTime, Utc};

use crate::types::{MaxAge, ResponseEnvelope, ServerInfo};

/// Reasons why a response envelope was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MalformedBody,
    MissingServerInfo,
    MissingRequestId,
    MissingTimestamp,
    InvalidRequestId,
    InvalidTimestamp,
    StaleTimestamp,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MalformedBody =>
                write!(f, "response body is not valid JSON"),
            ValidationError::MissingServerInfo =>
                write!(f, "server_info block is missing"),
            ValidationError::MissingRequestId =>
                write!(f, "server_info.request_id is missing"),
            ValidationError::MissingTimestamp =>
                write!(f, "server_info.created_at is missing"),
            ValidationError::InvalidRequestId =>
                write!(f, "request_id is not a canonical UUIDv4"),
            ValidationError::InvalidTimestamp =>
                write!(f, "created_at is not a recognizable timestamp"),
            ValidationError::StaleTimestamp =>
                write!(f, "created_at is outside the freshness window"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Parse a raw response body into an envelope.
pub fn parse_envelope(body: &str) -> Result<ResponseEnvelope, ValidationError> {
    serde_json::from_str(body).map_err(|_| ValidationError::MalformedBody)
}

/// Validate a response body in one call.
///
/// Accepts only bodies whose `server_info` carries a canonical UUIDv4
/// `request_id` and a `created_at` within `max_age` of `now`.
pub fn validate_envelope(
    body: &str,
    max_age: MaxAge,
    now: DateTime<Utc>,
) -> Result<ResponseEnvelope, ValidationError> {
    let envelope = parse_envelope(body)?;
    let info = envelope
        .server_info
        .as_ref()
        .ok_or(ValidationError::MissingServerInfo)?;
    validate_server_info(info, max_age, now)?;
    Ok(envelope)
}

/// Validate the metadata block of an already-parsed envelope.
pub fn validate_server_info(
    info: &ServerInfo,
    max_age: MaxAge,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    // Empty strings count as missing, matching the server's contract
    // that both fields are always populated.
    let request_id = info
        .request_id
        .as_ref()
        .filter(|id| !id.0.is_empty())
        .ok_or(ValidationError::MissingRequestId)?;
    let created_at = info
        .created_at
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(ValidationError::MissingTimestamp)?;

    let created_at = parse_timestamp(created_at).ok_or(ValidationError::InvalidTimestamp)?;
    if !is_timestamp_fresh(created_at, now, max_age) {
        return Err(ValidationError::StaleTimestamp);
    }

    if !request_id.is_canonical_v4() {
        return Err(ValidationError::InvalidRequestId);
    }

    Ok(())
}

/// Boolean form of [`validate_envelope`] against the current clock.
pub fn is_envelope_valid(body: &str, max_age: MaxAge) -> bool {
    validate_envelope(body, max_age, Utc::now()).is_ok()
}

/// Basic timestamp freshness check.
///
/// Age is measured as `now - created_at`; a timestamp ahead of `now`
/// has negative age and is always fresh.
pub fn is_timestamp_fresh(created_at: DateTime<Utc>, now: DateTime<Utc>, max_age: MaxAge) -> bool {
    now.signed_duration_since(created_at) <= max_age.as_duration()
}

/// Parse an ISO-8601-like timestamp.
///
/// A timestamp without an offset is interpreted as UTC; an explicit
/// offset or `Z` suffix is honored.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
