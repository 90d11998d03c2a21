use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::{Uuid, Variant, Version};

/// Response envelope wrapped around every server reply.
///
/// The `data` payload is opaque to the verifier. Schema management for
/// it is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Whether the server reported the request as failed.
    #[serde(default)]
    pub error: bool,

    /// Operation-specific payload.
    #[serde(default)]
    pub data: serde_json::Value,

    /// Per-response metadata stamped by the server.
    #[serde(default)]
    pub server_info: Option<ServerInfo>,
}

impl ResponseEnvelope {
    /// Build a success envelope with freshly stamped metadata.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            error: false,
            data,
            server_info: Some(ServerInfo::now()),
        }
    }

    /// Build an error envelope with freshly stamped metadata.
    pub fn failure(data: serde_json::Value) -> Self {
        Self {
            error: true,
            data,
            server_info: Some(ServerInfo::now()),
        }
    }
}

/// Per-response metadata block.
///
/// Both fields are optional at the parse layer: their absence is a
/// validation outcome, not a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl ServerInfo {
    /// Stamp a fresh metadata block: a random UUIDv4 request id and the
    /// current UTC time with millisecond precision.
    pub fn now() -> Self {
        Self {
            request_id: Some(RequestId(Uuid::new_v4().to_string())),
            created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

/// Unique identifier stamped on a server response.
///
/// This is a strongly-typed wrapper to avoid accidental mixing of
/// request ids with other string identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

impl RequestId {
    /// Check the id against the canonical UUIDv4 shape: hyphenated,
    /// version 4, RFC 4122 variant. Case-insensitive.
    ///
    /// The length gate rejects the compact and URN forms, which the
    /// UUID parser would otherwise accept.
    pub fn is_canonical_v4(&self) -> bool {
        if self.0.len() != 36 {
            return false;
        }
        let Ok(uuid) = Uuid::parse_str(&self.0) else {
            return false;
        };
        uuid.get_version() == Some(Version::Random) && uuid.get_variant() == Variant::RFC4122
    }
}

/// Freshness window for `created_at` checks.
///
/// Parsed from an integer followed by a unit suffix: `"30s"`, `"5m"`,
/// `"2h"`, `"1d"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxAge {
    secs: i64,
}

impl MaxAge {
    pub fn from_secs(secs: i64) -> Self {
        Self { secs }
    }

    pub fn minutes(minutes: i64) -> Self {
        Self { secs: minutes.saturating_mul(60) }
    }

    pub fn hours(hours: i64) -> Self {
        Self { secs: hours.saturating_mul(3_600) }
    }

    pub fn days(days: i64) -> Self {
        Self { secs: days.saturating_mul(86_400) }
    }

    pub fn as_secs(&self) -> i64 {
        self.secs
    }

    pub fn as_duration(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.secs)
    }
}

impl fmt::Display for MaxAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.secs)
    }
}

impl FromStr for MaxAge {
    type Err = ParseMaxAgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMaxAgeError { input: s.to_string() };

        let Some(unit) = s.chars().last() else {
            return Err(err());
        };
        let digits = &s[..s.len() - unit.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let amount: i64 = digits.parse().map_err(|_| err())?;
        let factor = match unit {
            's' => 1,
            'm' => 60,
            'h' => 3_600,
            'd' => 86_400,
            _ => return Err(err()),
        };

        let secs = amount.checked_mul(factor).ok_or_else(err)?;
        Ok(Self { secs })
    }
}

/// Error returned when a max-age string does not match the expected
/// `<integer><s|m|h|d>` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMaxAgeError {
    pub input: String,
}

impl fmt::Display for ParseMaxAgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid max age {:?}: expected an integer followed by s, m, h or d",
            self.input
        )
    }
}

impl std::error::Error for ParseMaxAgeError {}
