//! Client-side verification for signed licensing-server responses.
//!
//! This crate provides a **small, transport-agnostic** toolkit for
//! automation clients that need to decide whether a server response
//! can be trusted before acting on it.
//!
//! ## Guarantees
//! - Signature checks run over the raw body, before any parsing
//! - A missing signature never reaches the cryptographic primitive
//! - Freshness is checked against an explicit, caller-supplied clock
//! - Invalid input surfaces as typed errors, never panics
//!
//! ## Non-Guarantees
//! - Transport (fetching responses is the caller's job)
//! - Key distribution or rotation
//! - Schema validation of the `data` payload
//!
//! Three independent surfaces are exposed: envelope validation
//! (`request_id` / `created_at` checks), RSA-SHA256 signature
//! verification over base64 inputs, and local settings-file lookup.
//! [`ResponseVerifier`] combines the first two into one call.

mod envelope;
mod error;
mod settings;
mod signing;
mod types;
mod verifier;

pub use envelope::{
    is_envelope_valid,
    is_timestamp_fresh,
    parse_envelope,
    parse_timestamp,
    validate_envelope,
    validate_server_info,
    ValidationError,
};
pub use error::VerifyError;
pub use settings::{
    find_settings_files,
    lookup_setting,
    settings_value,
    user_email,
    SETTINGS_FILE_NAME,
};
pub use signing::{
    decode_private_key,
    decode_public_key,
    sha256_digest,
    sign_payload,
    verify_signature,
    verify_signature_strict,
    SignatureError,
};
pub use types::{MaxAge, ParseMaxAgeError, RequestId, ResponseEnvelope, ServerInfo};
pub use verifier::{ResponseVerifier, VerifierConfig};
