use chrono::{DateTime, Utc};
use rsa::RsaPublicKey;

use crate::envelope::validate_envelope;
use crate::error::VerifyError;
use crate::signing::{decode_public_key, verify_signature_strict, SignatureError};
use crate::types::{MaxAge, ResponseEnvelope};

#[cfg(feature = "metrics")]
fn metric_inc(name: &'static str) {
    metrics::increment_counter!(name);
}

#[cfg(not(feature = "metrics"))]
fn metric_inc(_name: &'static str) {}

#[cfg(feature = "tracing")]
fn trace_event(message: &'static str) {
    tracing::info!(message);
}

#[cfg(not(feature = "tracing"))]
fn trace_event(_message: &'static str) {}

/// Verifier configuration.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Maximum accepted age of a response's `created_at`.
    pub max_age: MaxAge,
}

impl Default for VerifierConfig {
    /// Defaults:
    /// - max_age: 5 minutes
    fn default() -> Self {
        Self {
            max_age: MaxAge::minutes(5),
        }
    }
}

/// One-call verification of a signed server response.
///
/// Holds the server's public key, decoded once at construction. The
/// signature over the raw body is checked first; only a correctly
/// signed body is parsed and validated.
#[derive(Debug)]
pub struct ResponseVerifier {
    public_key: RsaPublicKey,
    config: VerifierConfig,
}

impl ResponseVerifier {
    /// Create a verifier from a base64-encoded PEM public key.
    pub fn new(public_key_b64: &str, config: VerifierConfig) -> Result<Self, SignatureError> {
        Ok(Self {
            public_key: decode_public_key(public_key_b64)?,
            config,
        })
    }

    /// Verify a response against the current clock.
    pub fn verify(
        &self,
        body: &str,
        signature_b64: &str,
    ) -> Result<ResponseEnvelope, VerifyError> {
        self.verify_at(body, signature_b64, Utc::now())
    }

    /// Verify a response against an explicit clock.
    pub fn verify_at(
        &self,
        body: &str,
        signature_b64: &str,
        now: DateTime<Utc>,
    ) -> Result<ResponseEnvelope, VerifyError> {
        if let Err(err) = verify_signature_strict(&self.public_key, body.as_bytes(), signature_b64)
        {
            metric_inc("response.verify.failed");
            return Err(VerifyError::Signature(err));
        }

        match validate_envelope(body, self.config.max_age, now) {
            Ok(envelope) => {
                metric_inc("response.verify.ok");
                trace_event("response.verify.ok");
                Ok(envelope)
            }
            Err(err) => {
                metric_inc("response.envelope.invalid");
                Err(VerifyError::Validation(err))
            }
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }
}
