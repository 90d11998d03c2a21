use std::fmt;

use crate::envelope::ValidationError;
use crate::signing::SignatureError;

/// Errors returned when a response fails the full verification flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The signature over the raw body was rejected.
    /// Nothing in the body should be trusted.
    Signature(SignatureError),

    /// The body is signed correctly but the envelope failed validation.
    Validation(ValidationError),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::Signature(err) =>
                write!(f, "signature rejected: {}", err),
            VerifyError::Validation(err) =>
                write!(f, "envelope rejected: {}", err),
        }
    }
}

impl std::error::Error for VerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VerifyError::Signature(err) => Some(err),
            VerifyError::Validation(err) => Some(err),
        }
    }
}

impl From<SignatureError> for VerifyError {
    fn from(err: SignatureError) -> Self {
        VerifyError::Signature(err)
    }
}

impl From<ValidationError> for VerifyError {
    fn from(err: ValidationError) -> Self {
        VerifyError::Validation(err)
    }
}
