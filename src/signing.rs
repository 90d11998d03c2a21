use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Reasons why a signature check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    MissingSignature,
    MalformedSignature,
    MalformedKey,
    Mismatch,
    SigningFailed,
}

impl std::fmt::Display for SignatureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureError::MissingSignature =>
                write!(f, "signature is missing"),
            SignatureError::MalformedSignature =>
                write!(f, "signature is not valid base64"),
            SignatureError::MalformedKey =>
                write!(f, "key is not a valid base64-encoded PEM"),
            SignatureError::Mismatch =>
                write!(f, "signature does not match payload"),
            SignatureError::SigningFailed =>
                write!(f, "signing operation failed"),
        }
    }
}

impl std::error::Error for SignatureError {}

/// SHA-256 digest of a payload.
pub fn sha256_digest(payload: &[u8]) -> [u8; 32] {
    Sha256::digest(payload).into()
}

/// Decode a base64-encoded SPKI PEM public key.
pub fn decode_public_key(public_key_b64: &str) -> Result<RsaPublicKey, SignatureError> {
    let pem_bytes = BASE64
        .decode(public_key_b64)
        .map_err(|_| SignatureError::MalformedKey)?;
    let pem = String::from_utf8(pem_bytes).map_err(|_| SignatureError::MalformedKey)?;
    RsaPublicKey::from_public_key_pem(&pem).map_err(|_| SignatureError::MalformedKey)
}

/// Decode a base64-encoded PKCS#8 PEM private key.
pub fn decode_private_key(private_key_b64: &str) -> Result<RsaPrivateKey, SignatureError> {
    let pem_bytes = BASE64
        .decode(private_key_b64)
        .map_err(|_| SignatureError::MalformedKey)?;
    let pem = String::from_utf8(pem_bytes).map_err(|_| SignatureError::MalformedKey)?;
    RsaPrivateKey::from_pkcs8_pem(&pem).map_err(|_| SignatureError::MalformedKey)
}

/// Verify a received signature over a payload.
///
/// RSA with PKCS#1 v1.5 padding over SHA-256. The public key arrives as
/// a base64-encoded PEM and the signature as plain base64. An empty
/// signature short-circuits to `false` before any decoding.
pub fn verify_signature(public_key_b64: &str, payload: &[u8], signature_b64: &str) -> bool {
    if signature_b64.is_empty() {
        return false;
    }
    let Ok(public_key) = decode_public_key(public_key_b64) else {
        return false;
    };
    verify_signature_strict(&public_key, payload, signature_b64).is_ok()
}

/// Verify a received signature with typed failures.
pub fn verify_signature_strict(
    public_key: &RsaPublicKey,
    payload: &[u8],
    signature_b64: &str,
) -> Result<(), SignatureError> {
    if signature_b64.is_empty() {
        return Err(SignatureError::MissingSignature);
    }
    let signature = BASE64
        .decode(signature_b64)
        .map_err(|_| SignatureError::MalformedSignature)?;

    // The server signs the SHA-256 digest of the body, not the body
    // itself, and the signing primitive hashes its input once more.
    let digest = sha256_digest(payload);
    let hashed = Sha256::digest(digest);

    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, &signature)
        .map_err(|_| SignatureError::Mismatch)
}

/// Compute the signature the server would attach to a payload.
///
/// Producer-side counterpart of [`verify_signature`]: base64-encoded
/// PKCS#8 PEM private key in, base64 signature out.
pub fn sign_payload(private_key_b64: &str, payload: &[u8]) -> Result<String, SignatureError> {
    let private_key = decode_private_key(private_key_b64)?;

    let digest = sha256_digest(payload);
    let hashed = Sha256::digest(digest);

    let signature = private_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
        .map_err(|_| SignatureError::SigningFailed)?;
    Ok(BASE64.encode(signature))
}
