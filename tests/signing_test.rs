use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

use response_verifier::{
    decode_public_key, sha256_digest, sign_payload, verify_signature, verify_signature_strict,
    SignatureError,
};

static KEYS: OnceLock<(String, String)> = OnceLock::new();

/// Transient 2048-bit keypair, generated once per test binary.
fn keys() -> &'static (String, String) {
    KEYS.get_or_init(|| {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("generate key");

        let private_b64 = BASE64.encode(
            private_key
                .to_pkcs8_pem(LineEnding::LF)
                .expect("encode private key")
                .as_bytes(),
        );
        let public_b64 = BASE64.encode(
            private_key
                .to_public_key()
                .to_public_key_pem(LineEnding::LF)
                .expect("encode public key")
                .as_bytes(),
        );
        (private_b64, public_b64)
    })
}

#[test]
fn sign_then_verify_roundtrip() {
    let (private_b64, public_b64) = keys();
    let body = br#"{"error":false,"data":{"licensed":true}}"#;

    let signature = sign_payload(private_b64, body).expect("sign");
    assert!(verify_signature(public_b64, body, &signature));
}

#[test]
fn tampered_signature_is_rejected() {
    let (private_b64, public_b64) = keys();
    let body = b"payload";

    let signature = sign_payload(private_b64, body).expect("sign");
    let mut raw = BASE64.decode(&signature).expect("decode");
    let last = raw.len() - 1;
    raw[last] ^= 0x01;
    let tampered = BASE64.encode(&raw);

    assert!(!verify_signature(public_b64, body, &tampered));
}

#[test]
fn tampered_payload_is_rejected() {
    let (private_b64, public_b64) = keys();

    let signature = sign_payload(private_b64, b"payload").expect("sign");
    assert!(!verify_signature(public_b64, b"payloaD", &signature));
}

#[test]
fn empty_signature_short_circuits() {
    // An unusable key never matters: the empty signature is rejected
    // before any decoding happens.
    assert!(!verify_signature("%%% not base64 %%%", b"payload", ""));

    let (_, public_b64) = keys();
    let public_key = decode_public_key(public_b64).expect("decode");
    assert_eq!(
        verify_signature_strict(&public_key, b"payload", ""),
        Err(SignatureError::MissingSignature)
    );
}

#[test]
fn malformed_signature_base64() {
    let (_, public_b64) = keys();
    let public_key = decode_public_key(public_b64).expect("decode");

    assert_eq!(
        verify_signature_strict(&public_key, b"payload", "%%%"),
        Err(SignatureError::MalformedSignature)
    );
    assert!(!verify_signature(public_b64, b"payload", "%%%"));
}

#[test]
fn wrong_key_is_rejected() {
    let (private_b64, _) = keys();

    let mut rng = rand::thread_rng();
    let other = RsaPrivateKey::new(&mut rng, 2048).expect("generate key");
    let other_public_b64 = BASE64.encode(
        other
            .to_public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("encode public key")
            .as_bytes(),
    );

    let signature = sign_payload(private_b64, b"payload").expect("sign");
    assert!(!verify_signature(&other_public_b64, b"payload", &signature));
}

#[test]
fn malformed_keys_are_typed_errors() {
    assert_eq!(
        decode_public_key("%%%").unwrap_err(),
        SignatureError::MalformedKey
    );
    assert_eq!(
        decode_public_key(&BASE64.encode(b"not a pem")).unwrap_err(),
        SignatureError::MalformedKey
    );
    assert_eq!(
        sign_payload("%%%", b"payload").unwrap_err(),
        SignatureError::MalformedKey
    );
}

#[test]
fn digest_is_sha256() {
    let digest = sha256_digest(b"");
    // SHA-256 of the empty string.
    assert_eq!(
        digest[..4],
        [0xe3, 0xb0, 0xc4, 0x42]
    );
}
