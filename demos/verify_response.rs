//! End-to-end walkthrough: sign a response envelope the way the server
//! does, then verify it the way a client should.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;
use serde_json::json;

use response_verifier::{sign_payload, ResponseEnvelope, ResponseVerifier, VerifierConfig};

fn main() {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");

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

    // Server side: wrap a payload and sign the raw body.
    let envelope = ResponseEnvelope::success(json!({ "licensed": true }));
    let body = serde_json::to_string(&envelope).expect("serialize");
    let signature = sign_payload(&private_b64, body.as_bytes()).expect("sign");

    // Client side: one call decides whether the response is trusted.
    let verifier = ResponseVerifier::new(&public_b64, VerifierConfig::default())
        .expect("decode public key");

    match verifier.verify(&body, &signature) {
        Ok(envelope) => println!("accepted: data = {}", envelope.data),
        Err(err) => println!("rejected: {}", err),
    }

    // A tampered body must be rejected.
    let tampered = body.replace("true", "false");
    match verifier.verify(&tampered, &signature) {
        Ok(_) => println!("tampered body accepted (bug!)"),
        Err(err) => println!("tampered body rejected: {}", err),
    }
}
