//! Generate an RSA keypair in the base64-encoded PEM shape the
//! signing and verification inputs expect.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::RsaPrivateKey;

fn main() {
    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("failed to generate key");
    let public_key = private_key.to_public_key();

    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .expect("encode private key")
        .to_string();
    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .expect("encode public key");

    println!("Private key (base64):");
    println!("{}", BASE64.encode(private_pem.as_bytes()));
    println!();
    println!("Public key (base64):");
    println!("{}", BASE64.encode(public_pem.as_bytes()));
}
