use sike_core::logging::init_tracing;
use sike_core::params::{CIPHERTEXT_BYTES, CRYPTO_ALGNAME, PUBLICKEY_BYTES};
use sike_core::Sike;

fn main() {
    init_tracing().expect("no other subscriber is installed");

    let kem = Sike::new();
    let mut rng = rand::rng();

    let (public, secret) = kem.keypair(&mut rng).expect("key generation should succeed");
    let (ciphertext, sender_secret) = kem
        .encapsulate(&public, &mut rng)
        .expect("encapsulation should succeed");
    let receiver_secret = kem
        .decapsulate(&secret, &ciphertext)
        .expect("decapsulation should succeed");

    assert_eq!(sender_secret, receiver_secret, "both sides should agree");

    println!("{CRYPTO_ALGNAME} with the reference exchange engine (not post-quantum)");
    println!("public key: {PUBLICKEY_BYTES} bytes, ciphertext: {CIPHERTEXT_BYTES} bytes");
    println!("shared secret: {:02X?}", sender_secret.as_bytes());

    let mut tampered = ciphertext.clone();
    tampered.masked_message[0] ^= 0x80;
    let rejected = kem
        .decapsulate(&secret, &tampered)
        .expect("decapsulation never fails on tampered input");
    println!(
        "tampered ciphertext gives an unrelated secret: {}",
        rejected != sender_secret
    );
}
