//! Signs a file with a fresh key and verifies it.
//!
//! Usage: `cargo run --example filedsa [FILE]` (defaults to /etc/hosts).

use std::env;

use easydsa::{HashType, ParameterSizes, PrivateKey};

fn main() -> Result<(), easydsa::Error> {
    env_logger::init();

    let path = env::args().nth(1).unwrap_or_else(|| "/etc/hosts".to_owned());

    let private_key = PrivateKey::generate(ParameterSizes::L1024N160)?;
    let public_key = private_key.public_key();

    let signature = private_key.sign_file(HashType::Sha1, &path)?;
    println!("Signature: {}", signature);
    println!("Valid: {}", public_key.verify_file(HashType::Sha1, &path, &signature)?);
    Ok(())
}
