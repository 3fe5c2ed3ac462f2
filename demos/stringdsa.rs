//! Signs a string with a fresh key and verifies it.

use easydsa::{HashType, ParameterSizes, PrivateKey};

fn main() -> Result<(), easydsa::Error> {
    env_logger::init();

    let private_key = PrivateKey::generate(ParameterSizes::L1024N160)?;
    let public_key = private_key.public_key();

    let text = "DSA signature test!";
    let signature = private_key.sign_str(HashType::Sha1, text)?;
    println!("Signature: {}", signature);
    println!("Valid: {}", public_key.verify_str(HashType::Sha1, text, &signature));
    Ok(())
}
