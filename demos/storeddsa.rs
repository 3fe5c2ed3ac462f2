//! Stores a key pair and a signature in the working directory, then loads
//! them back and verifies.

use easydsa::{HashType, ParameterSizes, PrivateKey, PublicKey, Signature};

fn main() -> Result<(), easydsa::Error> {
    env_logger::init();

    let private_key = PrivateKey::generate(ParameterSizes::L1024N160)?;
    private_key.store("privateDSA.pem")?;
    private_key.public_key().store("publicDSA.pem")?;

    let text = "DSA signature test!";

    let loaded_private_key = PrivateKey::load("privateDSA.pem")?;
    loaded_private_key
        .sign_str(HashType::Sha1, text)?
        .store("text.sign")?;

    let loaded_public_key = PublicKey::load("publicDSA.pem")?;
    let loaded_signature = Signature::load("text.sign")?;
    println!(
        "Valid: {}",
        loaded_public_key.verify_str(HashType::Sha1, text, &loaded_signature)
    );
    Ok(())
}
