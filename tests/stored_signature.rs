use easydsa::{Error, HashType, ParameterSizes, PrivateKey, PublicKey, Signature};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const TEXT: &str = "DSA signature test!";

#[test]
fn stored_signature_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempdir().unwrap();
    let private_path = dir.path().join("privateDSA.pem");
    let public_path = dir.path().join("publicDSA.pem");
    let sign_path = dir.path().join("text.sign");

    // Generate keys
    let private_key = PrivateKey::generate(ParameterSizes::L1024N160).unwrap();
    let public_key = private_key.public_key();
    assert_eq!(private_key.parameters().p().bits(), 1024);
    assert_eq!(private_key.parameters().q().bits(), 160);

    // Store keys
    private_key.store(&private_path).unwrap();
    public_key.store(&public_path).unwrap();

    // Load private key, sign and save signature
    let loaded_private_key = PrivateKey::load(&private_path).unwrap();
    assert_eq!(loaded_private_key, private_key);
    let signature = loaded_private_key.sign_str(HashType::Sha1, TEXT).unwrap();
    signature.store(&sign_path).unwrap();

    // Load public key, signature and verify
    let loaded_public_key = PublicKey::load(&public_path).unwrap();
    assert_eq!(loaded_public_key, public_key);
    let loaded_signature = Signature::load(&sign_path).unwrap();
    assert_eq!(loaded_signature, signature);
    assert!(loaded_public_key.verify_str(HashType::Sha1, TEXT, &loaded_signature));

    // Tampering with any byte of the stored text breaks it
    let stored = fs::read(&sign_path).unwrap();
    for i in 0..stored.len() {
        let mut tampered = stored.clone();
        tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
        fs::write(&sign_path, &tampered).unwrap();

        match Signature::load(&sign_path) {
            Ok(sig) => assert!(!loaded_public_key.verify_str(HashType::Sha1, TEXT, &sig)),
            Err(e) => assert!(matches!(e, Error::Base64(_))),
        }
    }
}

#[test]
fn key_codec_round_trip() {
    let private_key = PrivateKey::generate(ParameterSizes::L1024N160).unwrap();
    let public_key = private_key.public_key();

    let pem = private_key.to_pem().unwrap();
    assert_eq!(PrivateKey::from_pem(&pem).unwrap(), private_key);
    assert_eq!(PrivateKey::from_pem(&pem).unwrap().to_pem().unwrap(), pem);

    let pem = public_key.to_pem().unwrap();
    assert_eq!(PublicKey::from_pem(&pem).unwrap(), public_key);
}

#[test]
fn independent_keys() {
    let alice = PrivateKey::generate(ParameterSizes::L1024N160).unwrap();
    let bob = PrivateKey::generate(ParameterSizes::L1024N160).unwrap();
    assert_ne!(alice.parameters(), bob.parameters());

    let sig = alice.sign(HashType::Sha256, b"from alice").unwrap();
    assert!(alice.public_key().verify(HashType::Sha256, b"from alice", &sig));
    assert!(!bob.public_key().verify(HashType::Sha256, b"from alice", &sig));
}

#[cfg(unix)]
#[test]
fn stored_file_modes() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let private_key = PrivateKey::generate(ParameterSizes::L1024N160).unwrap();
    let signature = private_key.sign(HashType::Md5, b"").unwrap();

    private_key.store(dir.path().join("private.pem")).unwrap();
    private_key.public_key().store(dir.path().join("public.pem")).unwrap();
    signature.store(dir.path().join("empty.sign")).unwrap();

    let mode = |name: &str| {
        fs::metadata(dir.path().join(name))
            .unwrap()
            .permissions()
            .mode()
            & 0o777
    };
    assert_eq!(mode("private.pem"), 0o600);
    assert_eq!(mode("public.pem"), 0o644);
    assert_eq!(mode("empty.sign"), 0o644);
}
