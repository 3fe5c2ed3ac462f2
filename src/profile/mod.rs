//! Configured signing profiles.
//!
//! A [`Profile`] bundles a key pair with the hash type and strength class
//! read from configuration, so that callers can sign and verify without
//! repeating those choices.

use std::path::Path;

use crate::crypto::{Error, HashType, ParameterSizes};
use crate::data::{PrivateKey, PublicKey, Signature};

mod builder;
pub mod config;

pub use self::builder::Builder;

pub struct Profile {
    hash_type: HashType,
    parameter_sizes: ParameterSizes,
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl Profile {
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    /// Strength class used when this profile had to generate its key.
    pub fn parameter_sizes(&self) -> ParameterSizes {
        self.parameter_sizes
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn sign(&self, data: &[u8]) -> Result<Signature, Error> {
        self.private_key.sign(self.hash_type, data)
    }

    pub fn sign_file<P: AsRef<Path>>(&self, path: P) -> Result<Signature, Error> {
        self.private_key.sign_file(self.hash_type, path)
    }

    pub fn verify(&self, data: &[u8], signature: &Signature) -> bool {
        self.public_key.verify(self.hash_type, data, signature)
    }

    pub fn verify_file<P: AsRef<Path>>(
        &self,
        path: P,
        signature: &Signature,
    ) -> Result<bool, Error> {
        self.public_key.verify_file(self.hash_type, path, signature)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    use super::Builder;
    use crate::crypto::{Error, HashType, ParameterSizes};
    use crate::data::{tests::fixture_private_key, PrivateKey, PublicKey};

    #[test]
    fn defaults() {
        let profile = Builder::new()
            .private_key(fixture_private_key())
            .build()
            .unwrap();
        assert_eq!(profile.hash_type(), HashType::Sha256);
        assert_eq!(profile.parameter_sizes(), ParameterSizes::L2048N256);
        assert_eq!(profile.public_key(), &fixture_private_key().public_key());

        let sig = profile.sign(b"Foo bar").unwrap();
        assert!(profile.verify(b"Foo bar", &sig));
        assert!(profile
            .public_key()
            .verify(HashType::Sha256, b"Foo bar", &sig));
        assert!(!profile.verify(b"Spam eggs", &sig));
    }

    #[test]
    fn config_file_settings() {
        let dir = tempdir().unwrap();
        let cfg_file = dir.path().join("profile.toml");
        fs::write(
            &cfg_file,
            "[signing]\nhash = \"sha512\"\n\n[keygen]\nparameter_sizes = \"L3072N256\"\n",
        )
        .unwrap();

        let profile = Builder::new()
            .config_file(cfg_file.to_str().unwrap().to_owned())
            .private_key(fixture_private_key())
            .build()
            .unwrap();
        assert_eq!(profile.hash_type(), HashType::Sha512);
        assert_eq!(profile.parameter_sizes(), ParameterSizes::L3072N256);

        // Explicit settings override the file
        let profile = Builder::new()
            .config_file(cfg_file.to_str().unwrap().to_owned())
            .hash_type(HashType::Md5)
            .private_key(fixture_private_key())
            .build()
            .unwrap();
        assert_eq!(profile.hash_type(), HashType::Md5);
    }

    #[test]
    fn bad_config_values() {
        let dir = tempdir().unwrap();
        let cfg_file = dir.path().join("profile.toml");
        fs::write(&cfg_file, "[signing]\nhash = \"whirlpool\"\n").unwrap();

        let res = Builder::new()
            .config_file(cfg_file.to_str().unwrap().to_owned())
            .private_key(fixture_private_key())
            .build();
        assert!(matches!(res, Err(Error::UnknownHashType(ref s)) if s == "whirlpool"));

        let res = Builder::new()
            .config_file(dir.path().join("missing.toml").to_str().unwrap().to_owned())
            .private_key(fixture_private_key())
            .build();
        assert!(matches!(res, Err(Error::Config(_))));
    }

    #[test]
    fn existing_keyfiles() {
        let dir = tempdir().unwrap();
        let private_keyfile = dir.path().join("private.pem");
        let public_keyfile = dir.path().join("public.pem");
        fixture_private_key().store(&private_keyfile).unwrap();

        let profile = Builder::new()
            .private_key_file(&private_keyfile)
            .public_key_file(&public_keyfile)
            .build()
            .unwrap();
        assert_eq!(profile.private_key(), &fixture_private_key());

        // The missing public key was written alongside
        assert_eq!(
            PublicKey::load(&public_keyfile).unwrap(),
            fixture_private_key().public_key()
        );

        let msg_file = dir.path().join("message");
        fs::write(&msg_file, b"DSA signature test!").unwrap();
        let sig = profile.sign_file(&msg_file).unwrap();
        assert!(profile.verify_file(&msg_file, &sig).unwrap());
    }

    #[test]
    fn generates_missing_keyfile() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = tempdir().unwrap();
        let cfg_file = dir.path().join("profile.toml");
        let private_keyfile = dir.path().join("private.pem");
        let public_keyfile = dir.path().join("public.pem");
        fs::write(
            &cfg_file,
            format!(
                "[keygen]\nparameter_sizes = \"L1024N160\"\n\n\
                 [keys]\nprivate_keyfile = {:?}\npublic_keyfile = {:?}\n",
                private_keyfile.to_str().unwrap(),
                public_keyfile.to_str().unwrap(),
            ),
        )
        .unwrap();

        let first = Builder::new()
            .config_file(cfg_file.to_str().unwrap().to_owned())
            .build()
            .unwrap();
        assert_eq!(first.private_key().parameters().p().bits(), 1024);
        assert_eq!(PrivateKey::load(&private_keyfile).unwrap(), *first.private_key());
        assert_eq!(PublicKey::load(&public_keyfile).unwrap(), *first.public_key());

        // A second profile picks up the stored key instead of generating
        let second = Builder::new()
            .config_file(cfg_file.to_str().unwrap().to_owned())
            .build()
            .unwrap();
        assert_eq!(second.private_key(), first.private_key());

        let sig = first.sign(b"shared").unwrap();
        assert!(second.verify(b"shared", &sig));
    }
}
