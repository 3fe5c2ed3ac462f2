//! The DSA primitive: parameter generation, key generation, signing and
//! verification.
//!
//! The number theory lives in the RustCrypto `dsa` crate. This module only
//! moves values across that boundary.

use der::{asn1::Uint, Encode, Sequence};
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use dsa::{
    signature::{DigestVerifier, RandomizedDigestSigner},
    Components, KeySize, SigningKey, VerifyingKey,
};
use rand::{rngs::OsRng, RngCore};

use super::{
    math::{from_dsa, minimal_bytes, to_dsa},
    Error, ParameterSizes,
};
use crate::data::{DomainParameters, PrivateKey, PublicKey, Signature};

/// The operations a DSA implementation has to provide.
pub trait DsaPrimitive {
    /// Generates fresh domain parameters of the given strength class.
    fn generate_parameters(&self, sizes: ParameterSizes) -> Result<DomainParameters, Error>;

    /// Generates a key pair bound to the given parameters.
    fn generate_key(&self, params: DomainParameters) -> Result<PrivateKey, Error>;

    /// Signs a message that has been absorbed into `digest`.
    fn sign<D>(&self, key: &PrivateKey, digest: D) -> Result<Signature, Error>
    where
        D: Digest + BlockSizeUser + FixedOutputReset;

    /// Checks a signature over a message that has been absorbed into `digest`.
    fn verify<D>(&self, key: &PublicKey, digest: D, signature: &Signature) -> bool
    where
        D: Digest + BlockSizeUser + FixedOutputReset;
}

/// DSA backed by the RustCrypto implementation and the operating system's
/// random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsDsa;

/// ASN.1 `Dss-Sig-Value`, used to hand (r, s) to the backend.
#[derive(Sequence)]
struct DssSigValue {
    r: Uint,
    s: Uint,
}

impl OsDsa {
    /// Fails if the random source cannot produce bytes, so that generation
    /// and signing never run on a broken source.
    fn check_entropy() -> Result<(), Error> {
        let mut probe = [0u8; 16];
        OsRng.try_fill_bytes(&mut probe).map_err(|e| {
            error!("OS random source unavailable: {}", e);
            Error::Entropy
        })
    }

    fn components(params: &DomainParameters) -> Result<Components, Error> {
        Components::from_components(to_dsa(params.p()), to_dsa(params.q()), to_dsa(params.g()))
            .map_err(|_| Error::Primitive)
    }

    fn verifying_key(key: &PublicKey) -> Result<VerifyingKey, Error> {
        VerifyingKey::from_components(Self::components(key.parameters())?, to_dsa(key.y()))
            .map_err(|_| Error::Primitive)
    }

    fn signing_key(key: &PrivateKey) -> Result<SigningKey, Error> {
        let verifying_key = Self::verifying_key(&key.public_key())?;
        SigningKey::from_components(verifying_key, to_dsa(key.x())).map_err(|_| Error::Primitive)
    }

    fn backend_signature(signature: &Signature) -> Result<dsa::Signature, Error> {
        let value = DssSigValue {
            r: Uint::new(&minimal_or_zero(signature.r()))?,
            s: Uint::new(&minimal_or_zero(signature.s()))?,
        };
        dsa::Signature::try_from(value.to_der()?.as_slice()).map_err(|_| Error::Primitive)
    }
}

fn minimal_or_zero(bi: &num_bigint::BigUint) -> Vec<u8> {
    let bytes = minimal_bytes(bi);
    if bytes.is_empty() {
        vec![0]
    } else {
        bytes
    }
}

// KeySize::DSA_1024_160 is deprecated upstream as too weak, but it is still a
// supported strength class here.
#[allow(deprecated)]
fn key_size(sizes: ParameterSizes) -> KeySize {
    match sizes {
        ParameterSizes::L1024N160 => KeySize::DSA_1024_160,
        ParameterSizes::L2048N224 => KeySize::DSA_2048_224,
        ParameterSizes::L2048N256 => KeySize::DSA_2048_256,
        ParameterSizes::L3072N256 => KeySize::DSA_3072_256,
    }
}

impl DsaPrimitive for OsDsa {
    fn generate_parameters(&self, sizes: ParameterSizes) -> Result<DomainParameters, Error> {
        Self::check_entropy()?;
        debug!("Generating {} domain parameters", sizes);
        let components = Components::generate(&mut OsRng, key_size(sizes));
        Ok(DomainParameters::new(
            from_dsa(components.p()),
            from_dsa(components.q()),
            from_dsa(components.g()),
        ))
    }

    fn generate_key(&self, params: DomainParameters) -> Result<PrivateKey, Error> {
        Self::check_entropy()?;
        let components = Self::components(&params)?;
        let signing_key = SigningKey::generate(&mut OsRng, components);
        let y = from_dsa(signing_key.verifying_key().y());
        let x = from_dsa(signing_key.x());
        PrivateKey::from_parts(params, y, x)
    }

    fn sign<D>(&self, key: &PrivateKey, digest: D) -> Result<Signature, Error>
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        Self::check_entropy()?;
        let signing_key = Self::signing_key(key)?;
        let signature = signing_key
            .try_sign_digest_with_rng(&mut OsRng, digest)
            .map_err(|e| {
                error!("DSA signing failed: {}", e);
                Error::Primitive
            })?;
        Ok(Signature::new(from_dsa(signature.r()), from_dsa(signature.s())))
    }

    fn verify<D>(&self, key: &PublicKey, digest: D, signature: &Signature) -> bool
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        let verifying_key = match Self::verifying_key(key) {
            Ok(vk) => vk,
            Err(_) => {
                trace!("Public key rejected by DSA backend");
                return false;
            }
        };
        let signature = match Self::backend_signature(signature) {
            Ok(sig) => sig,
            Err(_) => {
                trace!("Signature values rejected by DSA backend");
                return false;
            }
        };
        verifying_key.verify_digest(digest, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::{One, Zero};
    use sha1::{Digest, Sha1};

    use super::{DsaPrimitive, OsDsa};
    use crate::crypto::ParameterSizes;
    use crate::data::{tests::fixture_private_key, Signature};

    #[test]
    fn generate_parameters_sizes() {
        let params = OsDsa.generate_parameters(ParameterSizes::L1024N160).unwrap();
        assert_eq!(params.p().bits(), 1024);
        assert_eq!(params.q().bits(), 160);
        assert!(params.g() > &BigUint::one() && params.g() < params.p());
    }

    // Generating 2048- and 3072-bit groups takes minutes.
    #[test]
    #[ignore]
    fn generate_parameters_all_sizes() {
        for sizes in ParameterSizes::ALL.iter().skip(1) {
            let params = OsDsa.generate_parameters(*sizes).unwrap();
            assert_eq!(params.p().bits(), sizes.l(), "{}", sizes);
            assert_eq!(params.q().bits(), sizes.n(), "{}", sizes);
            assert!(params.g() > &BigUint::one() && params.g() < params.p());

            let sk = OsDsa.generate_key(params).unwrap();
            let sig = OsDsa.sign(&sk, Sha1::new_with_prefix(b"msg")).unwrap();
            assert!(OsDsa.verify(&sk.public_key(), Sha1::new_with_prefix(b"msg"), &sig));
        }
    }

    #[test]
    fn generated_key_is_consistent() {
        let params = fixture_private_key().parameters().clone();
        let sk = OsDsa.generate_key(params.clone()).unwrap();
        assert_eq!(sk.parameters(), &params);
        assert!(!sk.x().is_zero() && sk.x() < params.q());
        assert_eq!(sk.y(), &params.g().modpow(sk.x(), params.p()));
    }

    #[test]
    fn random_signatures() {
        let sk = fixture_private_key();
        let pk = sk.public_key();

        for _ in 0..20 {
            let msg1 = b"Foo bar";
            let msg2 = b"Spam eggs";

            let sig1 = OsDsa.sign(&sk, Sha1::new_with_prefix(msg1)).unwrap();
            let sig2 = OsDsa.sign(&sk, Sha1::new_with_prefix(msg2)).unwrap();

            assert!(OsDsa.verify(&pk, Sha1::new_with_prefix(msg1), &sig1));
            assert!(OsDsa.verify(&pk, Sha1::new_with_prefix(msg2), &sig2));
            assert!(!OsDsa.verify(&pk, Sha1::new_with_prefix(msg1), &sig2));
            assert!(!OsDsa.verify(&pk, Sha1::new_with_prefix(msg2), &sig1));
        }
    }

    #[test]
    fn degenerate_signatures_fail() {
        let sk = fixture_private_key();
        let pk = sk.public_key();
        let q = pk.parameters().q().clone();

        for sig in [
            Signature::new(BigUint::zero(), BigUint::zero()),
            Signature::new(BigUint::one(), BigUint::zero()),
            Signature::new(q.clone(), BigUint::one()),
            Signature::new(BigUint::one(), q + 1u32),
        ]
        .iter()
        {
            assert!(!OsDsa.verify(&pk, Sha1::new_with_prefix(b"msg"), sig));
        }
    }
}
