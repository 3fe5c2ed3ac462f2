//! DSA keys and signatures, and the operations on them.

use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{PRIVATE_KEY_MODE, PUBLIC_FILE_MODE};
use crate::crypto::{hash::DigestVisitor, DsaPrimitive, Error, HashType, OsDsa, ParameterSizes};
use crate::file;

pub mod frame;

/// The (p, q, g) triple defining a DSA group.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DomainParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl DomainParameters {
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Self {
        DomainParameters { p, q, g }
    }

    /// Generates fresh parameters of the given strength class.
    pub fn generate(sizes: ParameterSizes) -> Result<Self, Error> {
        OsDsa.generate_parameters(sizes)
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn q(&self) -> &BigUint {
        &self.q
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    fn is_valid(&self) -> bool {
        let one = BigUint::one();
        self.p > one && self.q > one && self.q < self.p && self.g > one && self.g < self.p
    }
}

/// The public half of a DSA key pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey {
    parameters: DomainParameters,
    y: BigUint,
}

impl PublicKey {
    /// Builds a public key from its parameters and public value, checking
    /// that 0 < y < p.
    pub fn from_parts(parameters: DomainParameters, y: BigUint) -> Result<Self, Error> {
        if !parameters.is_valid() || y.is_zero() || y >= parameters.p {
            return Err(Error::InvalidKey);
        }
        Ok(PublicKey { parameters, y })
    }

    pub fn parameters(&self) -> &DomainParameters {
        &self.parameters
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn to_pem(&self) -> Result<String, Error> {
        frame::public_key_to_pem(self)
    }

    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        frame::public_key_from_pem(pem)
    }

    /// Writes the PEM encoding to `path`, world-readable.
    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        file::write_with_mode(path, self.to_pem()?.as_bytes(), PUBLIC_FILE_MODE)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_pem(&file::read_to_string(path)?)
    }

    /// Checks `signature` over `data`. Any mismatch, including a different
    /// hash type from the one used to sign, is `false`.
    pub fn verify(&self, hash_type: HashType, data: &[u8], signature: &Signature) -> bool {
        self.verify_with(&OsDsa, hash_type, data, signature)
    }

    pub fn verify_with<P: DsaPrimitive>(
        &self,
        primitive: &P,
        hash_type: HashType,
        data: &[u8],
        signature: &Signature,
    ) -> bool {
        let valid = hash_type.accept(
            data,
            Verify {
                primitive,
                key: self,
                signature,
            },
        );
        trace!("{} signature over {} bytes valid: {}", hash_type, data.len(), valid);
        valid
    }

    pub fn verify_str(&self, hash_type: HashType, text: &str, signature: &Signature) -> bool {
        self.verify(hash_type, text.as_bytes(), signature)
    }

    /// Reads the whole of `path` and checks `signature` over it. Only a failure
    /// to read the file is an error.
    pub fn verify_file<P: AsRef<Path>>(
        &self,
        hash_type: HashType,
        path: P,
        signature: &Signature,
    ) -> Result<bool, Error> {
        let data = file::read(path)?;
        Ok(self.verify(hash_type, &data, signature))
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_pem(s)
    }
}

/// A DSA signing key: the public key plus the secret exponent x.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    public_key: PublicKey,
    x: BigUint,
}

impl PrivateKey {
    /// Generates fresh domain parameters of the given strength class and a
    /// key pair bound to them.
    pub fn generate(sizes: ParameterSizes) -> Result<Self, Error> {
        Self::generate_with(&OsDsa, sizes)
    }

    pub fn generate_with<P: DsaPrimitive>(
        primitive: &P,
        sizes: ParameterSizes,
    ) -> Result<Self, Error> {
        let params = primitive.generate_parameters(sizes)?;
        primitive.generate_key(params)
    }

    /// Builds a private key from its parts, checking that 0 < x < q and
    /// y = g^x mod p.
    pub fn from_parts(parameters: DomainParameters, y: BigUint, x: BigUint) -> Result<Self, Error> {
        Self::from_public(PublicKey::from_parts(parameters, y)?, x)
    }

    pub(crate) fn from_public(public_key: PublicKey, x: BigUint) -> Result<Self, Error> {
        let params = &public_key.parameters;
        if x.is_zero() || x >= params.q || params.g.modpow(&x, &params.p) != public_key.y {
            return Err(Error::InvalidKey);
        }
        Ok(PrivateKey { public_key, x })
    }

    pub fn parameters(&self) -> &DomainParameters {
        &self.public_key.parameters
    }

    pub fn y(&self) -> &BigUint {
        &self.public_key.y
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub(crate) fn as_public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key.clone()
    }

    pub fn to_pem(&self) -> Result<String, Error> {
        frame::private_key_to_pem(self)
    }

    pub fn from_pem(pem: &str) -> Result<Self, Error> {
        frame::private_key_from_pem(pem)
    }

    /// Writes the PEM encoding to `path`, readable and writable only by the
    /// owner.
    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        file::write_with_mode(path, self.to_pem()?.as_bytes(), PRIVATE_KEY_MODE)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_pem(&file::read_to_string(path)?)
    }

    /// Signs `data`. Every call draws a fresh nonce, so signing the same data
    /// twice gives two different signatures.
    pub fn sign(&self, hash_type: HashType, data: &[u8]) -> Result<Signature, Error> {
        self.sign_with(&OsDsa, hash_type, data)
    }

    pub fn sign_with<P: DsaPrimitive>(
        &self,
        primitive: &P,
        hash_type: HashType,
        data: &[u8],
    ) -> Result<Signature, Error> {
        trace!("Signing {} bytes with {}", data.len(), hash_type);
        hash_type.accept(
            data,
            Sign {
                primitive,
                key: self,
            },
        )
    }

    pub fn sign_str(&self, hash_type: HashType, text: &str) -> Result<Signature, Error> {
        self.sign(hash_type, text.as_bytes())
    }

    pub fn sign_file<P: AsRef<Path>>(
        &self,
        hash_type: HashType,
        path: P,
    ) -> Result<Signature, Error> {
        let data = file::read(path)?;
        self.sign(hash_type, &data)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("parameters", self.parameters())
            .field("y", self.y())
            .finish_non_exhaustive()
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_pem(s)
    }
}

struct Sign<'a, P> {
    primitive: &'a P,
    key: &'a PrivateKey,
}

impl<'a, P: DsaPrimitive> DigestVisitor for Sign<'a, P> {
    type Output = Result<Signature, Error>;

    fn visit<D>(self, digest: D) -> Self::Output
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        self.primitive.sign(self.key, digest)
    }
}

struct Verify<'a, P> {
    primitive: &'a P,
    key: &'a PublicKey,
    signature: &'a Signature,
}

impl<'a, P: DsaPrimitive> DigestVisitor for Verify<'a, P> {
    type Output = bool;

    fn visit<D>(self, digest: D) -> bool
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        self.primitive.verify(self.key, digest, self.signature)
    }
}

/// A DSA signature (R, S).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Signature { r, s }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    pub fn to_base64(&self) -> String {
        frame::signature_to_base64(self)
    }

    pub fn from_base64(text: &str) -> Result<Self, Error> {
        frame::signature_from_base64(text)
    }

    /// Writes the base64 encoding to `path`, world-readable.
    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        file::write_with_mode(path, self.to_base64().as_bytes(), PUBLIC_FILE_MODE)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_base64(&file::read_to_string(path)?)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}
