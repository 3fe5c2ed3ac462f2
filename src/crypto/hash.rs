//! Hash selection.

use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

use super::Error;

/// The digest functions a message can be hashed with before signing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashType {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

/// Something that consumes a digest which has already absorbed a message.
///
/// Lets callers stay generic over the concrete hash without boxing it.
pub(crate) trait DigestVisitor {
    type Output;

    fn visit<D>(self, digest: D) -> Self::Output
    where
        D: Digest + BlockSizeUser + FixedOutputReset;
}

struct Finalize;

impl DigestVisitor for Finalize {
    type Output = Vec<u8>;

    fn visit<D>(self, digest: D) -> Vec<u8>
    where
        D: Digest + BlockSizeUser + FixedOutputReset,
    {
        digest.finalize().to_vec()
    }
}

impl HashType {
    pub const ALL: [HashType; 4] = [
        HashType::Md5,
        HashType::Sha1,
        HashType::Sha256,
        HashType::Sha512,
    ];

    /// Length in bytes of the digest this hash produces.
    pub fn output_len(&self) -> usize {
        match *self {
            HashType::Md5 => 16,
            HashType::Sha1 => 20,
            HashType::Sha256 => 32,
            HashType::Sha512 => 64,
        }
    }

    /// Hashes the whole of `data` in one pass.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        self.accept(data, Finalize)
    }

    /// Feeds `data` into a fresh hasher of this type and hands it to `visitor`.
    pub(crate) fn accept<V: DigestVisitor>(&self, data: &[u8], visitor: V) -> V::Output {
        match *self {
            HashType::Md5 => visitor.visit(Md5::new_with_prefix(data)),
            HashType::Sha1 => visitor.visit(Sha1::new_with_prefix(data)),
            HashType::Sha256 => visitor.visit(Sha256::new_with_prefix(data)),
            HashType::Sha512 => visitor.visit(Sha512::new_with_prefix(data)),
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashType::Md5 => f.write_str("md5"),
            HashType::Sha1 => f.write_str("sha1"),
            HashType::Sha256 => f.write_str("sha256"),
            HashType::Sha512 => f.write_str("sha512"),
        }
    }
}

impl FromStr for HashType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashType::Md5),
            "sha1" => Ok(HashType::Sha1),
            "sha256" => Ok(HashType::Sha256),
            "sha512" => Ok(HashType::Sha512),
            _ => Err(Error::UnknownHashType(s.to_owned())),
        }
    }
}
