//! Cryptographic types and operations.

use std::fmt;
use std::io;
use std::str::FromStr;

pub mod dsa;
pub(crate) mod hash;
pub(crate) mod math;

pub use self::dsa::{DsaPrimitive, OsDsa};
pub use self::hash::HashType;

/// Errors that can occur while generating, encoding, decoding, storing or
/// using keys and signatures.
///
/// A signature that does not verify is not an error.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Pem(pem_rfc7468::Error),
    UnexpectedLabel {
        expected: &'static str,
        found: String,
    },
    Asn1(der::Error),
    Base64(data_encoding::DecodeError),
    InvalidKey,
    Entropy,
    Primitive,
    UnknownHashType(String),
    UnknownParameterSizes(String),
    Config(config::ConfigError),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<pem_rfc7468::Error> for Error {
    fn from(e: pem_rfc7468::Error) -> Self {
        Error::Pem(e)
    }
}

impl From<der::Error> for Error {
    fn from(e: der::Error) -> Self {
        Error::Asn1(e)
    }
}

impl From<data_encoding::DecodeError> for Error {
    fn from(e: data_encoding::DecodeError) -> Self {
        Error::Base64(e)
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e)
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Pem(e) => write!(f, "Invalid PEM armor: {}", e),
            Error::UnexpectedLabel { expected, found } => write!(
                f,
                "Unexpected PEM label (expected {}, found {})",
                expected, found
            ),
            Error::Asn1(e) => write!(f, "Invalid ASN.1 encoding: {}", e),
            Error::Base64(e) => write!(f, "Invalid base64 encoding: {}", e),
            Error::InvalidKey => f.write_str("Key values are inconsistent"),
            Error::Entropy => f.write_str("Random source unavailable"),
            Error::Primitive => f.write_str("DSA operation failed"),
            Error::UnknownHashType(s) => write!(f, "Unknown hash type: {}", s),
            Error::UnknownParameterSizes(s) => write!(f, "Unknown parameter sizes: {}", s),
            Error::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Pem(e) => Some(e),
            Error::Asn1(e) => Some(e),
            Error::Base64(e) => Some(e),
            Error::Config(e) => Some(e),
            _ => None,
        }
    }
}

/// The DSA strength classes, named by modulus (L) and subgroup order (N)
/// bit lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterSizes {
    L1024N160,
    L2048N224,
    L2048N256,
    L3072N256,
}

impl ParameterSizes {
    pub const ALL: [ParameterSizes; 4] = [
        ParameterSizes::L1024N160,
        ParameterSizes::L2048N224,
        ParameterSizes::L2048N256,
        ParameterSizes::L3072N256,
    ];

    /// Bit length of the modulus p.
    pub fn l(&self) -> u64 {
        match *self {
            ParameterSizes::L1024N160 => 1024,
            ParameterSizes::L2048N224 | ParameterSizes::L2048N256 => 2048,
            ParameterSizes::L3072N256 => 3072,
        }
    }

    /// Bit length of the subgroup order q.
    pub fn n(&self) -> u64 {
        match *self {
            ParameterSizes::L1024N160 => 160,
            ParameterSizes::L2048N224 => 224,
            ParameterSizes::L2048N256 | ParameterSizes::L3072N256 => 256,
        }
    }
}

impl fmt::Display for ParameterSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}N{}", self.l(), self.n())
    }
}

impl FromStr for ParameterSizes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParameterSizes::ALL
            .iter()
            .find(|sizes| sizes.to_string().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::UnknownParameterSizes(s.to_owned()))
    }
}
