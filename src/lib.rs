//! Easy DSA: generate keys, store them as PEM, and sign and verify bytes,
//! strings and files.
//!
//! ```no_run
//! use easydsa::{HashType, ParameterSizes, PrivateKey, PublicKey, Signature};
//!
//! # fn main() -> Result<(), easydsa::Error> {
//! let private_key = PrivateKey::generate(ParameterSizes::L2048N256)?;
//! private_key.store("private.pem")?;
//! private_key.public_key().store("public.pem")?;
//!
//! let signature = private_key.sign_str(HashType::Sha256, "DSA signature test!")?;
//! signature.store("text.sign")?;
//!
//! let public_key = PublicKey::load("public.pem")?;
//! let signature = Signature::load("text.sign")?;
//! assert!(public_key.verify_str(HashType::Sha256, "DSA signature test!", &signature));
//! # Ok(())
//! # }
//! ```

// Catch documentation errors caused by code changes.
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod constants;
pub mod crypto;
pub mod data;
mod file;
pub mod profile;

pub use crate::crypto::{Error, HashType, ParameterSizes};
pub use crate::data::{DomainParameters, PrivateKey, PublicKey, Signature};
