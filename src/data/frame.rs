//! Wire formats for keys and signatures.
//!
//! Keys are DER inside PEM armor:
//!
//! ```text
//! PublicKey  ::= SEQUENCE { SEQUENCE { p, q, g }, y }
//! PrivateKey ::= SEQUENCE { PublicKey, x }
//! ```
//!
//! Signatures are `R || S` in big-endian, base64 encoded.

use der::{asn1::Uint, Decode, Encode, Sequence};
use num_bigint::BigUint;
use pem_rfc7468::LineEnding;
use std::cmp;

use super::{DomainParameters, PrivateKey, PublicKey, Signature};
use crate::constants::{PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL, SIGNATURE_ENCODING};
use crate::crypto::{
    math::{minimal_bytes, rectify},
    Error,
};

#[derive(Sequence)]
struct ParametersAsn1 {
    p: Uint,
    q: Uint,
    g: Uint,
}

#[derive(Sequence)]
struct PublicKeyAsn1 {
    parameters: ParametersAsn1,
    y: Uint,
}

#[derive(Sequence)]
struct PrivateKeyAsn1 {
    public_key: PublicKeyAsn1,
    x: Uint,
}

fn uint(bi: &BigUint) -> Result<Uint, Error> {
    Ok(Uint::new(&bi.to_bytes_be())?)
}

fn biguint(ui: &Uint) -> BigUint {
    BigUint::from_bytes_be(ui.as_bytes())
}

impl ParametersAsn1 {
    fn from_parameters(params: &DomainParameters) -> Result<Self, Error> {
        Ok(ParametersAsn1 {
            p: uint(params.p())?,
            q: uint(params.q())?,
            g: uint(params.g())?,
        })
    }

    fn to_parameters(&self) -> DomainParameters {
        DomainParameters::new(biguint(&self.p), biguint(&self.q), biguint(&self.g))
    }
}

impl PublicKeyAsn1 {
    fn from_key(key: &PublicKey) -> Result<Self, Error> {
        Ok(PublicKeyAsn1 {
            parameters: ParametersAsn1::from_parameters(key.parameters())?,
            y: uint(key.y())?,
        })
    }

    fn to_key(&self) -> Result<PublicKey, Error> {
        PublicKey::from_parts(self.parameters.to_parameters(), biguint(&self.y))
    }
}

fn armor(label: &'static str, der: &[u8]) -> Result<String, Error> {
    Ok(pem_rfc7468::encode_string(label, LineEnding::LF, der)?)
}

fn unarmor(label: &'static str, pem: &str) -> Result<Vec<u8>, Error> {
    // Tolerate surrounding whitespace, as found in files and string literals.
    let normalized = format!("{}\n", pem.trim());
    let (found, der) = pem_rfc7468::decode_vec(normalized.as_bytes())?;
    if found != label {
        return Err(Error::UnexpectedLabel {
            expected: label,
            found: found.to_owned(),
        });
    }
    Ok(der)
}

pub fn private_key_to_pem(key: &PrivateKey) -> Result<String, Error> {
    let asn1 = PrivateKeyAsn1 {
        public_key: PublicKeyAsn1::from_key(key.as_public_key())?,
        x: uint(key.x())?,
    };
    armor(PRIVATE_KEY_LABEL, &asn1.to_der()?)
}

pub fn private_key_from_pem(pem: &str) -> Result<PrivateKey, Error> {
    let der = unarmor(PRIVATE_KEY_LABEL, pem)?;
    let asn1 = PrivateKeyAsn1::from_der(&der)?;
    let public_key = asn1.public_key.to_key()?;
    PrivateKey::from_public(public_key, biguint(&asn1.x))
}

pub fn public_key_to_pem(key: &PublicKey) -> Result<String, Error> {
    let asn1 = PublicKeyAsn1::from_key(key)?;
    armor(PUBLIC_KEY_LABEL, &asn1.to_der()?)
}

pub fn public_key_from_pem(pem: &str) -> Result<PublicKey, Error> {
    let der = unarmor(PUBLIC_KEY_LABEL, pem)?;
    PublicKeyAsn1::from_der(&der)?.to_key()
}

/// Encodes R and S at a shared width so that halving the decoded bytes
/// always recovers them. When both already have the same minimal length the
/// output is just `R || S`.
pub fn signature_to_base64(sig: &Signature) -> String {
    let len = cmp::max(minimal_bytes(sig.r()).len(), minimal_bytes(sig.s()).len());
    let mut data = rectify(sig.r(), len);
    data.extend(rectify(sig.s(), len));
    SIGNATURE_ENCODING.encode(&data)
}

pub fn signature_from_base64(text: &str) -> Result<Signature, Error> {
    let data = SIGNATURE_ENCODING.decode(text.trim().as_bytes())?;
    let (r, s) = data.split_at(data.len() / 2);
    Ok(Signature::new(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s)))
}
