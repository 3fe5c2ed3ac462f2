use num_bigint::BigUint;
use num_traits::Zero;
use std::iter;

/// Big-endian bytes of the given number with no leading zeroes. Zero has no
/// bytes at all.
pub fn minimal_bytes(bi: &BigUint) -> Vec<u8> {
    if bi.is_zero() {
        vec![]
    } else {
        bi.to_bytes_be()
    }
}

/// Converts the given number into an array of at least len bytes, padding with
/// zeroes if necessary.
///
/// Numbers that need more than len bytes are returned at their minimal length;
/// callers pick len from the longest value they encode.
pub fn rectify(bi: &BigUint, len: usize) -> Vec<u8> {
    let b = minimal_bytes(bi);
    match b.len() {
        sz if sz >= len => b,
        sz => iter::repeat(0).take(len - sz).chain(b).collect(),
    }
}

pub(crate) fn to_dsa(bi: &BigUint) -> dsa::BigUint {
    dsa::BigUint::from_bytes_be(&bi.to_bytes_be())
}

pub(crate) fn from_dsa(bi: &dsa::BigUint) -> BigUint {
    BigUint::from_bytes_be(&bi.to_bytes_be())
}
