//! Configuration keys read by [`Builder`](super::Builder).

/// Hash used by a profile when signing and verifying.
pub const HASH_TYPE: &str = "signing.hash";

/// Strength class of newly generated keys.
pub const PARAMETER_SIZES: &str = "keygen.parameter_sizes";

pub const PRIVATE_KEYFILE: &str = "keys.private_keyfile";
pub const PUBLIC_KEYFILE: &str = "keys.public_keyfile";
