use data_encoding::{Encoding, Specification};

// PEM labels
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

lazy_static! {
    /// Standard base64 with padding. Line breaks are skipped when decoding, so
    /// wrapped signature files still load.
    pub static ref SIGNATURE_ENCODING: Encoding = {
        let mut spec = Specification::new();
        spec.symbols
            .push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/");
        spec.padding = Some('=');
        spec.ignore.push_str("\r\n");
        spec.encoding().unwrap()
    };
}

// File modes
pub const PRIVATE_KEY_MODE: u32 = 0o600;
pub const PUBLIC_FILE_MODE: u32 = 0o644;

// Profile defaults
pub const DEFAULT_HASH_TYPE: &str = "sha256";
pub const DEFAULT_PARAMETER_SIZES: &str = "L2048N256";
