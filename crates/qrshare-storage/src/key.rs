use qrshare_core::Alias;
use sha2::{Digest, Sha256};

/// Fixed-length digest of an alias, as lowercase hex.
///
/// Aliases grow with their text, so backends with bounded key sizes (file
/// names, indexed columns) key records by this digest instead.
pub fn alias_digest(alias: &Alias) -> String {
    hex::encode(Sha256::digest(alias.as_str().as_bytes()))
}
