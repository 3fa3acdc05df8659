//! Reversible text ⇄ alias transform.
//!
//! An alias is a scheme tag followed by the unpadded base64url encoding of
//! either the raw UTF-8 bytes (`r`) or their raw-DEFLATE compression (`z`).
//! The encoder picks the deflate form only when it is strictly shorter, so the
//! alias stays a pure function of the text while typical long inputs shrink.
//!
//! ```
//! use qrshare_core::codec;
//!
//! let alias = codec::encode("WIFI:T:WPA;S:MyNet;P:pass;;");
//! assert_eq!(codec::decode(alias.as_str()).unwrap(), "WIFI:T:WPA;S:MyNet;P:pass;;");
//! ```

use crate::alias::Alias;
use crate::error::{CodecError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Scheme tag for aliases carrying the UTF-8 bytes verbatim.
pub const SCHEME_RAW: u8 = b'r';
/// Scheme tag for aliases carrying raw-DEFLATE compressed bytes.
pub const SCHEME_DEFLATE: u8 = b'z';

/// Upper bound on the decoded size of a single alias.
///
/// Guards the decoder against small aliases that inflate to huge outputs.
pub const MAX_DECODED_BYTES: usize = 16 * 1024 * 1024;

/// Encodes `text` into its alias. Never fails.
pub fn encode(text: &str) -> Alias {
    let bytes = text.as_bytes();
    let raw = URL_SAFE_NO_PAD.encode(bytes);

    let encoded = match deflate(bytes).map(|compressed| URL_SAFE_NO_PAD.encode(compressed)) {
        Some(compressed) if compressed.len() < raw.len() => tagged(SCHEME_DEFLATE, compressed),
        _ => tagged(SCHEME_RAW, raw),
    };

    Alias::from_encoded(encoded)
}

/// Decodes an alias string back into the text it was derived from.
///
/// Fails with [`CodecError::MalformedAlias`] when the string is not a
/// well-formed alias or its payload does not decode to UTF-8 text.
pub fn decode(alias: &str) -> Result<String> {
    let alias = Alias::parse(alias)?;
    decode_alias(&alias)
}

/// Decodes an already validated [`Alias`].
pub fn decode_alias(alias: &Alias) -> Result<String> {
    let payload = URL_SAFE_NO_PAD
        .decode(alias.payload())
        .map_err(|e| CodecError::MalformedAlias(format!("invalid base64 payload: {e}")))?;

    let bytes = match alias.scheme() {
        SCHEME_RAW => payload,
        SCHEME_DEFLATE => inflate(&payload)?,
        other => {
            return Err(CodecError::MalformedAlias(format!(
                "unknown scheme tag '{}'",
                other as char
            )))
        }
    };

    if bytes.len() > MAX_DECODED_BYTES {
        return Err(CodecError::MalformedAlias(format!(
            "decoded text exceeds {MAX_DECODED_BYTES} bytes"
        )));
    }

    String::from_utf8(bytes)
        .map_err(|e| CodecError::MalformedAlias(format!("payload is not UTF-8: {e}")))
}

fn tagged(scheme: u8, payload: String) -> String {
    let mut out = String::with_capacity(payload.len() + 1);
    out.push(scheme as char);
    out.push_str(&payload);
    out
}

/// Compresses `bytes`; `None` makes the caller fall back to the raw form.
fn deflate(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(bytes).ok()?;
    encoder.finish().ok()
}

fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let limit = MAX_DECODED_BYTES as u64 + 1;
    let mut out = Vec::new();
    DeflateDecoder::new(compressed)
        .take(limit)
        .read_to_end(&mut out)
        .map_err(|e| CodecError::MalformedAlias(format!("corrupt deflate payload: {e}")))?;
    Ok(out)
}
