use crate::codec::{SCHEME_DEFLATE, SCHEME_RAW};
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A structurally valid alias.
///
/// An alias is a one-character scheme tag followed by an unpadded
/// base64url payload. Every character is drawn from `[A-Za-z0-9_-]`, so an
/// alias can be placed in a URL path segment without percent-encoding.
///
/// Holding an `Alias` does not guarantee that it decodes: a deflate payload
/// may still be corrupt. Use [`codec::decode`][crate::codec::decode] for that.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    /// Validates the alphabet and structure of `alias` without decoding it.
    pub fn parse(alias: impl Into<String>) -> Result<Self> {
        let alias = alias.into();
        Self::validate(&alias)?;
        Ok(Self(alias))
    }

    /// Wraps a string produced by the encoder.
    pub(crate) fn from_encoded(alias: String) -> Self {
        Self(alias)
    }

    /// Returns the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the scheme tag of the alias.
    pub fn scheme(&self) -> u8 {
        self.0.as_bytes()[0]
    }

    /// Returns the base64url payload that follows the scheme tag.
    pub fn payload(&self) -> &str {
        &self.0[1..]
    }

    /// Builds the public URL of the published page: `{base_url}/{alias}/`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}/", base_url.trim_end_matches('/'), self.0)
    }

    fn validate(alias: &str) -> Result<()> {
        let Some(&scheme) = alias.as_bytes().first() else {
            return Err(CodecError::MalformedAlias("alias is empty".to_string()));
        };

        if scheme != SCHEME_RAW && scheme != SCHEME_DEFLATE {
            return Err(CodecError::MalformedAlias(format!(
                "unknown scheme tag '{}'",
                alias.chars().next().unwrap_or_default()
            )));
        }

        if let Some(bad) = alias.chars().find(|c| !is_alias_char(*c)) {
            return Err(CodecError::MalformedAlias(format!(
                "character {bad:?} is outside the alias alphabet"
            )));
        }

        // An unpadded base64 string never leaves a single dangling character.
        if (alias.len() - 1) % 4 == 1 {
            return Err(CodecError::MalformedAlias(format!(
                "payload length {} is not a valid base64 length",
                alias.len() - 1
            )));
        }

        Ok(())
    }
}

/// Whether `c` belongs to the alias alphabet `[A-Za-z0-9_-]`.
pub fn is_alias_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl std::fmt::Debug for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Alias").field(&self.0).finish()
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Alias {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Alias> for String {
    fn from(value: Alias) -> Self {
        value.0
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_aliases() {
        assert!(Alias::parse("r").is_ok());
        assert!(Alias::parse("raGVsbG8").is_ok());
        assert!(Alias::parse("zAbc-_09").is_ok());
    }

    #[test]
    fn empty_alias() {
        assert!(Alias::parse("").is_err());
    }

    #[test]
    fn unknown_scheme() {
        let err = Alias::parse("xaGVsbG8").unwrap_err();
        assert!(matches!(err, CodecError::MalformedAlias(_)));
    }

    #[test]
    fn invalid_characters() {
        assert!(Alias::parse("rabc def").is_err());
        assert!(Alias::parse("rabc/def").is_err());
        assert!(Alias::parse("rabc+def").is_err());
        assert!(Alias::parse("raGVsbG8=").is_err());
        assert!(Alias::parse("rä").is_err());
    }

    #[test]
    fn dangling_payload_length() {
        assert!(Alias::parse("rA").is_err());
        assert!(Alias::parse("rAAAAA").is_err());
        assert!(Alias::parse("rAA").is_ok());
    }

    #[test]
    fn to_url_joins_with_trailing_slash() {
        let alias = Alias::parse("raGVsbG8").unwrap();
        assert_eq!(
            alias.to_url("https://qr.example/p"),
            "https://qr.example/p/raGVsbG8/"
        );
        assert_eq!(
            alias.to_url("https://qr.example/p/"),
            "https://qr.example/p/raGVsbG8/"
        );
    }

    #[test]
    fn deserialize_validates() {
        let ok: Alias = serde_json::from_str("\"raGVsbG8\"").unwrap();
        assert_eq!(ok.as_str(), "raGVsbG8");
        assert!(serde_json::from_str::<Alias>("\"not an alias\"").is_err());
    }
}
