use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Locale of a published page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
    Ja,
    Ko,
    Es,
    Fr,
    De,
    Pt,
    Ru,
    It,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::En,
        Language::Zh,
        Language::Ja,
        Language::Ko,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Pt,
        Language::Ru,
        Language::It,
    ];

    /// Returns the primary language subtag, e.g. `"en"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::It => "it",
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a locale tag names no supported language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language tag: '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts a bare subtag (`"fr"`) or a full tag (`"zh-CN"`, `"en_US"`),
    /// case-insensitively.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == primary)
            .ok_or_else(|| UnknownLanguage(tag.to_string()))
    }
}
