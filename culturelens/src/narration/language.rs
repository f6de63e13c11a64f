//! Narration languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::NarrationError;

/// The ten languages the narration backend can speak.
///
/// Wire identifiers are the lowercase English names (`"english"`,
/// `"arabic"`, ...), matching the `language` field of narration requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    Hindi,
    Italian,
    French,
    German,
    Portuguese,
    Chinese,
    Japanese,
    Arabic,
}

impl Language {
    pub const ALL: [Language; 10] = [
        Language::English,
        Language::Spanish,
        Language::Hindi,
        Language::Italian,
        Language::French,
        Language::German,
        Language::Portuguese,
        Language::Chinese,
        Language::Japanese,
        Language::Arabic,
    ];

    /// Wire identifier, as sent in narration requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::Hindi => "hindi",
            Language::Italian => "italian",
            Language::French => "french",
            Language::German => "german",
            Language::Portuguese => "portuguese",
            Language::Chinese => "chinese",
            Language::Japanese => "japanese",
            Language::Arabic => "arabic",
        }
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Hindi => "hi",
            Language::Italian => "it",
            Language::French => "fr",
            Language::German => "de",
            Language::Portuguese => "pt",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Arabic => "ar",
        }
    }

    /// Human-readable name for pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Hindi => "Hindi",
            Language::Italian => "Italian",
            Language::French => "French",
            Language::German => "German",
            Language::Portuguese => "Portuguese",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = NarrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .copied()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| NarrationError::UnknownLanguage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(Language::default(), Language::English);
    }

    #[test]
    fn test_wire_identifiers_round_trip() {
        for language in Language::ALL {
            assert_eq!(language.as_str().parse::<Language>().unwrap(), language);
        }
    }

    #[test]
    fn test_unknown_identifier_is_rejected() {
        let err = "klingon".parse::<Language>().unwrap_err();
        assert_eq!(err, NarrationError::UnknownLanguage("klingon".to_string()));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let encoded = serde_json::to_string(&Language::Arabic).unwrap();
        assert_eq!(encoded, "\"arabic\"");
        let decoded: Language = serde_json::from_str("\"hindi\"").unwrap();
        assert_eq!(decoded, Language::Hindi);
    }
}
