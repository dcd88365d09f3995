//! Supported languages and layout schemes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifies a script/layout variant.
///
/// Two schemes for the same script are distinct values because they are
/// served by different key translators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    English,
    /// Tamil, direct layout (letter and sign keys)
    Tamil,
    /// Tamil99 scheme (vowel keys become signs after a consonant)
    Tamil99,
    /// Hindi, Devanagari direct layout
    Hindi,
    Malayalam,
    Telugu,
    Kannada,
    Bengali,
}

impl LanguageId {
    pub const ALL: [LanguageId; 8] = [
        LanguageId::English,
        LanguageId::Tamil,
        LanguageId::Tamil99,
        LanguageId::Hindi,
        LanguageId::Malayalam,
        LanguageId::Telugu,
        LanguageId::Kannada,
        LanguageId::Bengali,
    ];

    /// Stable lowercase identifier, as used in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageId::English => "english",
            LanguageId::Tamil => "tamil",
            LanguageId::Tamil99 => "tamil99",
            LanguageId::Hindi => "hindi",
            LanguageId::Malayalam => "malayalam",
            LanguageId::Telugu => "telugu",
            LanguageId::Kannada => "kannada",
            LanguageId::Bengali => "bengali",
        }
    }

    /// Whether this language ships a shifted-symbols layer.
    ///
    /// Fixed allow-list; languages outside it skip that layer.
    pub fn has_shifted_symbols(&self) -> bool {
        matches!(
            self,
            LanguageId::English | LanguageId::Tamil | LanguageId::Tamil99
        )
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        LanguageId::ALL
            .into_iter()
            .find(|lang| lang.as_str() == lower)
            .ok_or_else(|| format!("unknown language: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("tamil".parse::<LanguageId>(), Ok(LanguageId::Tamil));
        assert_eq!("Tamil99".parse::<LanguageId>(), Ok(LanguageId::Tamil99));
        assert!("klingon".parse::<LanguageId>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for lang in LanguageId::ALL {
            assert_eq!(lang.to_string().parse::<LanguageId>(), Ok(lang));
        }
    }

    #[test]
    fn test_shifted_symbols_allow_list() {
        assert!(LanguageId::Tamil.has_shifted_symbols());
        assert!(!LanguageId::Hindi.has_shifted_symbols());
        assert!(!LanguageId::Malayalam.has_shifted_symbols());
    }
}
