use std::fmt;

use crate::error::TtsError;

/// Language codes accepted for speech synthesis, in their provider spelling.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "fr", "en", "es", "ja", "ko", "ar", "ru", "zh-CN", "de", "it", "pt",
];

/// A language code that passed the allow-list check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisLanguage(&'static str);

impl SynthesisLanguage {
    /// Case-insensitive match against [`SUPPORTED_LANGUAGES`]; the canonical
    /// spelling is kept so `zh-cn` reaches the provider as `zh-CN`.
    pub fn parse(code: &str) -> Result<Self, TtsError> {
        let code = code.to_lowercase();
        SUPPORTED_LANGUAGES
            .iter()
            .copied()
            .find(|supported| supported.to_lowercase() == code)
            .map(SynthesisLanguage)
            .ok_or(TtsError::UnsupportedLanguage(code))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for SynthesisLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_every_supported_code() {
        for code in SUPPORTED_LANGUAGES {
            assert_eq!(SynthesisLanguage::parse(code).unwrap().as_str(), *code);
        }
    }

    #[test]
    fn test_is_case_insensitive() {
        assert_eq!(SynthesisLanguage::parse("FR").unwrap().as_str(), "fr");
        assert_eq!(SynthesisLanguage::parse("zh-cn").unwrap().as_str(), "zh-CN");
        assert_eq!(SynthesisLanguage::parse("ZH-CN").unwrap().as_str(), "zh-CN");
    }

    #[test]
    fn test_rejects_unknown_code_with_lowercased_name() {
        match SynthesisLanguage::parse("XX") {
            Err(TtsError::UnsupportedLanguage(code)) => assert_eq!(code, "xx"),
            other => panic!("expected UnsupportedLanguage, got {other:?}"),
        }
        // table language tags are not synthesis codes
        assert!(SynthesisLanguage::parse("jp").is_err());
        assert!(SynthesisLanguage::parse("").is_err());
    }
}
