use serde::{Deserialize, Serialize};

/// One row of the alphabet table: how a letter is written and pronounced in one language.
///
/// Serializes with the historical keys the frontend reads (`langue`, `lettre`,
/// `prononciation_standard`, `mot_exemple`, `description`). The lookup key
/// itself is not part of the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterEntry {
    #[serde(skip_serializing)]
    pub letter: String,
    #[serde(rename = "langue")]
    pub language: String,
    #[serde(rename = "lettre")]
    pub display_form: String,
    #[serde(rename = "prononciation_standard", skip_serializing_if = "Option::is_none")]
    pub pronunciation_text: Option<String>,
    #[serde(rename = "mot_exemple", skip_serializing_if = "Option::is_none")]
    pub example_word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// On-disk layout of the table file.
#[derive(Debug, Deserialize)]
pub(crate) struct TableFile {
    pub letters: Vec<LetterGroupRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LetterGroupRecord {
    pub letter: String,
    pub languages: Vec<LanguageRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguageRecord {
    #[serde(rename = "langue")]
    pub language: String,
    #[serde(rename = "lettre")]
    pub display_form: String,
    #[serde(rename = "prononciation_standard", default)]
    pub pronunciation_text: Option<String>,
    #[serde(rename = "mot_exemple", default)]
    pub example_word: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl LanguageRecord {
    pub(crate) fn into_entry(self, letter: &str) -> LetterEntry {
        LetterEntry {
            letter: letter.to_string(),
            language: self.language.to_lowercase(),
            display_form: self.display_form,
            pronunciation_text: self.pronunciation_text,
            example_word: self.example_word,
            description: self.description,
        }
    }
}
