mod entry;
mod error;

use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;
use tracing::debug;

pub use entry::LetterEntry;
pub use error::{LookupError, NotFoundKind};

use entry::TableFile;

/// Seed table compiled into the binary.
const EMBEDDED_TABLE: &str = include_str!("../data/alphabet.json");

#[derive(Debug, Clone)]
struct LetterGroup {
    letter: String,
    entries: Vec<LetterEntry>,
}

/// Immutable letter -> per-language table.
///
/// Built once at start-up and only read afterwards, so it can be shared
/// across request tasks behind an `Arc` without locking. Letters and their
/// languages keep the order in which they were declared.
#[derive(Debug, Clone)]
pub struct AlphabetTable {
    groups: Vec<LetterGroup>,
    // letter key -> position in `groups`
    index: HashMap<String, usize>,
}

impl AlphabetTable {
    /// Build the table from the seed data shipped with the crate.
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_json_str(EMBEDDED_TABLE).context("embedded alphabet table is invalid")
    }

    /// Load a table file (same layout as `data/alphabet.json`).
    pub fn from_path<P: AsRef<Path>>(p: P) -> anyhow::Result<Self> {
        let text = fs::read_to_string(p.as_ref())
            .with_context(|| format!("Failed to load {}", p.as_ref().display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("{} is not a valid alphabet table", p.as_ref().display()))
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let file: TableFile =
            serde_json::from_str(text).context("alphabet table is not valid JSON")?;

        let mut groups = Vec::with_capacity(file.letters.len());
        let mut index = HashMap::with_capacity(file.letters.len());

        for record in file.letters {
            let letter = record.letter.trim().to_lowercase();
            if letter.is_empty() {
                anyhow::bail!("empty letter key in alphabet table");
            }
            if index.contains_key(&letter) {
                anyhow::bail!("letter '{}' is declared more than once", letter);
            }

            let mut entries: Vec<LetterEntry> = Vec::with_capacity(record.languages.len());
            for lang in record.languages {
                let entry = lang.into_entry(&letter);
                if entry.language.is_empty() {
                    anyhow::bail!("empty language tag for letter '{}'", letter);
                }
                if entry.display_form.is_empty() {
                    anyhow::bail!(
                        "missing 'lettre' for letter '{}' in language '{}'",
                        letter,
                        entry.language
                    );
                }
                if entries.iter().any(|e| e.language == entry.language) {
                    anyhow::bail!(
                        "language '{}' is declared more than once for letter '{}'",
                        entry.language,
                        letter
                    );
                }
                entries.push(entry);
            }

            index.insert(letter.clone(), groups.len());
            groups.push(LetterGroup { letter, entries });
        }

        debug!(letters = groups.len(), "alphabet table built");
        Ok(Self { groups, index })
    }

    /// Every language entry for `letter`, in declaration order.
    pub fn get_letter(&self, letter: &str) -> Result<&[LetterEntry], LookupError> {
        self.group(letter).map(|g| g.entries.as_slice())
    }

    /// The entry for `letter` in `language`. An unknown letter is reported
    /// before an unknown language.
    pub fn get_letter_in(&self, letter: &str, language: &str) -> Result<&LetterEntry, LookupError> {
        let group = self.group(letter)?;
        let language = language.to_lowercase();
        group
            .entries
            .iter()
            .find(|e| e.language == language)
            .ok_or_else(|| LookupError::LanguageNotFound {
                letter: group.letter.clone(),
                language,
            })
    }

    /// Letter keys in declaration order.
    pub fn letters(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.letter.as_str())
    }

    /// Number of (letter, language) entries.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn group(&self, letter: &str) -> Result<&LetterGroup, LookupError> {
        let key = letter.to_lowercase();
        match self.index.get(&key) {
            Some(&i) => Ok(&self.groups[i]),
            None => Err(LookupError::LetterNotFound { letter: key }),
        }
    }
}
