use thiserror::Error;

/// Which part of a lookup key was missing from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Letter,
    Language,
}

impl NotFoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotFoundKind::Letter => "letter",
            NotFoundKind::Language => "language",
        }
    }
}

/// Lookup errors. Messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Lettre '{letter}' non trouvée.")]
    LetterNotFound { letter: String },

    #[error("Langue '{language}' non disponible pour la lettre '{letter}'.")]
    LanguageNotFound { letter: String, language: String },
}

impl LookupError {
    pub fn kind(&self) -> NotFoundKind {
        match self {
            LookupError::LetterNotFound { .. } => NotFoundKind::Letter,
            LookupError::LanguageNotFound { .. } => NotFoundKind::Language,
        }
    }
}
