//! Error types for the glossary.

/// A related-term reference that names no defined term.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("term `{term}` references undefined term `{target}`")]
pub struct DanglingReference {
    /// Identifier of the term holding the reference.
    pub term: String,
    /// The referenced identifier that could not be resolved.
    pub target: String,
}

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A term with the same identifier is already defined.
    #[error("Duplicate term: `{0}` is already defined")]
    DuplicateTerm(String),

    /// No term with this identifier exists.
    #[error("Unknown term: `{0}`")]
    UnknownTerm(String),

    /// One or more references could not be resolved.
    #[error("{} dangling reference(s)", .0.len())]
    DanglingReferences(Vec<DanglingReference>),

    /// The requested output format is not one of `plain` or `emphasized`.
    #[error("Unsupported format: `{0}` (expected `plain` or `emphasized`)")]
    UnsupportedFormat(String),

    /// A term identifier is empty after normalization or does not fit on
    /// one heading line.
    #[error("Invalid term identifier: {0:?}")]
    InvalidIdentifier(String),

    /// An emphasis span does not fit the definition it annotates.
    #[error("Invalid emphasis span in `{term}`: {reason}")]
    InvalidSpan {
        /// Identifier of the offending term.
        term: String,
        /// What is wrong with the span.
        reason: String,
    },

    /// A term or document part cannot be written in the source syntax
    /// and loaded back unchanged.
    #[error("Cannot represent {subject} in source syntax: {reason}")]
    Unrepresentable {
        /// What was being checked, e.g. ``term `NARK` ``.
        subject: String,
        /// Why it cannot be written.
        reason: String,
    },

    /// The source document does not follow the glossary syntax.
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// One-based source line.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// Reading the source document failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
