//! Term model and the term store.

/// Ordered, immutable-after-load term store.
pub mod store;
/// Terms, references, asides and emphasis spans.
pub mod term;

pub use store::Glossary;
pub use term::{normalize_id, Aside, EmphasisSpan, Reference, Style, Term, EXTERNAL_PREFIX};
