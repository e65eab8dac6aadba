//! The glossary of proof-system terminology shipped with the crate.

use crate::{load, Glossary, Result};

/// Source text of the bundled glossary.
pub const PROOFS_SOURCE: &str = include_str!("../data/proofs.md");

/// Loads the bundled proof-system glossary.
pub fn bundled() -> Result<Glossary> {
    load(PROOFS_SOURCE)
}
