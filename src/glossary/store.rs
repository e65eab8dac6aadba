use std::collections::HashMap;
use std::slice;

use tracing::debug;

use super::term::{line_problem, normalize_id, Aside, Term};
use crate::{Error, Result};

/// The ordered collection of defined terms.
///
/// Terms keep their insertion order, since later definitions may lean on
/// earlier ones. A glossary is populated once and only read afterwards:
/// terms are never removed or replaced.
#[derive(Clone, Debug, Default)]
pub struct Glossary {
    title: Option<String>,
    asides: Vec<Aside>,
    terms: Vec<Term>,
    index: HashMap<String, usize>,
}

impl Glossary {
    /// Creates an empty glossary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title.
    ///
    /// The title must fit on one heading line.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        let problem = line_problem(&title)
            .or_else(|| title.starts_with('#').then_some("starts with `#`"));
        if let Some(problem) = problem {
            return Err(Error::Unrepresentable {
                subject: "document title".to_string(),
                reason: format!("title {problem}"),
            });
        }

        self.title = Some(title);
        Ok(())
    }

    /// Attaches an aside to the document as a whole.
    ///
    /// The aside must be a single trimmed line of text.
    pub fn add_aside(&mut self, aside: Aside) -> Result<()> {
        if let Some(problem) = line_problem(aside.text()) {
            return Err(Error::Unrepresentable {
                subject: "document aside".to_string(),
                reason: format!("aside {problem}"),
            });
        }

        self.asides.push(aside);
        Ok(())
    }

    /// Defines a new term.
    ///
    /// Fails with [`Error::DuplicateTerm`] if a term with the same normalized
    /// identifier exists, or with a validation error if the term's identifier
    /// or spans are malformed or the term cannot be written in source syntax.
    /// The glossary is unchanged on failure.
    pub fn define(&mut self, term: Term) -> Result<&Term> {
        term.validate()?;

        let key = term.key();
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateTerm(term.id().to_string()));
        }

        debug!(
            term = term.id(),
            related = term.related().len(),
            spans = term.spans().len(),
            "defined term"
        );

        let position = self.terms.len();
        self.index.insert(key, position);
        self.terms.push(term);
        Ok(&self.terms[position])
    }

    /// Returns the term named `id`, or [`Error::UnknownTerm`].
    pub fn lookup(&self, id: &str) -> Result<&Term> {
        self.get(id)
            .ok_or_else(|| Error::UnknownTerm(id.trim().to_string()))
    }

    /// Returns the term named `id`, if defined.
    pub fn get(&self, id: &str) -> Option<&Term> {
        self.position(id).map(|i| &self.terms[i])
    }

    /// Whether a term named `id` is defined.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&normalize_id(id))
    }

    /// Insertion index of the term named `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(&normalize_id(id)).copied()
    }

    /// Iterates over all terms in insertion order.
    pub fn all(&self) -> slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Number of defined terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no term is defined.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Document title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Asides attached to the document rather than a term.
    pub fn asides(&self) -> &[Aside] {
        &self.asides
    }
}

impl<'a> IntoIterator for &'a Glossary {
    type Item = &'a Term;
    type IntoIter = slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}
