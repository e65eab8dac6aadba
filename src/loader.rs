//! Builds a [`Glossary`] from a source document.
//!
//! The source is Markdown-like prose with a small, fixed convention:
//!
//! ```text
//! # Proof systems               optional title, before any term
//! > A remark.                   aside; document-level before the first term
//! ## Statement                  starts a term
//! A *statement* is a claim...   definition prose, with emphasis markers
//! Related: relation, extern:X   related references
//! ```
//!
//! Consecutive prose lines join with a space, blank lines separate
//! paragraphs, and consecutive `>` lines form one aside. A line starting
//! with `\` is always prose.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::markup;
use crate::{Aside, Error, Glossary, Reference, Result, Term};

const RELATED_PREFIX: &str = "Related:";

/// Loads a glossary from source text.
///
/// Fails on the first syntax error or duplicate term.
///
/// # Examples
///
/// ```rust
/// use zk_glossary::load;
///
/// let glossary = load("## NARK\nA *non-interactive* argument.\nRelated: soundness\n\n## Soundness\nNo false proofs.\n")?;
/// assert_eq!(glossary.len(), 2);
/// assert_eq!(glossary.lookup("nark")?.definition(), "A non-interactive argument.");
/// # Ok::<(), zk_glossary::Error>(())
/// ```
pub fn load(source: &str) -> Result<Glossary> {
    let mut loader = Loader::default();
    for (index, line) in source.lines().enumerate() {
        loader.line(index + 1, line)?;
    }
    let glossary = loader.finish()?;

    info!(
        terms = glossary.len(),
        asides = glossary.asides().len(),
        "loaded glossary"
    );
    Ok(glossary)
}

/// Reads and loads the glossary stored at `path`.
pub fn load_file(path: impl AsRef<Path>) -> Result<Glossary> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = source.len(), "read glossary source");
    load(&source)
}

/// A term whose body is still being read.
struct PendingTerm {
    id: String,
    line: usize,
    paragraphs: Vec<(usize, String)>,
    related: Vec<Reference>,
    asides: Vec<Aside>,
}

#[derive(Default)]
struct Loader {
    glossary: Glossary,
    current: Option<PendingTerm>,
    paragraph: Option<(usize, Vec<String>)>,
    aside: Option<(usize, Vec<String>)>,
}

impl Loader {
    fn line(&mut self, number: usize, raw: &str) -> Result<()> {
        let line = raw.trim();

        if line.is_empty() {
            return self.flush();
        }

        if line.starts_with('#') {
            self.flush()?;
            return self.heading(number, line);
        }

        if let Some(rest) = line.strip_prefix('>') {
            self.flush_paragraph()?;
            let rest = rest.trim();
            if rest.is_empty() {
                return self.flush_aside();
            }
            self.aside
                .get_or_insert_with(|| (number, Vec::new()))
                .1
                .push(rest.to_string());
            return Ok(());
        }

        if let Some(list) = line.strip_prefix(RELATED_PREFIX) {
            self.flush()?;
            let Some(term) = self.current.as_mut() else {
                return Err(Error::parse(number, "related list outside of a term"));
            };
            term.related.extend(
                list.split(',')
                    .filter(|item| !item.trim().is_empty())
                    .map(Reference::parse),
            );
            return Ok(());
        }

        self.flush_aside()?;
        if self.current.is_none() {
            return Err(Error::parse(number, "text before the first term"));
        }
        self.paragraph
            .get_or_insert_with(|| (number, Vec::new()))
            .1
            .push(line.to_string());
        Ok(())
    }

    fn heading(&mut self, number: usize, line: &str) -> Result<()> {
        let level = line.chars().take_while(|&c| c == '#').count();
        let text = line[level..].trim();
        if text.is_empty() {
            return Err(Error::parse(number, "empty heading"));
        }

        match level {
            1 => {
                if self.current.is_some() {
                    return Err(Error::parse(number, "title must precede the first term"));
                }
                if self.glossary.title().is_some() {
                    return Err(Error::parse(number, "title is already set"));
                }
                self.glossary.set_title(text)
            }
            2 => {
                self.finish_term()?;
                self.current = Some(PendingTerm {
                    id: text.to_string(),
                    line: number,
                    paragraphs: Vec::new(),
                    related: Vec::new(),
                    asides: Vec::new(),
                });
                Ok(())
            }
            _ => Err(Error::parse(
                number,
                format!("unsupported heading level {level}"),
            )),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.flush_paragraph()?;
        self.flush_aside()
    }

    fn flush_paragraph(&mut self) -> Result<()> {
        if let Some((number, lines)) = self.paragraph.take() {
            if let Some(term) = self.current.as_mut() {
                term.paragraphs.push((number, lines.join(" ")));
            }
        }
        Ok(())
    }

    fn flush_aside(&mut self) -> Result<()> {
        let Some((number, lines)) = self.aside.take() else {
            return Ok(());
        };

        let marked = markup::parse(&lines.join(" "), number)?;
        let aside = Aside::new(marked.text.trim());
        match self.current.as_mut() {
            Some(term) => term.asides.push(aside),
            None => self.glossary.add_aside(aside)?,
        }
        Ok(())
    }

    fn finish_term(&mut self) -> Result<()> {
        let Some(pending) = self.current.take() else {
            return Ok(());
        };

        if pending.paragraphs.is_empty() {
            return Err(Error::parse(
                pending.line,
                format!("term `{}` has no definition", pending.id),
            ));
        }

        let mut definition = String::new();
        let mut spans = Vec::new();
        let mut offset = 0usize;
        for (i, (number, paragraph)) in pending.paragraphs.iter().enumerate() {
            if i > 0 {
                definition.push_str("\n\n");
                offset += 2;
            }
            let marked = markup::parse(paragraph, *number)?;
            spans.extend(marked.spans.into_iter().map(|mut span| {
                span.offset += offset;
                span
            }));
            offset += marked.text.chars().count();
            definition.push_str(&marked.text);
        }

        let mut term = Term::new(pending.id, definition).with_spans(spans);
        for reference in pending.related {
            term = term.with_reference(reference);
        }
        for aside in pending.asides {
            term = term.with_aside(aside.text());
        }

        self.glossary.define(term)?;
        Ok(())
    }

    fn finish(mut self) -> Result<Glossary> {
        self.flush()?;
        self.finish_term()?;
        Ok(self.glossary)
    }
}
