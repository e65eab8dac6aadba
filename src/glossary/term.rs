use std::fmt;

use crate::{Error, Result};

/// Prefix marking a reference as external in source text.
pub const EXTERNAL_PREFIX: &str = "extern:";

/// Normalizes a term identifier into its lookup key.
///
/// Surrounding whitespace is dropped, inner runs collapse to a single space
/// and the result is lowercased, so `"Knowledge  Soundness"` and
/// `"knowledge soundness"` name the same term.
pub fn normalize_id(id: &str) -> String {
    id.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Emphasis style of a span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    /// Rendered as `*text*`.
    Italic,
    /// Rendered as `**text**`.
    Bold,
}

impl Style {
    /// Source marker delimiting this style.
    pub fn marker(self) -> &'static str {
        match self {
            Style::Italic => "*",
            Style::Bold => "**",
        }
    }
}

/// An emphasized run of a definition, measured in chars of the unmarked text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmphasisSpan {
    /// Char offset of the first emphasized char.
    pub offset: usize,
    /// Number of emphasized chars.
    pub len: usize,
    /// How the run is emphasized.
    pub style: Style,
}

impl EmphasisSpan {
    /// Creates a span.
    pub fn new(offset: usize, len: usize, style: Style) -> Self {
        Self { offset, len, style }
    }

    /// Creates an italic span.
    pub fn italic(offset: usize, len: usize) -> Self {
        Self::new(offset, len, Style::Italic)
    }

    /// Creates a bold span.
    pub fn bold(offset: usize, len: usize) -> Self {
        Self::new(offset, len, Style::Bold)
    }

    /// Char offset one past the last emphasized char.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.len)
    }
}

/// A link from one term to another.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    target: String,
    external: bool,
}

impl Reference {
    /// A reference that must resolve to a term in the same glossary.
    pub fn internal(target: impl Into<String>) -> Self {
        Self {
            target: target.into().trim().to_string(),
            external: false,
        }
    }

    /// A reference to a concept defined elsewhere; never resolved.
    pub fn external(target: impl Into<String>) -> Self {
        Self {
            target: target.into().trim().to_string(),
            external: true,
        }
    }

    /// Parses the source notation, where `extern:` marks an external reference.
    pub fn parse(text: &str) -> Self {
        match text.trim().strip_prefix(EXTERNAL_PREFIX) {
            Some(rest) => Self::external(rest),
            None => Self::internal(text),
        }
    }

    /// The referenced identifier as written.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Lookup key of the referenced identifier.
    pub fn key(&self) -> String {
        normalize_id(&self.target)
    }

    /// Whether the reference points outside the glossary.
    pub fn is_external(&self) -> bool {
        self.external
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.external {
            write!(f, "{EXTERNAL_PREFIX}{}", self.target)
        } else {
            f.write_str(&self.target)
        }
    }
}

/// A clarifying remark owned by a term or by the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Aside {
    text: String,
}

impl Aside {
    /// Creates an aside.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The remark.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Aside {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A defined term.
///
/// Built with [`Term::new`] and the `with_*` methods, then handed to
/// [`Glossary::define`](crate::Glossary::define), which checks it.
///
/// # Examples
///
/// ```rust
/// use zk_glossary::{EmphasisSpan, Term};
///
/// let term = Term::new("NARK", "A non-interactive argument of knowledge.")
///     .with_span(EmphasisSpan::italic(2, 15))
///     .related_to("soundness");
///
/// assert_eq!(term.span_text(&term.spans()[0]), "non-interactive");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    id: String,
    definition: String,
    spans: Vec<EmphasisSpan>,
    related: Vec<Reference>,
    asides: Vec<Aside>,
}

impl Term {
    /// Creates a term with no spans, references or asides.
    pub fn new(id: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            definition: definition.into(),
            spans: Vec::new(),
            related: Vec::new(),
            asides: Vec::new(),
        }
    }

    /// Appends an emphasis span.
    pub fn with_span(mut self, span: EmphasisSpan) -> Self {
        self.spans.push(span);
        self
    }

    /// Appends several emphasis spans.
    pub fn with_spans(mut self, spans: impl IntoIterator<Item = EmphasisSpan>) -> Self {
        self.spans.extend(spans);
        self
    }

    /// Adds a reference; a target already referenced is ignored.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        let key = reference.key();
        if !self.related.iter().any(|r| r.key() == key) {
            self.related.push(reference);
        }
        self
    }

    /// Adds a reference to another term of the same glossary.
    pub fn related_to(self, target: impl Into<String>) -> Self {
        self.with_reference(Reference::internal(target))
    }

    /// Adds a reference to a concept outside the glossary.
    pub fn with_external(self, target: impl Into<String>) -> Self {
        self.with_reference(Reference::external(target))
    }

    /// Attaches an aside.
    pub fn with_aside(mut self, text: impl Into<String>) -> Self {
        self.asides.push(Aside::new(text));
        self
    }

    /// The identifier as first written.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Normalized lookup key.
    pub fn key(&self) -> String {
        normalize_id(&self.id)
    }

    /// Definition text without markup.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Emphasis spans in offset order.
    pub fn spans(&self) -> &[EmphasisSpan] {
        &self.spans
    }

    /// Related references in order of mention.
    pub fn related(&self) -> &[Reference] {
        &self.related
    }

    /// Asides attached to this term.
    pub fn asides(&self) -> &[Aside] {
        &self.asides
    }

    /// The slice of the definition covered by `span`.
    pub fn span_text(&self, span: &EmphasisSpan) -> String {
        self.definition
            .chars()
            .skip(span.offset)
            .take(span.len)
            .collect()
    }

    /// Checks that the term can be written in source syntax and loaded back
    /// unchanged.
    ///
    /// The identifier must fit on one heading line. The definition is one
    /// or more paragraphs separated by `"\n\n"`, each a single trimmed,
    /// non-empty line. Spans must be non-empty, in bounds, ordered, at least
    /// one char apart and inside one paragraph. Reference targets and asides
    /// must be single trimmed lines, and targets cannot contain `,`.
    pub(crate) fn validate(&self) -> Result<()> {
        let multi_line = self.id.contains(['\n', '\r']);
        if self.key().is_empty() || multi_line || self.id.starts_with('#') {
            return Err(Error::InvalidIdentifier(self.id.clone()));
        }

        self.validate_definition()?;
        self.validate_spans()?;

        for reference in &self.related {
            let target = reference.target();
            let problem = line_problem(target)
                .or_else(|| target.contains(',').then_some("contains `,`"))
                .or_else(|| {
                    (!reference.is_external() && target.starts_with(EXTERNAL_PREFIX))
                        .then_some("starts with the external prefix")
                });
            if let Some(problem) = problem {
                return Err(self.unrepresentable(format!("reference {target:?} {problem}")));
            }
        }

        for aside in &self.asides {
            if let Some(problem) = line_problem(aside.text()) {
                return Err(self.unrepresentable(format!("aside {problem}")));
            }
        }

        Ok(())
    }

    fn validate_definition(&self) -> Result<()> {
        if self.definition.trim().is_empty() {
            return Err(self.unrepresentable("definition is empty".to_string()));
        }

        for (i, paragraph) in self.definition.split("\n\n").enumerate() {
            if let Some(problem) = line_problem(paragraph) {
                return Err(self.unrepresentable(format!("paragraph {} {problem}", i + 1)));
            }
        }

        Ok(())
    }

    fn validate_spans(&self) -> Result<()> {
        let chars = self.definition.chars().count();
        let mut previous_end: Option<usize> = None;
        for span in &self.spans {
            let reason = if span.len == 0 {
                Some(format!("empty span at offset {}", span.offset))
            } else if span.end() > chars {
                Some(format!(
                    "span {}..{} exceeds definition length {chars}",
                    span.offset,
                    span.end()
                ))
            } else if previous_end.is_some_and(|end| span.offset <= end) {
                Some(format!(
                    "span at offset {} overlaps or touches the previous span",
                    span.offset
                ))
            } else if self.span_text(span).contains('\n') {
                Some(format!(
                    "span at offset {} crosses a paragraph break",
                    span.offset
                ))
            } else {
                None
            };

            if let Some(reason) = reason {
                return Err(Error::InvalidSpan {
                    term: self.id.clone(),
                    reason,
                });
            }
            previous_end = Some(span.end());
        }

        Ok(())
    }

    fn unrepresentable(&self, reason: String) -> Error {
        Error::Unrepresentable {
            subject: format!("term `{}`", self.id),
            reason,
        }
    }
}

/// Why `text` cannot be written as one trimmed source line, if it cannot.
pub(crate) fn line_problem(text: &str) -> Option<&'static str> {
    if text.trim().is_empty() {
        Some("is empty")
    } else if text.contains(['\n', '\r']) {
        Some("spans several lines")
    } else if text.trim() != text {
        Some("has surrounding whitespace")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_and_case() {
        assert_eq!(normalize_id("  Knowledge \t Soundness "), "knowledge soundness");
        assert_eq!(normalize_id("   "), "");
    }

    #[test]
    fn reference_parse_recognizes_external_prefix() {
        let r = Reference::parse(" extern: Fiat-Shamir heuristic");
        assert!(r.is_external());
        assert_eq!(r.target(), "Fiat-Shamir heuristic");
        assert_eq!(r.to_string(), "extern:Fiat-Shamir heuristic");

        let r = Reference::parse("witness");
        assert!(!r.is_external());
        assert_eq!(r.to_string(), "witness");
    }

    #[test]
    fn duplicate_references_keep_first_mention() {
        let term = Term::new("SNARK", "A succinct NARK.")
            .related_to("NARK")
            .related_to("succinct")
            .related_to("nark");

        let targets: Vec<_> = term.related().iter().map(Reference::target).collect();
        assert_eq!(targets, vec!["NARK", "succinct"]);
    }

    #[test]
    fn spans_are_counted_in_chars() {
        let term = Term::new("zk", "Zéro knowledge").with_span(EmphasisSpan::bold(0, 4));
        assert!(term.validate().is_ok());
        assert_eq!(term.span_text(&term.spans()[0]), "Zéro");
    }

    #[test]
    fn validate_rejects_bad_spans() {
        let out_of_bounds = Term::new("a", "abc").with_span(EmphasisSpan::italic(2, 5));
        assert!(matches!(
            out_of_bounds.validate(),
            Err(Error::InvalidSpan { .. })
        ));

        let empty = Term::new("a", "abc").with_span(EmphasisSpan::italic(1, 0));
        assert!(matches!(empty.validate(), Err(Error::InvalidSpan { .. })));

        let overlapping = Term::new("a", "abcdef")
            .with_span(EmphasisSpan::italic(0, 3))
            .with_span(EmphasisSpan::bold(2, 2));
        assert!(matches!(
            overlapping.validate(),
            Err(Error::InvalidSpan { .. })
        ));

        let crossing = Term::new("a", "ab\n\ncd").with_span(EmphasisSpan::italic(1, 4));
        assert!(matches!(crossing.validate(), Err(Error::InvalidSpan { .. })));

        let touching = Term::new("a", "abcdef")
            .with_span(EmphasisSpan::italic(0, 2))
            .with_span(EmphasisSpan::italic(2, 2));
        assert!(matches!(touching.validate(), Err(Error::InvalidSpan { .. })));
    }

    #[test]
    fn validate_rejects_blank_identifier() {
        for id in ["  ", "two\nlines", "#heading"] {
            let term = Term::new(id, "nothing");
            assert!(
                matches!(term.validate(), Err(Error::InvalidIdentifier(_))),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_text_the_source_cannot_hold() {
        let cases = [
            Term::new("a", ""),
            Term::new("a", "   "),
            Term::new("a", "line one\nline two"),
            Term::new("a", " indented"),
            Term::new("a", "trailing "),
            Term::new("a", "one\n\n\n\ntwo"),
            Term::new("a", "fine").with_aside("one\ntwo"),
            Term::new("a", "fine").with_aside(" padded"),
            Term::new("a", "fine").related_to("a, b"),
            Term::new("a", "fine").related_to("extern:b"),
            Term::new("a", "fine").with_external("x\ny"),
        ];

        for term in cases {
            assert!(
                matches!(term.validate(), Err(Error::Unrepresentable { .. })),
                "{term:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_accepts_paragraphs_and_escaped_chars() {
        let term = Term::new("a", "# first *para*\n\nRelated: second \\ one")
            .with_span(EmphasisSpan::bold(2, 5))
            .with_span(EmphasisSpan::italic(16, 7))
            .with_external("Fiat-Shamir")
            .with_aside("> quoted");
        assert!(term.validate().is_ok());
    }
}
