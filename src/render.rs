//! Text rendering of a glossary.

use std::fmt;
use std::str::FromStr;

use crate::markup;
use crate::{Aside, Error, Glossary, Reference, Result, Term};

const INDENT: &str = "    ";

/// Output formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// Readable text with every emphasis marker removed.
    #[default]
    Plain,
    /// The source syntax, with emphasis markers at their original offsets.
    Emphasized,
}

impl Format {
    /// Every supported format.
    pub const ALL: [Format; 2] = [Format::Plain, Format::Emphasized];

    /// Name accepted by [`Format::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Format::Plain => "plain",
            Format::Emphasized => "emphasized",
        }
    }

    /// Renders the whole glossary. Terms keep their insertion order.
    pub fn render(self, glossary: &Glossary, options: &RenderOptions) -> String {
        let mut out = String::new();

        if let Some(title) = glossary.title() {
            match self {
                Format::Plain => {
                    out.push_str(title);
                    out.push('\n');
                    out.push_str(&"=".repeat(title.chars().count()));
                    out.push('\n');
                }
                Format::Emphasized => {
                    out.push_str("# ");
                    out.push_str(title);
                    out.push('\n');
                }
            }
            out.push('\n');
        }

        if options.include_asides && !glossary.asides().is_empty() {
            for aside in glossary.asides() {
                self.push_aside(&mut out, aside, "");
            }
            out.push('\n');
        }

        let mut terms = glossary.all().peekable();
        while let Some(term) = terms.next() {
            out.push_str(&self.render_term(term, options));
            if terms.peek().is_some() {
                out.push('\n');
            }
        }

        out
    }

    /// Renders a single term.
    pub fn render_term(self, term: &Term, options: &RenderOptions) -> String {
        match self {
            Format::Plain => render_plain_term(term, options),
            Format::Emphasized => render_emphasized_term(term, options),
        }
    }

    fn push_aside(self, out: &mut String, aside: &Aside, indent: &str) {
        for line in aside.text().lines() {
            out.push_str(indent);
            match self {
                Format::Plain => {
                    out.push_str("Note: ");
                    out.push_str(line);
                }
                Format::Emphasized => {
                    out.push_str("> ");
                    out.push_str(&markup::escape(line));
                }
            }
            out.push('\n');
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnsupportedFormat(name.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to include besides definitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit each term's related references.
    pub include_related: bool,
    /// Emit asides of the document and of each term.
    pub include_asides: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_related: true,
            include_asides: true,
        }
    }
}

/// Renders `glossary` in the format named `format`.
///
/// Fails with [`Error::UnsupportedFormat`] for any name other than `plain`
/// or `emphasized`. The glossary is never modified.
///
/// # Examples
///
/// ```rust
/// use zk_glossary::{load, render};
///
/// let glossary = load("## NARK\nA *non-interactive* argument.\n")?;
///
/// assert_eq!(render(&glossary, "plain")?, "NARK\n    A non-interactive argument.\n");
/// assert!(render(&glossary, "html").is_err());
/// # Ok::<(), zk_glossary::Error>(())
/// ```
pub fn render(glossary: &Glossary, format: &str) -> Result<String> {
    let format: Format = format.parse()?;
    Ok(format.render(glossary, &RenderOptions::default()))
}

fn render_plain_term(term: &Term, options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(term.id());
    out.push('\n');

    for line in term.definition().lines() {
        if !line.is_empty() {
            out.push_str(INDENT);
            out.push_str(line);
        }
        out.push('\n');
    }

    if options.include_related && !term.related().is_empty() {
        let related: Vec<String> = term
            .related()
            .iter()
            .map(|reference| {
                if reference.is_external() {
                    format!("{} (external)", reference.target())
                } else {
                    reference.target().to_string()
                }
            })
            .collect();
        out.push_str(INDENT);
        out.push_str("Related: ");
        out.push_str(&related.join(", "));
        out.push('\n');
    }

    if options.include_asides {
        for aside in term.asides() {
            Format::Plain.push_aside(&mut out, aside, INDENT);
        }
    }

    out
}

fn render_emphasized_term(term: &Term, options: &RenderOptions) -> String {
    let mut out = format!("## {}\n\n", term.id());

    let marked = markup::emphasize(term.definition(), term.spans());
    for line in marked.lines() {
        if starts_like_syntax(line) {
            out.push('\\');
        }
        out.push_str(line);
        out.push('\n');
    }

    if options.include_related && !term.related().is_empty() {
        let related: Vec<String> = term.related().iter().map(Reference::to_string).collect();
        out.push_str("\nRelated: ");
        out.push_str(&related.join(", "));
        out.push('\n');
    }

    if options.include_asides && !term.asides().is_empty() {
        out.push('\n');
        for (i, aside) in term.asides().iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            Format::Emphasized.push_aside(&mut out, aside, "");
        }
    }

    out
}

/// Whether a definition line would be read as a heading, aside or
/// related list when loaded back.
fn starts_like_syntax(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with('#') || line.starts_with('>') || line.starts_with("Related:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{load, EmphasisSpan};

    fn scenario() -> Glossary {
        let mut glossary = Glossary::new();
        glossary
            .define(
                Term::new("NARK", "A non-interactive argument of knowledge.")
                    .with_span(EmphasisSpan::italic(2, 15))
                    .related_to("soundness")
                    .with_external("Fiat-Shamir"),
            )
            .unwrap();
        glossary
            .define(
                Term::new("soundness", "No *false* proofs.")
                    .with_span(EmphasisSpan::bold(0, 2))
                    .with_aside("Compare with knowledge soundness."),
            )
            .unwrap();
        glossary
    }

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!("plain".parse::<Format>().unwrap(), Format::Plain);
        assert_eq!(" Emphasized ".parse::<Format>().unwrap(), Format::Emphasized);

        match "markdown".parse::<Format>() {
            Err(Error::UnsupportedFormat(name)) => assert_eq!(name, "markdown"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn plain_output_has_terms_in_order() {
        let out = render(&scenario(), "plain").unwrap();

        assert_eq!(
            out,
            "NARK\n    A non-interactive argument of knowledge.\n    Related: soundness, Fiat-Shamir (external)\n\nsoundness\n    No *false* proofs.\n    Note: Compare with knowledge soundness.\n"
        );
    }

    #[test]
    fn emphasized_output_reinserts_markers() {
        let out = render(&scenario(), "emphasized").unwrap();

        assert_eq!(
            out,
            "## NARK\n\nA *non-interactive* argument of knowledge.\n\nRelated: soundness, extern:Fiat-Shamir\n\n## soundness\n\n**No** \\*false\\* proofs.\n\n> Compare with knowledge soundness.\n"
        );
    }

    #[test]
    fn emphasized_output_loads_back_identically() {
        let original = scenario();
        let reloaded = load(&render(&original, "emphasized").unwrap()).unwrap();

        let pairs = original.all().zip(reloaded.all());
        assert_eq!(original.len(), reloaded.len());
        for (before, after) in pairs {
            assert_eq!(before, after);
        }
    }

    #[test]
    fn options_drop_related_and_asides() {
        let options = RenderOptions {
            include_related: false,
            include_asides: false,
        };
        let out = Format::Plain.render(&scenario(), &options);

        assert!(!out.contains("Related:"));
        assert!(!out.contains("Note:"));
        assert!(out.contains("No *false* proofs."));
    }

    #[test]
    fn title_and_document_asides_lead_the_output() {
        let glossary = load("# Proofs\n\n> Read in order.\n\n## A\nfirst\n").unwrap();

        let plain = render(&glossary, "plain").unwrap();
        assert_eq!(plain, "Proofs\n======\n\nNote: Read in order.\n\nA\n    first\n");

        let emphasized = render(&glossary, "emphasized").unwrap();
        assert_eq!(emphasized, "# Proofs\n\n> Read in order.\n\n## A\n\nfirst\n");
    }

    #[test]
    fn syntax_like_definition_lines_are_escaped() {
        let mut glossary = Glossary::new();
        glossary
            .define(Term::new("Hash", "# of rounds\n\nRelated: nothing"))
            .unwrap();

        let out = render(&glossary, "emphasized").unwrap();
        assert!(out.contains("\\# of rounds\n"));
        assert!(out.contains("\\Related: nothing\n"));

        let reloaded = load(&out).unwrap();
        assert_eq!(
            reloaded.lookup("hash").unwrap().definition(),
            "# of rounds\n\nRelated: nothing"
        );
    }
}
