//! Emphasis markers.
//!
//! Definitions are stored as plain text plus [`EmphasisSpan`]s. This module
//! converts between that form and the marker syntax used in source
//! documents: `*italic*`, `**bold**`, and `\` escaping the next char.

use crate::{EmphasisSpan, Error, Result, Style};

/// Text with its markers removed and recorded as spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Marked {
    /// Text without markers or escapes.
    pub text: String,
    /// Spans over `text`, in offset order.
    pub spans: Vec<EmphasisSpan>,
}

/// Strips emphasis markers from `source`.
///
/// `line` is only used to report errors. Nested, empty and unclosed
/// emphasis are rejected.
pub fn parse(source: &str, line: usize) -> Result<Marked> {
    let mut text = String::with_capacity(source.len());
    let mut spans = Vec::new();
    let mut count = 0usize;
    let mut open: Option<(Style, usize)> = None;

    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                text.push(chars.next().unwrap_or('\\'));
                count += 1;
            }
            '*' => {
                let style = if chars.peek() == Some(&'*') {
                    chars.next();
                    Style::Bold
                } else {
                    Style::Italic
                };

                match open {
                    None => open = Some((style, count)),
                    Some((current, start)) if current == style => {
                        if count == start {
                            return Err(Error::parse(line, "empty emphasis"));
                        }
                        spans.push(EmphasisSpan::new(start, count - start, style));
                        open = None;
                    }
                    Some(_) => {
                        return Err(Error::parse(line, "nested emphasis is not supported"));
                    }
                }
            }
            _ => {
                text.push(c);
                count += 1;
            }
        }
    }

    if let Some((style, _)) = open {
        return Err(Error::parse(
            line,
            format!("unclosed `{}` emphasis", style.marker()),
        ));
    }

    Ok(Marked { text, spans })
}

/// Escapes chars that would otherwise read as markers.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// Re-inserts markers for `spans` at their char offsets.
///
/// Spans are expected to be valid for `text`, as checked by
/// [`Glossary::define`](crate::Glossary::define).
pub fn emphasize(text: &str, spans: &[EmphasisSpan]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 4);
    let mut pending = spans.iter().peekable();
    let mut open: Option<&EmphasisSpan> = None;

    for (i, c) in text.chars().enumerate() {
        if open.is_none() && pending.peek().is_some_and(|span| span.offset == i) {
            open = pending.next();
            if let Some(span) = open {
                out.push_str(span.style.marker());
            }
        }

        push_escaped(&mut out, c);

        if let Some(span) = open {
            if span.end() == i + 1 {
                out.push_str(span.style.marker());
                open = None;
            }
        }
    }

    out
}

fn push_escaped(out: &mut String, c: char) {
    if matches!(c, '*' | '\\') {
        out.push('\\');
    }
    out.push(c);
}
