//! Terminology reference for zero-knowledge proof systems.
//!
//! A glossary is loaded once from a Markdown-like source document, its
//! cross references are resolved into a navigable graph, and it is rendered
//! as plain or emphasized text:
//!
//! ```rust
//! use zk_glossary::{load, render, resolve};
//!
//! let glossary = load(
//!     "## NARK\nA *non-interactive* argument of knowledge.\nRelated: soundness\n\n\
//!      ### Soundness\nNo false statement has an accepting proof.\n",
//! )?;
//!
//! let graph = resolve(&glossary).into_result()?;
//! assert_eq!(graph.related("nark")?, vec!["Soundness"]);
//!
//! let text = render(&glossary, "plain")?;
//! assert!(text.find("NARK") < text.find("Soundness"));
//! # Ok::<(), zk_glossary::Error>(())
//! ```

/// Bundled proof-system glossary.
pub mod bundled;
/// Configuration from files and environment.
pub mod config;
/// Error types.
pub mod error;
/// Term model and term store.
pub mod glossary;
/// Source document loader.
pub mod loader;
/// Emphasis marker parsing and rendering.
pub mod markup;
/// Plain and emphasized rendering.
pub mod render;
/// Cross-reference resolution.
pub mod resolver;

pub use bundled::bundled;
pub use config::GlossaryConfig;
pub use error::{DanglingReference, Error, Result};
pub use glossary::{normalize_id, Aside, EmphasisSpan, Glossary, Reference, Style, Term};
pub use loader::{load, load_file};
pub use render::{render, Format, RenderOptions};
pub use resolver::{resolve, ReferenceGraph, Resolution};
