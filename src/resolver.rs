//! Cross-reference resolution.
//!
//! Every internal reference of every term is checked against the glossary.
//! Broken links do not stop the pass: they are all collected, so a caller
//! sees every dangling reference at once, and the links that do resolve
//! form a [`ReferenceGraph`] for navigation.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Write as _;

use tracing::{info, warn};

use crate::glossary::EXTERNAL_PREFIX;
use crate::{normalize_id, DanglingReference, Error, Glossary, Result};

/// Outcome of a resolution pass.
#[derive(Clone, Debug)]
pub struct Resolution {
    graph: ReferenceGraph,
    dangling: Vec<DanglingReference>,
}

impl Resolution {
    /// Navigation graph over the references that resolved.
    pub fn graph(&self) -> &ReferenceGraph {
        &self.graph
    }

    /// Unresolved references, in definition order.
    pub fn dangling(&self) -> &[DanglingReference] {
        &self.dangling
    }

    /// Whether every internal reference resolved.
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }

    /// Returns the graph, or all dangling references as one error.
    pub fn into_result(self) -> Result<ReferenceGraph> {
        if self.dangling.is_empty() {
            Ok(self.graph)
        } else {
            Err(Error::DanglingReferences(self.dangling))
        }
    }
}

/// Resolves every reference in `glossary`.
///
/// # Examples
///
/// ```rust
/// use zk_glossary::{resolve, Glossary, Term};
///
/// let mut glossary = Glossary::new();
/// glossary.define(Term::new("A", "first").related_to("Z"))?;
///
/// let resolution = resolve(&glossary);
/// assert_eq!(resolution.dangling().len(), 1);
/// assert_eq!(resolution.dangling()[0].target, "Z");
/// # Ok::<(), zk_glossary::Error>(())
/// ```
pub fn resolve(glossary: &Glossary) -> Resolution {
    let mut graph = ReferenceGraph::with_capacity(glossary.len());
    let mut dangling = Vec::new();

    for term in glossary {
        graph.index.insert(term.key(), graph.ids.len());
        graph.ids.push(term.id().to_string());
        let mut related = Vec::new();
        let mut externals = Vec::new();

        for reference in term.related() {
            if reference.is_external() {
                externals.push(reference.target().to_string());
                continue;
            }

            match glossary.position(reference.target()) {
                Some(to) => related.push(to),
                None => {
                    warn!(
                        term = term.id(),
                        target = reference.target(),
                        "dangling reference"
                    );
                    dangling.push(DanglingReference {
                        term: term.id().to_string(),
                        target: reference.target().to_string(),
                    });
                }
            }
        }

        graph.edges.push(related);
        graph.externals.push(externals);
    }

    info!(
        terms = graph.len(),
        links = graph.edges().count(),
        dangling = dangling.len(),
        "resolved cross references"
    );

    Resolution { graph, dangling }
}

/// Adjacency mapping from each term to the terms it references.
///
/// Nodes and their neighbours keep the glossary's insertion order. Lookups
/// accept any spelling of an identifier that normalizes to the same key.
#[derive(Clone, Debug, Default)]
pub struct ReferenceGraph {
    ids: Vec<String>,
    edges: Vec<Vec<usize>>,
    externals: Vec<Vec<String>>,
    index: HashMap<String, usize>,
}

impl ReferenceGraph {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            edges: Vec::with_capacity(capacity),
            externals: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn index(&self, id: &str) -> Result<usize> {
        self.index
            .get(&normalize_id(id))
            .copied()
            .ok_or_else(|| Error::UnknownTerm(id.trim().to_string()))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Node identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Terms referenced by `id`.
    pub fn related(&self, id: &str) -> Result<Vec<&str>> {
        let from = self.index(id)?;
        Ok(self.edges[from]
            .iter()
            .map(|&to| self.ids[to].as_str())
            .collect())
    }

    /// Terms that reference `id`.
    pub fn referrers(&self, id: &str) -> Result<Vec<&str>> {
        let to = self.index(id)?;
        Ok(self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, targets)| targets.contains(&to))
            .map(|(from, _)| self.ids[from].as_str())
            .collect())
    }

    /// External concepts referenced by `id`.
    pub fn externals(&self, id: &str) -> Result<&[String]> {
        let from = self.index(id)?;
        Ok(&self.externals[from])
    }

    /// Every term reachable from `id` by following references,
    /// breadth first. `id` itself is excluded.
    pub fn reachable(&self, id: &str) -> Result<Vec<&str>> {
        let start = self.index(id)?;
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();

        while let Some(node) = queue.pop_front() {
            for &next in &self.edges[node] {
                if seen.insert(next) {
                    order.push(self.ids[next].as_str());
                    queue.push_back(next);
                }
            }
        }

        Ok(order)
    }

    /// All `(from, to)` links in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().enumerate().flat_map(move |(from, targets)| {
            targets
                .iter()
                .map(move |&to| (self.ids[from].as_str(), self.ids[to].as_str()))
        })
    }

    /// Graphviz rendering of the graph. External references are drawn
    /// as dashed edges to box-shaped nodes, whose node ids carry the
    /// `extern:` prefix so they never merge with a term of the same name.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph glossary {\n");
        for id in &self.ids {
            let _ = writeln!(out, "    {};", quote(id));
        }
        for (from, to) in self.edges() {
            let _ = writeln!(out, "    {} -> {};", quote(from), quote(to));
        }
        for (from, externals) in self.externals.iter().enumerate() {
            for external in externals {
                let node = quote(&format!("{EXTERNAL_PREFIX}{external}"));
                let _ = writeln!(
                    out,
                    "    {} -> {node} [style=dashed];\n    {node} [shape=box, label={}];",
                    quote(&self.ids[from]),
                    quote(external)
                );
            }
        }
        out.push_str("}\n");
        out
    }
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}
