//! Basic usage of the glossary.
//!
//! This example demonstrates:
//! - Defining terms with emphasis, references and asides
//! - Resolving cross references
//! - Rendering in both formats
//! - Navigating the bundled proof-system glossary

use zk_glossary::{bundled, render, resolve, EmphasisSpan, Glossary, Term};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Step 1: Define terms");
    let mut glossary = Glossary::new();
    glossary.define(
        Term::new("NARK", "A non-interactive argument of knowledge.")
            .with_span(EmphasisSpan::italic(2, 15))
            .related_to("soundness")
            .with_aside("Non-interactive proofs can be replayed unless bound to a context."),
    )?;
    glossary.define(Term::new(
        "soundness",
        "No prover convinces the verifier of a false statement.",
    ))?;
    println!("  {} terms defined\n", glossary.len());

    println!("Step 2: Resolve cross references");
    let resolution = resolve(&glossary);
    println!("  dangling references: {}\n", resolution.dangling().len());

    println!("Step 3: Render");
    println!("{}", render(&glossary, "plain")?);
    println!("{}", render(&glossary, "emphasized")?);

    println!("Step 4: Navigate the bundled glossary");
    let proofs = bundled()?;
    let graph = resolve(&proofs).into_result()?;
    println!("  zk-SNARK builds on: {}", graph.reachable("zk-SNARK")?.join(", "));

    Ok(())
}
