mod common;

use std::fs;

use zk_glossary::{
    bundled, load, load_file, render, resolve, DanglingReference, EmphasisSpan, Error, Format,
    Glossary, RenderOptions, Term,
};

#[test]
fn nark_before_soundness_end_to_end() {
    common::init_tracing();
    let glossary = common::nark_and_soundness();

    let resolution = resolve(&glossary);
    assert!(resolution.is_clean(), "Every reference should resolve");

    let plain = render(&glossary, "plain").expect("plain rendering should succeed");
    let nark = plain.find("NARK").expect("NARK should be rendered");
    let soundness = plain
        .find("No prover convinces")
        .expect("soundness should be rendered");
    assert!(nark < soundness, "NARK should be emitted before soundness");
}

#[test]
fn define_then_lookup_round_trip() {
    let mut glossary = Glossary::new();
    let term = Term::new("Witness", "Private inputs plus advice values.")
        .with_span(EmphasisSpan::italic(0, 7))
        .related_to("Statement")
        .with_external("Circuit")
        .with_aside("The verifier never sees the witness.");
    glossary.define(term.clone()).expect("define should succeed");

    let found = glossary.lookup("witness").expect("lookup should succeed");
    assert_eq!(found, &term);
}

#[test]
fn duplicate_identifier_is_rejected_atomically() {
    let mut glossary = common::nark_and_soundness();
    let before: Vec<Term> = glossary.all().cloned().collect();

    let result = glossary.define(Term::new("Soundness", "A different definition."));
    assert!(matches!(result, Err(Error::DuplicateTerm(_))));

    let after: Vec<Term> = glossary.all().cloned().collect();
    assert_eq!(before, after, "Store should be unchanged after a duplicate");
}

#[test]
fn one_dangling_reference_is_named() {
    let mut glossary = Glossary::new();
    glossary
        .define(Term::new("A", "Refers to something missing.").related_to("Z"))
        .unwrap();

    let resolution = resolve(&glossary);
    assert_eq!(
        resolution.dangling(),
        &[DanglingReference {
            term: "A".to_string(),
            target: "Z".to_string(),
        }]
    );
}

#[test]
fn unknown_lookup_is_recoverable() {
    let glossary = common::nark_and_soundness();

    assert!(matches!(
        glossary.lookup("SNARK"),
        Err(Error::UnknownTerm(ref id)) if id == "SNARK"
    ));
    assert!(glossary.lookup("NARK").is_ok());
}

#[test]
fn unsupported_format_does_not_touch_the_store() {
    let glossary = common::nark_and_soundness();

    assert!(matches!(
        render(&glossary, "latex"),
        Err(Error::UnsupportedFormat(ref name)) if name == "latex"
    ));
    assert_eq!(glossary.len(), 2);
    assert!(render(&glossary, "emphasized").is_ok());
}

#[test]
fn plain_rendering_strips_markers_and_keeps_order() {
    let glossary = load(
        "## Relation\nA **relation** is a set of *pairs*.\n\n\
         ## Statement\nA **statement** claims membership in a relation.\nRelated: Relation\n",
    )
    .unwrap();

    let plain = render(&glossary, "plain").unwrap();
    assert!(!plain.contains('*'), "Plain output should have no markers");

    let mut cursor = 0;
    for term in &glossary {
        let at = plain[cursor..]
            .find(term.definition())
            .expect("every definition should be rendered in order");
        cursor += at + term.definition().len();
    }
}

#[test]
fn emphasized_rendering_preserves_span_offsets() {
    let glossary = bundled().unwrap();
    let emphasized = render(&glossary, "emphasized").unwrap();
    let reloaded = load(&emphasized).unwrap();

    assert_eq!(glossary.len(), reloaded.len());
    for (original, copy) in glossary.all().zip(reloaded.all()) {
        assert_eq!(original.id(), copy.id());
        assert_eq!(original.definition(), copy.definition());
        assert_eq!(original.spans(), copy.spans(), "spans of {}", original.id());
        assert_eq!(original.related(), copy.related());
        assert_eq!(original.asides(), copy.asides());
    }
    assert_eq!(glossary.asides(), reloaded.asides());
    assert_eq!(glossary.title(), reloaded.title());
}

#[test]
fn load_file_reads_rendered_output() {
    let path = std::env::temp_dir().join(format!("zk-glossary-{}.md", std::process::id()));
    let glossary = bundled().unwrap();
    fs::write(
        &path,
        Format::Emphasized.render(&glossary, &RenderOptions::default()),
    )
    .unwrap();

    let loaded = load_file(&path);
    fs::remove_file(&path).ok();

    let loaded = loaded.expect("rendered glossary should load");
    assert_eq!(loaded.len(), glossary.len());
    assert!(resolve(&loaded).is_clean());
}

#[test]
fn bundled_glossary_navigation() {
    let glossary = bundled().unwrap();
    let graph = resolve(&glossary)
        .into_result()
        .expect("bundled glossary should have no dangling references");

    let reachable = graph.reachable("zk-SNARK").unwrap();
    for expected in ["SNARK", "NARK", "Succinct", "Zero knowledge", "Soundness"] {
        assert!(
            reachable.contains(&expected),
            "{expected} should be reachable from zk-SNARK"
        );
    }

    let referrers = graph.referrers("witness").unwrap();
    assert!(referrers.contains(&"Statement"));
    assert!(referrers.contains(&"Zero knowledge"));
}
