//! Common test utilities shared across integration tests.

use zk_glossary::{Glossary, Term};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Subsequent calls are safe and will be ignored.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("zk_glossary=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// The two-term glossary from the end-to-end scenario: a NARK relying on soundness.
#[allow(dead_code)]
pub fn nark_and_soundness() -> Glossary {
    let mut glossary = Glossary::new();
    glossary
        .define(
            Term::new("NARK", "A non-interactive argument of knowledge.").related_to("soundness"),
        )
        .expect("NARK should be defined");
    glossary
        .define(Term::new(
            "soundness",
            "No prover convinces the verifier of a false statement.",
        ))
        .expect("soundness should be defined");
    glossary
}
