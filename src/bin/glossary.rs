use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use zk_glossary::{
    bundled, load_file, resolve, Error, Format, Glossary, GlossaryConfig, Resolution,
};

#[derive(Parser, Debug)]
#[command(name = "glossary")]
#[command(about = "Zero-knowledge proof-system glossary", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every term of the glossary
    Render {
        /// Output format: plain or emphasized
        #[arg(short, long)]
        format: Option<String>,

        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out related references
        #[arg(long)]
        no_related: bool,

        /// Leave out asides
        #[arg(long)]
        no_asides: bool,

        /// Glossary source; the bundled glossary when omitted
        input: Option<PathBuf>,
    },

    /// Load and resolve the glossary, reporting every broken reference
    Check {
        /// Glossary source; the bundled glossary when omitted
        input: Option<PathBuf>,
    },

    /// Show a single term
    Lookup {
        /// Term identifier (case-insensitive)
        term: String,

        /// Output format: plain or emphasized
        #[arg(short, long)]
        format: Option<String>,

        /// Glossary source; the bundled glossary when omitted
        input: Option<PathBuf>,
    },

    /// Print the cross-reference graph
    Graph {
        /// Emit Graphviz dot instead of an adjacency list
        #[arg(long)]
        dot: bool,

        /// Glossary source; the bundled glossary when omitted
        input: Option<PathBuf>,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn eprint_colored(color: Color, text: &str) {
    let mut stderr = io::stderr();
    execute!(stderr, SetForegroundColor(color), Print(text), ResetColor).ok();
    stderr.flush().ok();
}

fn eprintln_colored(color: Color, text: &str) {
    eprint_colored(color, text);
    eprintln!();
}

fn load_input(input: Option<&Path>) -> zk_glossary::Result<Glossary> {
    match input {
        Some(path) => load_file(path),
        None => bundled(),
    }
}

fn parse_format(flag: Option<&str>, config: &GlossaryConfig) -> zk_glossary::Result<Format> {
    flag.unwrap_or(config.render.format.as_str()).parse()
}

/// Reports every dangling reference. Fails unless the configuration allows them.
fn check_references(resolution: &Resolution, config: &GlossaryConfig) -> CliResult {
    for dangling in resolution.dangling() {
        eprintln_colored(Color::Yellow, &format!("dangling: {dangling}"));
    }

    if resolution.is_clean() || config.resolve.allow_dangling {
        Ok(())
    } else {
        Err(Error::DanglingReferences(resolution.dangling().to_vec()).into())
    }
}

fn run(command: Commands, config: &GlossaryConfig) -> CliResult {
    match command {
        Commands::Render {
            format,
            output,
            no_related,
            no_asides,
            input,
        } => {
            let format = parse_format(format.as_deref(), config)?;
            let glossary = load_input(input.as_deref())?;
            check_references(&resolve(&glossary), config)?;

            let mut options = config.render.options();
            options.include_related &= !no_related;
            options.include_asides &= !no_asides;

            let text = format.render(&glossary, &options);
            match output {
                Some(path) => {
                    fs::write(&path, text)?;
                    info!(path = %path.display(), %format, "rendered glossary");
                }
                None => print!("{text}"),
            }
        }

        Commands::Check { input } => {
            let glossary = load_input(input.as_deref())?;
            let resolution = resolve(&glossary);
            check_references(&resolution, config)?;

            let graph = resolution.graph();
            let externals: usize = graph
                .ids()
                .map(|id| graph.externals(id).map_or(0, |externals| externals.len()))
                .sum();
            eprintln_colored(
                Color::Green,
                &format!(
                    "ok: {} terms, {} links, {} external references, {} dangling",
                    glossary.len(),
                    graph.edges().count(),
                    externals,
                    resolution.dangling().len()
                ),
            );
        }

        Commands::Lookup {
            term,
            format,
            input,
        } => {
            let format = parse_format(format.as_deref(), config)?;
            let glossary = load_input(input.as_deref())?;
            let found = glossary.lookup(&term)?;
            print!("{}", format.render_term(found, &config.render.options()));

            if format == Format::Plain {
                let resolution = resolve(&glossary);
                let referrers = resolution.graph().referrers(found.id())?;
                if !referrers.is_empty() {
                    println!("    Referenced by: {}", referrers.join(", "));
                }
            }
        }

        Commands::Graph { dot, input } => {
            let glossary = load_input(input.as_deref())?;
            let resolution = resolve(&glossary);
            check_references(&resolution, config)?;

            let graph = resolution.graph();
            if dot {
                print!("{}", graph.to_dot());
            } else {
                for id in graph.ids() {
                    println!("{id} -> {}", graph.related(id)?.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = GlossaryConfig::from_env().unwrap_or_else(|e| {
        error!("Failed to load configuration: {e}");
        info!("Using default configuration");
        GlossaryConfig::default()
    });

    // Only commands that fall back to the configured format depend on it,
    // and those fail in `parse_format`.
    if let Err(e) = config.validate() {
        warn!("Configuration validation failed: {e}");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln_colored(Color::Red, &format!("error: {e}"));
            ExitCode::FAILURE
        }
    }
}
