//! cmark-spans CLI - CommonMark spec test cases to tokenizer fixtures

mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmark_spans_core::{munge_all, parse_test_cases, SpanConfig};
use colored::*;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cmark-spans")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Turn CommonMark spec test cases into tokenizer span fixtures",
    long_about = "Reads the CommonMark spec test cases (with sourcepos-annotated XML from the \
                  reference parser) and prints one fixture per example: the normalized markdown \
                  and the byte-offset spans a markdown tokenizer is expected to produce."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Test case file
    #[arg(default_value = "commonmark_0.3_testcases.json")]
    input: PathBuf,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write fixtures to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Single-line JSON instead of pretty printing
    #[arg(long)]
    compact: bool,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config file
    Init {
        /// Output path for config
        #[arg(default_value = "cmark-spans.toml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Init { output }) => init_command(output),
        None => generate_command(&cli),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // RUST_LOG wins when set; stdout carries the fixtures
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate_command(cli: &Cli) -> anyhow::Result<()> {
    let config = SpanConfig::load_or_default(cli.config.as_deref())?;

    let content = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let cases = parse_test_cases(&content).with_context(|| format!("in {}", cli.input.display()))?;
    tracing::info!(cases = cases.len(), input = %cli.input.display(), "loaded test cases");

    let records = munge_all(&cases, &config)?;
    let skipped = records.iter().filter(|r| r.skip_reason.is_some()).count();
    tracing::info!(records = records.len(), skipped, "generated fixtures");

    let json = output::render(&records, cli.compact)?;
    match &cli.output {
        Some(path) => write_output(path, &json)?,
        None => println!("{}", json),
    }
    Ok(())
}

fn write_output(path: &Path, json: &str) -> anyhow::Result<()> {
    std::fs::write(path, format!("{}\n", json))
        .with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!("{} Wrote fixtures: {}", "✓".green().bold(), path.display());
    Ok(())
}

fn init_command(output: &Path) -> anyhow::Result<()> {
    let default_config = SpanConfig::default();
    let toml_content = toml::to_string_pretty(&default_config)?;

    std::fs::write(output, toml_content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(())
}
