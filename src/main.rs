//! voiceover main entry point
//!
//! Reads narration text from the command line, a file or stdin, runs it
//! through the speech fallback chain and prints the path that was written.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::io;
use std::path::PathBuf;
use std::process;
use voiceover::config::Config;
use voiceover::script::narration_text;
use voiceover::speech::{create_chain, synthesize_text};
use voiceover::VoiceoverError;

#[derive(Parser, Debug)]
#[command(name = "voiceover", version, about = "Synthesize narration audio with a TTS fallback chain")]
struct Cli {
    /// Text to speak (reads --file or stdin when omitted)
    text: Vec<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Output audio path; the extension picks the format (default mp3)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat the input as a markdown transcript and strip formatting and cues
    #[arg(short, long)]
    markdown: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Config file (default ~/.voiceover.cfg)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    if cli.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
        info!("voiceover version {} starting (debug mode)", voiceover::VERSION);
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Warn)
            .parse_default_env()
            .init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let text = read_input(&cli)?;
    let text = if cli.markdown {
        narration_text(&text)
    } else {
        text
    };
    if text.trim().is_empty() {
        return Err(VoiceoverError::EmptyInput.into());
    }
    debug!("Input is {} chars", text.len());

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    info!("Config loaded from {}", config.path().display());

    let chain = create_chain(&config);
    info!("Backends: {}", chain.backend_names().join(" -> "));

    let outcome = synthesize_text(&chain, &text, cli.output.as_deref())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.path.display());
    }

    Ok(())
}

fn read_input(cli: &Cli) -> Result<String> {
    if !cli.text.is_empty() {
        return Ok(cli.text.join(" "));
    }

    match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => io::read_to_string(io::stdin()).context("Failed to read stdin"),
    }
}
