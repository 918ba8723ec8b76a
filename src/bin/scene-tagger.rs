// Copyright 2025 Cowboy AI, LLC.

//! Interactive scene tagger
//!
//! Usage:
//!   scene-tagger                                   # prompt for a description
//!   scene-tagger "misty forest at dusk"            # tag the argument
//!   scene-tagger --output out/tags.json "..."      # choose the output file
//!   scene-tagger --schema                          # print the output JSON Schema
//!   scene-tagger --import-wordnet DICT > wn.json   # convert a WordNet dict for --thesaurus
//!
//! Logging goes to stderr and is controlled by RUST_LOG (default: warn).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use scene_tagger::{persistence, StandardExtractor, TaggerConfig, Thesaurus};

#[derive(Parser)]
#[command(name = "scene-tagger")]
#[command(about = "Extract PCG scene tags from a free-text description")]
struct Args {
    /// Scene description; read from stdin when omitted
    prompt: Option<String>,

    /// JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Where to write the tags
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// External thesaurus JSON
    #[arg(short = 't', long)]
    thesaurus: Option<PathBuf>,

    /// Match only the words of the prompt, without synonyms
    #[arg(long)]
    no_synonyms: bool,

    /// Print the JSON Schema of the output and exit
    #[arg(long)]
    schema: bool,

    /// Convert a WordNet dictionary directory to thesaurus JSON on stdout and exit
    #[arg(long, value_name = "DICT_DIR")]
    import_wordnet: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<TaggerConfig> {
    let base = match &args.config {
        Some(path) => TaggerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TaggerConfig::default(),
    };
    let mut config = base.with_env().context("reading SCENE_TAGGER_* environment")?;
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(thesaurus) = &args.thesaurus {
        config.thesaurus_path = Some(thesaurus.clone());
    }
    if args.no_synonyms {
        config.expand_synonyms = false;
    }
    config.validate()?;
    Ok(config)
}

fn read_prompt() -> Result<String> {
    print!("Enter scene description:\n> ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading scene description from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.schema {
        let schema = persistence::output_schema()?;
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    if let Some(dict) = &args.import_wordnet {
        let thesaurus = Thesaurus::from_wordnet_dict(dict)
            .with_context(|| format!("importing WordNet from {}", dict.display()))?;
        println!("{}", thesaurus.to_json_pretty()?);
        return Ok(());
    }

    let config = load_config(&args)?;
    let extractor = StandardExtractor::from_config(&config).context("initializing extractor")?;

    let prompt = match args.prompt {
        Some(p) => p,
        None => read_prompt()?,
    };

    let tags = extractor.extract(&prompt).context("extracting scene tags")?;

    println!("\nExtracted Semantic Tags:");
    println!("{}", persistence::to_json_pretty(&tags)?);

    let saved = persistence::write_tags(&config.output_path, &tags)
        .with_context(|| format!("writing {}", config.output_path.display()))?;
    println!("\nSaved to {}", saved.display());
    Ok(())
}
