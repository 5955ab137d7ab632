use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use arpacode::cli::{Cli, Command, EncodeArgs, PrepareArgs, ReportArgs, TokensArgs};
use arpacode::config::AppConfig;
use arpacode::dataset::{self, PrepareOptions};
use arpacode::{PronunciationDictionary, SentenceEncoder, SymbolTable};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::from_override(cli.dictionary.clone())?;
    let dictionary = PronunciationDictionary::load(&config.dictionary_path)
        .context("Failed to load pronunciation dictionary")?;
    let encoder = SentenceEncoder::new(dictionary, SymbolTable::arpabet());

    match &cli.command {
        Command::Encode(args) => handle_encode(&encoder, args),
        Command::Tokens(args) => handle_tokens(&encoder, args),
        Command::Prepare(args) => handle_prepare(&encoder, args),
        Command::Report(args) => handle_report(&encoder, args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn handle_encode(encoder: &SentenceEncoder, args: &EncodeArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for sentence in &args.sentences {
        let encoded = encoder
            .encode(sentence)
            .with_context(|| format!("Failed to encode {:?}", sentence))?;
        if args.json {
            serde_json::to_writer(&mut out, &encoded).context("Failed to serialize encoding")?;
            writeln!(out)?;
        } else {
            let rendered: Vec<String> = encoded.elements.iter().map(ToString::to_string).collect();
            writeln!(out, "{}", rendered.join(" "))?;
        }
    }
    Ok(())
}

fn handle_tokens(encoder: &SentenceEncoder, args: &TokensArgs) -> Result<()> {
    for token in encoder.sentence_to_tokens(&args.sentence) {
        println!("{token}");
    }
    Ok(())
}

fn handle_prepare(encoder: &SentenceEncoder, args: &PrepareArgs) -> Result<()> {
    args.validate()?;
    let metadata = File::open(&args.metadata)
        .with_context(|| format!("Failed to open metadata {:?}", args.metadata))?;
    let training = File::create(&args.training)
        .with_context(|| format!("Failed to create training output {:?}", args.training))?;
    let validation = File::create(&args.validation)
        .with_context(|| format!("Failed to create validation output {:?}", args.validation))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let options = PrepareOptions {
        wav_directory: args.wav_dir.as_deref(),
        validation_fraction: args.validation_fraction,
    };
    let summary = dataset::prepare(
        encoder,
        BufReader::new(metadata),
        BufWriter::new(training),
        BufWriter::new(validation),
        &options,
        &mut rng,
    )?;
    println!("{summary}");
    Ok(())
}

fn handle_report(encoder: &SentenceEncoder, args: &ReportArgs) -> Result<()> {
    let metadata = File::open(&args.metadata)
        .with_context(|| format!("Failed to open metadata {:?}", args.metadata))?;
    let sentences = dataset::read_sentences(BufReader::new(metadata))?;
    let report = dataset::coverage_report(encoder, &sentences);

    println!();
    for (token, count) in &report.unresolved {
        println!("{token}: {count}");
    }
    println!();
    println!("Good: {}", report.fully_encoded);
    println!("Bad: {}", report.partial + report.errors);
    println!("Unknown Symbols: {}", report.unresolved.len());
    Ok(())
}
