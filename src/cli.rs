use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{Args, Parser, Subcommand};

use crate::dataset::DEFAULT_VALIDATION_FRACTION;

#[derive(Parser, Debug)]
#[command(
    name = "arpacode",
    version,
    about = "Encode sentences into ARPAbet symbol codes for speech-synthesis training"
)]
pub struct Cli {
    /// Pronunciation dictionary (CMUdict format). Defaults to $ARPACODE_DICTIONARY
    /// or assets/cmudict/cmudict-0.7b next to the binary.
    #[arg(long, global = true, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the symbol codes of each sentence.
    Encode(EncodeArgs),
    /// Print the normalized token sequence of a sentence.
    Tokens(TokensArgs),
    /// Split LJSpeech metadata into training and validation files.
    Prepare(PrepareArgs),
    /// Report which tokens fail to encode across LJSpeech metadata.
    Report(ReportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EncodeArgs {
    /// Sentences to encode.
    #[arg(value_name = "TEXT", required = true)]
    pub sentences: Vec<String>,
    /// Emit one JSON array per sentence.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TokensArgs {
    #[arg(value_name = "TEXT")]
    pub sentence: String,
}

#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    /// LJSpeech metadata.csv
    #[arg(long, value_name = "CSV")]
    pub metadata: PathBuf,
    /// Output file for training rows.
    #[arg(long, value_name = "PATH")]
    pub training: PathBuf,
    /// Output file for validation rows.
    #[arg(long, value_name = "PATH")]
    pub validation: PathBuf,
    /// Directory prefixed to every wav file name.
    #[arg(long = "wav-dir", value_name = "DIR")]
    pub wav_dir: Option<PathBuf>,
    /// Probability that a passing row lands in the validation split.
    #[arg(long = "validation-fraction", default_value_t = DEFAULT_VALIDATION_FRACTION)]
    pub validation_fraction: f64,
    /// Seed for a reproducible split.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl PrepareArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.validation_fraction),
            "validation fraction must be within 0.0..=1.0, got {}",
            self.validation_fraction
        );
        ensure!(
            self.training != self.validation,
            "training and validation outputs must differ"
        );
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// LJSpeech metadata.csv
    #[arg(long, value_name = "CSV")]
    pub metadata: PathBuf,
}
