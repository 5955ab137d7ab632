//! LJSpeech metadata batch driver
//!
//! Reads pipe-delimited `metadata.csv` rows, encodes the normalized
//! transcript of each row, and keeps only fully encoded rows for training.
//! Per-row problems never abort the batch; they only count as failures.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::Serialize;
use tracing::{info, warn};

use crate::encoder::SentenceEncoder;

/// Fraction of passing rows routed to the validation split.
pub const DEFAULT_VALIDATION_FRACTION: f64 = 0.1;

const FIELD_DELIMITER: char = '|';

/// One row of LJSpeech `metadata.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataRow {
    pub id: String,
    pub original: String,
    pub normalized: String,
}

impl MetadataRow {
    /// Parses a row, returning `None` unless it has exactly three fields.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        match fields.as_slice() {
            [id, original, normalized] => Some(Self {
                id: id.to_string(),
                original: original.to_string(),
                normalized: normalized.to_string(),
            }),
            _ => None,
        }
    }

    /// Audio path expected by the training loader.
    pub fn wav_path(&self, wav_directory: Option<&Path>) -> String {
        let mut wav = self.id.clone();
        if !wav.ends_with(".wav") {
            wav.push_str(".wav");
        }
        match wav_directory {
            Some(dir) => dir.join(wav).to_string_lossy().into_owned(),
            None => wav,
        }
    }
}

/// Reads the normalized transcript column of every well-formed row.
pub fn read_sentences<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut sentences = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read metadata row")?;
        if let Some(row) = MetadataRow::parse(&line) {
            sentences.push(row.normalized);
        }
    }
    Ok(sentences)
}

#[derive(Debug, Clone)]
pub struct PrepareOptions<'a> {
    pub wav_directory: Option<&'a Path>,
    pub validation_fraction: f64,
}

impl Default for PrepareOptions<'_> {
    fn default() -> Self {
        Self {
            wav_directory: None,
            validation_fraction: DEFAULT_VALIDATION_FRACTION,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PrepareSummary {
    pub success: usize,
    pub failure: usize,
    pub training: usize,
    pub validation: usize,
}

impl PrepareSummary {
    pub fn validation_percent(&self) -> f64 {
        let written = self.training + self.validation;
        if written == 0 {
            0.0
        } else {
            self.validation as f64 / written as f64
        }
    }
}

impl Display for PrepareSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Success count: {}", self.success)?;
        writeln!(f, "Failure count: {}", self.failure)?;
        writeln!(f, "Training count: {}", self.training)?;
        writeln!(f, "Validation count: {}", self.validation)?;
        write!(f, "Validation percent: {:.4}", self.validation_percent())
    }
}

/// Filters metadata rows into training and validation files.
///
/// Rows that do not encode completely are dropped. Each kept row is written
/// as `wav|normalized`.
pub fn prepare<R, T, V, G>(
    encoder: &SentenceEncoder,
    metadata: R,
    mut training: T,
    mut validation: V,
    options: &PrepareOptions<'_>,
    rng: &mut G,
) -> Result<PrepareSummary>
where
    R: BufRead,
    T: Write,
    V: Write,
    G: Rng + ?Sized,
{
    let mut summary = PrepareSummary::default();

    for (idx, line) in metadata.lines().enumerate() {
        let line = line.context("failed to read metadata row")?;
        let Some(row) = MetadataRow::parse(&line) else {
            warn!(row = idx + 1, content = %line, "problem row");
            summary.failure += 1;
            continue;
        };

        let passes = match encoder.encode(&row.normalized) {
            Ok(encoded) => encoded.is_fully_encoded(),
            Err(err) => {
                warn!(row = idx + 1, id = %row.id, error = %err, "row failed to encode");
                false
            }
        };
        if !passes {
            summary.failure += 1;
            continue;
        }

        let record = format!(
            "{}{FIELD_DELIMITER}{}",
            row.wav_path(options.wav_directory),
            row.normalized
        );
        if rng.gen::<f64>() < options.validation_fraction {
            writeln!(validation, "{record}").context("failed to write validation row")?;
            summary.validation += 1;
        } else {
            writeln!(training, "{record}").context("failed to write training row")?;
            summary.training += 1;
        }
        summary.success += 1;
    }

    training.flush().context("failed to flush training output")?;
    validation.flush().context("failed to flush validation output")?;
    info!(
        success = summary.success,
        failure = summary.failure,
        training = summary.training,
        validation = summary.validation,
        "training data prepared"
    );
    Ok(summary)
}

/// How well a batch of sentences encodes, with the raw tokens left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub fully_encoded: usize,
    pub partial: usize,
    /// Sentences aborted by an unmapped symbol.
    pub errors: usize,
    /// Unresolved raw tokens with occurrence counts, rarest first.
    pub unresolved: Vec<(String, usize)>,
}

pub fn coverage_report<I, S>(encoder: &SentenceEncoder, sentences: I) -> CoverageReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = CoverageReport::default();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for sentence in sentences {
        match encoder.encode(sentence.as_ref()) {
            Ok(encoded) if encoded.is_fully_encoded() => report.fully_encoded += 1,
            Ok(encoded) => {
                report.partial += 1;
                for raw in encoded.unresolved() {
                    *counts.entry(raw.to_string()).or_default() += 1;
                }
            }
            Err(err) => {
                warn!(error = %err, "sentence failed to encode");
                report.errors += 1;
            }
        }
    }

    let mut unresolved: Vec<(String, usize)> = counts.into_iter().collect();
    unresolved.sort_by(|(a_token, a_count), (b_token, b_count)| {
        a_count.cmp(b_count).then_with(|| a_token.cmp(b_token))
    });
    report.unresolved = unresolved;
    report
}
