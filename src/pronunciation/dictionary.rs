use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, trace};

use crate::pronunciation::{DictionaryError, Result};

/// Ordered phoneme symbol names for one word.
pub type Polyphone = Vec<String>;

static COMMENT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^;;;\s+").unwrap_or_else(|err| panic!("invalid comment pattern: {err}"))
});

static ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([\w\-().']+)\s+(\S.*)$")
        .unwrap_or_else(|err| panic!("invalid entry pattern: {err}"))
});

/// Word to pronunciation mapping loaded from CMU-style lexicon data.
///
/// Keys are uppercased. A word appearing on several lines keeps only the
/// pronunciation read last.
#[derive(Debug, Clone, Default)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Polyphone>,
}

impl PronunciationDictionary {
    /// Reads and parses a lexicon file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        // CMUdict ships a handful of Latin-1 bytes; those lines fail to parse and are skipped.
        let text = String::from_utf8_lossy(&bytes);
        let (dictionary, skipped) = Self::parse(&text);
        info!(
            path = %path.display(),
            entries = dictionary.len(),
            skipped,
            "pronunciation dictionary loaded"
        );
        Ok(dictionary)
    }

    /// Parses lexicon text held in memory. Malformed lines are skipped.
    pub fn from_lexicon(data: &str) -> Self {
        Self::parse(data).0
    }

    fn parse(data: &str) -> (Self, usize) {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for (idx, line) in data.lines().enumerate() {
            let trimmed = line.trim();
            if COMMENT_LINE.is_match(trimmed) {
                continue;
            }
            match parse_entry(trimmed) {
                Some((word, polyphone)) => {
                    entries.insert(word, polyphone);
                }
                None => {
                    if !trimmed.is_empty() {
                        trace!(line = idx + 1, content = trimmed, "skipping lexicon line");
                    }
                    skipped += 1;
                }
            }
        }

        (Self { entries }, skipped)
    }

    /// Exact, case-insensitive lookup.
    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.entries
            .get(&word.to_uppercase())
            .map(|polyphone| polyphone.as_slice())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Adds or replaces a single entry.
    pub fn insert<I, S>(&mut self, word: &str, phonemes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            word.to_uppercase(),
            phonemes.into_iter().map(Into::into).collect(),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(line: &str) -> Option<(String, Polyphone)> {
    let captures = ENTRY_LINE.captures(line)?;
    let word = captures.get(1)?.as_str();
    let phonemes: Polyphone = captures
        .get(2)?
        .as_str()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if word.is_empty() || phonemes.is_empty() {
        return None;
    }
    Some((word.to_uppercase(), phonemes))
}
