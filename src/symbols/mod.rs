//! Fixed mapping from symbol names to integer codes.
//!
//! The universe is closed: control markers, punctuation names and the ARPAbet
//! phoneme inventory (with CMUdict lexical stress variants). Codes are dense
//! and assigned in declaration order starting at zero.

use std::collections::HashMap;

pub const PAD: &str = "Pad";
pub const START: &str = "StartToken";
pub const END: &str = "EndToken";
pub const SPACE: &str = "Space";

/// Phoneme appended after a plural or possessive stem.
pub const PLURAL_MARKER: &str = "Z";

const CONTROL: [&str; 4] = [PAD, START, END, SPACE];

const PUNCTUATION: [&str; 4] = ["Period", "Comma", "Question", "Exclamation"];

const VOWELS: [&str; 15] = [
    "AA", "AE", "AH", "AO", "AW", "AY", "EH", "ER", "EY", "IH", "IY", "OW", "OY", "UH", "UW",
];

const CONSONANTS: [&str; 24] = [
    "B", "CH", "D", "DH", "F", "G", "HH", "JH", "K", "L", "M", "N", "NG", "P", "R", "S", "SH",
    "T", "TH", "V", "W", "Y", "Z", "ZH",
];

const STRESS_MARKS: [&str; 3] = ["0", "1", "2"];

/// Read-only lookup between symbol names and their codes.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: Vec<String>,
    codes: HashMap<String, u32>,
}

impl SymbolTable {
    /// Builds the standard table covering CMUdict 0.7b phoneme data.
    pub fn arpabet() -> Self {
        let mut names: Vec<String> = CONTROL
            .iter()
            .chain(PUNCTUATION.iter())
            .map(|name| name.to_string())
            .collect();

        for vowel in VOWELS {
            names.push(vowel.to_string());
            names.extend(STRESS_MARKS.iter().map(|mark| format!("{vowel}{mark}")));
        }
        names.extend(CONSONANTS.iter().map(|name| name.to_string()));

        Self::from_names(names)
    }

    fn from_names(names: Vec<String>) -> Self {
        let codes = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx as u32))
            .collect();
        Self { names, codes }
    }

    pub fn code(&self, name: &str) -> Option<u32> {
        self.codes.get(name).copied()
    }

    pub fn name(&self, code: u32) -> Option<&str> {
        self.names.get(code as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates `(name, code)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx as u32))
    }
}
