#![allow(dead_code)]

use std::io::Write;

use arpacode::{PronunciationDictionary, SentenceEncoder, SymbolTable};
use tempfile::NamedTempFile;

pub const LEXICON: &str = "\
;;; # Test lexicon in CMUdict layout
;;; # Comments need whitespace after the marker
THE  DH AH0
CAT  K AE1 T
SAT  S AE1 T
DOCTOR  D AA1 K T ER0
WELL  W EH1 L
KNOWN  N OW1 N
U  Y UW1
S  EH1 S
R  AA1 R
HELLO  HH AH0 L OW1
MISTER  M IH1 S T ER0
";

pub fn lexicon_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp lexicon");
    file.write_all(contents.as_bytes()).expect("write temp lexicon");
    file.flush().expect("flush temp lexicon");
    file
}

pub fn encoder() -> SentenceEncoder {
    let file = lexicon_file(LEXICON);
    let dictionary = PronunciationDictionary::load(file.path()).expect("load lexicon");
    SentenceEncoder::new(dictionary, SymbolTable::arpabet())
}

pub fn codes(encoder: &SentenceEncoder, names: &[&str]) -> Vec<u32> {
    names
        .iter()
        .map(|name| {
            encoder
                .symbols()
                .code(name)
                .unwrap_or_else(|| panic!("no code for {name}"))
        })
        .collect()
}
