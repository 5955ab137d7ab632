//! Core types for the sentence encoding pipeline

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Punctuation kinds that survive normalization as their own symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Period,
    Comma,
    Question,
    Exclamation,
}

impl Punctuation {
    /// Symbol table name for this punctuation kind
    pub fn symbol_name(self) -> &'static str {
        match self {
            Punctuation::Period => "Period",
            Punctuation::Comma => "Comma",
            Punctuation::Question => "Question",
            Punctuation::Exclamation => "Exclamation",
        }
    }

    /// Maps a trailing sentence mark to its kind. Colons and semicolons read as commas.
    pub fn from_trailing_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Punctuation::Period),
            ',' | ';' | ':' => Some(Punctuation::Comma),
            '?' => Some(Punctuation::Question),
            '!' => Some(Punctuation::Exclamation),
            _ => None,
        }
    }
}

/// A single element of a sentence token sequence
///
/// Only `Unresolved` tokens are handed to normalization rules; every other
/// variant is terminal and encodes on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start,
    End,
    Space,
    Punctuation(Punctuation),
    /// Pronunciation taken verbatim from the dictionary
    Phoneme(Vec<String>),
    /// Stem pronunciation; encodes with the plural marker appended
    PluralPhoneme(Vec<String>),
    /// Raw text not yet classified
    Unresolved(String),
}

impl Token {
    pub fn unresolved(text: impl Into<String>) -> Self {
        Token::Unresolved(text.into())
    }

    pub fn phoneme(polyphone: &[String]) -> Self {
        Token::Phoneme(polyphone.to_vec())
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Token::Unresolved(_))
    }

    pub fn unresolved_text(&self) -> Option<&str> {
        match self {
            Token::Unresolved(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Start => write!(f, "Start"),
            Token::End => write!(f, "End"),
            Token::Space => write!(f, "Space"),
            Token::Punctuation(kind) => write!(f, "Punctuation({})", kind.symbol_name()),
            Token::Phoneme(polyphone) => write!(f, "Phoneme([{}])", polyphone.join(", ")),
            Token::PluralPhoneme(polyphone) => {
                write!(f, "PluralPhoneme([{}]-s)", polyphone.join(", "))
            }
            Token::Unresolved(text) => write!(f, "Unresolved({text})"),
        }
    }
}

/// One element of an encoded sentence: a symbol code, or raw text left over
/// when normalization could not resolve a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EncodedElement {
    Code(u32),
    Raw(String),
}

impl EncodedElement {
    pub fn as_code(&self) -> Option<u32> {
        match self {
            EncodedElement::Code(code) => Some(*code),
            EncodedElement::Raw(_) => None,
        }
    }
}

impl Display for EncodedElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EncodedElement::Code(code) => write!(f, "{code}"),
            EncodedElement::Raw(text) => write!(f, "{text:?}"),
        }
    }
}

/// Output of encoding one sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedSentence {
    pub elements: Vec<EncodedElement>,
}

impl EncodedSentence {
    /// True when every element is a symbol code
    pub fn is_fully_encoded(&self) -> bool {
        self.elements
            .iter()
            .all(|element| matches!(element, EncodedElement::Code(_)))
    }

    /// All codes, or `None` when the sentence is only partially encoded
    pub fn codes(&self) -> Option<Vec<u32>> {
        self.elements.iter().map(EncodedElement::as_code).collect()
    }

    /// Raw text of every element that could not be resolved
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            EncodedElement::Raw(text) => Some(text.as_str()),
            EncodedElement::Code(_) => None,
        })
    }
}
