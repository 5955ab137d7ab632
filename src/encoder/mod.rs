//! Sentence encoder - tokenize, normalize, then map tokens to symbol codes
//!
//! Built once from a loaded dictionary and a symbol table; afterwards it is
//! read-only, so one encoder can serve many threads.

pub mod tokenize;

use thiserror::Error;

use crate::normalize::normalize;
use crate::pronunciation::PronunciationDictionary;
use crate::symbols::{self, SymbolTable, PLURAL_MARKER};
use crate::types::{EncodedElement, EncodedSentence, Token};

pub use tokenize::tokenize;

/// Fatal failure while encoding one sentence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("symbol \"{symbol}\" is not in the symbol table")]
    UnmappedSymbol { symbol: String },
}

pub type Result<T> = std::result::Result<T, EncodeError>;

#[derive(Debug, Clone)]
pub struct SentenceEncoder {
    dictionary: PronunciationDictionary,
    symbols: SymbolTable,
}

impl SentenceEncoder {
    pub fn new(dictionary: PronunciationDictionary, symbols: SymbolTable) -> Self {
        Self {
            dictionary,
            symbols,
        }
    }

    pub fn dictionary(&self) -> &PronunciationDictionary {
        &self.dictionary
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Splits raw text into the initial token sequence.
    pub fn tokenize(&self, sentence: &str) -> Vec<Token> {
        tokenize(sentence)
    }

    /// Runs the ordered normalization passes over `tokens`.
    pub fn normalize(&self, tokens: Vec<Token>) -> Vec<Token> {
        normalize(&self.dictionary, tokens)
    }

    /// Tokenizes and normalizes, leaving tokens unencoded.
    pub fn sentence_to_tokens(&self, sentence: &str) -> Vec<Token> {
        self.normalize(self.tokenize(sentence))
    }

    /// Encodes a sentence. Tokens no rule could resolve come back as
    /// [`EncodedElement::Raw`]; callers treat those sentences as partial.
    pub fn encode(&self, sentence: &str) -> Result<EncodedSentence> {
        let mut elements = Vec::new();
        for token in self.sentence_to_tokens(sentence) {
            self.encode_token(token, &mut elements)?;
        }
        Ok(EncodedSentence { elements })
    }

    fn encode_token(&self, token: Token, out: &mut Vec<EncodedElement>) -> Result<()> {
        match token {
            Token::Start => out.push(self.code(symbols::START)?),
            Token::End => out.push(self.code(symbols::END)?),
            Token::Space => out.push(self.code(symbols::SPACE)?),
            Token::Punctuation(kind) => out.push(self.code(kind.symbol_name())?),
            Token::Phoneme(polyphone) => {
                for phone in &polyphone {
                    out.push(self.code(phone)?);
                }
            }
            Token::PluralPhoneme(polyphone) => {
                for phone in &polyphone {
                    out.push(self.code(phone)?);
                }
                out.push(self.code(PLURAL_MARKER)?);
            }
            Token::Unresolved(text) => out.push(EncodedElement::Raw(text)),
        }
        Ok(())
    }

    fn code(&self, name: &str) -> Result<EncodedElement> {
        self.symbols
            .code(name)
            .map(EncodedElement::Code)
            .ok_or_else(|| EncodeError::UnmappedSymbol {
                symbol: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> SentenceEncoder {
        let dictionary = PronunciationDictionary::from_lexicon(
            "THE  DH AH0\nCAT  K AE1 T\nODD  AA1 D Q\n",
        );
        SentenceEncoder::new(dictionary, SymbolTable::arpabet())
    }

    #[test]
    fn plural_phoneme_appends_marker() {
        let encoder = encoder();
        let encoded = encoder.encode("cats").unwrap();
        let table = encoder.symbols();
        let expected: Vec<u32> = [symbols::START, "K", "AE1", "T", PLURAL_MARKER, symbols::END]
            .iter()
            .map(|name| table.code(name).unwrap())
            .collect();
        assert_eq!(encoded.codes(), Some(expected));
    }

    #[test]
    fn unmapped_phoneme_aborts_sentence() {
        let error = encoder().encode("the odd").unwrap_err();
        assert_eq!(
            error,
            EncodeError::UnmappedSymbol {
                symbol: "Q".to_string()
            }
        );
    }

    #[test]
    fn sentence_to_tokens_shows_rule_output() {
        let tokens = encoder().sentence_to_tokens("The cat.");
        assert_eq!(
            tokens,
            vec![
                Token::Start,
                Token::Phoneme(vec!["DH".into(), "AH0".into()]),
                Token::Space,
                Token::Phoneme(vec!["K".into(), "AE1".into(), "T".into()]),
                Token::Punctuation(crate::types::Punctuation::Period),
                Token::End,
            ]
        );
    }
}
