//! Normalization rules applied to unresolved sentence tokens.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::pronunciation::PronunciationDictionary;
use crate::types::{Punctuation, Token};

/// Abbreviations expected in LJSpeech transcripts, keyed in lowercase.
const KNOWN_ABBREVIATIONS: [(&str, &str); 25] = [
    ("capt.", "captain"),
    ("co.", "company"),
    ("col.", "colonel"),
    ("dr.", "doctor"),
    ("drs.", "doctors"),
    ("esq.", "esquire"),
    ("ft.", "fort"),
    ("gen.", "general"),
    ("hon.", "honorable"),
    ("jr", "junior"),
    ("jr.", "junior"),
    ("lt.", "lieutenant"),
    ("ltd.", "limited"),
    ("maj.", "major"),
    ("mr", "mister"),
    ("mr.", "mister"),
    ("mrs", "misess"),
    ("mrs.", "misess"),
    ("no.", "number"),
    ("rev.", "reverend"),
    ("sgt.", "sergeant"),
    ("st", "saint"),
    ("st.", "saint"),
    ("etc", "etcetera"),
    ("etc.", "etcetera"),
];

static ABBREVIATIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| KNOWN_ABBREVIATIONS.into_iter().collect());

/// Single rewrite applied by one normalization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Exact dictionary match.
    DictionaryLookup,
    /// Expansion of a fixed abbreviation such as `Dr.`.
    KnownAbbreviation,
    /// Detaches one trailing sentence mark.
    PunctuationSplit,
    /// Strips stray quote characters and retries the dictionary.
    QuoteStrip,
    HyphenSplit,
    ColonSplit,
    /// Spelled-out letter sequences such as `U.S.S.R`.
    LetterAbbreviation,
    /// Plural and possessive stems of dictionary words.
    PluralPossessive,
}

/// Fixed pass order. General rules repeat so that tokens produced by a later
/// rule get another chance at them.
pub const NORMALIZATION_ORDER: [Rule; 12] = [
    Rule::DictionaryLookup,
    Rule::KnownAbbreviation,
    Rule::PunctuationSplit,
    Rule::QuoteStrip,
    Rule::DictionaryLookup,
    Rule::HyphenSplit,
    Rule::ColonSplit,
    Rule::LetterAbbreviation,
    Rule::KnownAbbreviation,
    Rule::PunctuationSplit,
    Rule::PluralPossessive,
    Rule::DictionaryLookup,
];

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::DictionaryLookup => "dictionary-lookup",
            Rule::KnownAbbreviation => "known-abbreviation",
            Rule::PunctuationSplit => "punctuation-split",
            Rule::QuoteStrip => "quote-strip",
            Rule::HyphenSplit => "hyphen-split",
            Rule::ColonSplit => "colon-split",
            Rule::LetterAbbreviation => "letter-abbreviation",
            Rule::PluralPossessive => "plural-possessive",
        }
    }

    /// Returns the replacement for `text`, or `None` when the rule does not apply.
    pub fn apply(self, dictionary: &PronunciationDictionary, text: &str) -> Option<Vec<Token>> {
        match self {
            Rule::DictionaryLookup => dictionary_lookup(dictionary, text),
            Rule::KnownAbbreviation => known_abbreviation(dictionary, text),
            Rule::PunctuationSplit => punctuation_split(text),
            Rule::QuoteStrip => Some(quote_strip(dictionary, text)),
            Rule::HyphenSplit => separator_split(dictionary, text, '-'),
            Rule::ColonSplit => separator_split(dictionary, text, ':'),
            Rule::LetterAbbreviation => letter_abbreviation(dictionary, text),
            Rule::PluralPossessive => plural_possessive(dictionary, text),
        }
    }
}

fn lookup_or_unresolved(dictionary: &PronunciationDictionary, text: &str) -> Token {
    match dictionary.get(text) {
        Some(polyphone) => Token::phoneme(polyphone),
        None => Token::unresolved(text),
    }
}

fn dictionary_lookup(dictionary: &PronunciationDictionary, text: &str) -> Option<Vec<Token>> {
    dictionary
        .get(text)
        .map(|polyphone| vec![Token::phoneme(polyphone)])
}

fn known_abbreviation(dictionary: &PronunciationDictionary, text: &str) -> Option<Vec<Token>> {
    let expanded = ABBREVIATIONS.get(text.to_lowercase().as_str())?;
    Some(vec![lookup_or_unresolved(dictionary, expanded)])
}

fn punctuation_split(text: &str) -> Option<Vec<Token>> {
    if text == "--" {
        return Some(vec![Token::Punctuation(Punctuation::Comma)]);
    }
    let last = text.chars().next_back()?;
    let kind = Punctuation::from_trailing_char(last)?;
    let remainder = &text[..text.len() - last.len_utf8()];
    Some(vec![Token::unresolved(remainder), Token::Punctuation(kind)])
}

fn quote_strip(dictionary: &PronunciationDictionary, text: &str) -> Vec<Token> {
    let mut stripped = text;
    if let Some(rest) = strip_any_suffix(stripped, &["',", ",'"]) {
        stripped = rest;
    }
    if let Some(rest) = strip_any_suffix(stripped, &[",\u{201D}", "\u{201D},"]) {
        stripped = rest;
    }
    if let Some(rest) = stripped.strip_suffix('\'') {
        stripped = rest;
    }
    if let Some(rest) = stripped.strip_suffix('\u{2019}') {
        stripped = rest;
    }
    if let Some(rest) = stripped.strip_prefix('\'') {
        stripped = rest;
    }
    if let Some(rest) = stripped.strip_prefix('\u{201C}') {
        stripped = rest;
    }
    vec![lookup_or_unresolved(dictionary, stripped)]
}

fn strip_any_suffix<'a>(text: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes
        .iter()
        .find_map(|suffix| text.strip_suffix(suffix))
}

fn separator_split(
    dictionary: &PronunciationDictionary,
    text: &str,
    separator: char,
) -> Option<Vec<Token>> {
    if !text.contains(separator) {
        return None;
    }
    Some(
        text.split(separator)
            .filter(|segment| !segment.is_empty())
            .map(|segment| lookup_or_unresolved(dictionary, segment))
            .collect(),
    )
}

fn letter_abbreviation(dictionary: &PronunciationDictionary, text: &str) -> Option<Vec<Token>> {
    let segments: Vec<&str> = text.split('.').collect();
    if segments.len() < 2 {
        return None;
    }

    let last = segments.len() - 1;
    let mut tokens = Vec::with_capacity(segments.len() + 1);
    for (idx, letter) in segments.into_iter().enumerate() {
        // "a.b.c." leaves an empty final segment
        if idx == last && letter.is_empty() {
            continue;
        }
        if letter.chars().count() != 1 {
            return None;
        }
        tokens.push(Token::phoneme(dictionary.get(letter)?));
    }
    tokens.push(Token::Space);
    Some(tokens)
}

fn plural_possessive(dictionary: &PronunciationDictionary, text: &str) -> Option<Vec<Token>> {
    // Only the first suffix form that applies is stripped.
    let stem = strip_any_suffix(text, &["'s", "'S"])
        .or_else(|| strip_any_suffix(text, &["s'", "S'"]))
        .or_else(|| strip_any_suffix(text, &["s", "S"]))?;
    dictionary
        .get(stem)
        .map(|polyphone| vec![Token::PluralPhoneme(polyphone.to_vec())])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> PronunciationDictionary {
        PronunciationDictionary::from_lexicon(
            "CAT  K AE1 T\n\
             DOCTOR  D AA1 K T ER0\n\
             WELL  W EH1 L\n\
             KNOWN  N OW1 N\n\
             U  Y UW1\n\
             S  EH1 S\n\
             R  AA1 R\n\
             HELLO  HH AH0 L OW1\n",
        )
    }

    fn phoneme(names: &[&str]) -> Token {
        Token::Phoneme(names.iter().map(|name| name.to_string()).collect())
    }

    #[test]
    fn order_repeats_general_rules() {
        assert_eq!(
            NORMALIZATION_ORDER,
            [
                Rule::DictionaryLookup,
                Rule::KnownAbbreviation,
                Rule::PunctuationSplit,
                Rule::QuoteStrip,
                Rule::DictionaryLookup,
                Rule::HyphenSplit,
                Rule::ColonSplit,
                Rule::LetterAbbreviation,
                Rule::KnownAbbreviation,
                Rule::PunctuationSplit,
                Rule::PluralPossessive,
                Rule::DictionaryLookup,
            ]
        );
    }

    #[test]
    fn dictionary_lookup_matches_any_case() {
        let dict = dictionary();
        assert_eq!(
            Rule::DictionaryLookup.apply(&dict, "Cat"),
            Some(vec![phoneme(&["K", "AE1", "T"])])
        );
        assert_eq!(Rule::DictionaryLookup.apply(&dict, "cat."), None);
    }

    #[test]
    fn abbreviation_expands_through_dictionary() {
        let dict = dictionary();
        assert_eq!(
            Rule::KnownAbbreviation.apply(&dict, "Dr."),
            Some(vec![phoneme(&["D", "AA1", "K", "T", "ER0"])])
        );
        assert_eq!(
            Rule::KnownAbbreviation.apply(&dict, "MR"),
            Some(vec![Token::unresolved("mister")])
        );
        assert_eq!(Rule::KnownAbbreviation.apply(&dict, "prof."), None);
    }

    #[test]
    fn punctuation_split_detaches_one_mark() {
        assert_eq!(
            punctuation_split("sat."),
            Some(vec![
                Token::unresolved("sat"),
                Token::Punctuation(Punctuation::Period)
            ])
        );
        assert_eq!(
            punctuation_split("why?!"),
            Some(vec![
                Token::unresolved("why?"),
                Token::Punctuation(Punctuation::Exclamation)
            ])
        );
        assert_eq!(
            punctuation_split("--"),
            Some(vec![Token::Punctuation(Punctuation::Comma)])
        );
        assert_eq!(
            punctuation_split("x;"),
            Some(vec![
                Token::unresolved("x"),
                Token::Punctuation(Punctuation::Comma)
            ])
        );
        assert_eq!(punctuation_split("plain"), None);
        assert_eq!(punctuation_split(""), None);
    }

    #[test]
    fn quote_strip_handles_curly_and_comma_quotes() {
        let dict = dictionary();
        for quoted in ["'hello'", "\u{201C}hello", "hello',", "hello\u{201D},", "hello\u{2019}"] {
            assert_eq!(
                quote_strip(&dict, quoted),
                vec![phoneme(&["HH", "AH0", "L", "OW1"])],
                "{quoted}"
            );
        }
        assert_eq!(quote_strip(&dict, "'zork'"), vec![Token::unresolved("zork")]);
    }

    #[test]
    fn hyphen_split_resolves_each_segment() {
        let dict = dictionary();
        assert_eq!(
            Rule::HyphenSplit.apply(&dict, "well-known"),
            Some(vec![phoneme(&["W", "EH1", "L"]), phoneme(&["N", "OW1", "N"])])
        );
        assert_eq!(
            Rule::HyphenSplit.apply(&dict, "well--zork"),
            Some(vec![phoneme(&["W", "EH1", "L"]), Token::unresolved("zork")])
        );
        assert_eq!(Rule::HyphenSplit.apply(&dict, "---"), Some(Vec::new()));
        assert_eq!(Rule::HyphenSplit.apply(&dict, "well"), None);
    }

    #[test]
    fn colon_split_matches_hyphen_behaviour() {
        let dict = dictionary();
        assert_eq!(
            Rule::ColonSplit.apply(&dict, "cat:zork"),
            Some(vec![phoneme(&["K", "AE1", "T"]), Token::unresolved("zork")])
        );
        assert_eq!(Rule::ColonSplit.apply(&dict, "cat-zork"), None);
    }

    #[test]
    fn letter_abbreviation_spells_letters_then_space() {
        let dict = dictionary();
        let expected = vec![
            phoneme(&["Y", "UW1"]),
            phoneme(&["EH1", "S"]),
            phoneme(&["EH1", "S"]),
            phoneme(&["AA1", "R"]),
            Token::Space,
        ];
        assert_eq!(Rule::LetterAbbreviation.apply(&dict, "U.S.S.R"), Some(expected.clone()));
        assert_eq!(Rule::LetterAbbreviation.apply(&dict, "u.s.s.r."), Some(expected));
    }

    #[test]
    fn letter_abbreviation_is_all_or_nothing() {
        let dict = dictionary();
        assert_eq!(Rule::LetterAbbreviation.apply(&dict, "U.S.X"), None);
        assert_eq!(Rule::LetterAbbreviation.apply(&dict, "U.SS"), None);
        assert_eq!(Rule::LetterAbbreviation.apply(&dict, "U..S"), None);
        assert_eq!(Rule::LetterAbbreviation.apply(&dict, "US"), None);
    }

    #[test]
    fn plural_possessive_strips_suffixes() {
        let dict = dictionary();
        let cat = Some(vec![Token::PluralPhoneme(vec![
            "K".into(),
            "AE1".into(),
            "T".into(),
        ])]);
        assert_eq!(Rule::PluralPossessive.apply(&dict, "cats"), cat);
        assert_eq!(Rule::PluralPossessive.apply(&dict, "cat's"), cat);
        assert_eq!(Rule::PluralPossessive.apply(&dict, "CATS'"), cat);
        assert_eq!(Rule::PluralPossessive.apply(&dict, "dogs"), None);
        assert_eq!(Rule::PluralPossessive.apply(&dict, "cat"), None);
    }

    #[test]
    fn plural_possessive_tries_only_first_matching_suffix() {
        let dict = PronunciationDictionary::from_lexicon("PARENTS'  P EH1 R AH0 N T S\n");
        assert_eq!(Rule::PluralPossessive.apply(&dict, "parents's"), None);
    }
}
