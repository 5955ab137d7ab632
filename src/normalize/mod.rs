//! Token rewriting - ordered normalization passes over a sentence
//!
//! Each pass hands every `Unresolved` token to one rule and splices the
//! rule's replacement into a fresh output sequence:
//! - `None` keeps the token as is
//! - an empty replacement deletes it
//! - one token replaces it
//! - several tokens expand it in order
//!
//! Replacements are never revisited within the same pass, even when they are
//! themselves `Unresolved`. Later passes pick them up.

pub mod rules;

use tracing::debug;

use crate::pronunciation::PronunciationDictionary;
use crate::types::Token;

pub use rules::{Rule, NORMALIZATION_ORDER};

/// Result of a single rewrite pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub tokens: Vec<Token>,
    /// Whether any token was replaced, expanded or deleted
    pub changed: bool,
}

/// Applies `rule` once to every `Unresolved` token of `tokens`.
pub fn rewrite<F>(tokens: Vec<Token>, mut rule: F) -> Rewritten
where
    F: FnMut(&str) -> Option<Vec<Token>>,
{
    let mut output = Vec::with_capacity(tokens.len());
    let mut changed = false;

    for token in tokens {
        match token {
            Token::Unresolved(text) => match rule(&text) {
                Some(replacement) => {
                    changed = true;
                    output.extend(replacement);
                }
                None => output.push(Token::Unresolved(text)),
            },
            terminal => output.push(terminal),
        }
    }

    Rewritten {
        tokens: output,
        changed,
    }
}

/// Runs every rule of [`NORMALIZATION_ORDER`] once, in order.
pub fn normalize(dictionary: &PronunciationDictionary, tokens: Vec<Token>) -> Vec<Token> {
    NORMALIZATION_ORDER
        .iter()
        .enumerate()
        .fold(tokens, |tokens, (step, rule)| {
            let pass = rewrite(tokens, |text| rule.apply(dictionary, text));
            if pass.changed {
                debug!(step = step + 1, rule = rule.name(), "normalization pass rewrote tokens");
            }
            pass.tokens
        })
}
