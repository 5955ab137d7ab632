use crate::types::Token;

/// Characters dropped from every piece before classification.
const STRIPPED_CHARS: [char; 3] = ['"', '(', ')'];

/// Literal fixes for irregular spellings in LJSpeech transcripts. Acronyms are
/// rewritten into dotted letters so the letter-abbreviation rule spells them.
const SUBSTITUTIONS: [(&str, &str); 9] = [
    ("USSR", "U.S.S.R"),
    ("PRS", "P.R.S."),
    ("FPCC", "F.P.C.C."),
    ("WDSU", "W.D.S.U"),
    ("BBL", "B.B.L."),
    ("UV", "U.V."),
    ("\u{00FC}", "u"),
    ("viz.", "viz"),
    ("Jebb", "Jeb"),
];

/// Splits a sentence into `Unresolved` pieces separated by `Space`, bracketed
/// by `Start` and `End`.
pub fn tokenize(sentence: &str) -> Vec<Token> {
    let mut tokens = vec![Token::Start];
    for (idx, piece) in sentence.split_whitespace().enumerate() {
        if idx > 0 {
            tokens.push(Token::Space);
        }
        tokens.push(Token::Unresolved(clean_piece(piece)));
    }
    tokens.push(Token::End);
    tokens
}

fn clean_piece(piece: &str) -> String {
    let stripped: String = piece
        .chars()
        .filter(|ch| !STRIPPED_CHARS.contains(ch))
        .collect();
    SUBSTITUTIONS
        .iter()
        .fold(stripped, |text, (from, to)| text.replace(from, to))
}
