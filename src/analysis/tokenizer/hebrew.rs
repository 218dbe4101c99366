//! Hebrew word tokenizer.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::normalizer::normalize;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;

/// Word characters, optionally joined by a single abbreviation mark
/// (`"`, `'`, geresh U+05F3, gershayim U+05F4) so that רמב"ם stays one token.
const WORD_PATTERN: &str = r#"[\p{L}\p{N}\p{M}]+(?:["'\x{05F3}\x{05F4}][\p{L}\p{N}\p{M}]+)*"#;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WORD_PATTERN).expect("word pattern is a valid regex"));

/// Characters that mark a Hebrew abbreviation when they appear inside a word.
pub const ABBREVIATION_MARKS: [char; 4] = ['"', '\'', '\u{05F3}', '\u{05F4}'];

/// Splits text into words on whitespace and punctuation.
///
/// By default the text is normalized first, so tokens come out without
/// niqqud, with final letters folded and lowercased.
#[derive(Clone, Debug)]
pub struct HebrewTokenizer {
    normalize: bool,
}

impl HebrewTokenizer {
    /// Tokenizer that normalizes its input.
    pub fn new() -> Self {
        HebrewTokenizer { normalize: true }
    }

    /// Tokenizer for text that is already normalized.
    pub fn raw() -> Self {
        HebrewTokenizer { normalize: false }
    }

    /// Whether input is normalized before splitting.
    pub fn normalizes(&self) -> bool {
        self.normalize
    }

    /// Tokenize into owned strings.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.tokenize(text).map(|t| t.text).collect()
    }
}

impl Default for HebrewTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for HebrewTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let text = if self.normalize {
            normalize(text)
        } else {
            text.to_string()
        };

        let tokens: Vec<Token> = WORD_REGEX
            .find_iter(&text)
            .enumerate()
            .map(|(position, m)| Token::with_offsets(m.as_str(), position, m.start(), m.end()))
            .collect();

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "hebrew"
    }
}

/// Normalize and split text into word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    HebrewTokenizer::new().words(text)
}

/// Whether a token carries an abbreviation mark.
pub fn has_abbreviation_mark(token: &str) -> bool {
    token.chars().any(|c| ABBREVIATION_MARKS.contains(&c))
}

/// Remove every non-word character (abbreviation marks included).
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}
