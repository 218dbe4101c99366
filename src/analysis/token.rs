//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows from the tokenizers into the index, the
//! scorer and the rule evaluator. Offsets refer to byte positions in the text
//! the tokenizer was given (normalized text for [`crate::analysis::tokenizer::hebrew`]).
//!
//! ```
//! use mafteah::analysis::token::Token;
//!
//! let token = Token::with_offsets("אמר", 2, 14, 20);
//! assert_eq!(token.text, "אמר");
//! assert_eq!(token.position, 2);
//! assert_eq!(token.char_len(), 3);
//! ```

use serde::{Deserialize, Serialize};

/// A single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts
    pub start_offset: usize,

    /// The byte offset where this token ends
    pub end_offset: usize,
}

/// A boxed iterator of tokens, as produced by a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        let end_offset = text.len();
        Token {
            text,
            position,
            start_offset: 0,
            end_offset,
        }
    }

    /// Create a new token with explicit byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length of the token in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the token text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_new() {
        let token = Token::new("ספר", 0);
        assert_eq!(token.start_offset, 0);
        assert_eq!(token.end_offset, "ספר".len());
        assert_eq!(token.char_len(), 3);
        assert!(!token.is_empty());
        assert_eq!(token.to_string(), "ספר");
    }
}
