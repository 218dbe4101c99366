//! N-gram tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{MafteahError, Result};

/// A tokenizer that generates fixed-size overlapping character n-grams.
///
/// Used for partial matching and for shortlisting fuzzy candidates. Text
/// shorter than `size` characters produces no n-grams.
///
/// # Examples
///
/// ```
/// use mafteah::analysis::tokenizer::ngram::NgramTokenizer;
///
/// let tokenizer = NgramTokenizer::trigram();
/// assert_eq!(tokenizer.ngrams("משפט"), vec!["משפ", "שפט"]);
/// assert!(tokenizer.ngrams("דנ").is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    size: usize,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is 0.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(MafteahError::analysis("ngram size must be at least 1"));
        }
        Ok(Self { size })
    }

    /// Create a bigram tokenizer (n=2).
    pub fn bigram() -> Self {
        Self { size: 2 }
    }

    /// Create a trigram tokenizer (n=3).
    pub fn trigram() -> Self {
        Self { size: 3 }
    }

    /// The window size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All windows of `text`, in order, duplicates included.
    pub fn ngrams(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < self.size {
            return Vec::new();
        }
        chars
            .windows(self.size)
            .map(|window| window.iter().collect())
            .collect()
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();

        if chars.len() >= self.size {
            let mut start_offset = 0;
            for (position, start) in (0..=chars.len() - self.size).enumerate() {
                let ngram: String = chars[start..start + self.size].iter().collect();
                let end_offset = start_offset + ngram.len();
                tokens.push(Token::with_offsets(&ngram, position, start_offset, end_offset));
                start_offset += chars[start].len_utf8();
            }
        }

        Box::new(tokens.into_iter())
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngram_creation() {
        assert!(NgramTokenizer::new(3).is_ok());
        assert!(NgramTokenizer::new(0).is_err());
    }

    #[test]
    fn test_bigram() {
        let tokenizer = NgramTokenizer::bigram();
        let tokens: Vec<Token> = tokenizer.tokenize("hello").collect();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].text, "he");
        assert_eq!(tokens[3].text, "lo");
    }

    #[test]
    fn test_hebrew_offsets() {
        let tokenizer = NgramTokenizer::bigram();
        let tokens: Vec<Token> = tokenizer.tokenize("שלומ").collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "של");
        assert_eq!(tokens[1].text, "לו");
        // each Hebrew letter is two bytes in UTF-8
        assert_eq!(tokens[1].start_offset, 2);
        assert_eq!(tokens[1].end_offset, 6);
    }

    #[test]
    fn test_short_and_exact_length() {
        let tokenizer = NgramTokenizer::trigram();
        assert_eq!(tokenizer.tokenize("ab").count(), 0);
        assert_eq!(tokenizer.ngrams("abc"), vec!["abc"]);
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(NgramTokenizer::bigram().name(), "ngram");
    }
}
