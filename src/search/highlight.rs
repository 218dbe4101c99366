//! Sentence snippets with matched words wrapped in markup.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::normalizer::normalize;

/// Configuration for highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// HTML tag wrapping matched words (e.g. "mark", "em", "strong").
    pub tag: String,
    /// CSS class added to the tag.
    pub css_class: Option<String>,
    /// Maximum number of snippets per result.
    pub max_snippets: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        HighlightConfig {
            tag: "mark".to_string(),
            css_class: None,
            max_snippets: 3,
        }
    }
}

impl HighlightConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn css_class<S: Into<String>>(mut self, css_class: S) -> Self {
        self.css_class = Some(css_class.into());
        self
    }

    pub fn max_snippets(mut self, max_snippets: usize) -> Self {
        self.max_snippets = max_snippets;
        self
    }

    /// Build the opening HTML tag.
    pub fn opening_tag(&self) -> String {
        if let Some(ref css_class) = self.css_class {
            format!("<{} class=\"{}\">", self.tag, css_class)
        } else {
            format!("<{}>", self.tag)
        }
    }

    /// Build the closing HTML tag.
    pub fn closing_tag(&self) -> String {
        format!("</{}>", self.tag)
    }
}

/// Produces highlighted snippets.
#[derive(Debug, Clone)]
pub struct Highlighter {
    config: HighlightConfig,
    opening_tag: String,
    closing_tag: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(HighlightConfig::default())
    }
}

impl Highlighter {
    pub fn new(config: HighlightConfig) -> Self {
        Highlighter {
            opening_tag: config.opening_tag(),
            closing_tag: config.closing_tag(),
            config,
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Sentences of `text` that mention any of `terms`, in text order.
    ///
    /// `terms` must be normalized. A word is marked when its normalized form
    /// contains a single-word term; a multi-word term marks the sentence as a
    /// hit without wrapping individual words. The original spelling of the
    /// text, niqqud included, is preserved.
    pub fn highlight(&self, text: &str, terms: &[String]) -> Vec<String> {
        let (phrases, words): (Vec<&String>, Vec<&String>) = terms
            .iter()
            .filter(|t| !t.is_empty())
            .partition(|t| t.contains(' '));

        let mut snippets = Vec::new();
        if words.is_empty() && phrases.is_empty() {
            return snippets;
        }

        for sentence in text.split_sentence_bounds() {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            let mut marked = String::with_capacity(sentence.len());
            let mut hit = false;
            for segment in sentence.split_word_bounds() {
                let normalized = normalize(segment);
                let is_match = !normalized.is_empty()
                    && normalized.chars().any(char::is_alphanumeric)
                    && words.iter().any(|w| normalized.contains(w.as_str()));
                if is_match {
                    hit = true;
                    marked.push_str(&self.opening_tag);
                    marked.push_str(segment);
                    marked.push_str(&self.closing_tag);
                } else {
                    marked.push_str(segment);
                }
            }

            if !hit && !phrases.is_empty() {
                let normalized = normalize(sentence);
                hit = phrases.iter().any(|p| normalized.contains(p.as_str()));
            }

            if hit {
                snippets.push(marked);
                if snippets.len() >= self.config.max_snippets {
                    break;
                }
            }
        }

        snippets
    }
}
