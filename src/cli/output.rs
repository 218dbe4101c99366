//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::args::{MafteahArgs, OutputFormat};
use crate::error::Result;
use crate::index::inverted::IndexStats;
use crate::search::result::SearchResult;

/// Result of `normalize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeOutput {
    pub input: String,
    pub normalized: String,
    pub tokens: Vec<String>,
}

/// Analysis of one word for `root`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RootOutput {
    pub word: String,
    pub stem: String,
    pub root: Option<String>,
    pub meaning: Option<String>,
    pub forms: Vec<String>,
}

/// Result of `expand`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionOutput {
    pub query: String,
    pub original: Vec<String>,
    pub terms: Vec<String>,
}

/// Result of `gematria`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GematriaOutput {
    pub input: String,
    pub value: Value,
}

/// Result of `search`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub total_documents: usize,
    pub results: Vec<SearchResult>,
    pub duration_ms: f64,
}

/// Result of `suggest`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionOutput {
    pub prefix: String,
    pub suggestions: Vec<String>,
}

/// Result of `stats`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOutput {
    pub corpus: String,
    pub stats: IndexStats,
}

/// Verdict for one segment under `rules`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentVerdict {
    pub line: usize,
    pub segment: String,
    pub passed: bool,
}

/// Result of `rules`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RulesOutput {
    pub evaluated: usize,
    pub passed: usize,
    pub segments: Vec<SegmentVerdict>,
}

/// Plain-text rendering of a command result.
pub trait HumanOutput {
    fn print_human(&self);
}

/// Output a result in the requested format.
pub fn output_result<T>(message: &str, result: &T, args: &MafteahArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
pub fn output_json<T: Serialize>(result: &T, args: &MafteahArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

impl HumanOutput for NormalizeOutput {
    fn print_human(&self) {
        println!("{}", self.normalized);
        if self.tokens.len() > 1 {
            println!("Tokens: {}", self.tokens.join(" | "));
        }
    }
}

impl HumanOutput for Vec<RootOutput> {
    fn print_human(&self) {
        for entry in self {
            match &entry.root {
                Some(root) => println!("{}: {root}", entry.word),
                None => println!("{}: (no root)", entry.word),
            }
            if entry.stem != entry.word {
                println!("  stem: {}", entry.stem);
            }
            if let Some(meaning) = &entry.meaning {
                println!("  meaning: {meaning}");
            }
            if !entry.forms.is_empty() {
                println!("  forms: {}", entry.forms.join(", "));
            }
        }
    }
}

impl HumanOutput for ExpansionOutput {
    fn print_human(&self) {
        println!("Query: {}", self.query);
        println!("Tokens: {}", self.original.join(" "));
        println!("Expanded ({} terms):", self.terms.len());
        for term in &self.terms {
            let marker = if self.original.contains(term) { "*" } else { " " };
            println!("  {marker} {term}");
        }
    }
}

impl HumanOutput for GematriaOutput {
    fn print_human(&self) {
        println!("{} = {}", self.input, format_value(&self.value));
    }
}

impl HumanOutput for SearchOutput {
    fn print_human(&self) {
        print_results(&self.results);
        println!();
        println!(
            "{} of {} documents matched in {:.2}ms",
            self.results.len(),
            self.total_documents,
            self.duration_ms
        );
    }
}

impl HumanOutput for SuggestionOutput {
    fn print_human(&self) {
        if self.suggestions.is_empty() {
            println!("No suggestions for '{}'", self.prefix);
        }
        for suggestion in &self.suggestions {
            println!("{suggestion}");
        }
    }
}

impl HumanOutput for StatsOutput {
    fn print_human(&self) {
        println!("Index Statistics ({}):", self.corpus);
        println!("Total documents: {}", self.stats.total_documents);
        println!("Total words: {}", self.stats.total_words);
        println!("Unique words: {}", self.stats.unique_words);
        println!("N-grams: {}", self.stats.ngram_count);
    }
}

impl HumanOutput for RulesOutput {
    fn print_human(&self) {
        for verdict in &self.segments {
            let mark = if verdict.passed { "+" } else { "-" };
            println!("{mark} {:>5}: {}", verdict.line, verdict.segment);
        }
        println!();
        println!("{} of {} segments passed", self.passed, self.evaluated);
    }
}

/// Print ranked results with their highlights.
pub fn print_results(results: &[SearchResult]) {
    for (i, result) in results.iter().enumerate() {
        let types: Vec<String> = result.match_types.iter().map(|t| t.to_string()).collect();
        println!(
            "{}. {} (score: {:.3}) [{}]",
            i + 1,
            result.doc_id,
            result.score,
            types.join(", ")
        );
        println!("   terms: {}", result.matched_terms.join(", "));
        for highlight in &result.highlights {
            println!("   > {highlight}");
        }
    }
}

/// Format a JSON value for display.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        Value::Object(_) => "[object]".to_string(),
        Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Value::String("טו".to_string())), "טו");
        assert_eq!(format_value(&Value::from(13)), "13");
        assert_eq!(format_value(&Value::Bool(false)), "false");
        assert_eq!(format_value(&Value::Null), "null");
        assert_eq!(format_value(&serde_json::json!([1, "א"])), "[1, א]");
    }

    #[test]
    fn test_outputs_serialize() {
        let output = RulesOutput {
            evaluated: 1,
            passed: 1,
            segments: vec![SegmentVerdict {
                line: 1,
                segment: "רבי יוחנן אמר".to_string(),
                passed: true,
            }],
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["segments"][0]["passed"], true);
    }
}
