//! Command line argument parsing for the Mafteah CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::worker::protocol::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_RESULTS, DEFAULT_MAX_SUGGESTIONS};

/// Mafteah - Hebrew-aware full-text search and rule evaluation
#[derive(Parser, Debug, Clone)]
#[command(name = "mafteah")]
#[command(about = "Hebrew-aware full-text search, ranking and rule evaluation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MafteahArgs {
    /// Verbosity level (repeat for more: -v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "MAFTEAH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MafteahArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }

    /// Log level filter matching the verbosity.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity() {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Normalize text and show its tokens
    Normalize(NormalizeArgs),

    /// Extract the roots of words
    Root(RootArgs),

    /// Show the expansion of a query
    Expand(ExpandArgs),

    /// Compute gematria of text, or render a number in Hebrew letters
    Gematria(GematriaArgs),

    /// Search a corpus file
    Search(SearchArgs),

    /// Suggest indexed words for a prefix
    Suggest(SuggestArgs),

    /// Show index statistics for a corpus file
    Stats(StatsArgs),

    /// Filter text segments with a rule file
    Rules(RulesArgs),
}

/// Arguments for normalizing text
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for root extraction
#[derive(Parser, Debug, Clone)]
pub struct RootArgs {
    /// Words to analyze
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,

    /// Do not fall back to a pseudo-root for unknown words
    #[arg(long)]
    pub no_pseudo_root: bool,
}

/// Arguments for query expansion
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,
}

/// Arguments for gematria
#[derive(Parser, Debug, Clone)]
pub struct GematriaArgs {
    /// Hebrew text, or a number to render in Hebrew letters
    #[arg(value_name = "VALUE")]
    pub value: String,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Corpus file (JSON array or JSONL of documents)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
    pub limit: usize,

    /// Scan the corpus in batches instead of building an index
    #[arg(long)]
    pub stream: bool,

    /// Documents per streamed batch
    #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE, requires = "stream")]
    pub batch_size: usize,
}

/// Arguments for suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Corpus file (JSON array or JSONL of documents)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Word prefix
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Maximum number of suggestions
    #[arg(short, long, default_value_t = DEFAULT_MAX_SUGGESTIONS)]
    pub limit: usize,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Corpus file (JSON array or JSONL of documents)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,
}

/// Arguments for rule evaluation
#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    /// Rule file (JSON with `filters`, `conditions` and `options`)
    #[arg(value_name = "RULE_FILE")]
    pub rule_file: PathBuf,

    /// Segments, one per line (reads stdin when omitted)
    #[arg(value_name = "SEGMENTS")]
    pub segments: Option<PathBuf>,

    /// Match whole words only, overriding the rule file
    #[arg(long)]
    pub whole_word: bool,

    /// Also list segments that fail the rules
    #[arg(long)]
    pub all: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
