//! Command implementations for the Mafteah CLI.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::normalizer::normalize;
use crate::analysis::tokenizer::hebrew::tokenize;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::error::{MafteahError, Result};
use crate::index::document::Document;
use crate::index::inverted::SearchIndex;
use crate::lexicon::gematria::{calculate_gematria, convert_number_to_hebrew};
use crate::lexicon::roots::root_entry;
use crate::morphology::{PseudoRootPolicy, RootExtractor, stem, word_forms_for_root};
use crate::query::expander::QueryExpander;
use crate::rules::{
    FilterRuleSet, MatchOptions, SearchCondition, check_filter_rules, search_with_conditions,
};
use crate::streaming::{StreamEvent, StreamingSearch};
use crate::worker::protocol::WorkerResponse;

/// Execute a CLI command.
pub fn execute_command(args: MafteahArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Normalize(normalize_args) => normalize_text(normalize_args, &args),
        Command::Root(root_args) => analyze_roots(root_args, &config, &args),
        Command::Expand(expand_args) => expand(expand_args, &config, &args),
        Command::Gematria(gematria_args) => gematria(gematria_args, &args),
        Command::Search(search_args) => search(search_args, config, &args),
        Command::Suggest(suggest_args) => suggest(suggest_args, config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, config, &args),
        Command::Rules(rules_args) => evaluate_rules(rules_args, &args),
    }
}

fn load_config(args: &MafteahArgs) -> Result<EngineConfig> {
    match &args.config {
        Some(path) => {
            log::info!("loading configuration from {}", path.display());
            EngineConfig::from_json_file(path)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Read documents from a JSON array or a JSONL file.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let documents = parse_documents(&content).map_err(|e| match e {
        MafteahError::Json(e) => MafteahError::index(format!("{}: {e}", path.display())),
        other => other,
    })?;
    log::info!("loaded {} documents from {}", documents.len(), path.display());
    Ok(documents)
}

/// Parse a JSON array of documents, or one document per line.
pub fn parse_documents(content: &str) -> Result<Vec<Document>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }

    let mut documents = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let document = serde_json::from_str(line).map_err(|e| {
            MafteahError::index(format!("invalid document on line {}: {e}", line_num + 1))
        })?;
        documents.push(document);
    }
    Ok(documents)
}

fn normalize_text(args: &NormalizeArgs, cli_args: &MafteahArgs) -> Result<()> {
    let output = NormalizeOutput {
        input: args.text.clone(),
        normalized: normalize(&args.text),
        tokens: tokenize(&args.text),
    };
    output_result("Normalized text", &output, cli_args)
}

fn analyze_roots(args: &RootArgs, config: &EngineConfig, cli_args: &MafteahArgs) -> Result<()> {
    let policy = if args.no_pseudo_root {
        PseudoRootPolicy::Disabled
    } else {
        config.pseudo_root
    };
    let extractor = RootExtractor::with_policy(policy);

    let output: Vec<RootOutput> = args
        .words
        .iter()
        .map(|word| {
            let root = extractor.extract_root(word);
            let entry = root.as_deref().and_then(root_entry);
            RootOutput {
                word: word.clone(),
                stem: stem(&normalize(word)),
                meaning: entry.map(|e| e.meaning.clone()),
                forms: root.as_deref().map(word_forms_for_root).unwrap_or_default(),
                root,
            }
        })
        .collect();
    output_result("Root analysis", &output, cli_args)
}

fn expand(args: &ExpandArgs, config: &EngineConfig, cli_args: &MafteahArgs) -> Result<()> {
    let expander = QueryExpander::new(config.expansion.clone())
        .with_pseudo_root_policy(config.pseudo_root)
        .with_stop_word_removal(config.index.remove_stop_words);
    let expanded = expander.expand(&args.query);
    let output = ExpansionOutput {
        query: args.query.clone(),
        original: expanded.original,
        terms: expanded.terms,
    };
    output_result("Query expansion", &output, cli_args)
}

fn gematria(args: &GematriaArgs, cli_args: &MafteahArgs) -> Result<()> {
    let value = match args.value.trim().parse::<i64>() {
        Ok(number) => Value::from(convert_number_to_hebrew(number)),
        Err(_) => Value::from(calculate_gematria(&args.value)),
    };
    let output = GematriaOutput {
        input: args.value.clone(),
        value,
    };
    output_result("Gematria", &output, cli_args)
}

fn search(args: &SearchArgs, config: EngineConfig, cli_args: &MafteahArgs) -> Result<()> {
    let documents = load_documents(&args.corpus)?;
    if args.stream {
        return stream_search(args, &documents, config, cli_args);
    }

    let total_documents = documents.len();
    let mut index = SearchIndex::new(config)?;
    index.build_index(documents);

    let start = Instant::now();
    let results = index.search(&args.query, args.limit);
    let output = SearchOutput {
        query: args.query.clone(),
        total_documents,
        results,
        duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    };
    output_result("Search results", &output, cli_args)
}

fn stream_search(
    args: &SearchArgs,
    documents: &[Document],
    config: EngineConfig,
    cli_args: &MafteahArgs,
) -> Result<()> {
    let streaming = StreamingSearch::new(config);
    let cancel = AtomicBool::new(false);
    let mut output_error = None;

    streaming.run(documents, &args.query, args.batch_size, &cancel, |event| {
        if output_error.is_some() {
            return;
        }
        let printed = match cli_args.output_format {
            OutputFormat::Json => {
                let response = match event {
                    StreamEvent::Batch(batch) => WorkerResponse::from(batch),
                    StreamEvent::Complete(summary) => WorkerResponse::from(summary),
                };
                output_json(&response, cli_args)
            }
            OutputFormat::Human => {
                match event {
                    StreamEvent::Batch(batch) => {
                        println!(
                            "[{}/{} {:.0}%]{}",
                            batch.processed,
                            batch.total,
                            batch.percentage,
                            if batch.is_final { " final" } else { "" }
                        );
                        print_results(&batch.results);
                    }
                    StreamEvent::Complete(summary) => {
                        println!();
                        println!(
                            "{} of {} documents matched in {:.2}ms",
                            summary.total_found,
                            summary.scanned,
                            summary.elapsed.as_secs_f64() * 1000.0
                        );
                    }
                }
                Ok(())
            }
        };
        if let Err(e) = printed {
            output_error = Some(e);
        }
    })?;

    match output_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn suggest(args: &SuggestArgs, config: EngineConfig, cli_args: &MafteahArgs) -> Result<()> {
    let mut index = SearchIndex::new(config)?;
    index.build_index(load_documents(&args.corpus)?);
    let output = SuggestionOutput {
        prefix: args.prefix.clone(),
        suggestions: index.get_suggestions(&args.prefix, args.limit),
    };
    output_result("Suggestions", &output, cli_args)
}

fn show_stats(args: &StatsArgs, config: EngineConfig, cli_args: &MafteahArgs) -> Result<()> {
    let mut index = SearchIndex::new(config)?;
    let stats = index.build_index(load_documents(&args.corpus)?);
    let output = StatsOutput {
        corpus: args.corpus.display().to_string(),
        stats,
    };
    output_result("Index statistics", &output, cli_args)
}

/// Contents of a rule file for the `rules` command.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFile {
    pub filters: FilterRuleSet,
    pub conditions: Vec<SearchCondition>,
    pub options: MatchOptions,
}

impl RuleFile {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Whether `segment` passes the filters and the condition chain.
    pub fn accepts(&self, segment: &str) -> bool {
        check_filter_rules(segment, &self.filters)
            && search_with_conditions(segment, &self.conditions, self.options)
    }
}

fn evaluate_rules(args: &RulesArgs, cli_args: &MafteahArgs) -> Result<()> {
    let mut rules = RuleFile::from_json_file(&args.rule_file)?;
    if args.whole_word {
        rules.options.whole_word = true;
    }

    let reader: Box<dyn BufRead> = match &args.segments {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut evaluated = 0;
    let mut passed = 0;
    let mut segments = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        evaluated += 1;
        let accepted = rules.accepts(&line);
        if accepted {
            passed += 1;
        }
        if accepted || args.all {
            segments.push(SegmentVerdict {
                line: line_num + 1,
                segment: line,
                passed: accepted,
            });
        }
    }
    log::debug!("{passed} of {evaluated} segments passed");

    let output = RulesOutput {
        evaluated,
        passed,
        segments,
    };
    output_result("Rule evaluation", &output, cli_args)
}
