//! Integration tests for indexing, ranking and streaming.

use std::io::Write;
use std::sync::atomic::AtomicBool;

use mafteah::index::index_terms;
use mafteah::prelude::*;
use mafteah::streaming::StreamEvent;
use tempfile::NamedTempFile;

fn corpus() -> Vec<Document> {
    vec![
        Document::new("1", "הלכות שבת", "אסור לכתוב בשבת. מותר לקרוא בשבת."),
        Document::new("2", "דיני ממונות", "התובע הגיש תביעה נגד הנתבע"),
        Document::new("3", "", "בית המשפט קבע כי התביעה נדחית"),
        Document::new("4", "חוזים", "החוזה נחתם בין הצדדים ביום ראשון"),
        Document::new("5", "", "רבי יוחנן אמר משום רבי שמעון"),
    ]
}

#[test]
fn test_every_indexed_term_retrieves_its_document() -> Result<()> {
    let mut index = SearchIndex::new(EngineConfig::default())?;
    index.build_index(corpus());

    let document = Document::new("new", "פסק דין", "הערעור התקבל חלקית");
    index.add_document(document.clone());

    for term in index_terms(&document.full_text()) {
        let results = index.search(&term, 100);
        assert!(
            results.iter().any(|r| r.doc_id == "new"),
            "term {term} should retrieve the document"
        );
    }

    // "ערע" is one of the trigrams of הערעור.
    let results = index.search("ערע", 100);
    assert!(results.iter().any(|r| r.doc_id == "new"));
    Ok(())
}

#[test]
fn test_title_match_outranks_body_match() -> Result<()> {
    let mut index = SearchIndex::new(EngineConfig::default())?;
    index.build_index(vec![
        Document::new("title", "חוזה", "נחתם אתמול"),
        Document::new("body", "", "חוזה נחתם אתמול"),
        Document::new("other", "", "מזג האוויר נאה"),
    ]);

    let results = index.search("חוזה", 10);
    let score = |id: &str| {
        results
            .iter()
            .find(|r| r.doc_id == id)
            .map(|r| r.score)
            .unwrap_or(0.0)
    };
    assert!(score("title") >= score("body"));
    assert!(score("title") > 0.0);
    Ok(())
}

#[test]
fn test_rebuild_replaces_corpus() -> Result<()> {
    let mut index = SearchIndex::new(EngineConfig::default())?;
    index.build_index(corpus());
    assert!(!index.search("תביעה", 10).is_empty());

    let stats = index.build_index(vec![Document::new("x", "", "מזג האוויר נאה")]);
    assert_eq!(stats.total_documents, 1);
    assert!(index.document("2").is_none());
    assert!(index.search("תביעה", 10).iter().all(|r| r.doc_id == "x"));
    Ok(())
}

#[test]
fn test_niqqud_and_final_letters_do_not_matter() -> Result<()> {
    let mut index = SearchIndex::new(EngineConfig::default())?;
    index.build_index(corpus());

    let plain = index.search("יוחנן", 10);
    let pointed = index.search("יוֹחָנָן", 10);
    assert_eq!(plain.first().map(|r| r.doc_id.as_str()), Some("5"));
    assert_eq!(plain, pointed);
    Ok(())
}

#[test]
fn test_results_sorted_and_bounded() -> Result<()> {
    let mut index = SearchIndex::new(EngineConfig::default())?;
    index.build_index(corpus());

    let results = index.search("תביעה", 2);
    assert!(results.len() <= 2);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(index.search("", 10).is_empty());
    assert!(index.search("תביעה", 0).is_empty());
    Ok(())
}

#[test]
fn test_config_file_controls_engine() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{"index": {{"enable_ngrams": false}}, "scoring": {{"title_boost": 3.0}}}}"#
    )?;

    let config = EngineConfig::from_json_file(file.path())?;
    assert!(!config.index.enable_ngrams);
    assert_eq!(config.scoring.title_boost, 3.0);
    assert_eq!(config.index.ngram_size, 3);

    let mut index = SearchIndex::new(config)?;
    let stats = index.build_index(corpus());
    assert_eq!(stats.ngram_count, 0);

    let mut bad = NamedTempFile::new()?;
    write!(bad, r#"{{"scoring": {{"fuzzy_threshold": 1.5}}}}"#)?;
    assert!(EngineConfig::from_json_file(bad.path()).is_err());
    Ok(())
}

#[test]
fn test_streaming_matches_full_scan() -> Result<()> {
    let search = StreamingSearch::new(EngineConfig::default());
    let documents = corpus();
    let cancel = AtomicBool::new(false);

    let mut expected: Vec<String> = search
        .scan_all(&documents, "שבת")
        .into_iter()
        .map(|r| r.doc_id)
        .collect();
    expected.sort();
    assert!(!expected.is_empty());

    let mut streamed = Vec::new();
    let mut finals = 0;
    let summary = search.run(&documents, "שבת", 2, &cancel, |event| {
        if let StreamEvent::Batch(batch) = event {
            if batch.is_final {
                finals += 1;
            }
            streamed.extend(batch.results.into_iter().map(|r| r.doc_id));
        }
    })?;
    streamed.sort();

    assert_eq!(streamed, expected);
    assert_eq!(finals, 1);
    assert_eq!(summary.scanned, documents.len());
    assert_eq!(summary.total_found, expected.len());
    Ok(())
}

#[test]
fn test_suggestions_follow_frequency() -> Result<()> {
    let mut index = SearchIndex::new(EngineConfig::default())?;
    index.build_index(corpus());

    let suggestions = index.get_suggestions("בש", 5);
    assert_eq!(suggestions, vec!["בשבת".to_string()]);
    assert!(index.get_suggestions("", 5).is_empty());
    Ok(())
}

#[test]
fn test_normalization_properties() {
    for text in ["שָׁלוֹם עולם", "  רמב\"ם   HELLO ", "ךםןףץ", ""] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
    assert_eq!(normalize_sofit("שלום"), "שלומ");
    assert_eq!(normalize_sofit("ךםןףץ"), "כמנפצ");
    assert_eq!(remove_niqqud("שָׁלוֹם"), "שלום");
}

#[test]
fn test_gematria() {
    assert_eq!(calculate_gematria("אחד"), 13);
    assert_eq!(calculate_gematria("אהבה"), 13);
    assert_eq!(calculate_gematria(""), 0);
    assert_eq!(calculate_gematria("abc"), 0);
    assert_eq!(convert_number_to_hebrew(15), "טו");
    assert_eq!(convert_number_to_hebrew(16), "טז");
    assert_eq!(convert_number_to_hebrew(20), "כ");
    assert_eq!(convert_number_to_hebrew(123), "קכג");
}
