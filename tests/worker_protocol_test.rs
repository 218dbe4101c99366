//! End-to-end tests driving the search worker through JSON messages.

use std::time::Duration;

use mafteah::prelude::*;
use mafteah::worker::{ErrorCode, ResponseEnvelope, WorkerRequest, WorkerResponse};
use serde_json::{Value, json};

const TIMEOUT: Duration = Duration::from_secs(10);

fn recv(worker: &SearchWorker) -> ResponseEnvelope {
    worker
        .recv_timeout(TIMEOUT)
        .unwrap()
        .expect("worker should respond")
}

fn build_message() -> String {
    json!({
        "id": 1,
        "type": "BUILD_INDEX",
        "documents": [
            {"id": "1", "title": "הלכות שבת", "body": "אסור לכתוב בשבת"},
            {"id": "2", "title": null, "text": "התובע הגיש תביעה"},
            {"id": 3, "body": "בית המשפט דחה את התביעה"}
        ]
    })
    .to_string()
}

#[test]
fn test_build_search_and_stats() -> Result<()> {
    let worker = SearchWorker::spawn(EngineConfig::default())?;

    worker.submit_json(&build_message())?;
    let response = recv(&worker);
    assert_eq!(response.id, 1);
    match response.response {
        WorkerResponse::IndexBuilt { stats } => assert_eq!(stats.total_documents, 3),
        other => panic!("unexpected response {other:?}"),
    }

    worker.submit_json(r#"{"id": 2, "type": "SEARCH", "query": "תביעה", "maxResults": 5}"#)?;
    let response = recv(&worker);
    assert_eq!(response.id, 2);
    let json: Value = serde_json::from_str(&response.to_json())?;
    assert_eq!(json["type"], "SEARCH_RESULTS");
    let ids: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["docId"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"2"));
    assert!(ids.contains(&"3"));

    let id = worker.submit(WorkerRequest::GetStats)?;
    let response = recv(&worker);
    assert_eq!(response.id, id);
    assert!(matches!(
        response.response,
        WorkerResponse::Stats { stats } if stats.total_documents == 3
    ));

    worker.shutdown()
}

#[test]
fn test_streaming_over_built_corpus() -> Result<()> {
    let worker = SearchWorker::spawn(EngineConfig::default())?;
    worker.submit_json(&build_message())?;
    recv(&worker);

    worker.submit_json(r#"{"id": 5, "type": "SEARCH_STREAMING", "query": "תביעה", "batchSize": 1}"#)?;

    let mut batches = Vec::new();
    loop {
        let response = recv(&worker);
        assert_eq!(response.id, 5);
        match response.response {
            WorkerResponse::SearchBatch {
                results, is_final, ..
            } => batches.push((results.len(), is_final)),
            WorkerResponse::SearchComplete {
                total_found,
                scanned,
                ..
            } => {
                assert_eq!(scanned, 3);
                assert_eq!(total_found, batches.iter().map(|(n, _)| n).sum::<usize>());
                break;
            }
            other => panic!("unexpected response {other:?}"),
        }
    }
    assert_eq!(batches.iter().filter(|(_, is_final)| *is_final).count(), 1);
    assert!(batches.last().is_some_and(|(_, is_final)| *is_final));

    worker.shutdown()
}

#[test]
fn test_clear_and_errors() -> Result<()> {
    let worker = SearchWorker::spawn(EngineConfig::default())?;
    worker.submit_json(&build_message())?;
    recv(&worker);

    worker.submit_json(r#"{"id": 7, "type": "CLEAR_INDEX"}"#)?;
    assert_eq!(recv(&worker).response, WorkerResponse::IndexCleared);

    worker.submit_json(r#"{"id": 8, "type": "SEARCH", "query": "תביעה"}"#)?;
    assert!(matches!(
        recv(&worker).response,
        WorkerResponse::SearchResults { results, .. } if results.is_empty()
    ));

    worker.submit_json(r#"{"id": 9, "type": "REINDEX"}"#)?;
    let response = recv(&worker);
    assert_eq!(response.id, 9);
    assert!(matches!(
        response.response,
        WorkerResponse::Error {
            code: ErrorCode::UnknownMessageType,
            ..
        }
    ));

    worker.submit_json(r#"{"id": 10, "type": "GET_SUGGESTIONS"}"#)?;
    let response = recv(&worker);
    assert_eq!(response.id, 10);
    assert!(matches!(
        response.response,
        WorkerResponse::Error {
            code: ErrorCode::MalformedMessage,
            ..
        }
    ));

    worker.shutdown()
}

#[test]
fn test_cancel_reaches_queued_stream() -> Result<()> {
    let worker = SearchWorker::spawn(EngineConfig::default())?;
    let documents: Vec<Document> = (0..5_000)
        .map(|i| Document::new(i.to_string(), "", format!("התובע הגיש תביעה מספר {i}")))
        .collect();

    let build_id = worker.submit(WorkerRequest::BuildIndex { documents })?;
    let stream_id = worker.submit(WorkerRequest::SearchStreaming {
        query: "תביעה".to_string(),
        batch_size: 1,
        documents: None,
    })?;
    worker.cancel_streaming();

    assert_eq!(recv(&worker).id, build_id);
    let last = loop {
        let response = recv(&worker);
        assert_eq!(response.id, stream_id);
        if !matches!(response.response, WorkerResponse::SearchBatch { .. }) {
            break response.response;
        }
    };
    assert!(
        matches!(last, WorkerResponse::Error { code: ErrorCode::Cancelled, .. }),
        "expected a cancelled stream, got {last:?}"
    );

    // A stream submitted after the cancel runs to completion.
    let stream_id = worker.submit(WorkerRequest::SearchStreaming {
        query: "תביעה".to_string(),
        batch_size: 2,
        documents: Some(vec![
            Document::new("a", "", "התובע הגיש תביעה"),
            Document::new("b", "", "אין כאן דבר"),
            Document::new("c", "", "התביעה נדחתה"),
        ]),
    })?;
    let last = loop {
        let response = recv(&worker);
        assert_eq!(response.id, stream_id);
        if !matches!(response.response, WorkerResponse::SearchBatch { .. }) {
            break response.response;
        }
    };
    assert!(matches!(
        last,
        WorkerResponse::SearchComplete { scanned: 3, .. }
    ));

    worker.shutdown()
}

#[test]
fn test_rejected_message_answered_in_order() -> Result<()> {
    let worker = SearchWorker::spawn(EngineConfig::default())?;
    worker.submit_json(&build_message())?;
    worker.submit_json(r#"{"id": 11, "type": "NOPE"}"#)?;

    assert_eq!(recv(&worker).id, 1);
    assert_eq!(recv(&worker).id, 11);

    worker.shutdown()
}
