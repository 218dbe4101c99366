//! The search worker: a dedicated thread that owns the index.
//!
//! Requests go in on one channel and responses come out on another. The
//! index has a single owner and is never locked. Each request carries
//! the cancel token that was current when it was submitted; streaming
//! searches poll it between batches.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use parking_lot::Mutex;

use crate::config::EngineConfig;
use crate::error::{MafteahError, Result};
use crate::index::document::Document;
use crate::index::inverted::SearchIndex;
use crate::streaming::{StreamEvent, StreamingSearch};
use crate::worker::protocol::{
    DecodeError, ErrorCode, RequestEnvelope, ResponseEnvelope, WorkerRequest, WorkerResponse,
};

/// Request handling state, owned by the worker thread.
///
/// Usable on its own for synchronous embedding and tests.
#[derive(Debug)]
pub struct WorkerState {
    index: SearchIndex,
    streaming: StreamingSearch,
    /// Documents of the last build, scanned by streaming requests that bring
    /// no documents of their own.
    corpus: Vec<Document>,
}

impl WorkerState {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let index = SearchIndex::new(config.clone())?;
        Ok(WorkerState {
            index,
            streaming: StreamingSearch::new(config),
            corpus: Vec::new(),
        })
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Handle one request, passing every response to `emit`.
    ///
    /// Streaming requests produce several responses; all others produce one.
    /// A streaming request whose `cancel` flag is set, before or during the
    /// scan, ends with a `CANCELLED` error.
    pub fn handle<F>(&mut self, envelope: RequestEnvelope, cancel: &AtomicBool, mut emit: F)
    where
        F: FnMut(ResponseEnvelope),
    {
        let id = envelope.id;
        match envelope.request {
            WorkerRequest::BuildIndex { documents } => {
                self.corpus = documents.clone();
                let stats = self.index.build_index(documents);
                emit(ResponseEnvelope::new(id, WorkerResponse::IndexBuilt { stats }));
            }
            WorkerRequest::Search { query, max_results } => {
                let start = Instant::now();
                let results = self.index.search(&query, max_results);
                emit(ResponseEnvelope::new(
                    id,
                    WorkerResponse::SearchResults {
                        results,
                        search_time_ms: elapsed_ms(start),
                    },
                ));
            }
            WorkerRequest::SearchStreaming {
                query,
                batch_size,
                documents,
            } => {
                let documents = documents.as_deref().unwrap_or(self.corpus.as_slice());
                let outcome = self
                    .streaming
                    .run(documents, &query, batch_size, cancel, |event| {
                        let response = match event {
                            StreamEvent::Batch(batch) => WorkerResponse::from(batch),
                            StreamEvent::Complete(summary) => WorkerResponse::from(summary),
                        };
                        emit(ResponseEnvelope::new(id, response));
                    });
                if let Err(e) = outcome {
                    let code = if e.is_cancelled() {
                        ErrorCode::Cancelled
                    } else {
                        ErrorCode::Internal
                    };
                    emit(ResponseEnvelope::new(id, WorkerResponse::error(code, e.to_string())));
                }
            }
            WorkerRequest::GetSuggestions { prefix, max } => {
                let suggestions = self.index.get_suggestions(&prefix, max);
                emit(ResponseEnvelope::new(id, WorkerResponse::Suggestions { suggestions }));
            }
            WorkerRequest::GetStats => {
                let stats = self.index.get_stats();
                emit(ResponseEnvelope::new(id, WorkerResponse::Stats { stats }));
            }
            WorkerRequest::ClearIndex => {
                self.index.clear();
                self.corpus.clear();
                emit(ResponseEnvelope::new(id, WorkerResponse::IndexCleared));
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Work item on the request channel.
enum Job {
    Request {
        envelope: RequestEnvelope,
        cancel: Arc<AtomicBool>,
    },
    /// A message that failed to decode, answered in submission order.
    Rejected(DecodeError),
}

/// Handle to the worker thread.
///
/// Dropping the handle closes the request channel and joins the thread.
pub struct SearchWorker {
    job_sender: Option<Sender<Job>>,
    response_receiver: Receiver<ResponseEnvelope>,
    /// Token handed to every newly submitted request.
    cancel_token: Mutex<Arc<AtomicBool>>,
    next_id: AtomicU64,
    handle: Option<thread::JoinHandle<()>>,
}

impl SearchWorker {
    /// Start a worker thread with its own index.
    pub fn spawn(config: EngineConfig) -> Result<Self> {
        let mut state = WorkerState::new(config)?;
        let (job_sender, job_receiver) = unbounded::<Job>();
        let (response_sender, response_receiver) = unbounded();

        let handle = thread::Builder::new()
            .name("mafteah-worker".to_string())
            .spawn(move || {
                log::info!("search worker started");
                let send = |response: ResponseEnvelope| {
                    if response_sender.send(response).is_err() {
                        log::warn!("response receiver dropped");
                    }
                };
                for job in job_receiver.iter() {
                    match job {
                        Job::Request { envelope, cancel } => state.handle(envelope, &cancel, send),
                        Job::Rejected(e) => send(e.into_response()),
                    }
                }
                log::info!("search worker stopped");
            })?;

        Ok(SearchWorker {
            job_sender: Some(job_sender),
            response_receiver,
            cancel_token: Mutex::new(Arc::new(AtomicBool::new(false))),
            next_id: AtomicU64::new(1),
            handle: Some(handle),
        })
    }

    /// Queue a request under a fresh id and return that id.
    pub fn submit(&self, request: WorkerRequest) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.submit_envelope(RequestEnvelope::new(id, request))?;
        Ok(id)
    }

    /// Queue a request that already carries its id.
    pub fn submit_envelope(&self, envelope: RequestEnvelope) -> Result<()> {
        let cancel = Arc::clone(&self.cancel_token.lock());
        self.send_job(Job::Request { envelope, cancel })
    }

    /// Decode and queue a JSON request.
    ///
    /// A message that cannot be decoded is answered with an `ERROR` response
    /// after the requests queued before it.
    pub fn submit_json(&self, text: &str) -> Result<()> {
        match RequestEnvelope::from_json(text) {
            Ok(envelope) => self.submit_envelope(envelope),
            Err(e) => {
                log::warn!("rejected message: {e}");
                self.send_job(Job::Rejected(e))
            }
        }
    }

    fn send_job(&self, job: Job) -> Result<()> {
        let sender = self
            .job_sender
            .as_ref()
            .ok_or_else(|| MafteahError::protocol("worker is shut down"))?;
        sender
            .send(job)
            .map_err(|_| MafteahError::protocol("worker thread has exited"))
    }

    /// Cancel every streaming search submitted so far, running or still
    /// queued. Requests submitted afterwards are not affected.
    pub fn cancel_streaming(&self) {
        let mut token = self.cancel_token.lock();
        token.store(true, Ordering::Relaxed);
        *token = Arc::new(AtomicBool::new(false));
    }

    pub fn responses(&self) -> &Receiver<ResponseEnvelope> {
        &self.response_receiver
    }

    /// Block until the next response.
    pub fn recv(&self) -> Result<ResponseEnvelope> {
        self.response_receiver
            .recv()
            .map_err(|_| MafteahError::protocol("worker thread has exited"))
    }

    /// Wait up to `timeout` for the next response.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<ResponseEnvelope>> {
        match self.response_receiver.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(MafteahError::protocol("worker thread has exited"))
            }
        }
    }

    /// Stop accepting requests, finish queued ones and join the thread.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        self.job_sender.take();
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| MafteahError::other("worker thread panicked"))?;
        }
        Ok(())
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::warn!("{e}");
        }
    }
}
