//! Message-driven search worker.
//!
//! [`SearchWorker`] runs a [`WorkerState`] on its own thread and speaks the
//! JSON protocol defined in [`protocol`].

pub mod engine;
pub mod protocol;

pub use engine::{SearchWorker, WorkerState};
pub use protocol::{ErrorCode, RequestEnvelope, ResponseEnvelope, WorkerRequest, WorkerResponse};
