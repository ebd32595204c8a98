//! Background worker for reading passport files off the host filesystem.
//!
//! - `messages`: request/response protocol types with trace context propagation
//! - `handler`: worker implementation and file loading

pub mod handler;
pub mod messages;

pub use handler::SanctionCheckWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
