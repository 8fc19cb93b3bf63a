//! Immutable data types for resumable transfers.
//!
//! Requests and plans are created once per attempt and never mutated;
//! progress events and outcomes are produced by the executor and owned by the
//! caller.

pub mod options;
pub mod outcome;
pub mod plan;
pub mod progress;
pub mod request;

pub use options::{ExecutorOptions, DEFAULT_CHUNK_SIZE};
pub use outcome::{TransferOutcome, TransferSummary};
pub use plan::{ResumePlan, TransferMode};
pub use progress::{ProgressCallback, ProgressEvent};
pub use request::TransferRequest;
