//! Resumable chunked HTTP transfers.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable requests, plans, progress events and outcomes
//! - [`core`] - Pure transformations (range headers, response classification, backoff)
//! - [`effects`] - Filesystem and network I/O behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Resume by inspection**: the resume offset is the length of the file already on disk
//! - **Append-only**: bytes before the resume offset are never rewritten
//! - **Range guard**: a full-content reply to a range request fails instead of corrupting the file
//! - **Mechanism-only**: one attempt in, one [`TransferOutcome`] out; retries belong to the caller

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use self::core::{range_header, retry_delay, ContentRange};
pub use data::{
    ExecutorOptions, ProgressCallback, ProgressEvent, ResumePlan, TransferMode, TransferOutcome,
    TransferRequest, TransferSummary, DEFAULT_CHUNK_SIZE,
};
pub use effects::{plan, BoxStream, Executor, HttpClient, RemoteResponse};

#[cfg(feature = "reqwest")]
pub use effects::{ClientSetting, ReqwestClient};

pub use error::{Result, TransferError};
