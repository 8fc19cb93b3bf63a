//! I/O operations for resumable transfers.
//!
//! The planner queries the filesystem; the executor drives an [`HttpClient`]
//! and appends to the destination. Everything else is delegated to
//! [`crate::core`].

mod executor;
mod http;
mod planner;

pub use executor::Executor;
pub use http::{BoxStream, HttpClient, RemoteResponse};
pub use planner::plan;

#[cfg(feature = "reqwest")]
pub use http::{ClientSetting, ReqwestClient};
