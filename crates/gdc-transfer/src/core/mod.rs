//! Pure transformations for resumable transfers.
//!
//! Nothing in here touches the network or the filesystem; the executor in
//! [`crate::effects`] feeds these functions what it observed and acts on the
//! answer.

mod chunk;
mod range;
mod retry;

pub use chunk::split_chunk;
pub use range::{classify_response, range_header, Accepted, ContentRange};
pub use retry::retry_delay;
