use std::sync::Arc;

/// Progress callback invoked by the executor after every appended chunk.
pub type ProgressCallback = Arc<dyn Fn(&ProgressEvent) + Send + Sync>;

/// Snapshot of a running transfer.
///
/// Purely observational: the destination file stays the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Resume offset plus every byte appended during this attempt.
    pub bytes_transferred: u64,

    /// Resume offset plus the remaining length reported by the server.
    ///
    /// Falls back to the request's expected size, and is `None` when
    /// neither is known (e.g. chunked transfer encoding).
    pub bytes_total: Option<u64>,
}

impl ProgressEvent {
    /// Calculate the percentage of completion.
    ///
    /// Returns `None` if `bytes_total` is unknown.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.bytes_total.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_transferred as f64 / total as f64) * 100.0
            }
        })
    }
}
