use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::progress::{ProgressCallback, ProgressEvent};

/// Default upper bound for a single appended chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Configuration for the chunked transfer executor.
///
/// # Examples
///
/// ```
/// use gdc_transfer::ExecutorOptions;
///
/// let options = ExecutorOptions::default()
///     .chunk_size(64 * 1024)
///     .header("User-Agent", "gdc-slides/0.1");
/// ```
#[derive(Clone)]
pub struct ExecutorOptions {
    /// Largest slice of the body appended (and reported) at once.
    ///
    /// Network frames larger than this are split before writing.
    ///
    /// Default: 8 KiB
    pub chunk_size: usize,

    /// Extra HTTP headers sent with every request.
    ///
    /// The `Range` header is managed by the executor and must not be set here.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,

    /// Progress callback invoked after every appended chunk.
    ///
    /// Default: None
    pub on_progress: Option<ProgressCallback>,

    /// Token that aborts the streaming loop with `TransferError::Cancelled`.
    ///
    /// Dropping the `execute` future aborts as well; the token only makes the
    /// abort observable as an outcome.
    ///
    /// Default: None
    pub cancel: Option<CancellationToken>,
}

impl fmt::Debug for ExecutorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorOptions")
            .field("chunk_size", &self.chunk_size)
            .field("headers", &self.headers)
            .field("on_progress", &"{ ... }")
            .field("cancel", &self.cancel.is_some())
            .finish()
    }
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            headers: Arc::new([]),
            on_progress: None,
            cancel: None,
        }
    }
}

impl ExecutorOptions {
    /// Set the chunk bound. Zero is clamped to one byte.
    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Add a single custom HTTP header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    /// Set the progress callback.
    ///
    /// # Examples
    ///
    /// ```
    /// use gdc_transfer::ExecutorOptions;
    /// use std::sync::Arc;
    ///
    /// let options = ExecutorOptions::default().on_progress(Arc::new(|event| {
    ///     if let Some(pct) = event.percentage() {
    ///         println!("{pct:.1}%");
    ///     }
    /// }));
    /// ```
    #[must_use]
    pub fn on_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn report(&self, event: ProgressEvent) {
        if let Some(ref callback) = self.on_progress {
            callback(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExecutorOptions::default();
        assert_eq!(options.chunk_size, 8192);
        assert!(options.headers.is_empty());
        assert!(options.on_progress.is_none());
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        assert_eq!(ExecutorOptions::default().chunk_size(0).chunk_size, 1);
    }

    #[test]
    fn test_headers_accumulate() {
        let options = ExecutorOptions::default()
            .header("User-Agent", "a")
            .header("Accept", "b");
        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.headers[1], ("Accept".to_string(), "b".to_string()));
    }
}
