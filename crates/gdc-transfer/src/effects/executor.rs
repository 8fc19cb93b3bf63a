use std::path::Path;

use futures_util::StreamExt;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::{classify_response, range_header, split_chunk, Accepted};
use crate::data::{
    ExecutorOptions, ProgressEvent, ResumePlan, TransferOutcome, TransferRequest, TransferSummary,
};
use crate::effects::http::HttpClient;
use crate::effects::planner;
use crate::error::{Result, TransferError};

/// Streams one resource into its destination, starting at a planned offset.
///
/// The resource URL is `{endpoint}/{resource_id}`.
pub struct Executor<C: HttpClient> {
    client: C,
    endpoint: String,
    options: ExecutorOptions,
}

impl<C: HttpClient> Executor<C> {
    pub fn new(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            options: ExecutorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn resource_url(&self, resource_id: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), resource_id)
    }

    /// Plan from the destination on disk, then execute one attempt.
    ///
    /// # Errors
    ///
    /// Only planning errors are returned as `Err`; transfer failures arrive as
    /// [`TransferOutcome::Failed`].
    pub async fn run(&self, request: &TransferRequest) -> Result<TransferOutcome> {
        let plan = planner::plan(request.destination()).await?;
        Ok(self.execute(request, plan).await)
    }

    /// Execute one transfer attempt from `plan.offset`.
    ///
    /// Never retries and never removes the destination: whatever was flushed
    /// before a failure is a valid resume point for the next `plan`.
    pub async fn execute(&self, request: &TransferRequest, plan: ResumePlan) -> TransferOutcome {
        match self.try_execute(request, plan).await {
            Ok(summary) => {
                info!(
                    resource = request.resource_id(),
                    mode = %summary.mode,
                    bytes = summary.bytes_written,
                    size = summary.final_size,
                    "transfer complete"
                );
                TransferOutcome::Success(summary)
            }
            Err(err) => {
                warn!(resource = request.resource_id(), error = %err, "transfer failed");
                TransferOutcome::Failed(err)
            }
        }
    }

    async fn try_execute(
        &self,
        request: &TransferRequest,
        plan: ResumePlan,
    ) -> Result<TransferSummary> {
        let offset = plan.offset;
        let already_complete = TransferSummary {
            mode: plan.mode,
            resumed_from: offset,
            bytes_written: 0,
            final_size: offset,
        };

        if let Some(total) = request.total_size() {
            if offset > total {
                return Err(TransferError::SizeExceeded {
                    limit: total,
                    actual: offset,
                });
            }
            if offset == total && plan.needs_range() {
                debug!(resource = request.resource_id(), "destination already complete");
                return Ok(already_complete);
            }
        }

        let url = self.resource_url(request.resource_id());
        let mut headers = self.options.headers.to_vec();
        if plan.needs_range() {
            headers.push(("Range".to_string(), range_header(offset)));
        }

        debug!(%url, offset, mode = %plan.mode, "requesting resource");
        let response = self
            .client
            .get(&url, &headers)
            .await
            .map_err(|e| TransferError::Transport(e.to_string()))?;

        let remaining = match classify_response(
            response.status,
            offset,
            response.content_length,
            response.content_range.as_deref(),
            &url,
        )? {
            Accepted::Complete => {
                debug!(resource = request.resource_id(), "server reports range satisfied");
                return Ok(already_complete);
            }
            Accepted::Body { remaining } => remaining,
        };

        let destination = request.destination();
        let mut file = open_append(destination).await?;

        // an announced length past u64::MAX is treated as unknown
        let bytes_total = remaining
            .and_then(|r| offset.checked_add(r))
            .or(request.total_size());
        let limit = request.total_size().or(bytes_total);

        let mut body = response.body;
        let mut transferred = offset;

        loop {
            let next = match &self.options.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        flush(&mut file, destination).await?;
                        return Err(TransferError::Cancelled);
                    }
                    next = body.next() => next,
                },
                None => body.next().await,
            };

            let frame = match next {
                Some(Ok(frame)) => frame,
                Some(Err(e)) => {
                    flush(&mut file, destination).await?;
                    return Err(TransferError::Transport(e.to_string()));
                }
                None => break,
            };

            for chunk in split_chunk(frame, self.options.chunk_size) {
                let len = chunk.len() as u64;
                if let Some(limit) = limit
                    && transferred + len > limit
                {
                    flush(&mut file, destination).await?;
                    return Err(TransferError::SizeExceeded {
                        limit,
                        actual: transferred + len,
                    });
                }

                file.write_all(&chunk)
                    .await
                    .map_err(|e| TransferError::fs(destination, e))?;
                flush(&mut file, destination).await?;
                transferred += len;

                self.options.report(ProgressEvent {
                    bytes_transferred: transferred,
                    bytes_total,
                });
            }
        }

        file.sync_data()
            .await
            .map_err(|e| TransferError::fs(destination, e))?;

        let received = transferred - offset;
        if let Some(expected) = remaining
            && received < expected
        {
            return Err(TransferError::Transport(format!(
                "body ended after {received} of {expected} bytes"
            )));
        }

        Ok(TransferSummary {
            mode: plan.mode,
            resumed_from: offset,
            bytes_written: received,
            final_size: transferred,
        })
    }
}

async fn open_append(destination: &Path) -> Result<File> {
    if let Some(parent) = destination.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| TransferError::fs(parent, e))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(destination)
        .await
        .map_err(|e| TransferError::fs(destination, e))
}

async fn flush(file: &mut File, destination: &Path) -> Result<()> {
    file.flush()
        .await
        .map_err(|e| TransferError::fs(destination, e))
}
