use std::time::Duration;

use gdc_transfer::{
    Executor, ExecutorOptions, HttpClient, TransferError, TransferOutcome, TransferRequest,
    TransferSummary, plan, retry_delay,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::ui::{ProgressTracker, ProgressTrackerConfig, Tracker};

/// Drives single-attempt transfers until they succeed, fail for good, or run
/// out of retries. Every attempt re-plans from the bytes on disk.
pub struct Downloader<C> {
    client: C,
    endpoint: String,
    options: ExecutorOptions,
    retries: u32,
    backoff: Duration,
    cancel: CancellationToken,
}

impl<C: HttpClient + Clone> Downloader<C> {
    pub fn new(
        client: C,
        endpoint: impl Into<String>,
        config: &Config,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            options: ExecutorOptions::default()
                .chunk_size(config.chunk_size)
                .cancel_token(cancel.clone()),
            retries: config.retries,
            backoff: config.retry_backoff(),
            cancel,
        }
    }

    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub async fn download(
        &self,
        request: &TransferRequest,
    ) -> Result<TransferSummary, TransferError> {
        let name = display_name(request);
        let mut attempt = 0;

        loop {
            let plan = plan(request.destination()).await?;
            let tracker = ProgressTracker::new(ProgressTrackerConfig {
                len: request.total_size(),
                position: plan.offset,
                message: name.clone(),
            });

            let executor = Executor::new(self.client.clone(), self.endpoint.clone())
                .with_options(self.options.clone().on_progress(tracker.callback()));

            match executor.execute(request, plan).await {
                TransferOutcome::Success(summary) => {
                    tracker.finish(Some(format!("{name} done")));
                    return Ok(summary);
                }
                TransferOutcome::Failed(err)
                    if err.is_resumable() && attempt < self.retries && !self.is_cancelled() =>
                {
                    tracker.abandon(format!("{name} interrupted"));
                    let delay = retry_delay(attempt, self.backoff);
                    attempt += 1;
                    warn!(
                        resource = request.resource_id(),
                        attempt,
                        retries = self.retries,
                        ?delay,
                        error = %err,
                        "retrying transfer"
                    );
                    tokio::time::sleep(delay).await;
                }
                TransferOutcome::Failed(err) => {
                    tracker.abandon(format!("{name} failed"));
                    if err.is_resumable() {
                        info!(
                            path = %request.destination().display(),
                            "partial file kept, rerun to resume"
                        );
                    }
                    return Err(err);
                }
            }
        }
    }
}

fn display_name(request: &TransferRequest) -> String {
    request
        .destination()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| request.resource_id().to_string())
}
