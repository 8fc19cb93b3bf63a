use crate::data::plan::TransferMode;
use crate::error::TransferError;

/// What a successful attempt did to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSummary {
    pub mode: TransferMode,
    /// Offset the attempt started from.
    pub resumed_from: u64,
    /// Bytes appended during this attempt.
    pub bytes_written: u64,
    /// Destination length after the attempt.
    pub final_size: u64,
}

/// Terminal result of one execution attempt.
///
/// Failures are values rather than errors so the caller decides whether to
/// resume, abandon or alert. A failed attempt leaves its partial file on disk.
#[derive(Debug)]
pub enum TransferOutcome {
    Success(TransferSummary),
    Failed(TransferError),
}

impl TransferOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success(_))
    }

    pub fn summary(&self) -> Option<&TransferSummary> {
        match self {
            TransferOutcome::Success(summary) => Some(summary),
            TransferOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&TransferError> {
        match self {
            TransferOutcome::Success(_) => None,
            TransferOutcome::Failed(err) => Some(err),
        }
    }

    /// Convert into a `Result`, for callers that treat failure as fatal.
    pub fn into_result(self) -> crate::error::Result<TransferSummary> {
        match self {
            TransferOutcome::Success(summary) => Ok(summary),
            TransferOutcome::Failed(err) => Err(err),
        }
    }
}
