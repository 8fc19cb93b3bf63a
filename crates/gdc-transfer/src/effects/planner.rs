use std::io;
use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::data::ResumePlan;
use crate::error::{Result, TransferError};

/// Derive the resume offset from whatever already sits at `destination`.
///
/// Read-only: an absent file means a fresh transfer, an existing one means
/// resuming from its current length.
///
/// # Errors
///
/// Returns [`TransferError::Filesystem`] if the destination is a directory or
/// its metadata cannot be read.
pub async fn plan(destination: &Path) -> Result<ResumePlan> {
    match fs::metadata(destination).await {
        Ok(meta) if meta.is_dir() => Err(TransferError::fs(
            destination,
            io::Error::new(io::ErrorKind::InvalidInput, "destination is a directory"),
        )),
        Ok(meta) => {
            debug!(path = %destination.display(), offset = meta.len(), "resuming transfer");
            Ok(ResumePlan::resume(meta.len()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %destination.display(), "fresh transfer");
            Ok(ResumePlan::fresh())
        }
        Err(e) => Err(TransferError::fs(destination, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TransferMode;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_plan_absent_file_is_fresh() {
        let dir = TempDir::new().unwrap();
        let plan = plan(&dir.path().join("missing.svs")).await.unwrap();
        assert_eq!(plan.offset, 0);
        assert_eq!(plan.mode, TransferMode::Fresh);
    }

    #[tokio::test]
    async fn test_plan_existing_file_resumes_at_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.svs");
        std::fs::write(&path, vec![0u8; 40]).unwrap();

        let plan = plan(&path).await.unwrap();
        assert_eq!(plan.offset, 40);
        assert_eq!(plan.mode, TransferMode::Resume);
    }

    #[tokio::test]
    async fn test_plan_missing_parent_is_fresh() {
        let dir = TempDir::new().unwrap();
        let plan = plan(&dir.path().join("no/such/case/slide.svs")).await.unwrap();
        assert_eq!(plan, ResumePlan::fresh());
    }

    #[tokio::test]
    async fn test_plan_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = plan(dir.path()).await.unwrap_err();
        assert!(matches!(err, TransferError::Filesystem { .. }));
    }
}
