use std::path::{Path, PathBuf};

/// One resource to be placed at one destination.
///
/// # Examples
///
/// ```
/// use gdc_transfer::TransferRequest;
///
/// let request = TransferRequest::new("2f4e1c0a", "data/TCGA-BR-4253/slide.svs")
///     .expected_total_size(Some(1_048_576));
/// assert_eq!(request.total_size(), Some(1_048_576));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    resource_id: String,
    destination: PathBuf,
    expected_total_size: Option<u64>,
}

impl TransferRequest {
    pub fn new(resource_id: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            resource_id: resource_id.into(),
            destination: destination.into(),
            expected_total_size: None,
        }
    }

    /// Set the size the complete resource is known to have.
    ///
    /// When set, the executor refuses to grow the destination past it and
    /// skips the request entirely if the file is already that long.
    #[must_use]
    pub fn expected_total_size(mut self, size: Option<u64>) -> Self {
        self.expected_total_size = size;
        self
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn total_size(&self) -> Option<u64> {
        self.expected_total_size
    }
}
