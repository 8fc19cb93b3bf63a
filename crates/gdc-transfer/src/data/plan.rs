use std::fmt;

/// Whether a transfer starts from nothing or continues an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// No destination file existed.
    Fresh,

    /// A destination file existed; its length is the resume offset.
    Resume,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Fresh => write!(f, "fresh"),
            TransferMode::Resume => write!(f, "resume"),
        }
    }
}

/// Where the next attempt starts, as derived from the destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumePlan {
    pub offset: u64,
    pub mode: TransferMode,
}

impl ResumePlan {
    pub fn fresh() -> Self {
        Self {
            offset: 0,
            mode: TransferMode::Fresh,
        }
    }

    pub fn resume(offset: u64) -> Self {
        Self {
            offset,
            mode: TransferMode::Resume,
        }
    }

    /// Returns `true` if the request must carry a `Range` header.
    #[must_use]
    pub fn needs_range(&self) -> bool {
        self.offset > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_plan_starts_at_zero() {
        let plan = ResumePlan::fresh();
        assert_eq!(plan.offset, 0);
        assert_eq!(plan.mode, TransferMode::Fresh);
        assert!(!plan.needs_range());
    }

    #[test]
    fn test_empty_existing_file_resumes_without_range() {
        let plan = ResumePlan::resume(0);
        assert_eq!(plan.mode, TransferMode::Resume);
        assert!(!plan.needs_range());
        assert!(ResumePlan::resume(40).needs_range());
    }
}
