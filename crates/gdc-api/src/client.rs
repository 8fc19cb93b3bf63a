use serde_json::Value;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::query::{case_query, files_query, parse_hits, CaseHit, FileHit};

pub const GDC_BASE_URL: &str = "https://api.gdc.cancer.gov";

/// Extension of whole-slide images served by the GDC.
pub const SLIDE_EXTENSION: &str = ".svs";

/// Thin client over the `/cases` and `/files` search endpoints.
#[derive(Debug, Clone)]
pub struct GdcClient {
    http: reqwest::Client,
    base_url: String,
}

impl GdcClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prefix under which file contents are served, one path segment per file id.
    pub fn data_endpoint(&self) -> String {
        format!("{}/data", self.base_url)
    }

    /// Resolve a case submitter id (`TCGA-BR-4253`) to its UUID.
    ///
    /// Returns `Ok(None)` when the search has no hit.
    pub async fn case_uuid(&self, submitter_id: &str) -> Result<Option<String>> {
        let body = self.search("cases", &case_query(submitter_id)).await?;
        let hits: Vec<CaseHit> = parse_hits(&body)?;
        Ok(hits.into_iter().next().map(|hit| hit.case_id))
    }

    /// Every file attached to a case.
    pub async fn case_files(&self, case_uuid: &str) -> Result<Vec<FileHit>> {
        let body = self.search("files", &files_query(case_uuid)).await?;
        parse_hits(&body)
    }

    /// The `.svs` slide images attached to a case.
    pub async fn slide_files(&self, case_uuid: &str) -> Result<Vec<FileHit>> {
        let files = self.case_files(case_uuid).await?;
        Ok(files.into_iter().filter(FileHit::is_slide).collect())
    }

    async fn search(&self, endpoint: &str, query: &Value) -> Result<String> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "searching");

        let response = self.http.post(&url).json(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.text().await?)
    }
}
