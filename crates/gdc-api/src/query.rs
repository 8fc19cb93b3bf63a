use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

use crate::error::Result;

const CASE_FIELDS: &str = "case_id,submitter_id";
const FILE_FIELDS: &str = "file_name,file_id,file_size";
const FILE_PAGE_SIZE: &str = "1000";

/// One hit of a `/cases` search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaseHit {
    pub case_id: String,
    #[serde(default)]
    pub submitter_id: Option<String>,
}

/// One hit of a `/files` search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileHit {
    pub file_id: String,
    pub file_name: String,
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl FileHit {
    pub fn is_slide(&self) -> bool {
        self.file_name.ends_with(crate::client::SLIDE_EXTENSION)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: HitPage<T>,
}

#[derive(Debug, Deserialize)]
struct HitPage<T> {
    hits: Vec<T>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct Pagination {
    total: u64,
}

/// Body of the `/cases` search for one submitter id.
pub fn case_query(submitter_id: &str) -> Value {
    json!({
        "filters": {
            "op": "in",
            "content": {
                "field": "submitter_id",
                "value": [submitter_id]
            }
        },
        "fields": CASE_FIELDS,
        "format": "json",
        "size": "1"
    })
}

/// Body of the `/files` search for every file attached to a case.
pub fn files_query(case_uuid: &str) -> Value {
    json!({
        "filters": {
            "op": "and",
            "content": [
                {
                    "op": "in",
                    "content": {
                        "field": "cases.case_id",
                        "value": [case_uuid]
                    }
                }
            ]
        },
        "fields": FILE_FIELDS,
        "format": "json",
        "size": FILE_PAGE_SIZE
    })
}

/// Extract `data.hits` from a search response body.
pub fn parse_hits<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    let page = envelope.data;

    if let Some(pagination) = page.pagination
        && pagination.total > page.hits.len() as u64
    {
        warn!(
            total = pagination.total,
            returned = page.hits.len(),
            "search result truncated to first page"
        );
    }

    Ok(page.hits)
}
