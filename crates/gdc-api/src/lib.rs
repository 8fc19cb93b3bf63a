//! Case and file metadata lookups against the GDC REST API.
//!
//! Resolves TCGA case barcodes to case UUIDs and lists the slide images
//! attached to a case. Downloading the files themselves is left to
//! `gdc-transfer`; [`GdcClient::data_endpoint`] gives it the URL prefix.

mod barcode;
mod client;
mod error;
mod query;

pub use barcode::{case_code, unique_case_codes, CASE_CODE_LEN};
pub use client::{GdcClient, GDC_BASE_URL, SLIDE_EXTENSION};
pub use error::{ApiError, Result};
pub use query::{case_query, files_query, parse_hits, CaseHit, FileHit};
