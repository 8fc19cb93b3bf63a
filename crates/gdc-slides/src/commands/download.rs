use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::Args;
use gdc_api::unique_case_codes;
use gdc_labels::read_image_list;
use gdc_transfer::TransferRequest;
use tracing::{error, info, warn};

use super::Context;

#[derive(Args, Clone, Debug)]
pub struct DownloadArg {
    /// CSV file with an `Image` column naming the slides to fetch
    #[arg(long, default_value = "test_list.csv")]
    pub list: PathBuf,

    /// Output directory (overrides config `data_dir`)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Extra attempts after a resumable failure (overrides config)
    #[arg(long)]
    pub retries: Option<u32>,
}

#[derive(Debug, Default)]
struct Report {
    completed: usize,
    skipped_cases: usize,
    failed: Vec<String>,
}

pub async fn run(arg: DownloadArg, ctx: &Context) -> Result<()> {
    let images = read_image_list(&arg.list)
        .with_context(|| format!("failed to read image list {}", arg.list.display()))?;
    if images.is_empty() {
        warn!(list = %arg.list.display(), "image list is empty, nothing to download");
        return Ok(());
    }

    let wanted: HashSet<&str> = images.iter().map(String::as_str).collect();
    let cases = unique_case_codes(images.iter().map(String::as_str));
    info!(images = images.len(), cases = cases.len(), "image list loaded");

    let (api, mut downloader) = ctx.remote()?;
    if let Some(retries) = arg.retries {
        downloader = downloader.retries(retries);
    }
    let out = arg.out.unwrap_or_else(|| ctx.config.data_dir.clone());
    let mut report = Report::default();

    for case in &cases {
        if downloader.is_cancelled() {
            break;
        }

        let case_uuid = match api.case_uuid(case).await {
            Ok(Some(uuid)) => uuid,
            Ok(None) => {
                warn!(case = %case, "case not found, skipping");
                report.skipped_cases += 1;
                continue;
            }
            Err(err) => {
                warn!(case = %case, error = %err, "case lookup failed, skipping");
                report.skipped_cases += 1;
                continue;
            }
        };

        let files = match api.slide_files(&case_uuid).await {
            Ok(files) => files,
            Err(err) => {
                warn!(case = %case, error = %err, "file listing failed, skipping");
                report.skipped_cases += 1;
                continue;
            }
        };

        for file in files
            .into_iter()
            .filter(|f| wanted.contains(f.file_name.as_str()))
        {
            let request = TransferRequest::new(&file.file_id, out.join(case).join(&file.file_name))
                .expected_total_size(file.file_size);

            match downloader.download(&request).await {
                Ok(_) => report.completed += 1,
                Err(err) => {
                    error!(case = %case, file = %file.file_name, error = %err, "download failed");
                    report.failed.push(file.file_name);
                }
            }

            if downloader.is_cancelled() {
                break;
            }
        }
    }

    println!(
        "{} downloaded, {} failed, {} cases skipped",
        report.completed,
        report.failed.len(),
        report.skipped_cases
    );

    if downloader.is_cancelled() {
        bail!("interrupted, rerun to resume");
    }
    if !report.failed.is_empty() {
        bail!("{} file(s) failed: {}", report.failed.len(), report.failed.join(", "));
    }
    Ok(())
}
