use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use gdc_transfer::TransferRequest;

use super::Context;

#[derive(Args, Clone, Debug)]
pub struct FetchArg {
    /// GDC file UUID
    pub file_id: String,

    /// Destination file; an existing file is resumed
    pub dest: PathBuf,

    /// Expected size in bytes, if known
    #[arg(long)]
    pub size: Option<u64>,

    /// Extra attempts after a resumable failure (overrides config)
    #[arg(long)]
    pub retries: Option<u32>,
}

pub async fn run(arg: FetchArg, ctx: &Context) -> Result<()> {
    let (_, mut downloader) = ctx.remote()?;
    if let Some(retries) = arg.retries {
        downloader = downloader.retries(retries);
    }

    let request = TransferRequest::new(arg.file_id, arg.dest).expected_total_size(arg.size);
    let summary = downloader.download(&request).await?;

    println!(
        "{}: {} bytes ({} from byte {})",
        request.destination().display(),
        summary.final_size,
        summary.mode,
        summary.resumed_from
    );
    Ok(())
}
